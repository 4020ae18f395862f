// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Gesture: the per-widget press/drag/release state machine.
//!
//! [`PressGesture`] converts raw press, drag, and release coordinates into
//! a selected/pressed visual state and a commit ("clicked") decision. It is
//! purely local to one widget: it knows nothing about roots, dispatchers,
//! or sibling widgets, and it has no error paths — selection and commit are
//! plain state transitions.
//!
//! ## States
//!
//! Conceptually the machine is Idle → Pressed-Inside ⇄ Pressed-Outside,
//! realized as an `enabled` flag plus a transient `selected` flag that
//! resets on every full press→release cycle.
//!
//! - **Press** (already hit-tested by the caller): while enabled, mark
//!   selected. The caller invalidates its visuals and runs its press hook.
//! - **Drag**: recompute `selected = enabled && bounds.contains(pos)`. A
//!   change is reported so the caller can invalidate; no hook runs.
//! - **Release**: if selected at the instant of release (regardless of
//!   the release coordinate), clear selected and report a commit. The
//!   commit tracks the last drag-visual state the user actually saw, so
//!   behavior never disagrees with what was on screen.
//!
//! Disabled widgets ignore press and drag entirely; selection never
//! activates.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_gesture::PressGesture;
//! use kurbo::{Point, Rect};
//!
//! let bounds = Rect::new(0.0, 0.0, 40.0, 20.0);
//! let mut gesture = PressGesture::new();
//!
//! assert!(gesture.press());
//! // Drag off the widget: deselects (caller repaints).
//! assert_eq!(gesture.drag(Point::new(100.0, 5.0), bounds), Some(false));
//! // Drag back on: reselects.
//! assert_eq!(gesture.drag(Point::new(10.0, 5.0), bounds), Some(true));
//! // Release while selected commits the click, wherever the pointer is.
//! assert!(gesture.release());
//! assert!(!gesture.is_selected());
//! ```

#![no_std]

use kurbo::{Point, Rect};

/// Press/drag/release state for one interactive widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressGesture {
    enabled: bool,
    selected: bool,
}

impl Default for PressGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl PressGesture {
    /// Creates an enabled, unselected gesture.
    pub const fn new() -> Self {
        Self {
            enabled: true,
            selected: false,
        }
    }

    /// Returns `true` while the pressed visual state is active.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns `true` if the widget accepts presses.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the widget. Disabling does not clear an active
    /// selection by itself; the next drag recomputes it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// A pointer press landed on the widget.
    ///
    /// Returns `true` if the press activated (the widget was enabled), in
    /// which case the caller should invalidate its visuals and run its
    /// press hook. Disabled widgets ignore the press entirely.
    pub fn press(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.selected = true;
        true
    }

    /// The pointer moved while the button is held.
    ///
    /// Recomputes the selected state from the current position and the
    /// widget's bounds. Returns `Some(new_selected)` when the state
    /// changed (the caller invalidates; no hook fires), `None` otherwise.
    pub fn drag(&mut self, pos: Point, bounds: Rect) -> Option<bool> {
        let selected = self.enabled && bounds.contains(pos);
        if selected != self.selected {
            self.selected = selected;
            Some(selected)
        } else {
            None
        }
    }

    /// The pointer was released.
    ///
    /// Returns `true` when the gesture commits: the widget was selected at
    /// the instant of release. The release coordinate is deliberately not
    /// consulted — only drag changes affect the visual state, and the
    /// commit must match what the user saw. Always resets the selection.
    pub fn release(&mut self) -> bool {
        if self.selected {
            self.selected = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 40.0, 20.0);

    fn inside() -> Point {
        Point::new(10.0, 10.0)
    }

    fn outside() -> Point {
        Point::new(100.0, 100.0)
    }

    #[test]
    fn press_selects_when_enabled() {
        let mut g = PressGesture::new();
        assert!(g.press());
        assert!(g.is_selected());
    }

    #[test]
    fn disabled_widget_ignores_press() {
        let mut g = PressGesture::new();
        g.set_enabled(false);
        assert!(!g.press());
        assert!(!g.is_selected());
    }

    #[test]
    fn drag_outside_deselects_and_back_reselects() {
        let mut g = PressGesture::new();
        g.press();
        assert_eq!(g.drag(outside(), BOUNDS), Some(false));
        assert_eq!(g.drag(inside(), BOUNDS), Some(true));
    }

    #[test]
    fn drag_reports_changes_only() {
        let mut g = PressGesture::new();
        g.press();
        assert_eq!(g.drag(inside(), BOUNDS), None);
        assert_eq!(g.drag(outside(), BOUNDS), Some(false));
        assert_eq!(g.drag(outside(), BOUNDS), None);
    }

    #[test]
    fn release_inside_commits() {
        let mut g = PressGesture::new();
        g.press();
        assert!(g.release());
        assert!(!g.is_selected());
    }

    #[test]
    fn release_after_drag_out_does_not_commit() {
        let mut g = PressGesture::new();
        g.press();
        g.drag(outside(), BOUNDS);
        assert!(!g.release());
    }

    #[test]
    fn release_commits_on_last_seen_state_not_coordinates() {
        // Drag out, drag back in, then release far away: the user last saw
        // the widget in its pressed state, so the click commits.
        let mut g = PressGesture::new();
        g.press();
        g.drag(outside(), BOUNDS);
        g.drag(inside(), BOUNDS);
        assert!(g.release());
    }

    #[test]
    fn release_without_press_is_a_no_op() {
        let mut g = PressGesture::new();
        assert!(!g.release());
    }

    #[test]
    fn state_resets_across_cycles() {
        let mut g = PressGesture::new();
        g.press();
        assert!(g.release());
        // A fresh cycle starts clean.
        assert!(!g.is_selected());
        g.press();
        g.drag(outside(), BOUNDS);
        assert!(!g.release());
    }

    #[test]
    fn disabling_mid_gesture_deselects_on_next_drag() {
        let mut g = PressGesture::new();
        g.press();
        g.set_enabled(false);
        assert_eq!(g.drag(inside(), BOUNDS), Some(false));
        assert!(!g.release());
    }

    #[test]
    fn boundary_points_follow_rect_containment() {
        let mut g = PressGesture::new();
        g.press();
        // Rect::contains is half-open: the min edge is inside, the max
        // edge is not.
        assert_eq!(g.drag(Point::new(0.0, 0.0), BOUNDS), None);
        assert_eq!(g.drag(Point::new(40.0, 20.0), BOUNDS), Some(false));
    }
}
