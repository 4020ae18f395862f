// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatcher: root mounting, pointer capture, keyboard routing, and
//! the per-frame render pass.

use alloc::boxed::Box;
use alloc::vec::Vec;

use smallvec::SmallVec;

use canopy_scene::{SceneError, SceneGraph};

use crate::events::{KeyEvent, NoopDelegate, PointerDelegate, PointerEvent};
use crate::focus::{FocusScope, FocusSlot, FocusTarget};

/// Identifier for a mounted root.
///
/// Slot index plus generation, so a handle to a destroyed root never
/// aliases a root that later reuses the slot. A capture or focus reference
/// left dangling by a mid-gesture [`Interface::destroy_root`] therefore
/// fails the liveness check instead of dispatching into a torn-down tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RootId(u32, u32);

impl RootId {
    #[cfg(test)]
    pub(crate) const fn test_id(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }
}

/// The capability surface the dispatcher needs from a mounted UI subtree.
///
/// A root owns one drawable container (its [`layer`](Root::layer)), a tree
/// of widgets, and whatever layout/style machinery it uses internally. The
/// dispatcher never looks inside: it asks the root to attempt to consume a
/// starting pointer event, forwards drag/end events unconditionally once
/// the root has captured, routes keyboard events to a focused widget, and
/// asks the root to reconcile layout/style once per render pass.
///
/// Heterogeneous root kinds are expected to be a closed set; implement
/// this trait on an enum when one dispatcher hosts several.
pub trait Root<S: SceneGraph> {
    /// Widget identifier within this root, used as the focus key.
    type Widget: Copy + Eq + core::fmt::Debug;

    /// The drawable container this root renders into.
    fn layer(&self) -> S::Group;

    /// Attempts to consume a starting pointer event.
    ///
    /// Returns `true` if a widget claimed it, which makes this root the
    /// capture target for the remainder of the gesture.
    fn dispatch_pointer_start(
        &mut self,
        scene: &mut S,
        event: &PointerEvent,
        focus: FocusScope<'_, Self::Widget>,
    ) -> bool;

    /// A drag event for a gesture this root captured. The position may be
    /// far outside the originally pressed widget; that is legal.
    fn dispatch_pointer_drag(
        &mut self,
        scene: &mut S,
        event: &PointerEvent,
        focus: FocusScope<'_, Self::Widget>,
    );

    /// The end of a gesture this root captured. Focus has already been
    /// cleared; a focusable widget re-acquires it through `focus` here.
    fn dispatch_pointer_end(
        &mut self,
        scene: &mut S,
        event: &PointerEvent,
        focus: FocusScope<'_, Self::Widget>,
    );

    /// A keyboard event for the focused widget.
    fn dispatch_key(&mut self, scene: &mut S, widget: Self::Widget, event: &KeyEvent);

    /// Reconciles layout/style if the root was invalidated since the last
    /// pass. Called exactly once per render pass, in mount order.
    fn validate(&mut self, scene: &mut S);
}

/// Error reported by a failed deferred action.
///
/// One action failing is logged and isolated; it never aborts the rest of
/// the batch or the render pass.
#[derive(Clone, Debug)]
pub struct ActionError {
    message: alloc::borrow::Cow<'static, str>,
}

impl ActionError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<alloc::borrow::Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for ActionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl core::error::Error for ActionError {}

/// A unit of work queued for execution after the next render-pass
/// validation completes.
pub type Action<S, R> = Box<dyn FnOnce(&mut Interface<S, R>, &mut S) -> Result<(), ActionError>>;

struct RootSlot<R> {
    generation: u32,
    root: Option<R>,
}

/// The dispatcher that integrates Canopy roots with a host game loop.
///
/// Owns the set of mounted roots (insertion order is significant: later
/// mounts are treated as visually on top), the current pointer-capture
/// target, the keyboard-focus slot, and a FIFO queue of deferred actions.
/// Construct one per host application instance and call
/// [`update`](Interface::update) and [`paint`](Interface::paint) from the
/// host's frame callbacks; feed pointer and keyboard input through the
/// `pointer_*` and [`key`](Interface::key) entry points.
///
/// All methods are synchronous and single-threaded; every operation runs
/// to completion before returning.
pub struct Interface<S: SceneGraph, R: Root<S>> {
    slots: Vec<RootSlot<R>>,
    free: Vec<u32>,
    /// Mounted roots in mount order.
    mounted: Vec<RootId>,
    capture: Option<RootId>,
    focus: FocusSlot<R::Widget>,
    actions: Vec<Action<S, R>>,
    delegate: Box<dyn PointerDelegate>,
}

impl<S: SceneGraph, R: Root<S>> Default for Interface<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneGraph, R: Root<S>> Interface<S, R> {
    /// Creates a dispatcher whose unclaimed pointer events are dropped.
    pub fn new() -> Self {
        Self::with_delegate(Box::new(NoopDelegate))
    }

    /// Creates a dispatcher that forwards unclaimed pointer events to the
    /// supplied delegate.
    pub fn with_delegate(delegate: Box<dyn PointerDelegate>) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            mounted: Vec::new(),
            capture: None,
            focus: FocusSlot::new(),
            actions: Vec::new(),
            delegate,
        }
    }

    /// Mounts a root at the tail of the mount list (visually topmost) and,
    /// when a parent container is supplied, attaches the root's layer to it.
    pub fn create_root(&mut self, scene: &mut S, root: R, parent: Option<S::Group>) -> RootId {
        let layer = root.layer();
        if let Some(parent) = parent {
            scene.attach(parent, layer);
        }
        let id = self.alloc(root);
        self.mounted.push(id);
        log::debug!("mounted root {id:?}");
        id
    }

    /// Unmounts a root, detaching its layer from any parent, and hands the
    /// intact root back for reuse. Its widgets and drawable resources stay
    /// alive; remount it later with [`create_root`](Interface::create_root)
    /// or tear it down yourself.
    pub fn remove_root(&mut self, scene: &mut S, id: RootId) -> Option<R> {
        let root = self.take(id)?;
        scene.detach(root.layer());
        self.forget(id);
        Some(root)
    }

    /// Unmounts a root and destroys its layer, which transitively destroys
    /// every contained widget's drawable resources. Irreversible; use
    /// [`remove_root`](Interface::remove_root) to keep the root for reuse.
    pub fn destroy_root(&mut self, scene: &mut S, id: RootId) -> Result<(), SceneError> {
        let Some(root) = self.take(id) else {
            return Ok(());
        };
        self.forget(id);
        log::debug!("destroying root {id:?}");
        scene.destroy_group(root.layer())
    }

    /// Returns `true` while the id refers to a mounted root.
    pub fn is_mounted(&self, id: RootId) -> bool {
        self.root_ref(id).is_some()
    }

    /// Mounted roots in mount order.
    pub fn roots(&self) -> impl Iterator<Item = RootId> + '_ {
        self.mounted.iter().copied()
    }

    /// Number of mounted roots.
    pub fn root_count(&self) -> usize {
        self.mounted.len()
    }

    /// Shared access to a mounted root.
    pub fn root(&self, id: RootId) -> Option<&R> {
        self.root_ref(id)
    }

    /// Exclusive access to a mounted root.
    pub fn root_mut(&mut self, id: RootId) -> Option<&mut R> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        slot.root.as_mut()
    }

    /// The current keyboard-focus target, if any.
    pub fn focused(&self) -> Option<FocusTarget<R::Widget>> {
        self.focus.current()
    }

    /// Focuses a widget of a mounted root.
    pub fn focus(&mut self, root: RootId, widget: R::Widget) {
        if self.is_mounted(root) {
            self.focus.set(Some(FocusTarget { root, widget }));
        }
    }

    /// Drops keyboard focus, if any.
    pub fn clear_focus(&mut self) {
        self.focus.clear();
    }

    /// Installs the focus-change observer, replacing any previous one.
    /// The observer sees the old and new targets on every change.
    pub fn on_focus_changed(
        &mut self,
        observer: impl FnMut(Option<FocusTarget<R::Widget>>, Option<FocusTarget<R::Widget>>) + 'static,
    ) {
        self.focus.observe(observer);
    }

    /// Queues an action to run after the next render pass validates all
    /// roots. Callable from anywhere, including from an action currently
    /// being drained; such late arrivals run on the pass after this one.
    ///
    /// Processing deferred actions is not free, so don't lean on this
    /// every frame.
    pub fn defer(
        &mut self,
        action: impl FnOnce(&mut Self, &mut S) -> Result<(), ActionError> + 'static,
    ) {
        self.actions.push(Box::new(action));
    }

    /// Per-frame update hook. Reserved; currently does nothing.
    pub fn update(&mut self, _delta: f64) {}

    /// Runs the render pass: validates every mounted root exactly once in
    /// mount order, then drains the deferred-action queue.
    ///
    /// The queue is snapshotted and cleared before any action runs, so an
    /// action enqueuing another action schedules it for the *next* pass.
    /// A failing action is logged and skipped; the rest of the batch still
    /// runs.
    pub fn paint(&mut self, scene: &mut S, _alpha: f64) {
        for i in 0..self.mounted.len() {
            let id = self.mounted[i];
            if let Some(root) = self.root_mut(id) {
                root.validate(scene);
            }
        }

        if self.actions.is_empty() {
            return;
        }
        let batch = core::mem::take(&mut self.actions);
        for action in batch {
            if let Err(err) = action(self, scene) {
                log::warn!("deferred action failed: {err}");
            }
        }
    }

    /// Routes a starting pointer event.
    ///
    /// Roots are tried in reverse mount order (a more recently mounted
    /// root is probably on top) and the first to claim the event becomes
    /// the capture target for the rest of the gesture. Unclaimed events go
    /// to the fallback delegate.
    pub fn pointer_start(&mut self, scene: &mut S, event: &PointerEvent) {
        // Snapshot the mount list so dispatch hooks that mount or unmount
        // roots can't disturb the walk.
        let order: SmallVec<[RootId; 8]> = SmallVec::from_slice(&self.mounted);
        for &id in order.iter().rev() {
            if let Some((root, focus)) = self.root_and_focus(id) {
                if root.dispatch_pointer_start(scene, event, focus) {
                    self.capture = Some(id);
                    return;
                }
            }
        }
        self.delegate.pointer_start(event);
    }

    /// Routes a pointer drag: unconditionally to the capture target if one
    /// exists (whatever the coordinates), otherwise to the delegate.
    pub fn pointer_drag(&mut self, scene: &mut S, event: &PointerEvent) {
        if let Some(id) = self.capture {
            if let Some((root, focus)) = self.root_and_focus(id) {
                root.dispatch_pointer_drag(scene, event, focus);
                return;
            }
            // The capturing root went away mid-gesture; drop the capture
            // and let the rest of the gesture fall through.
            self.capture = None;
        }
        self.delegate.pointer_drag(event);
    }

    /// Routes a pointer release.
    ///
    /// Focus is always dropped first, before any dispatch, whether or not
    /// a root holds capture. If the release lands on a focusable widget,
    /// that widget re-acquires focus in its own end handling. The capture
    /// target, if any, receives the event and is then released: one
    /// gesture, one capture.
    pub fn pointer_end(&mut self, scene: &mut S, event: &PointerEvent) {
        self.focus.clear();
        if let Some(id) = self.capture.take() {
            if let Some((root, focus)) = self.root_and_focus(id) {
                root.dispatch_pointer_end(scene, event, focus);
                return;
            }
        }
        self.delegate.pointer_end(event);
    }

    /// Routes a keyboard event to the focus target. With no focus target
    /// the event is silently dropped; there is no keyboard delegate.
    pub fn key(&mut self, scene: &mut S, event: &KeyEvent) {
        let Some(target) = self.focus.current() else {
            return;
        };
        if let Some(root) = self.root_mut(target.root) {
            root.dispatch_key(scene, target.widget, event);
        }
    }

    fn alloc(&mut self, root: R) -> RootId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.root = Some(root);
            RootId(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "root count stays far below u32::MAX"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(RootSlot {
                generation: 1,
                root: Some(root),
            });
            RootId(idx, 1)
        }
    }

    /// Frees a slot and removes the id from the mount list.
    fn take(&mut self, id: RootId) -> Option<R> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        let root = slot.root.take()?;
        self.free.push(id.0);
        self.mounted.retain(|m| *m != id);
        Some(root)
    }

    /// Drops any capture or focus reference into a departed root.
    fn forget(&mut self, id: RootId) {
        if self.capture == Some(id) {
            self.capture = None;
        }
        if self.focus.current().is_some_and(|t| t.root == id) {
            self.focus.clear();
        }
    }

    fn root_ref(&self, id: RootId) -> Option<&R> {
        let slot = self.slots.get(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        slot.root.as_ref()
    }

    /// Splits the borrow so a root can be dispatched to while holding a
    /// scoped handle onto the focus slot.
    fn root_and_focus(&mut self, id: RootId) -> Option<(&mut R, FocusScope<'_, R::Widget>)> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        if slot.generation != id.1 {
            return None;
        }
        let root = slot.root.as_mut()?;
        Some((root, FocusScope::new(&mut self.focus, id)))
    }
}

impl<S: SceneGraph, R: Root<S> + core::fmt::Debug> core::fmt::Debug for Interface<S, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Interface")
            .field("mounted", &self.mounted)
            .field("capture", &self.capture)
            .field("focus", &self.focus)
            .field("pending_actions", &self.actions.len())
            .finish_non_exhaustive()
    }
}
