// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single keyboard-focus slot and the scoped handle roots use to
//! re-acquire focus during dispatch.
//!
//! There is at most one focus target per dispatcher. The slot is plain
//! dispatcher-owned state, never a process-wide singleton. Change
//! notification is an explicit callback handed to whichever component
//! needs to react (a text input toggling its caret, say), not a reactive
//! framework primitive. The observer slot is last-write-wins, like the
//! focus value itself.

use alloc::boxed::Box;

use crate::interface::RootId;

/// The current keyboard-event recipient: a widget within a mounted root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusTarget<W> {
    /// The root that owns the focused widget.
    pub root: RootId,
    /// The focused widget, in the root's own widget namespace.
    pub widget: W,
}

/// Observer invoked with the old and new focus targets on every change.
pub type FocusObserver<W> = Box<dyn FnMut(Option<FocusTarget<W>>, Option<FocusTarget<W>>)>;

/// A single observable focus slot.
pub struct FocusSlot<W: Copy + Eq> {
    current: Option<FocusTarget<W>>,
    observer: Option<FocusObserver<W>>,
}

impl<W: Copy + Eq> Default for FocusSlot<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Copy + Eq> FocusSlot<W> {
    /// Creates an empty slot with no observer.
    pub fn new() -> Self {
        Self {
            current: None,
            observer: None,
        }
    }

    /// The current focus target, if any.
    pub fn current(&self) -> Option<FocusTarget<W>> {
        self.current
    }

    /// Replaces the focus target. Last write wins; the observer sees the
    /// old and new values when they differ.
    pub fn set(&mut self, target: Option<FocusTarget<W>>) {
        if self.current == target {
            return;
        }
        let old = self.current;
        self.current = target;
        if let Some(observer) = &mut self.observer {
            observer(old, target);
        }
    }

    /// Drops the focus target, if any.
    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Installs the change observer, replacing any previous one.
    pub fn observe(&mut self, observer: impl FnMut(Option<FocusTarget<W>>, Option<FocusTarget<W>>) + 'static) {
        self.observer = Some(Box::new(observer));
    }
}

impl<W: Copy + Eq + core::fmt::Debug> core::fmt::Debug for FocusSlot<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FocusSlot")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// A scoped view of the focus slot handed to one root during dispatch.
///
/// Roots never see the dispatcher; they get this handle so a widget can
/// re-acquire focus as part of its own end-of-click handling (the
/// dispatcher drops focus on every pointer release first).
#[derive(Debug)]
pub struct FocusScope<'a, W: Copy + Eq> {
    slot: &'a mut FocusSlot<W>,
    root: RootId,
}

impl<'a, W: Copy + Eq> FocusScope<'a, W> {
    /// Creates a scope for one root. Normally only the dispatcher does
    /// this; it is public so roots can be driven directly in tests.
    pub fn new(slot: &'a mut FocusSlot<W>, root: RootId) -> Self {
        Self { slot, root }
    }

    /// The root this scope is bound to.
    pub fn root(&self) -> RootId {
        self.root
    }

    /// The dispatcher-wide focus target, if any.
    pub fn current(&self) -> Option<FocusTarget<W>> {
        self.slot.current()
    }

    /// Focuses a widget of this root.
    pub fn focus(&mut self, widget: W) {
        self.slot.set(Some(FocusTarget {
            root: self.root,
            widget,
        }));
    }

    /// Returns `true` if the given widget of this root holds focus.
    pub fn is_focused(&self, widget: W) -> bool {
        self.slot.current()
            == Some(FocusTarget {
                root: self.root,
                widget,
            })
    }

    /// Drops focus, whoever holds it.
    pub fn clear(&mut self) {
        self.slot.clear();
    }
}
