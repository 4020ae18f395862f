// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Interface: the event dispatcher that integrates Canopy UI roots
//! with a host game loop.
//!
//! Multiple independent UI trees ([`Root`]s) can be mounted into a host
//! scene graph at once. One [`Interface`] routes low-level pointer and
//! keyboard events to exactly the right root (and, inside it, the right
//! widget) while preserving two pieces of cross-event state:
//!
//! - **Pointer capture**: the root that claims a starting pointer event
//!   receives every drag and end event of that gesture, wherever the
//!   pointer wanders. One gesture, one capture.
//! - **Keyboard focus**: a single observable slot naming the widget that
//!   receives key events. Every pointer release drops focus first; a
//!   focusable widget that was clicked re-acquires it during its own end
//!   handling.
//!
//! The dispatcher also owns a FIFO queue of deferred actions drained at
//! the end of each render pass, after all roots have validated. Actions
//! enqueued while the queue drains run on the next pass, and one failing
//! action never takes down its batch.
//!
//! ## Routing at a glance
//!
//! | event         | recipient                                          |
//! |---------------|----------------------------------------------------|
//! | pointer start | first claiming root, reverse mount order; else delegate |
//! | pointer drag  | capture target unconditionally; else delegate      |
//! | pointer end   | clears focus, then capture target; else delegate   |
//! | key           | focus target; else silently dropped                |
//!
//! ## Wiring into a host loop
//!
//! Create one `Interface` per application, mount roots with
//! [`Interface::create_root`] (their layers land wherever you choose in
//! the host scene), feed input through [`Interface::pointer_start`] /
//! [`Interface::pointer_drag`] / [`Interface::pointer_end`] /
//! [`Interface::key`], and call [`Interface::update`] and
//! [`Interface::paint`] from the host's frame callbacks.
//!
//! Everything is single-threaded and synchronous; see the crate-level
//! docs of `canopy_scene` for the drawable contract roots render into.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod events;
mod focus;
mod interface;

pub use events::{KeyCode, KeyEvent, NoopDelegate, PointerDelegate, PointerEvent};
pub use focus::{FocusObserver, FocusScope, FocusSlot, FocusTarget};
pub use interface::{Action, ActionError, Interface, Root, RootId};
