// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal concrete widget layer over the Canopy dispatch core.
//!
//! The core crates decide *who* receives an event and *when* drawable
//! resources exist; this crate supplies just enough of a widget vocabulary
//! to use them end to end:
//!
//! - [`Panel`]: a flat container of buttons that mounts as one dispatcher
//!   root, routing pointer gestures to the pressed button and keyboard
//!   events to the focused one.
//! - [`Button`]: a clickable widget with a style class, a press gesture,
//!   and click/key hooks.
//! - [`Layout`] and [`StyleSheet`]: the placement and styling seams the
//!   panel consumes, with one stock implementation of each ([`Column`],
//!   [`MapStyles`]).
//!
//! ## Usage
//!
//! Build a panel around a scene group, add buttons, mount it on an
//! [`Interface`](canopy_interface::Interface), and drive the interface
//! from the host loop. The panel lays out and rebuilds backgrounds during
//! [`Interface::paint`](canopy_interface::Interface::paint), so mutations
//! between frames are cheap; nothing touches the scene until validation.
//!
//! ## Features
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod button;
mod layout;
mod panel;
mod style;

pub use button::{Button, ClickHook, ElementFlags, KeyHook, PressHook, WidgetId};
pub use layout::{Column, Layout};
pub use panel::Panel;
pub use style::{MapStyles, StyleSheet};
