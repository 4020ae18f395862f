// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads and the fallback pointer delegate.

use kurbo::Point;

/// A low-level pointer event: one position in host coordinates.
///
/// The same payload serves start, drag, and end; which of the three it is
/// comes from the dispatcher entry point it arrives through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position.
    pub pos: Point,
}

impl PointerEvent {
    /// Creates an event at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
        }
    }
}

/// An opaque key identifier assigned by the host input system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

/// A keyboard event, routed to the focus target only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// A key went down.
    Down(KeyCode),
    /// A key came up.
    Up(KeyCode),
    /// A character was typed (post key-repeat and layout translation).
    Typed(char),
}

/// Receiver for pointer events no mounted root claimed.
///
/// Every unclaimed event is forwarded somewhere: when the application does
/// not supply a delegate, [`NoopDelegate`] stands in. All methods default
/// to doing nothing so delegates implement only what they care about.
pub trait PointerDelegate {
    /// An unclaimed pointer press.
    fn pointer_start(&mut self, _event: &PointerEvent) {}
    /// A pointer move while no root holds capture.
    fn pointer_drag(&mut self, _event: &PointerEvent) {}
    /// A pointer release while no root holds capture.
    fn pointer_end(&mut self, _event: &PointerEvent) {}
}

/// The delegate used when none is supplied: ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDelegate;

impl PointerDelegate for NoopDelegate {}
