// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout seam consumed by [`Panel`](crate::Panel).

use alloc::vec::Vec;

use kurbo::{Point, Size};

/// Places a panel's children given their resolved sizes.
///
/// The panel measures every child (content size inflated by its resolved
/// background insets) and hands the sizes over in child order; the layout
/// returns one origin per child, in the same order, relative to the panel.
/// Layouts are pure placement strategies and hold no per-child state.
pub trait Layout {
    /// Returns an origin for each of the given child sizes.
    fn arrange(&self, sizes: &[Size]) -> Vec<Point>;
}

/// Stacks children top to bottom, left-aligned, with a fixed gap between
/// consecutive children.
#[derive(Clone, Copy, Debug, Default)]
pub struct Column {
    /// Vertical space between consecutive children.
    pub gap: f64,
}

impl Column {
    /// A column with the given gap.
    pub const fn new(gap: f64) -> Self {
        Self { gap }
    }
}

impl Layout for Column {
    fn arrange(&self, sizes: &[Size]) -> Vec<Point> {
        let mut origins = Vec::with_capacity(sizes.len());
        let mut y = 0.0;
        for size in sizes {
            origins.push(Point::new(0.0, y));
            y += size.height + self.gap;
        }
        origins
    }
}
