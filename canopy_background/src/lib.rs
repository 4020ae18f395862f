// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Background: reusable border+fill descriptions and their per-size
//! drawable instances.
//!
//! A [`Background`] is an immutable template: four non-negative insets plus
//! a fill policy. Style rules own templates and many widgets may share one
//! (cloning is cheap; image blobs are reference-counted). A template does
//! nothing on its own — when a widget's size is finalized during layout
//! validation, the widget calls [`Background::instantiate`] with its total
//! size to materialize a [`BackgroundInstance`]: live drawable nodes sized
//! to that exact width and height.
//!
//! Instances are destroyed when the widget is re-sized, re-styled, or torn
//! down. The template never destroys them.
//!
//! ## Sizing policy
//!
//! Insets inflate a content size by simple addition: a `(100, 50)` content
//! size with uniform insets of `5` becomes a `(110, 60)` total size, and
//! the size handed to `instantiate` must already include the insets.
//! Rasterized surface dimensions round **up** from the floating-point size
//! so no sub-pixel gap opens at the edges.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_background::Background;
//! use canopy_scene::{MemoryScene, SceneGraph};
//! use kurbo::Size;
//! use peniko::Color;
//!
//! let bg = Background::solid_uniform(Color::BLACK, 5.0);
//! let total = bg.add_insets(Size::new(100.0, 50.0));
//! assert_eq!(total, Size::new(110.0, 60.0));
//!
//! let mut scene = MemoryScene::new();
//! let mut instance = bg.instantiate(&mut scene, total);
//! let panel = scene.create_group();
//! instance.add_to(&mut scene, panel);
//!
//! // Destroy is idempotent; the nodes are released exactly once.
//! instance.destroy(&mut scene).unwrap();
//! instance.destroy(&mut scene).unwrap();
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Insets, Size};
use peniko::{Color, Extend, ImageData, ImageSampler};
use smallvec::{SmallVec, smallvec};

use canopy_scene::{SceneError, SceneGraph, SolidDesc, TiledDesc};

/// The depth at which background nodes render. Content renders at the
/// default depth of zero, so backgrounds always end up behind it no matter
/// the insertion order.
pub const BACKGROUND_DEPTH: f32 = -10.0;

/// A background fill policy.
#[derive(Clone, Debug)]
pub enum Fill {
    /// A solid color filling the whole background rectangle.
    Solid(Color),
    /// An image repeated on both axes.
    Tiled(ImageData),
}

/// An immutable, shareable border+fill template.
#[derive(Clone, Debug)]
pub struct Background {
    insets: Insets,
    fill: Fill,
}

impl Background {
    /// Creates a background with the given fill and insets.
    ///
    /// Insets must be non-negative.
    pub fn new(fill: Fill, insets: Insets) -> Self {
        debug_assert!(
            insets.x0 >= 0.0 && insets.y0 >= 0.0 && insets.x1 >= 0.0 && insets.y1 >= 0.0,
            "background insets must be non-negative"
        );
        Self { insets, fill }
    }

    /// A solid background with no insets.
    pub fn solid(color: Color) -> Self {
        Self::new(Fill::Solid(color), Insets::ZERO)
    }

    /// A solid background with uniform insets.
    pub fn solid_uniform(color: Color, inset: f64) -> Self {
        Self::new(Fill::Solid(color), Insets::uniform(inset))
    }

    /// A solid background with per-side insets.
    pub fn solid_insets(color: Color, insets: Insets) -> Self {
        Self::new(Fill::Solid(color), insets)
    }

    /// A tiled-image background with no insets.
    pub fn tiled(image: ImageData) -> Self {
        Self::new(Fill::Tiled(image), Insets::ZERO)
    }

    /// A tiled-image background with per-side insets.
    pub fn tiled_insets(image: ImageData, insets: Insets) -> Self {
        Self::new(Fill::Tiled(image), insets)
    }

    /// This template's insets.
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// This template's fill policy.
    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    /// This background's adjustment to an element's width.
    pub fn width(&self) -> f64 {
        self.insets.x0 + self.insets.x1
    }

    /// This background's adjustment to an element's height.
    pub fn height(&self) -> f64 {
        self.insets.y0 + self.insets.y1
    }

    /// Adds this background's insets to a content size, yielding the total
    /// size a widget occupies.
    pub fn add_insets(&self, size: Size) -> Size {
        Size::new(size.width + self.width(), size.height + self.height())
    }

    /// Materializes this template at a concrete size.
    ///
    /// The supplied size must already include this template's insets (see
    /// [`Background::add_insets`]). The template itself is unchanged; the
    /// returned instance owns the created nodes and must eventually be
    /// destroyed by its owner.
    pub fn instantiate<S: SceneGraph>(
        &self,
        scene: &mut S,
        size: Size,
    ) -> BackgroundInstance<S::Node> {
        let node = match &self.fill {
            Fill::Solid(color) => scene.create_solid(SolidDesc {
                color: *color,
                surface_width: ceil_to_u32(size.width),
                surface_height: ceil_to_u32(size.height),
                painted: size,
            }),
            Fill::Tiled(image) => scene.create_tiled(TiledDesc {
                image: image.clone(),
                sampler: ImageSampler {
                    x_extend: Extend::Repeat,
                    y_extend: Extend::Repeat,
                    ..ImageSampler::default()
                },
            }),
        };
        BackgroundInstance {
            nodes: smallvec![node],
            destroyed: false,
        }
    }
}

/// Rounds a non-negative float size up to an integral surface dimension,
/// saturating at `u32::MAX`.
fn ceil_to_u32(v: f64) -> u32 {
    let clamped = v.clamp(0.0, f64::from(u32::MAX));
    #[expect(
        clippy::cast_possible_truncation,
        reason = "clamped to the u32 range above"
    )]
    let mut out = clamped as u32;
    if f64::from(out) < clamped {
        out = out.saturating_add(1);
    }
    out
}

/// A materialized background: live drawable nodes at one concrete size.
///
/// Owned by the widget that instantiated it. Destroying the widget (or
/// re-sizing/re-styling it) destroys the instance; the template is not
/// involved.
#[derive(Clone, Debug)]
pub struct BackgroundInstance<N: Copy + Eq> {
    nodes: SmallVec<[N; 2]>,
    destroyed: bool,
}

impl<N: Copy + Eq> BackgroundInstance<N> {
    /// Adds every owned node to the given container, stamped at
    /// [`BACKGROUND_DEPTH`] so backgrounds render behind normal content
    /// regardless of insertion order.
    pub fn add_to<S: SceneGraph<Node = N>>(&self, scene: &mut S, parent: S::Group) {
        for &node in &self.nodes {
            scene.set_depth(node, BACKGROUND_DEPTH);
            scene.add(parent, node);
        }
    }

    /// Releases every owned node's underlying resource.
    ///
    /// Idempotent: the nodes are released at most once, and calling this
    /// again after a release is a no-op. Release failures propagate to the
    /// caller; they are not recoverable here.
    pub fn destroy<S: SceneGraph<Node = N>>(&mut self, scene: &mut S) -> Result<(), SceneError> {
        if self.destroyed {
            return Ok(());
        }
        // Flip the flag before releasing so the instance stays spent even
        // if a release fails partway through.
        self.destroyed = true;
        for &node in &self.nodes {
            scene.destroy_node(node)?;
        }
        Ok(())
    }

    /// Returns `true` once [`BackgroundInstance::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The owned node handles.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
}
