// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Scene: the minimal scene-graph surface the Canopy UI core consumes.
//!
//! The Canopy core never draws pixels itself. It needs exactly four things
//! from a host graphics system: drawable containers (groups), a way to
//! create two kinds of leaf nodes (a rasterized solid rectangle and a
//! repeating image), per-node depth, and explicit destruction. This crate
//! defines that surface as the [`SceneGraph`] trait so the core can sit on
//! top of any renderer, and ships [`MemoryScene`], an in-memory reference
//! implementation used by tests and headless demos.
//!
//! ## Handles
//!
//! Node and group handles are small `Copy + Eq` values chosen by the
//! implementation. [`MemoryScene`] uses generational handles (slot index +
//! generation): a destroyed handle never aliases a later node that reuses
//! the same slot, which lets callers detect use-after-destroy instead of
//! silently touching the wrong resource.
//!
//! ## Destruction
//!
//! [`SceneGraph::destroy_group`] is a transitive, depth-first teardown: it
//! releases every contained node and subgroup. [`SceneGraph::destroy_node`]
//! releases a single leaf. Both report [`SceneError`] when handed a stale
//! handle; release failures are not locally recoverable and propagate to
//! whoever started the teardown. Non-destructive operations (`add`,
//! `remove`, `set_depth`, `attach`, `detach`) ignore stale handles.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_scene::{MemoryScene, SceneGraph, SolidDesc};
//! use kurbo::Size;
//! use peniko::Color;
//!
//! let mut scene = MemoryScene::new();
//! let group = scene.create_group();
//! let node = scene.create_solid(SolidDesc {
//!     color: Color::WHITE,
//!     surface_width: 110,
//!     surface_height: 60,
//!     painted: Size::new(110.0, 60.0),
//! });
//! scene.add(group, node);
//! assert!(scene.is_node_alive(node));
//!
//! scene.destroy_group(group).unwrap();
//! assert!(!scene.is_node_alive(node));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod memory;

pub use memory::{GroupId, MemoryScene, NodeId, NodeKind};

use kurbo::Size;
use peniko::{Color, ImageData, ImageSampler};

/// Description of a rasterized solid-color node.
///
/// The surface dimensions are the integral raster size (callers round the
/// float size up so no sub-pixel gap opens at the edges); `painted` is the
/// exact rectangle filled within that surface, anchored at the origin.
#[derive(Clone, Debug)]
pub struct SolidDesc {
    /// Fill color.
    pub color: Color,
    /// Raster surface width in pixels.
    pub surface_width: u32,
    /// Raster surface height in pixels.
    pub surface_height: u32,
    /// Exact painted extent, `(0, 0)` to `(painted.width, painted.height)`.
    pub painted: Size,
}

/// Description of a repeating-image node.
#[derive(Clone, Debug)]
pub struct TiledDesc {
    /// Source image. The blob is reference-counted, so cloning is cheap.
    pub image: ImageData,
    /// Sampler; tiled backgrounds set both extends to `Repeat`.
    pub sampler: ImageSampler,
}

/// Errors reported by destructive scene operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The node handle no longer refers to a live node.
    StaleNode,
    /// The group handle no longer refers to a live group.
    StaleGroup,
}

impl core::fmt::Display for SceneError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StaleNode => write!(f, "node handle is stale"),
            Self::StaleGroup => write!(f, "group handle is stale"),
        }
    }
}

impl core::error::Error for SceneError {}

/// The drawable-container contract the Canopy core requires from a host
/// graphics system.
///
/// Implementations own all drawable resources. The core only holds handles
/// and directs when nodes are created, reparented, and destroyed.
pub trait SceneGraph {
    /// Leaf node handle.
    type Node: Copy + Eq + core::fmt::Debug;
    /// Container handle.
    type Group: Copy + Eq + core::fmt::Debug;

    /// Creates an empty, unattached group.
    fn create_group(&mut self) -> Self::Group;

    /// Creates a rasterized solid-rectangle node.
    fn create_solid(&mut self, desc: SolidDesc) -> Self::Node;

    /// Creates a repeating-image node.
    fn create_tiled(&mut self, desc: TiledDesc) -> Self::Node;

    /// Appends a node to a group. Stale handles are ignored.
    fn add(&mut self, parent: Self::Group, node: Self::Node);

    /// Removes a node from a group without destroying it.
    fn remove(&mut self, parent: Self::Group, node: Self::Node);

    /// Sets the render depth of a node. Lower depths render first
    /// (behind content at the default depth of zero).
    fn set_depth(&mut self, node: Self::Node, depth: f32);

    /// Attaches a group as a child of another group, detaching it from any
    /// previous parent first.
    fn attach(&mut self, parent: Self::Group, child: Self::Group);

    /// Detaches a group from its parent, if it has one.
    fn detach(&mut self, child: Self::Group);

    /// Returns the parent of a group, if attached.
    fn parent(&self, group: Self::Group) -> Option<Self::Group>;

    /// Releases a single node's resources.
    fn destroy_node(&mut self, node: Self::Node) -> Result<(), SceneError>;

    /// Releases a group and, transitively, every node and subgroup it
    /// contains.
    fn destroy_group(&mut self, group: Self::Group) -> Result<(), SceneError>;
}
