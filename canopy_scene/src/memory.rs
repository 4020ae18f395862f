// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory reference scene.
//!
//! [`MemoryScene`] implements [`SceneGraph`] over two generational slot
//! arenas, one for nodes and one for groups. It renders nothing; it records
//! structure, depth, and liveness so tests and headless demos can assert
//! exactly what a real renderer would have been told to do.

use alloc::vec::Vec;

use crate::{SceneError, SceneGraph, SolidDesc, TiledDesc};

/// Identifier for a leaf node in a [`MemoryScene`].
///
/// Slot index plus generation. On slot reuse the generation increments, so
/// a handle to a destroyed node never aliases a live one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32, u32);

/// Identifier for a group in a [`MemoryScene`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GroupId(u32, u32);

/// What a leaf node draws.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A rasterized solid rectangle.
    Solid(SolidDesc),
    /// A repeating image.
    Tiled(TiledDesc),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    depth: f32,
    parent: Option<GroupId>,
}

#[derive(Debug, Default)]
struct GroupData {
    parent: Option<GroupId>,
    nodes: Vec<NodeId>,
    groups: Vec<GroupId>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// An in-memory [`SceneGraph`] for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: Vec<Slot<NodeData>>,
    free_nodes: Vec<u32>,
    groups: Vec<Slot<GroupData>>,
    free_groups: Vec<u32>,
    released_nodes: u64,
}

impl MemoryScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the handle refers to a live node.
    pub fn is_node_alive(&self, node: NodeId) -> bool {
        self.node_data(node).is_some()
    }

    /// Returns `true` if the handle refers to a live group.
    pub fn is_group_alive(&self, group: GroupId) -> bool {
        self.group_data(group).is_some()
    }

    /// Returns what a live node draws.
    pub fn node_kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.node_data(node).map(|d| &d.kind)
    }

    /// Returns a live node's render depth.
    pub fn node_depth(&self, node: NodeId) -> Option<f32> {
        self.node_data(node).map(|d| d.depth)
    }

    /// Returns the group a live node is attached to, if any.
    pub fn node_parent(&self, node: NodeId) -> Option<GroupId> {
        self.node_data(node).and_then(|d| d.parent)
    }

    /// Returns the nodes attached to a group, in insertion order.
    pub fn group_nodes(&self, group: GroupId) -> &[NodeId] {
        self.group_data(group).map_or(&[], |d| d.nodes.as_slice())
    }

    /// Returns the subgroups attached to a group, in insertion order.
    pub fn child_groups(&self, group: GroupId) -> &[GroupId] {
        self.group_data(group).map_or(&[], |d| d.groups.as_slice())
    }

    /// Number of live nodes.
    pub fn live_node_count(&self) -> usize {
        self.nodes.iter().filter(|s| s.data.is_some()).count()
    }

    /// Number of live groups.
    pub fn live_group_count(&self) -> usize {
        self.groups.iter().filter(|s| s.data.is_some()).count()
    }

    /// Total number of node releases since creation. Each node is counted
    /// exactly once, which lets tests detect double-destroys.
    pub fn released_node_count(&self) -> u64 {
        self.released_nodes
    }

    fn node_data(&self, node: NodeId) -> Option<&NodeData> {
        let slot = self.nodes.get(node.0 as usize)?;
        if slot.generation != node.1 {
            return None;
        }
        slot.data.as_ref()
    }

    fn node_data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        let slot = self.nodes.get_mut(node.0 as usize)?;
        if slot.generation != node.1 {
            return None;
        }
        slot.data.as_mut()
    }

    fn group_data(&self, group: GroupId) -> Option<&GroupData> {
        let slot = self.groups.get(group.0 as usize)?;
        if slot.generation != group.1 {
            return None;
        }
        slot.data.as_ref()
    }

    fn group_data_mut(&mut self, group: GroupId) -> Option<&mut GroupData> {
        let slot = self.groups.get_mut(group.0 as usize)?;
        if slot.generation != group.1 {
            return None;
        }
        slot.data.as_mut()
    }

    fn alloc_node(&mut self, data: NodeData) -> NodeId {
        if let Some(idx) = self.free_nodes.pop() {
            let slot = &mut self.nodes[idx as usize];
            slot.generation += 1;
            slot.data = Some(data);
            NodeId(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "node count stays far below u32::MAX"
            )]
            let idx = self.nodes.len() as u32;
            self.nodes.push(Slot {
                generation: 1,
                data: Some(data),
            });
            NodeId(idx, 1)
        }
    }

    fn alloc_group(&mut self, data: GroupData) -> GroupId {
        if let Some(idx) = self.free_groups.pop() {
            let slot = &mut self.groups[idx as usize];
            slot.generation += 1;
            slot.data = Some(data);
            GroupId(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "group count stays far below u32::MAX"
            )]
            let idx = self.groups.len() as u32;
            self.groups.push(Slot {
                generation: 1,
                data: Some(data),
            });
            GroupId(idx, 1)
        }
    }

    /// Releases one node: unlink from its parent, free the slot.
    fn release_node(&mut self, node: NodeId) -> Result<(), SceneError> {
        let parent = match self.node_data(node) {
            Some(data) => data.parent,
            None => return Err(SceneError::StaleNode),
        };
        if let Some(parent) = parent {
            if let Some(pd) = self.group_data_mut(parent) {
                pd.nodes.retain(|n| *n != node);
            }
        }
        self.nodes[node.0 as usize].data = None;
        self.free_nodes.push(node.0);
        self.released_nodes += 1;
        Ok(())
    }

    /// Depth-first teardown of a group and everything inside it.
    fn release_group(&mut self, group: GroupId) -> Result<(), SceneError> {
        let data = {
            let slot = self
                .groups
                .get_mut(group.0 as usize)
                .filter(|s| s.generation == group.1);
            match slot.and_then(|s| s.data.take()) {
                Some(data) => data,
                None => return Err(SceneError::StaleGroup),
            }
        };
        self.free_groups.push(group.0);
        if let Some(parent) = data.parent {
            if let Some(pd) = self.group_data_mut(parent) {
                pd.groups.retain(|g| *g != group);
            }
        }
        for node in data.nodes {
            // Children were unlinked by taking the group data, so release
            // the slot directly.
            let slot = &mut self.nodes[node.0 as usize];
            if slot.generation == node.1 && slot.data.take().is_some() {
                self.free_nodes.push(node.0);
                self.released_nodes += 1;
            }
        }
        for child in data.groups {
            self.release_group(child)?;
        }
        Ok(())
    }
}

impl SceneGraph for MemoryScene {
    type Node = NodeId;
    type Group = GroupId;

    fn create_group(&mut self) -> GroupId {
        self.alloc_group(GroupData::default())
    }

    fn create_solid(&mut self, desc: SolidDesc) -> NodeId {
        self.alloc_node(NodeData {
            kind: NodeKind::Solid(desc),
            depth: 0.0,
            parent: None,
        })
    }

    fn create_tiled(&mut self, desc: TiledDesc) -> NodeId {
        self.alloc_node(NodeData {
            kind: NodeKind::Tiled(desc),
            depth: 0.0,
            parent: None,
        })
    }

    fn add(&mut self, parent: GroupId, node: NodeId) {
        if !self.is_group_alive(parent) {
            return;
        }
        let Some(data) = self.node_data_mut(node) else {
            return;
        };
        let old = data.parent.replace(parent);
        if let Some(old) = old {
            if let Some(pd) = self.group_data_mut(old) {
                pd.nodes.retain(|n| *n != node);
            }
        }
        if let Some(pd) = self.group_data_mut(parent) {
            pd.nodes.push(node);
        }
    }

    fn remove(&mut self, parent: GroupId, node: NodeId) {
        if let Some(pd) = self.group_data_mut(parent) {
            pd.nodes.retain(|n| *n != node);
        }
        if let Some(data) = self.node_data_mut(node) {
            if data.parent == Some(parent) {
                data.parent = None;
            }
        }
    }

    fn set_depth(&mut self, node: NodeId, depth: f32) {
        if let Some(data) = self.node_data_mut(node) {
            data.depth = depth;
        }
    }

    fn attach(&mut self, parent: GroupId, child: GroupId) {
        if parent == child || !self.is_group_alive(parent) {
            return;
        }
        self.detach(child);
        let Some(cd) = self.group_data_mut(child) else {
            return;
        };
        cd.parent = Some(parent);
        if let Some(pd) = self.group_data_mut(parent) {
            pd.groups.push(child);
        }
    }

    fn detach(&mut self, child: GroupId) {
        let Some(parent) = self.group_data(child).and_then(|d| d.parent) else {
            return;
        };
        if let Some(pd) = self.group_data_mut(parent) {
            pd.groups.retain(|g| *g != child);
        }
        if let Some(cd) = self.group_data_mut(child) {
            cd.parent = None;
        }
    }

    fn parent(&self, group: GroupId) -> Option<GroupId> {
        self.group_data(group).and_then(|d| d.parent)
    }

    fn destroy_node(&mut self, node: NodeId) -> Result<(), SceneError> {
        self.release_node(node)
    }

    fn destroy_group(&mut self, group: GroupId) -> Result<(), SceneError> {
        log::trace!("destroying scene group {group:?}");
        self.release_group(group)
    }
}
