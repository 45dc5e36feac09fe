//! Arena-backed scene graph
//!
//! All nodes live in one [`SlotMap`] owned by the [`SceneGraph`]. The tree
//! structure is expressed with [`NodeId`] handles: each node lists its
//! children in order and keeps a handle to its parent. Handles are
//! generational, so every non-owning reference (parent links, collision
//! pairs, the world's player handle, missile targets) is checked against the
//! arena on use and simply stops resolving once its node is removed.
//!
//! Nodes inserted with [`SceneGraph::insert`] or detached with
//! [`SceneGraph::detach_child`] are orphans: they stay in the arena but are
//! not reached by traversals from the root until attached again.

use slotmap::SlotMap;
use thiserror::Error;

use crate::foundation::math::{transform_point, transform_rect, FloatRect, Mat3, Vec2};
use crate::render::RenderTarget;

use super::category::Category;
use super::command::{Command, CommandQueue};
use super::node::{NodeBehavior, NodeId, SceneNode};

/// Scene graph structure errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not resolve to a node
    #[error("Unknown scene node: {0:?}")]
    UnknownNode(NodeId),

    /// The child is the parent itself or one of its ancestors
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },

    /// The root cannot be attached under another node
    #[error("The scene root cannot become a child")]
    RootNotAttachable,
}

/// Hierarchical owning tree of scene nodes
pub struct SceneGraph {
    pub(super) nodes: SlotMap<NodeId, SceneNode>,
    pub(super) root: NodeId,
}

impl SceneGraph {
    /// Create a graph containing only an empty root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::group(Category::NONE));
        Self { nodes, root }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, including the root and orphans
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether a handle still resolves
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Look up a node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Checked downcast of a node's behavior
    pub fn behavior<T: NodeBehavior>(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id)?.downcast::<T>()
    }

    /// Checked mutable downcast of a node's behavior
    pub fn behavior_mut<T: NodeBehavior>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id)?.downcast_mut::<T>()
    }

    /// Category of a node, `NONE` for stale handles
    pub fn category(&self, id: NodeId) -> Category {
        self.nodes.get(id).map_or(Category::NONE, SceneNode::category)
    }

    /// Add a detached node to the arena
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        self.nodes.insert(node)
    }

    /// Append `child` to `parent`'s children
    ///
    /// A child that already has a parent is moved.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(SceneError::UnknownNode(child));
        }
        if child == self.root {
            return Err(SceneError::RootNotAttachable);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::WouldCreateCycle { parent, child });
        }

        if let Some(old_parent) = self.nodes[child].parent {
            let _ = self.detach_child(old_parent, child);
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Insert a node and attach it under `parent` in one step
    pub fn attach_new(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let child = self.nodes.insert(node);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(child)
    }

    /// Detach a direct child, handing its subtree back to the caller
    ///
    /// Only `parent`'s direct children are searched. Returns `None` and leaves
    /// the tree untouched when `child` is not one of them.
    #[must_use = "a detached subtree stays in the arena until attached again or removed"]
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        let children = &mut self.nodes.get_mut(parent)?.children;
        let index = children.iter().position(|&id| id == child)?;
        children.remove(index);

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        Some(child)
    }

    /// Remove a node and its whole subtree from the arena
    ///
    /// Returns the number of nodes removed. The root cannot be removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        if id == self.root {
            log::warn!("Refusing to remove the scene root");
            return 0;
        }

        if let Some(parent) = self.nodes.get(id).and_then(SceneNode::parent) {
            let _ = self.detach_child(parent, id);
        }
        self.drop_subtree(id)
    }

    /// True when `ancestor` is a strict ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(SceneNode::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(SceneNode::parent);
        }
        false
    }

    /// Pre-order list of `start` and all its descendants
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                result.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        result
    }

    /// Attached nodes (reachable from the root) whose category matches `mask`
    pub fn nodes_matching(&self, mask: Category) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.category(id).matches(mask))
            .collect()
    }

    /// Run every node's update hook, parents before children
    pub fn update(&mut self, dt: f32, commands: &mut CommandQueue) {
        self.update_node(self.root, dt, commands);
    }

    fn update_node(&mut self, id: NodeId, dt: f32, commands: &mut CommandQueue) {
        match self.nodes.get_mut(id) {
            Some(node) => node.update_current(id, commands, dt),
            None => return,
        }

        let mut index = 0;
        while let Some(child) = self.nodes.get(id).and_then(|node| node.children.get(index).copied()) {
            self.update_node(child, dt, commands);
            index += 1;
        }
    }

    /// Dispatch a command through the whole tree
    ///
    /// The action runs on every node whose category matches, and the
    /// traversal always continues into all children.
    pub fn on_command(&mut self, command: &mut Command, dt: f32) {
        self.dispatch(self.root, command, dt);
    }

    fn dispatch(&mut self, id: NodeId, command: &mut Command, dt: f32) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        if node.category().matches(command.category()) {
            command.execute(self, id, dt);
        }

        // Actions may reshape the tree; walk the children as they were
        let children = self.nodes.get(id).map(|node| node.children.clone()).unwrap_or_default();
        for child in children {
            self.dispatch(child, command, dt);
        }
    }

    /// Drain the queue, dispatching each command in FIFO order
    pub fn dispatch_queue(&mut self, commands: &mut CommandQueue, dt: f32) {
        while let Some(mut command) = commands.pop() {
            self.on_command(&mut command, dt);
        }
    }

    /// Composition of all local transforms from the root down to `id`
    pub fn world_transform(&self, id: NodeId) -> Mat3 {
        let mut transform = Mat3::identity();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(node_id) else {
                break;
            };
            transform = node.transform.to_matrix() * transform;
            current = node.parent;
        }
        transform
    }

    /// World-space position of a node's local origin
    pub fn world_position(&self, id: NodeId) -> Vec2 {
        transform_point(&self.world_transform(id), Vec2::zeros())
    }

    /// World-space collision bounds; empty when the node has none
    pub fn bounding_rect(&self, id: NodeId) -> FloatRect {
        self.nodes
            .get(id)
            .and_then(|node| node.behavior.local_bounds())
            .map(|bounds| transform_rect(&self.world_transform(id), &bounds))
            .unwrap_or_default()
    }

    /// Remove every node marked for removal, with its subtree
    ///
    /// Survivors keep their relative order. Returns the number of nodes
    /// removed.
    pub fn remove_wrecks(&mut self) -> usize {
        let removed = self.remove_wrecks_below(self.root);
        if removed > 0 {
            log::trace!("Removed {removed} wrecked nodes");
        }
        removed
    }

    fn remove_wrecks_below(&mut self, id: NodeId) -> usize {
        let children = match self.nodes.get_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return 0,
        };

        let (wrecks, survivors): (Vec<NodeId>, Vec<NodeId>) = children.into_iter().partition(|&child| {
            self.nodes
                .get(child)
                .map_or(true, SceneNode::is_marked_for_removal)
        });

        let mut removed = 0;
        for wreck in wrecks {
            removed += self.drop_subtree(wreck);
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.children.clone_from(&survivors);
        }

        for survivor in survivors {
            removed += self.remove_wrecks_below(survivor);
        }
        removed
    }

    fn drop_subtree(&mut self, id: NodeId) -> usize {
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.nodes.remove(node_id) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Draw the tree back to front: each node before its children,
    /// siblings in insertion order
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        self.draw_node(self.root, &Mat3::identity(), target);
    }

    fn draw_node(&self, id: NodeId, parent_transform: &Mat3, target: &mut dyn RenderTarget) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        let transform = parent_transform * node.transform.to_matrix();
        node.behavior.draw_current(target, &transform);

        for &child in &node.children {
            self.draw_node(child, &transform, target);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
