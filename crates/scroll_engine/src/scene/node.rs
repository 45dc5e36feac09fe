//! Scene nodes and the behavior trait that gives them their variant
//!
//! A [`SceneNode`] stores what every node has in common: a local transform,
//! a default category, its place in the tree and a boxed [`NodeBehavior`].
//! The behavior is the node variant (aircraft, projectile, background
//! sprite, plain group, ...) and supplies the overridable hooks.

use std::any::Any;

use slotmap::new_key_type;

use crate::entity::Entity;
use crate::foundation::math::{FloatRect, Mat3, Transform, Vec2};
use crate::render::RenderTarget;

use super::category::Category;
use super::command::CommandQueue;

new_key_type! {
    /// Generational handle to a node in a [`super::SceneGraph`]
    ///
    /// A handle to a removed node never resolves again, even if its slot is
    /// reused.
    pub struct NodeId;
}

/// Mutable view of the node being updated, handed to [`NodeBehavior::update_current`]
pub struct NodeContext<'a> {
    /// Handle of the node being updated
    pub id: NodeId,
    /// The node's local transform
    pub transform: &'a mut Transform,
    /// Queue for commands produced during the update
    pub commands: &'a mut CommandQueue,
}

/// Per-variant hooks of a scene node
///
/// Every hook has a default so plain grouping nodes need no code.
pub trait NodeBehavior: Any {
    /// Category reported by the node; `None` falls back to the node's default
    fn category(&self) -> Option<Category> {
        None
    }

    /// Per-frame update of this node only (children are handled by the graph)
    fn update_current(&mut self, _ctx: &mut NodeContext<'_>, _dt: f32) {}

    /// Draw this node only, with its world transform
    fn draw_current(&self, _target: &mut dyn RenderTarget, _transform: &Mat3) {}

    /// Collision bounds in local coordinates; `None` means no bounds
    fn local_bounds(&self) -> Option<FloatRect> {
        None
    }

    /// Whether the node is destroyed
    fn is_destroyed(&self) -> bool {
        false
    }

    /// Whether the next wreck pass should remove the node
    fn is_marked_for_removal(&self) -> bool {
        self.is_destroyed()
    }

    /// Despawn without the usual destruction side effects
    fn remove(&mut self) {
        if let Some(entity) = self.entity_mut() {
            entity.destroy();
        }
    }

    /// Entity state, for nodes that have velocity and hit points
    fn entity(&self) -> Option<&Entity> {
        None
    }

    /// Mutable entity state
    fn entity_mut(&mut self) -> Option<&mut Entity> {
        None
    }

    /// Upcast for checked downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for checked downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Plain grouping node (scene root, layers)
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyNode;

impl NodeBehavior for EmptyNode {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A node of the scene graph
pub struct SceneNode {
    pub(super) transform: Transform,
    pub(super) default_category: Category,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) behavior: Box<dyn NodeBehavior>,
}

impl SceneNode {
    /// Create a node with the given behavior and no default category
    pub fn new(behavior: impl NodeBehavior) -> Self {
        Self::with_category(behavior, Category::NONE)
    }

    /// Create a node with the given behavior and default category
    pub fn with_category(behavior: impl NodeBehavior, category: Category) -> Self {
        Self {
            transform: Transform::identity(),
            default_category: category,
            parent: None,
            children: Vec::new(),
            behavior: Box::new(behavior),
        }
    }

    /// Create a plain grouping node
    pub fn group(category: Category) -> Self {
        Self::with_category(EmptyNode, category)
    }

    /// Set the initial position (builder style)
    pub fn at(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the initial rotation in degrees (builder style)
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.transform.set_rotation(degrees);
        self
    }

    /// Category used for command dispatch and collision filtering
    pub fn category(&self) -> Category {
        self.behavior.category().unwrap_or(self.default_category)
    }

    /// Local transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Set the position relative to the parent
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    /// Parent handle, `None` for the root and detached nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in draw/update order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Behavior as a trait object
    pub fn behavior(&self) -> &dyn NodeBehavior {
        self.behavior.as_ref()
    }

    /// Behavior downcast to a concrete type
    pub fn downcast<T: NodeBehavior>(&self) -> Option<&T> {
        self.behavior.as_any().downcast_ref::<T>()
    }

    /// Mutable behavior downcast to a concrete type
    pub fn downcast_mut<T: NodeBehavior>(&mut self) -> Option<&mut T> {
        self.behavior.as_any_mut().downcast_mut::<T>()
    }

    /// Entity state, if the node is an entity
    pub fn entity(&self) -> Option<&Entity> {
        self.behavior.entity()
    }

    /// Mutable entity state, if the node is an entity
    pub fn entity_mut(&mut self) -> Option<&mut Entity> {
        self.behavior.entity_mut()
    }

    /// Whether the node is destroyed
    pub fn is_destroyed(&self) -> bool {
        self.behavior.is_destroyed()
    }

    /// Whether the next wreck pass removes the node
    pub fn is_marked_for_removal(&self) -> bool {
        self.behavior.is_marked_for_removal()
    }

    /// Despawn the node's behavior (see [`NodeBehavior::remove`])
    pub fn remove(&mut self) {
        self.behavior.remove();
    }

    pub(super) fn update_current(&mut self, id: NodeId, commands: &mut CommandQueue, dt: f32) {
        let mut ctx = NodeContext {
            id,
            transform: &mut self.transform,
            commands,
        };
        self.behavior.update_current(&mut ctx, dt);
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("category", &self.category())
            .field("position", &self.transform.position)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
