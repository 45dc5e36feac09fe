//! Category-targeted commands and the per-frame command queue
//!
//! A [`Command`] pairs a [`Category`] mask with an action. Dispatching it
//! through the scene graph runs the action once for every node whose
//! category matches. Actions receive the whole graph plus the handle of the
//! matching node, so they can read world positions or attach new nodes.
//!
//! Actions written against a concrete node type go through
//! [`derived_action`], which performs a checked downcast and skips (with a
//! warning) nodes of any other type. Categories do not guarantee a unique
//! node type, so the check is always needed.

use std::collections::VecDeque;
use std::fmt;

use super::category::Category;
use super::graph::SceneGraph;
use super::node::{NodeBehavior, NodeId};

/// Boxed command action: `(graph, matching node, elapsed seconds)`
pub type Action = Box<dyn FnMut(&mut SceneGraph, NodeId, f32)>;

/// A deferred unit of work addressed by category
pub struct Command {
    category: Category,
    action: Action,
}

impl Command {
    /// Create a command for all nodes matching `category`
    pub fn new<F>(category: Category, action: F) -> Self
    where
        F: FnMut(&mut SceneGraph, NodeId, f32) + 'static,
    {
        Self {
            category,
            action: Box::new(action),
        }
    }

    /// Create a command whose action only applies to nodes of type `T`
    pub fn for_type<T, F>(category: Category, action: F) -> Self
    where
        T: NodeBehavior,
        F: FnMut(&mut T, f32) + 'static,
    {
        Self::new(category, derived_action(action))
    }

    /// Category mask this command is addressed to
    pub fn category(&self) -> Category {
        self.category
    }

    /// Run the action against one node
    pub fn execute(&mut self, graph: &mut SceneGraph, node: NodeId, dt: f32) {
        (self.action)(graph, node, dt);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Wrap a typed action into a graph action with a checked downcast
///
/// If the matching node's behavior is not a `T`, the action is skipped and a
/// warning is logged.
pub fn derived_action<T, F>(mut action: F) -> impl FnMut(&mut SceneGraph, NodeId, f32)
where
    T: NodeBehavior,
    F: FnMut(&mut T, f32),
{
    move |graph: &mut SceneGraph, node: NodeId, dt: f32| match graph.behavior_mut::<T>(node) {
        Some(target) => action(target, dt),
        None => log::warn!(
            "Command expected {} on node {:?}, skipping",
            std::any::type_name::<T>(),
            node
        ),
    }
}

/// FIFO of commands waiting for the next dispatch
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Remove and return the oldest command
    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    /// True when no commands are pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
