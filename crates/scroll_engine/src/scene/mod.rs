//! Scene graph
//!
//! A hierarchy of nodes stored in a single arena. Each node has a local
//! transform relative to its parent, a category used for command addressing
//! and collision filtering, and a behavior that defines what it is.
//!
//! ## Architecture
//!
//! ```text
//! SceneGraph (arena, owns every node)
//!      ↓
//! SceneNode (transform, category, parent / children handles)
//!      ↓
//! NodeBehavior (aircraft, projectile, pickup, sprite, group)
//! ```
//!
//! Per frame the graph:
//! - Dispatches queued [`Command`]s to every node whose category matches
//! - Updates nodes pre-order, so children see their parent's new transform
//! - Collects overlapping node pairs into a [`CollisionSet`]
//! - Removes nodes marked for removal, together with their subtrees
//! - Draws back to front through a [`crate::render::RenderTarget`]

mod category;
mod collision;
mod command;
mod graph;
mod node;
mod sprite_node;

pub use category::Category;
pub use collision::{match_categories, CollisionPair, CollisionSet};
pub use command::{derived_action, Action, Command, CommandQueue};
pub use graph::{SceneError, SceneGraph};
pub use node::{EmptyNode, NodeBehavior, NodeContext, NodeId, SceneNode};
pub use sprite_node::SpriteNode;
