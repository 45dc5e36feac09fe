//! Asset management
//!
//! Textures and fonts are addressed by identifier enums and stored in
//! [`ResourceHolder`]s. Loading failures are reported as [`ResourceError`]
//! and are meant to abort startup before any frame runs.

pub mod resource_holder;

pub use resource_holder::{
    Font, FontHolder, Resource, ResourceError, ResourceHolder, Texture, TextureHolder,
};

use serde::{Deserialize, Serialize};

/// Texture identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    /// Atlas with aircraft, projectiles and pickups
    Entities,
    /// Scrolling background tile
    Jungle,
}

/// Font identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontId {
    /// Font used for in-world labels
    Main,
}
