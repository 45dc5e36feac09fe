//! # Scroll Engine
//!
//! The scene core of a vertical 2D scrolling shooter.
//!
//! ## Features
//!
//! - **Scene Graph**: arena-backed node hierarchy with composed transforms
//! - **Commands**: category-addressed deferred actions, dispatched per frame
//! - **Collisions**: pairwise bounding-box detection with category filtering
//! - **Entities**: aircraft, projectiles and pickups driven by data tables
//! - **World**: scrolling view, enemy schedule and collision reactions
//! - **Backend Agnostic**: drawing goes through the [`render::RenderTarget`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scroll_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::load_from_file("game.toml")?;
//!
//!     let mut textures = TextureHolder::new();
//!     textures.load(TextureId::Entities, config.assets.resolve(&config.assets.entities_texture))?;
//!     textures.load(TextureId::Jungle, config.assets.resolve(&config.assets.jungle_texture))?;
//!     let mut fonts = FontHolder::new();
//!     fonts.load(FontId::Main, config.assets.resolve(&config.assets.main_font))?;
//!
//!     let mut world = World::new(&config.world, &textures, &fonts)?;
//!     let mut recorder = DrawRecorder::new();
//!     while world.mission_status() == MissionStatus::Running {
//!         world.update(config.engine.fixed_timestep);
//!         recorder.clear();
//!         world.draw(&mut recorder);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod assets;
pub mod config;
pub mod entity;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;
pub mod world;

pub use world::{Layer, World, WorldError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{Font, FontHolder, FontId, ResourceError, Texture, TextureHolder, TextureId},
        core::config::{AssetConfig, Config, EngineConfig, GameConfig, WorldConfig},
        entity::{Aircraft, AircraftKind, Pickup, PickupKind, Projectile, ProjectileKind},
        foundation::{
            math::{FloatRect, Mat3, Transform, Vec2},
            time::{FixedTimestep, Timer},
        },
        input::{InputEvent, KeyCode, MissionStatus, PlayerAction, PlayerController},
        render::{DrawCommand, DrawRecorder, RenderTarget, View},
        scene::{Category, Command, CommandQueue, NodeId, SceneGraph, SceneNode},
        Layer, World, WorldError,
    };
}
