//! # Core Module
//!
//! Shared configuration types used by every subsystem of the game core.

pub mod config;

pub use config::{
    AssetConfig,
    Config,
    ConfigError,
    EngineConfig,
    GameConfig,
    SpawnPointConfig,
    WorldConfig,
};
