//! # Unified Configuration System
//!
//! All configuration structures for the game core in one place: engine
//! behavior, world layout and asset locations.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging and frame timing
//! - **World Config**: view size, scrolling, battlefield and the enemy
//!   spawn schedule
//! - **Asset Config**: where textures and fonts are loaded from

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};
use crate::entity::aircraft::AircraftKind;
use crate::foundation::math::Vec2;

/// # Engine Configuration
///
/// Core behavior configuration: logging and the fixed simulation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Length of one simulation step in seconds
    pub fixed_timestep: f32,
    /// Stop after this many simulated frames (None = run until the mission ends)
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: 1.0 / 60.0,
            max_frames: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the frame limit
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_timestep > 0.0 && self.fixed_timestep.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be a positive number of seconds, got {}",
                self.fixed_timestep
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One scheduled enemy, relative to the player's spawn position
///
/// `x` is an offset to the right, `y` a distance ahead (up the level).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPointConfig {
    /// Aircraft to spawn
    pub kind: AircraftKind,
    /// Horizontal offset from the spawn position
    pub x: f32,
    /// Distance ahead of the spawn position
    pub y: f32,
}

impl SpawnPointConfig {
    /// Create a spawn point
    pub const fn new(kind: AircraftKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

/// # World Configuration
///
/// Layout of the scrolling level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Size of the visible view
    pub view_size: Vec2,
    /// Total height of the level
    pub world_height: f32,
    /// Vertical scroll speed of the view (negative scrolls upward)
    pub scroll_speed: f32,
    /// Minimum distance kept between the player and the view edges
    pub border_distance: f32,
    /// How far above the view enemies are spawned and kept alive
    pub battlefield_margin: f32,
    /// Enemy spawn schedule
    pub spawn_points: Vec<SpawnPointConfig>,
}

impl WorldConfig {
    /// Create the default level layout
    pub fn new() -> Self {
        use AircraftKind::{Avenger, Raptor};

        Self {
            view_size: Vec2::new(640.0, 480.0),
            world_height: 5000.0,
            scroll_speed: -50.0,
            border_distance: 40.0,
            battlefield_margin: 100.0,
            spawn_points: vec![
                SpawnPointConfig::new(Raptor, 0.0, 500.0),
                SpawnPointConfig::new(Raptor, 0.0, 1000.0),
                SpawnPointConfig::new(Raptor, 100.0, 1150.0),
                SpawnPointConfig::new(Raptor, -100.0, 1150.0),
                SpawnPointConfig::new(Avenger, 70.0, 1500.0),
                SpawnPointConfig::new(Avenger, -70.0, 1500.0),
                SpawnPointConfig::new(Avenger, -70.0, 1710.0),
                SpawnPointConfig::new(Avenger, 70.0, 1700.0),
                SpawnPointConfig::new(Avenger, 30.0, 1850.0),
                SpawnPointConfig::new(Raptor, 300.0, 2200.0),
                SpawnPointConfig::new(Raptor, -300.0, 2200.0),
                SpawnPointConfig::new(Raptor, 0.0, 2200.0),
                SpawnPointConfig::new(Raptor, 0.0, 2500.0),
                SpawnPointConfig::new(Avenger, -300.0, 2700.0),
                SpawnPointConfig::new(Avenger, 300.0, 2700.0),
                SpawnPointConfig::new(Raptor, 0.0, 3000.0),
                SpawnPointConfig::new(Raptor, 250.0, 3250.0),
                SpawnPointConfig::new(Raptor, -250.0, 3250.0),
                SpawnPointConfig::new(Avenger, 0.0, 3500.0),
                SpawnPointConfig::new(Avenger, 0.0, 3700.0),
                SpawnPointConfig::new(Raptor, 0.0, 3800.0),
                SpawnPointConfig::new(Avenger, 0.0, 4000.0),
                SpawnPointConfig::new(Avenger, -200.0, 4200.0),
                SpawnPointConfig::new(Raptor, 200.0, 4200.0),
                SpawnPointConfig::new(Raptor, 0.0, 4400.0),
            ],
        }
    }

    /// Replace the spawn schedule
    pub fn with_spawn_points(mut self, spawn_points: Vec<SpawnPointConfig>) -> Self {
        self.spawn_points = spawn_points;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view_size.x <= 0.0 || self.view_size.y <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "view_size must be positive, got {}x{}",
                self.view_size.x, self.view_size.y
            )));
        }

        if self.world_height < self.view_size.y {
            return Err(ConfigError::Invalid(format!(
                "world_height ({}) is smaller than the view height ({})",
                self.world_height, self.view_size.y
            )));
        }

        if self.border_distance * 2.0 >= self.view_size.x.min(self.view_size.y) {
            return Err(ConfigError::Invalid(format!(
                "border_distance ({}) leaves no room to move",
                self.border_distance
            )));
        }

        if self.battlefield_margin < 0.0 {
            return Err(ConfigError::Invalid("battlefield_margin must not be negative".to_string()));
        }

        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
///
/// File locations for textures and fonts, relative to `assets_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for assets
    pub assets_dir: PathBuf,
    /// Texture atlas holding aircraft, projectiles and pickups
    pub entities_texture: PathBuf,
    /// Background texture
    pub jungle_texture: PathBuf,
    /// Font for labels
    pub main_font: PathBuf,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: PathBuf::from("media"),
            entities_texture: PathBuf::from("textures/entities.png"),
            jungle_texture: PathBuf::from("textures/jungle.png"),
            main_font: PathBuf::from("sansation.ttf"),
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Resolve a path relative to the assets directory
    pub fn resolve(&self, relative: &std::path::Path) -> PathBuf {
        self.assets_dir.join(relative)
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Game Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Level layout
    pub world: WorldConfig,
    /// Asset locations
    pub assets: AssetConfig,
}

impl GameConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.world.validate()?;
        Ok(())
    }
}

impl Config for GameConfig {}
