//! Per-type constants for aircraft, projectiles and pickups
//!
//! All sprites live in the entities atlas ([`TextureId::Entities`]).

use crate::assets::TextureId;
use crate::foundation::math::IntRect;

use super::aircraft::AircraftKind;
use super::pickup::PickupKind;
use super::projectile::ProjectileKind;

/// One leg of an enemy movement pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    /// Heading in degrees, 0 = straight down the screen
    pub angle: f32,
    /// Distance flown before switching to the next leg
    pub distance: f32,
}

impl Direction {
    const fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }
}

/// Constants of one aircraft kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftData {
    /// Starting hit points
    pub hitpoints: i32,
    /// Cruise speed in units per second
    pub speed: f32,
    /// Source texture
    pub texture: TextureId,
    /// Area of the texture
    pub texture_rect: IntRect,
    /// Seconds between volleys at fire-rate level 1; `None` never fires
    pub fire_interval: Option<f32>,
    /// Movement pattern; empty means the aircraft is steered externally
    pub directions: &'static [Direction],
}

/// Constants of one projectile kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileData {
    /// Hit points removed from the aircraft that is hit
    pub damage: i32,
    /// Speed in units per second
    pub speed: f32,
    /// Source texture
    pub texture: TextureId,
    /// Area of the texture
    pub texture_rect: IntRect,
}

/// Constants of one pickup kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupData {
    /// Source texture
    pub texture: TextureId,
    /// Area of the texture
    pub texture_rect: IntRect,
}

/// Hit points restored by a health refill
pub const HEALTH_REFILL: i32 = 25;

/// Missiles granted by a missile refill
pub const MISSILE_REFILL: u32 = 3;

/// Missiles the player starts with
pub const STARTING_MISSILES: u32 = 2;

/// Highest fire-rate level
pub const MAX_FIRE_RATE_LEVEL: u32 = 10;

/// Highest spread level (three bullets per volley)
pub const MAX_SPREAD_LEVEL: u32 = 3;

static EAGLE: AircraftData = AircraftData {
    hitpoints: 100,
    speed: 200.0,
    texture: TextureId::Entities,
    texture_rect: IntRect::new(0, 0, 48, 64),
    fire_interval: Some(1.0),
    directions: &[],
};

static RAPTOR: AircraftData = AircraftData {
    hitpoints: 20,
    speed: 80.0,
    texture: TextureId::Entities,
    texture_rect: IntRect::new(144, 0, 84, 64),
    fire_interval: None,
    directions: &[
        Direction::new(45.0, 80.0),
        Direction::new(-45.0, 160.0),
        Direction::new(45.0, 80.0),
    ],
};

static AVENGER: AircraftData = AircraftData {
    hitpoints: 40,
    speed: 50.0,
    texture: TextureId::Entities,
    texture_rect: IntRect::new(228, 0, 60, 59),
    fire_interval: Some(2.0),
    directions: &[
        Direction::new(45.0, 50.0),
        Direction::new(0.0, 50.0),
        Direction::new(-45.0, 100.0),
        Direction::new(0.0, 50.0),
        Direction::new(45.0, 50.0),
    ],
};

static BULLET: ProjectileData = ProjectileData {
    damage: 10,
    speed: 300.0,
    texture: TextureId::Entities,
    texture_rect: IntRect::new(175, 64, 3, 14),
};

static MISSILE: ProjectileData = ProjectileData {
    damage: 200,
    speed: 150.0,
    texture: TextureId::Entities,
    texture_rect: IntRect::new(160, 64, 15, 32),
};

static HEALTH_REFILL_PICKUP: PickupData = PickupData {
    texture: TextureId::Entities,
    texture_rect: IntRect::new(0, 64, 40, 40),
};

static MISSILE_REFILL_PICKUP: PickupData = PickupData {
    texture: TextureId::Entities,
    texture_rect: IntRect::new(40, 64, 40, 40),
};

static FIRE_SPREAD_PICKUP: PickupData = PickupData {
    texture: TextureId::Entities,
    texture_rect: IntRect::new(80, 64, 40, 40),
};

static FIRE_RATE_PICKUP: PickupData = PickupData {
    texture: TextureId::Entities,
    texture_rect: IntRect::new(120, 64, 40, 40),
};

/// Constants for an aircraft kind
pub fn aircraft(kind: AircraftKind) -> &'static AircraftData {
    match kind {
        AircraftKind::Eagle => &EAGLE,
        AircraftKind::Raptor => &RAPTOR,
        AircraftKind::Avenger => &AVENGER,
    }
}

/// Constants for a projectile kind
pub fn projectile(kind: ProjectileKind) -> &'static ProjectileData {
    match kind {
        ProjectileKind::AlliedBullet | ProjectileKind::EnemyBullet => &BULLET,
        ProjectileKind::Missile => &MISSILE,
    }
}

/// Constants for a pickup kind
pub fn pickup(kind: PickupKind) -> &'static PickupData {
    match kind {
        PickupKind::HealthRefill => &HEALTH_REFILL_PICKUP,
        PickupKind::MissileRefill => &MISSILE_REFILL_PICKUP,
        PickupKind::FireSpread => &FIRE_SPREAD_PICKUP,
        PickupKind::FireRate => &FIRE_RATE_PICKUP,
    }
}

/// Every texture area referenced by the tables, for startup validation
pub fn texture_rects() -> Vec<(TextureId, IntRect)> {
    let aircraft = AircraftKind::ALL
        .iter()
        .map(|&kind| aircraft(kind))
        .map(|data| (data.texture, data.texture_rect));
    let projectiles = ProjectileKind::ALL
        .iter()
        .map(|&kind| projectile(kind))
        .map(|data| (data.texture, data.texture_rect));
    let pickups = PickupKind::ALL
        .iter()
        .map(|&kind| pickup(kind))
        .map(|data| (data.texture, data.texture_rect));

    aircraft.chain(projectiles).chain(pickups).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_visible_sprite() {
        let rects = texture_rects();
        assert_eq!(rects.len(), 10);
        for (texture, rect) in rects {
            assert_eq!(texture, TextureId::Entities);
            assert!(rect.width > 0 && rect.height > 0, "{rect:?}");
        }
    }

    #[test]
    fn test_only_the_player_has_no_pattern() {
        assert!(aircraft(AircraftKind::Eagle).directions.is_empty());
        assert!(!aircraft(AircraftKind::Raptor).directions.is_empty());
        assert!(!aircraft(AircraftKind::Avenger).directions.is_empty());
        assert!(aircraft(AircraftKind::Raptor).fire_interval.is_none());
    }
}
