//! Collectible power-ups

use std::any::Any;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::foundation::math::{FloatRect, Mat3};
use crate::render::{RenderTarget, Sprite};
use crate::scene::{Category, NodeBehavior, NodeContext};

use super::aircraft::Aircraft;
use super::data;
use super::Entity;

/// Pickup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    /// Restores hit points
    HealthRefill,
    /// Adds missiles
    MissileRefill,
    /// Widens the bullet spread
    FireSpread,
    /// Shortens the time between volleys
    FireRate,
}

impl PickupKind {
    /// Every kind
    pub const ALL: [Self; 4] = [
        Self::HealthRefill,
        Self::MissileRefill,
        Self::FireSpread,
        Self::FireRate,
    ];

    /// Pick a kind uniformly at random
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL.choose(rng).copied().unwrap_or(Self::HealthRefill)
    }
}

/// A power-up floating in the air layer
#[derive(Debug, Clone)]
pub struct Pickup {
    kind: PickupKind,
    entity: Entity,
    sprite: Sprite,
}

impl Pickup {
    /// Create a pickup of the given kind
    pub fn new(kind: PickupKind) -> Self {
        let data = data::pickup(kind);
        Self {
            kind,
            entity: Entity::new(1),
            sprite: Sprite::centered(data.texture, data.texture_rect),
        }
    }

    /// Pickup kind
    pub fn kind(&self) -> PickupKind {
        self.kind
    }

    /// Grant the power-up to an aircraft
    pub fn apply(&self, aircraft: &mut Aircraft) {
        match self.kind {
            PickupKind::HealthRefill => aircraft.repair(data::HEALTH_REFILL),
            PickupKind::MissileRefill => aircraft.collect_missiles(data::MISSILE_REFILL),
            PickupKind::FireSpread => aircraft.increase_spread(),
            PickupKind::FireRate => aircraft.increase_fire_rate(),
        }
    }
}

impl NodeBehavior for Pickup {
    fn category(&self) -> Option<Category> {
        Some(Category::PICKUP)
    }

    fn update_current(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        self.entity.integrate(ctx.transform, dt);
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, transform: &Mat3) {
        self.sprite.draw(target, transform);
    }

    fn local_bounds(&self) -> Option<FloatRect> {
        Some(self.sprite.local_bounds())
    }

    fn is_destroyed(&self) -> bool {
        self.entity.is_destroyed()
    }

    fn entity(&self) -> Option<&Entity> {
        Some(&self.entity)
    }

    fn entity_mut(&mut self) -> Option<&mut Entity> {
        Some(&mut self.entity)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
