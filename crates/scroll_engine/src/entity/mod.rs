//! Game entities
//!
//! [`Entity`] is the state shared by everything that moves and can be hit:
//! a velocity and hit points. Concrete node behaviors ([`Aircraft`],
//! [`Projectile`], [`Pickup`]) embed one and expose it through
//! [`crate::scene::NodeBehavior::entity`].

pub mod aircraft;
pub mod data;
pub mod pickup;
pub mod projectile;

pub use aircraft::{Aircraft, AircraftKind};
pub use pickup::{Pickup, PickupKind};
pub use projectile::{Projectile, ProjectileKind};

use crate::foundation::math::{Transform, Vec2};

/// Velocity and hit points of a game object
///
/// An entity is destroyed as soon as its hit points reach zero. Hit points
/// never go negative, and a destroyed entity can neither take further
/// damage nor be repaired.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    velocity: Vec2,
    hitpoints: i32,
}

impl Entity {
    /// Create a resting entity with the given hit points
    pub fn new(hitpoints: i32) -> Self {
        Self {
            velocity: Vec2::zeros(),
            hitpoints: hitpoints.max(0),
        }
    }

    /// Current velocity in units per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Add to the velocity
    pub fn accelerate(&mut self, velocity: Vec2) {
        self.velocity += velocity;
    }

    /// Remaining hit points
    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    /// Subtract hit points, clamping at zero
    ///
    /// Negative amounts count as zero.
    pub fn damage(&mut self, points: i32) {
        if self.is_destroyed() {
            return;
        }
        self.hitpoints = self.hitpoints.saturating_sub(points.max(0)).max(0);
    }

    /// Add hit points to a living entity
    ///
    /// Negative amounts count as zero.
    pub fn repair(&mut self, points: i32) {
        if self.is_destroyed() {
            return;
        }
        self.hitpoints = self.hitpoints.saturating_add(points.max(0));
    }

    /// Drop the hit points to zero
    pub fn destroy(&mut self) {
        self.hitpoints = 0;
    }

    /// True once the hit points are exhausted
    pub fn is_destroyed(&self) -> bool {
        self.hitpoints <= 0
    }

    /// Explicit Euler step: `position += velocity * dt`
    pub fn integrate(&self, transform: &mut Transform, dt: f32) {
        transform.move_by(self.velocity * dt);
    }
}
