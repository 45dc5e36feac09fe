//! Player and enemy aircraft
//!
//! Aircraft never touch other nodes directly. Firing, launching missiles and
//! dropping pickups push [`Command`]s addressed to the air layer, which spawn
//! the new nodes when the queue is drained at the start of the next frame.

use std::any::Any;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assets::FontId;
use crate::foundation::math::{transform_point, utils, FloatRect, Mat3, Vec2};
use crate::render::{RenderTarget, Sprite};
use crate::scene::{Category, Command, NodeBehavior, NodeContext, NodeId, SceneGraph, SceneNode};

use super::data::{self, AircraftData};
use super::pickup::{Pickup, PickupKind};
use super::projectile::{Projectile, ProjectileKind};
use super::Entity;

/// Character size of the hit point and missile labels
const LABEL_SIZE: u32 = 20;

/// Offset of the hit point label from the aircraft's origin
const HITPOINT_LABEL_OFFSET: [f32; 2] = [0.0, 50.0];

/// Offset of the missile counter from the aircraft's origin
const MISSILE_LABEL_OFFSET: [f32; 2] = [0.0, 70.0];

/// Bullet spawn offsets per spread level, as fractions of the sprite size
const SPREAD_OFFSETS: [&[(f32, f32)]; 3] = [
    &[(0.0, 0.5)],
    &[(-0.33, 0.33), (0.33, 0.33)],
    &[(-0.5, 0.33), (0.0, 0.5), (0.5, 0.33)],
];

/// Aircraft kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftKind {
    /// The player's aircraft
    Eagle,
    /// Fast enemy that never fires
    Raptor,
    /// Slow enemy that fires bullets
    Avenger,
}

impl AircraftKind {
    /// Every kind
    pub const ALL: [Self; 3] = [Self::Eagle, Self::Raptor, Self::Avenger];

    /// Whether this kind fights on the player's side
    pub fn is_allied(self) -> bool {
        self == Self::Eagle
    }
}

/// An aircraft node
#[derive(Debug, Clone)]
pub struct Aircraft {
    kind: AircraftKind,
    entity: Entity,
    sprite: Sprite,
    fire_countdown: f32,
    is_firing: bool,
    is_launching_missile: bool,
    is_marked_for_removal: bool,
    fire_rate_level: u32,
    spread_level: u32,
    missile_ammo: u32,
    travelled_distance: f32,
    direction_index: usize,
}

impl Aircraft {
    /// Create an aircraft with the stats of its kind
    pub fn new(kind: AircraftKind) -> Self {
        let data = data::aircraft(kind);
        Self {
            kind,
            entity: Entity::new(data.hitpoints),
            sprite: Sprite::centered(data.texture, data.texture_rect),
            fire_countdown: 0.0,
            is_firing: false,
            is_launching_missile: false,
            is_marked_for_removal: false,
            fire_rate_level: 1,
            spread_level: 1,
            missile_ammo: if kind.is_allied() { data::STARTING_MISSILES } else { 0 },
            travelled_distance: 0.0,
            direction_index: 0,
        }
    }

    fn data(&self) -> &'static AircraftData {
        data::aircraft(self.kind)
    }

    /// Aircraft kind
    pub fn kind(&self) -> AircraftKind {
        self.kind
    }

    /// Whether the aircraft fights on the player's side
    pub fn is_allied(&self) -> bool {
        self.kind.is_allied()
    }

    /// Cruise speed
    pub fn max_speed(&self) -> f32 {
        self.data().speed
    }

    /// The aircraft's sprite
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Remaining hit points
    pub fn hitpoints(&self) -> i32 {
        self.entity.hitpoints()
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.entity.velocity()
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.entity.set_velocity(velocity);
    }

    /// Add to the velocity
    pub fn accelerate(&mut self, velocity: Vec2) {
        self.entity.accelerate(velocity);
    }

    /// Take damage
    pub fn damage(&mut self, points: i32) {
        self.entity.damage(points);
    }

    /// Restore hit points
    pub fn repair(&mut self, points: i32) {
        self.entity.repair(points);
    }

    /// Destroy the aircraft; it lingers one frame as a wreck
    pub fn destroy(&mut self) {
        self.entity.destroy();
    }

    /// Request a volley; ignored by kinds that cannot fire
    pub fn fire(&mut self) {
        if self.data().fire_interval.is_some() {
            self.is_firing = true;
        }
    }

    /// Request a missile launch if any ammunition is left
    pub fn launch_missile(&mut self) {
        if self.missile_ammo > 0 {
            self.is_launching_missile = true;
            self.missile_ammo -= 1;
        }
    }

    /// Shorten the time between volleys
    pub fn increase_fire_rate(&mut self) {
        if self.fire_rate_level < data::MAX_FIRE_RATE_LEVEL {
            self.fire_rate_level += 1;
        }
    }

    /// Fire one more bullet per volley
    pub fn increase_spread(&mut self) {
        if self.spread_level < data::MAX_SPREAD_LEVEL {
            self.spread_level += 1;
        }
    }

    /// Add missiles to the stock
    pub fn collect_missiles(&mut self, count: u32) {
        self.missile_ammo = self.missile_ammo.saturating_add(count);
    }

    /// Missiles left
    pub fn missile_ammo(&self) -> u32 {
        self.missile_ammo
    }

    /// Current fire-rate level, 1 to 10
    pub fn fire_rate_level(&self) -> u32 {
        self.fire_rate_level
    }

    /// Current spread level, 1 to 3
    pub fn spread_level(&self) -> u32 {
        self.spread_level
    }

    fn check_pickup_drop(&self, ctx: &mut NodeContext<'_>) {
        if self.is_allied() || !rand::thread_rng().gen_ratio(1, 3) {
            return;
        }

        let kind = PickupKind::random(&mut rand::thread_rng());
        let position = ctx.transform.position;
        ctx.commands.push(Command::new(Category::SCENE_AIR_LAYER, move |graph, layer, _| {
            match graph.attach_new(layer, SceneNode::new(Pickup::new(kind)).at(position)) {
                Ok(_) => log::debug!("Dropped {kind:?} pickup at ({:.0}, {:.0})", position.x, position.y),
                Err(e) => log::warn!("Failed to drop pickup: {e}"),
            }
        }));
    }

    fn check_projectile_launch(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        // Enemies keep firing whenever they can
        if !self.is_allied() {
            self.fire();
        }

        if let Some(interval) = self.data().fire_interval {
            if self.is_firing && self.fire_countdown <= 0.0 {
                ctx.commands.push(fire_command(ctx.id));
                self.fire_countdown += interval / (self.fire_rate_level as f32 + 1.0);
                self.is_firing = false;
            } else if self.fire_countdown > 0.0 {
                self.fire_countdown -= dt;
                self.is_firing = false;
            }
        }

        if self.is_launching_missile {
            ctx.commands.push(missile_command(ctx.id));
            self.is_launching_missile = false;
        }
    }

    fn update_movement_pattern(&mut self, dt: f32) {
        let directions = self.data().directions;
        if directions.is_empty() {
            return;
        }

        if self.travelled_distance > directions[self.direction_index].distance {
            self.direction_index = (self.direction_index + 1) % directions.len();
            self.travelled_distance = 0.0;
        }

        let radians = utils::deg_to_rad(directions[self.direction_index].angle + 90.0);
        let speed = self.max_speed();
        self.entity
            .set_velocity(Vec2::new(speed * radians.cos(), speed * radians.sin()));
        self.travelled_distance += speed * dt;
    }
}

impl NodeBehavior for Aircraft {
    fn category(&self) -> Option<Category> {
        Some(if self.is_allied() {
            Category::PLAYER_AIRCRAFT
        } else {
            Category::ENEMY_AIRCRAFT
        })
    }

    fn update_current(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        if self.entity.is_destroyed() {
            if !self.is_marked_for_removal {
                self.check_pickup_drop(ctx);
                self.is_marked_for_removal = true;
            }
            return;
        }

        self.check_projectile_launch(ctx, dt);
        self.update_movement_pattern(dt);
        self.entity.integrate(ctx.transform, dt);
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, transform: &Mat3) {
        self.sprite.draw(target, transform);

        if self.entity.is_destroyed() {
            return;
        }

        let hitpoints = format!("{} HP", self.entity.hitpoints());
        target.draw_text(
            FontId::Main,
            &hitpoints,
            LABEL_SIZE,
            &upright_label(transform, HITPOINT_LABEL_OFFSET),
        );

        if self.is_allied() {
            let missiles = format!("M: {}", self.missile_ammo);
            target.draw_text(
                FontId::Main,
                &missiles,
                LABEL_SIZE,
                &upright_label(transform, MISSILE_LABEL_OFFSET),
            );
        }
    }

    fn local_bounds(&self) -> Option<FloatRect> {
        Some(self.sprite.local_bounds())
    }

    fn is_destroyed(&self) -> bool {
        self.entity.is_destroyed()
    }

    fn is_marked_for_removal(&self) -> bool {
        self.is_marked_for_removal
    }

    fn remove(&mut self) {
        self.entity.destroy();
        self.is_marked_for_removal = true;
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

/// Transform for a label at `offset` from the node that cancels the node's
/// rotation, so text stays readable on rotated aircraft
fn upright_label(transform: &Mat3, offset: [f32; 2]) -> Mat3 {
    let angle = transform[(1, 0)].atan2(transform[(0, 0)]);
    transform * Mat3::new_translation(&Vec2::from(offset)) * Mat3::new_rotation(-angle)
}

/// Command that makes the air layer spawn a volley for `shooter`
fn fire_command(shooter: NodeId) -> Command {
    Command::new(Category::SCENE_AIR_LAYER, move |graph, layer, _| {
        let Some(aircraft) = graph.behavior::<Aircraft>(shooter) else {
            return;
        };
        let kind = if aircraft.is_allied() {
            ProjectileKind::AlliedBullet
        } else {
            ProjectileKind::EnemyBullet
        };
        let level = (aircraft.spread_level.clamp(1, data::MAX_SPREAD_LEVEL) - 1) as usize;

        for &(x_offset, y_offset) in SPREAD_OFFSETS[level] {
            spawn_projectile(graph, layer, shooter, kind, Vec2::new(x_offset, y_offset));
        }
    })
}

/// Command that makes the air layer spawn a missile for `shooter`
fn missile_command(shooter: NodeId) -> Command {
    Command::new(Category::SCENE_AIR_LAYER, move |graph, layer, _| {
        spawn_projectile(graph, layer, shooter, ProjectileKind::Missile, Vec2::new(0.0, 0.5));
    })
}

/// Attach a projectile to `layer` in front of `shooter`
///
/// `offset` is a fraction of the shooter's sprite size. Allied projectiles
/// head up the screen, enemy projectiles down.
fn spawn_projectile(
    graph: &mut SceneGraph,
    layer: NodeId,
    shooter: NodeId,
    kind: ProjectileKind,
    offset: Vec2,
) {
    let Some(aircraft) = graph.behavior::<Aircraft>(shooter) else {
        return;
    };

    let sign = if aircraft.is_allied() { -1.0 } else { 1.0 };
    let offset = offset.component_mul(&aircraft.sprite.texture_rect().size());
    let projectile = Projectile::launched(kind, Vec2::new(0.0, data::projectile(kind).speed * sign));

    let world = graph.world_position(shooter) + offset * sign;
    let position = graph
        .world_transform(layer)
        .try_inverse()
        .map_or(world, |inverse| transform_point(&inverse, world));

    if let Err(e) = graph.attach_new(layer, SceneNode::new(projectile).at(position)) {
        log::warn!("Failed to spawn {kind:?}: {e}");
    }
}
