//! Bullets and homing missiles

use std::any::Any;

use crate::foundation::math::{utils, FloatRect, Mat3, Vec2};
use crate::render::{RenderTarget, Sprite};
use crate::scene::{Category, NodeBehavior, NodeContext, NodeId};

use super::data;
use super::Entity;

/// How fast a missile turns towards its target
const APPROACH_RATE: f32 = 200.0;

/// Projectile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    /// Bullet fired by the player
    AlliedBullet,
    /// Bullet fired by an enemy
    EnemyBullet,
    /// Homing missile launched by the player
    Missile,
}

impl ProjectileKind {
    /// Every kind
    pub const ALL: [Self; 3] = [Self::AlliedBullet, Self::EnemyBullet, Self::Missile];
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    kind: ProjectileKind,
    entity: Entity,
    sprite: Sprite,
    target_direction: Vec2,
    target: Option<NodeId>,
}

impl Projectile {
    /// Create a projectile at rest
    pub fn new(kind: ProjectileKind) -> Self {
        let data = data::projectile(kind);
        Self {
            kind,
            entity: Entity::new(1),
            sprite: Sprite::centered(data.texture, data.texture_rect),
            target_direction: Vec2::zeros(),
            target: None,
        }
    }

    /// Create a projectile already in flight
    pub fn launched(kind: ProjectileKind, velocity: Vec2) -> Self {
        let mut projectile = Self::new(kind);
        projectile.entity.set_velocity(velocity);
        projectile
    }

    /// Projectile kind
    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Whether the projectile steers towards a target
    pub fn is_guided(&self) -> bool {
        self.kind == ProjectileKind::Missile
    }

    /// Hit points removed from the aircraft that is hit
    pub fn damage(&self) -> i32 {
        data::projectile(self.kind).damage
    }

    /// Flight speed
    pub fn max_speed(&self) -> f32 {
        data::projectile(self.kind).speed
    }

    /// Node currently steered towards, if any
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Steer towards `target`, which lies along `direction` from here
    pub fn guide_towards(&mut self, target: NodeId, direction: Vec2) {
        debug_assert!(self.is_guided());
        self.target = Some(target);
        self.target_direction = utils::unit_vector(direction);
    }

    /// Forget the target and keep flying straight
    pub fn clear_target(&mut self) {
        self.target = None;
        self.target_direction = Vec2::zeros();
    }
}

impl NodeBehavior for Projectile {
    fn category(&self) -> Option<Category> {
        Some(match self.kind {
            ProjectileKind::EnemyBullet => Category::ENEMY_PROJECTILE,
            ProjectileKind::AlliedBullet | ProjectileKind::Missile => Category::ALLIED_PROJECTILE,
        })
    }

    fn update_current(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        if self.is_guided() {
            let steered = APPROACH_RATE * dt * self.target_direction + self.entity.velocity();
            let velocity = utils::unit_vector(steered) * self.max_speed();
            let heading = utils::rad_to_deg(velocity.y.atan2(velocity.x));

            ctx.transform.set_rotation(heading + 90.0);
            self.entity.set_velocity(velocity);
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CommandQueue, SceneGraph, SceneNode};
    use approx::assert_relative_eq;

    #[test]
    fn test_categories_follow_side() {
        assert_eq!(
            Projectile::new(ProjectileKind::EnemyBullet).category(),
            Some(Category::ENEMY_PROJECTILE)
        );
        assert_eq!(
            Projectile::new(ProjectileKind::Missile).category(),
            Some(Category::ALLIED_PROJECTILE)
        );
    }

    #[test]
    fn test_bullet_flies_straight() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let bullet = Projectile::launched(ProjectileKind::AlliedBullet, Vec2::new(0.0, -300.0));
        let id = graph.attach_new(root, SceneNode::new(bullet)).unwrap();

        graph.update(0.5, &mut CommandQueue::new());

        assert_relative_eq!(graph.world_position(id), Vec2::new(0.0, -150.0));
        assert!(!graph.behavior::<Projectile>(id).unwrap().is_guided());
    }

    #[test]
    fn test_missile_turns_towards_target_at_constant_speed() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let target = graph.attach_new(root, SceneNode::group(Category::NONE)).unwrap();

        let mut missile = Projectile::launched(ProjectileKind::Missile, Vec2::new(0.0, -150.0));
        missile.guide_towards(target, Vec2::new(10.0, 0.0));
        let id = graph.attach_new(root, SceneNode::new(missile)).unwrap();

        graph.update(0.25, &mut CommandQueue::new());

        let missile = graph.behavior::<Projectile>(id).unwrap();
        let velocity = missile.entity().unwrap().velocity();
        assert_relative_eq!(velocity.magnitude(), 150.0, epsilon = 1e-3);
        // Steered right while still heading up
        assert!(velocity.x > 0.0 && velocity.y < 0.0);
        assert_eq!(missile.target(), Some(target));

        // Heading up-right maps to a rotation between 0 and 90 degrees
        let rotation = graph.get(id).unwrap().transform().rotation;
        assert!(rotation > 0.0 && rotation < 90.0, "{rotation}");
    }

    #[test]
    fn test_untargeted_missile_keeps_heading() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let missile = Projectile::launched(ProjectileKind::Missile, Vec2::new(0.0, -150.0));
        let id = graph.attach_new(root, SceneNode::new(missile)).unwrap();

        graph.update(1.0, &mut CommandQueue::new());

        assert_relative_eq!(graph.world_position(id), Vec2::new(0.0, -150.0), epsilon = 1e-3);
        let rotation = graph.get(id).unwrap().transform().rotation;
        assert!(rotation < 1e-3 || rotation > 360.0 - 1e-3, "{rotation}");
    }
}
