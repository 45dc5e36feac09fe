//! The scrolling battlefield
//!
//! [`World`] owns the scene graph and runs one frame of the game in a fixed
//! order:
//!
//! 1. Scroll the view and reset the player's velocity
//! 2. Drain the command queue through the graph
//! 3. Normalize diagonal player movement and add the scroll speed
//! 4. Update every node
//! 5. Keep the player inside the view
//! 6. Spawn enemies whose spawn point entered the battlefield
//! 7. Point homing missiles at the closest enemy
//! 8. Detect collisions and apply their effects
//! 9. Despawn projectiles and enemies that left the battlefield
//! 10. Remove wrecks

use std::f32::consts::SQRT_2;

use thiserror::Error;

use crate::assets::{FontHolder, FontId, ResourceError, TextureHolder, TextureId};
use crate::config::ConfigError;
use crate::core::WorldConfig;
use crate::entity::{data, Aircraft, AircraftKind, Entity, Pickup, Projectile};
use crate::foundation::math::{utils, FloatRect, IntRect, Vec2};
use crate::input::MissionStatus;
use crate::render::{RenderTarget, View};
use crate::scene::{
    match_categories, Category, CollisionPair, CommandQueue, NodeId, SceneError, SceneGraph,
    SceneNode, SpriteNode,
};

/// World construction errors
#[derive(Debug, Error)]
pub enum WorldError {
    /// A texture or font is missing
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The world configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The scene could not be built
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// A sprite rectangle lies outside its texture
    #[error("Sprite rect {rect:?} lies outside {texture:?} ({width}x{height})")]
    TextureRect {
        /// Texture the rectangle refers to
        texture: TextureId,
        /// Offending rectangle
        rect: IntRect,
        /// Texture width
        width: u32,
        /// Texture height
        height: u32,
    },
}

/// Scene layers, drawn in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Scrolling background
    Background,
    /// Aircraft, projectiles and pickups
    Air,
}

impl Layer {
    const COUNT: usize = 2;
}

/// A scheduled enemy
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpawnPoint {
    kind: AircraftKind,
    position: Vec2,
}

/// The game world: scene graph, camera and enemy schedule
pub struct World {
    graph: SceneGraph,
    layers: [NodeId; Layer::COUNT],
    commands: CommandQueue,
    view: View,
    world_bounds: FloatRect,
    spawn_position: Vec2,
    scroll_speed: f32,
    border_distance: f32,
    battlefield_margin: f32,
    player: Option<NodeId>,
    // Sorted by ascending y; the next enemy to appear is last
    spawn_points: Vec<SpawnPoint>,
}

impl World {
    /// Build the layered scene, place the player and schedule the enemies
    ///
    /// Fails when a texture or font the scene refers to is missing, or a
    /// sprite rectangle does not fit inside its texture.
    pub fn new(
        config: &WorldConfig,
        textures: &TextureHolder,
        fonts: &FontHolder,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        validate_resources(textures, fonts)?;

        let view_size = config.view_size;
        let world_bounds = FloatRect::new(0.0, 0.0, view_size.x, config.world_height);
        let spawn_position = Vec2::new(
            view_size.x * 0.5,
            world_bounds.height - view_size.y * 0.5,
        );

        let mut graph = SceneGraph::new();
        let root = graph.root();
        let background = graph.attach_new(root, SceneNode::group(Category::NONE))?;
        let air = graph.attach_new(root, SceneNode::group(Category::SCENE_AIR_LAYER))?;

        // The background texture repeats over the whole level
        let background_rect = IntRect::new(
            0,
            0,
            world_bounds.width as i32,
            world_bounds.height as i32,
        );
        graph.attach_new(
            background,
            SceneNode::new(SpriteNode::new(TextureId::Jungle, background_rect))
                .at(Vec2::new(world_bounds.left, world_bounds.top)),
        )?;

        let player = graph.attach_new(
            air,
            SceneNode::new(Aircraft::new(AircraftKind::Eagle)).at(spawn_position),
        )?;

        let mut spawn_points: Vec<SpawnPoint> = config
            .spawn_points
            .iter()
            .map(|point| SpawnPoint {
                kind: point.kind,
                position: Vec2::new(spawn_position.x + point.x, spawn_position.y - point.y),
            })
            .collect();
        spawn_points.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));

        log::info!(
            "World built: {}x{} view, {} units long, {} enemies scheduled",
            view_size.x,
            view_size.y,
            config.world_height,
            spawn_points.len()
        );

        Ok(Self {
            graph,
            layers: [background, air],
            commands: CommandQueue::new(),
            view: View::new(spawn_position, view_size),
            world_bounds,
            spawn_position,
            scroll_speed: config.scroll_speed,
            border_distance: config.border_distance,
            battlefield_margin: config.battlefield_margin,
            player: Some(player),
            spawn_points,
        })
    }

    /// Advance the world by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.view.move_by(Vec2::new(0.0, self.scroll_speed * dt));
        if let Some(player) = self.player_aircraft_mut() {
            player.set_velocity(Vec2::zeros());
        }

        self.graph.dispatch_queue(&mut self.commands, dt);
        self.adapt_player_velocity();

        self.graph.update(dt, &mut self.commands);
        self.adapt_player_position();

        self.spawn_enemies();
        self.guide_missiles();
        self.handle_collisions();
        self.destroy_entities_outside_view();

        self.graph.remove_wrecks();
    }

    /// Draw the scene as seen through the world's view
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        target.set_view(&self.view);
        self.graph.draw(target);
    }

    /// Sink for commands to run at the start of the next frame
    pub fn command_queue(&self) -> &CommandQueue {
        &self.commands
    }

    /// Mutable command sink
    pub fn command_queue_mut(&mut self) -> &mut CommandQueue {
        &mut self.commands
    }

    /// True while the player's aircraft exists and is not destroyed
    pub fn has_alive_player(&self) -> bool {
        self.player
            .and_then(|id| self.graph.get(id))
            .is_some_and(|node| !node.is_destroyed())
    }

    /// True once the player has flown out of the world bounds
    pub fn has_player_reached_end(&self) -> bool {
        self.player
            .filter(|&id| self.graph.contains(id))
            .is_some_and(|id| !self.world_bounds.contains(self.graph.world_position(id)))
    }

    /// Outcome of the mission so far
    pub fn mission_status(&self) -> MissionStatus {
        if !self.has_alive_player() {
            MissionStatus::Failure
        } else if self.has_player_reached_end() {
            MissionStatus::Success
        } else {
            MissionStatus::Running
        }
    }

    /// Handle of the player's aircraft, while it exists
    pub fn player(&self) -> Option<NodeId> {
        self.player.filter(|&id| self.graph.contains(id))
    }

    /// The player's aircraft, while it exists
    pub fn player_aircraft(&self) -> Option<&Aircraft> {
        self.graph.behavior::<Aircraft>(self.player?)
    }

    fn player_aircraft_mut(&mut self) -> Option<&mut Aircraft> {
        self.graph.behavior_mut::<Aircraft>(self.player?)
    }

    /// The scene graph
    pub fn scene_graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The scene graph, mutably
    pub fn scene_graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Root node of a layer
    pub fn layer(&self, layer: Layer) -> NodeId {
        self.layers[layer as usize]
    }

    /// The camera
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Extent of the level
    pub fn world_bounds(&self) -> FloatRect {
        self.world_bounds
    }

    /// Where the player starts
    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    /// Enemies still waiting to appear
    pub fn remaining_spawns(&self) -> usize {
        self.spawn_points.len()
    }

    /// The view extended upwards by the battlefield margin
    pub fn battlefield_bounds(&self) -> FloatRect {
        let mut bounds = self.view.bounds();
        bounds.top -= self.battlefield_margin;
        bounds.height += self.battlefield_margin;
        bounds
    }

    fn adapt_player_velocity(&mut self) {
        let scroll_speed = self.scroll_speed;
        let Some(player) = self.player_aircraft_mut() else {
            return;
        };

        let velocity = player.velocity();
        if velocity.x != 0.0 && velocity.y != 0.0 {
            player.set_velocity(velocity / SQRT_2);
        }
        player.accelerate(Vec2::new(0.0, scroll_speed));
    }

    fn adapt_player_position(&mut self) {
        let view_bounds = self.view.bounds();
        let border = self.border_distance;
        let Some(node) = self.player.and_then(|id| self.graph.get_mut(id)) else {
            return;
        };

        let position = node.position();
        let clamped = Vec2::new(
            position
                .x
                .max(view_bounds.left + border)
                .min(view_bounds.right() - border),
            position
                .y
                .max(view_bounds.top + border)
                .min(view_bounds.bottom() - border),
        );
        node.set_position(clamped);
    }

    fn spawn_enemies(&mut self) {
        let battlefield_top = self.battlefield_bounds().top;
        let air = self.layer(Layer::Air);

        while let Some(spawn) = self.spawn_points.last().copied() {
            if spawn.position.y <= battlefield_top {
                break;
            }
            self.spawn_points.pop();

            let enemy = SceneNode::new(Aircraft::new(spawn.kind))
                .at(spawn.position)
                .rotated(180.0);
            match self.graph.attach_new(air, enemy) {
                Ok(_) => log::debug!(
                    "Spawned {:?} at ({:.0}, {:.0})",
                    spawn.kind,
                    spawn.position.x,
                    spawn.position.y
                ),
                Err(e) => log::warn!("Failed to spawn {:?}: {e}", spawn.kind),
            }
        }
    }

    fn guide_missiles(&mut self) {
        let enemies: Vec<(NodeId, Vec2)> = self
            .graph
            .nodes_matching(Category::ENEMY_AIRCRAFT)
            .into_iter()
            .filter(|&id| self.graph.get(id).is_some_and(|node| !node.is_destroyed()))
            .map(|id| (id, self.graph.world_position(id)))
            .collect();

        for id in self.graph.nodes_matching(Category::ALLIED_PROJECTILE) {
            let position = self.graph.world_position(id);
            let Some(missile) = self.graph.behavior_mut::<Projectile>(id) else {
                continue;
            };
            if !missile.is_guided() {
                continue;
            }

            let closest = enemies.iter().min_by(|a, b| {
                utils::distance(a.1, position).total_cmp(&utils::distance(b.1, position))
            });
            match closest {
                Some(&(target, target_position)) => {
                    missile.guide_towards(target, target_position - position);
                }
                None => missile.clear_target(),
            }
        }
    }

    fn handle_collisions(&mut self) {
        for pair in self.graph.collisions() {
            self.handle_collision(pair);
        }
    }

    fn handle_collision(&mut self, pair: CollisionPair) {
        let Some(reaction) = Reaction::classify(&self.graph, pair) else {
            return;
        };
        let graph = &mut self.graph;

        match reaction {
            Reaction::Ram { player, enemy } => {
                let Some(enemy_hitpoints) = graph.get(enemy).and_then(SceneNode::entity).map(Entity::hitpoints)
                else {
                    return;
                };
                if let Some(entity) = graph.get_mut(player).and_then(SceneNode::entity_mut) {
                    entity.damage(enemy_hitpoints);
                }
                if let Some(entity) = graph.get_mut(enemy).and_then(SceneNode::entity_mut) {
                    entity.destroy();
                }
            }
            Reaction::Collect { player, pickup } => {
                let Some(power_up) = graph.behavior::<Pickup>(pickup).cloned() else {
                    return;
                };
                if let Some(aircraft) = graph.behavior_mut::<Aircraft>(player) {
                    power_up.apply(aircraft);
                    log::debug!("Player collected {:?}", power_up.kind());
                }
                if let Some(entity) = graph.get_mut(pickup).and_then(SceneNode::entity_mut) {
                    entity.destroy();
                }
            }
            Reaction::Hit { aircraft, projectile } => {
                let Some(damage) = graph.behavior::<Projectile>(projectile).map(Projectile::damage) else {
                    return;
                };
                if let Some(entity) = graph.get_mut(aircraft).and_then(SceneNode::entity_mut) {
                    entity.damage(damage);
                }
                if let Some(entity) = graph.get_mut(projectile).and_then(SceneNode::entity_mut) {
                    entity.destroy();
                }
            }
        }
    }

    fn destroy_entities_outside_view(&mut self) {
        let battlefield = self.battlefield_bounds();

        for id in self
            .graph
            .nodes_matching(Category::PROJECTILE | Category::ENEMY_AIRCRAFT)
        {
            if battlefield.intersects(&self.graph.bounding_rect(id)) {
                continue;
            }
            if let Some(node) = self.graph.get_mut(id) {
                node.remove();
            }
        }
    }
}

/// Effect of a collision, with the pair ordered by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    /// The player flew into an enemy aircraft
    Ram { player: NodeId, enemy: NodeId },
    /// The player touched a pickup
    Collect { player: NodeId, pickup: NodeId },
    /// A projectile hit an aircraft of the other side
    Hit { aircraft: NodeId, projectile: NodeId },
}

impl Reaction {
    fn classify(graph: &SceneGraph, pair: CollisionPair) -> Option<Self> {
        if let Some((player, enemy)) =
            match_categories(graph, pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_AIRCRAFT)
        {
            return Some(Self::Ram { player, enemy });
        }
        if let Some((player, pickup)) =
            match_categories(graph, pair, Category::PLAYER_AIRCRAFT, Category::PICKUP)
        {
            return Some(Self::Collect { player, pickup });
        }
        match_categories(graph, pair, Category::ENEMY_AIRCRAFT, Category::ALLIED_PROJECTILE)
            .or_else(|| {
                match_categories(graph, pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_PROJECTILE)
            })
            .map(|(aircraft, projectile)| Self::Hit { aircraft, projectile })
    }
}

fn validate_resources(textures: &TextureHolder, fonts: &FontHolder) -> Result<(), WorldError> {
    textures.get(TextureId::Jungle)?;
    fonts.get(FontId::Main)?;

    for (texture_id, rect) in data::texture_rects() {
        let texture = textures.get(texture_id)?;
        if !rect.fits_within(texture.width(), texture.height()) {
            return Err(WorldError::TextureRect {
                texture: texture_id,
                rect,
                width: texture.width(),
                height: texture.height(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Font, Texture};
    use crate::core::SpawnPointConfig;
    use crate::entity::{PickupKind, ProjectileKind};
    use crate::input::PlayerAction;
    use crate::render::{DrawCommand, DrawRecorder};
    use crate::scene::{Command, NodeBehavior};
    use approx::assert_relative_eq;

    fn resources() -> (TextureHolder, FontHolder) {
        let mut textures = TextureHolder::new();
        textures.insert(TextureId::Entities, Texture::new(512, 256)).unwrap();
        textures.insert(TextureId::Jungle, Texture::new(256, 256)).unwrap();
        let mut fonts = FontHolder::new();
        fonts.insert(FontId::Main, Font::from_bytes(vec![0; 16])).unwrap();
        (textures, fonts)
    }

    fn quiet_world() -> World {
        let (textures, fonts) = resources();
        let config = WorldConfig::default().with_spawn_points(Vec::new());
        World::new(&config, &textures, &fonts).unwrap()
    }

    fn add_to_air(world: &mut World, node: SceneNode) -> NodeId {
        let air = world.layer(Layer::Air);
        world.scene_graph_mut().attach_new(air, node).unwrap()
    }

    fn player_position(world: &World) -> Vec2 {
        world.scene_graph().world_position(world.player().unwrap())
    }

    #[test]
    fn test_new_world_layout() {
        let world = quiet_world();
        let graph = world.scene_graph();

        assert_eq!(
            graph.get(graph.root()).unwrap().children(),
            &[world.layer(Layer::Background), world.layer(Layer::Air)]
        );
        assert_eq!(graph.category(world.layer(Layer::Air)), Category::SCENE_AIR_LAYER);
        assert_relative_eq!(world.spawn_position(), Vec2::new(320.0, 4760.0));
        assert_relative_eq!(world.view().center, world.spawn_position());
        assert_relative_eq!(player_position(&world), world.spawn_position());
        assert!(world.has_alive_player());
        assert!(!world.has_player_reached_end());
        assert_eq!(world.mission_status(), MissionStatus::Running);
    }

    #[test]
    fn test_missing_resources_are_fatal() {
        let (_, fonts) = resources();
        let mut textures = TextureHolder::new();
        textures.insert(TextureId::Jungle, Texture::new(256, 256)).unwrap();

        let result = World::new(&WorldConfig::default(), &textures, &fonts);
        assert!(matches!(result, Err(WorldError::Resource(ResourceError::Missing(_)))));

        let (textures, _) = resources();
        let result = World::new(&WorldConfig::default(), &textures, &FontHolder::new());
        assert!(matches!(result, Err(WorldError::Resource(ResourceError::Missing(_)))));
    }

    #[test]
    fn test_small_atlas_is_rejected() {
        let (_, fonts) = resources();
        let mut textures = TextureHolder::new();
        textures.insert(TextureId::Entities, Texture::new(128, 128)).unwrap();
        textures.insert(TextureId::Jungle, Texture::new(256, 256)).unwrap();

        let result = World::new(&WorldConfig::default(), &textures, &fonts);
        assert!(matches!(result, Err(WorldError::TextureRect { .. })));
    }

    #[test]
    fn test_view_and_player_scroll_together() {
        let mut world = quiet_world();
        let start = player_position(&world);

        world.update(0.5);

        assert_relative_eq!(world.view().center, Vec2::new(320.0, 4735.0));
        assert_relative_eq!(player_position(&world), start + Vec2::new(0.0, -25.0));
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut world = quiet_world();
        world.command_queue_mut().push(PlayerAction::MoveLeft.command());
        world.command_queue_mut().push(PlayerAction::MoveUp.command());

        world.update(0.125);

        let velocity = world.player_aircraft().unwrap().velocity();
        let component = 200.0 / SQRT_2;
        assert_relative_eq!(velocity, Vec2::new(-component, -component - 50.0), epsilon = 1e-3);
    }

    #[test]
    fn test_player_is_kept_inside_view() {
        let mut world = quiet_world();
        let player = world.player().unwrap();
        world
            .scene_graph_mut()
            .get_mut(player)
            .unwrap()
            .set_position(Vec2::new(-500.0, 10_000.0));

        world.update(0.0);

        let bounds = world.view().bounds();
        assert_relative_eq!(
            player_position(&world),
            Vec2::new(bounds.left + 40.0, bounds.bottom() - 40.0)
        );
    }

    #[test]
    fn test_enemies_spawn_as_battlefield_reaches_them() {
        let (textures, fonts) = resources();
        let config = WorldConfig::default().with_spawn_points(vec![
            SpawnPointConfig::new(AircraftKind::Raptor, 0.0, 1000.0),
            SpawnPointConfig::new(AircraftKind::Raptor, 50.0, 100.0),
        ]);
        let mut world = World::new(&config, &textures, &fonts).unwrap();

        world.update(0.0);

        assert_eq!(world.remaining_spawns(), 1);
        let enemies = world.scene_graph().nodes_matching(Category::ENEMY_AIRCRAFT);
        assert_eq!(enemies.len(), 1);
        let enemy = world.scene_graph().get(enemies[0]).unwrap();
        assert_relative_eq!(enemy.position(), Vec2::new(370.0, 4660.0));
        assert_relative_eq!(enemy.transform().rotation, 180.0);
    }

    #[test]
    fn test_command_reaches_only_enemies() {
        let mut world = quiet_world();
        let enemies: Vec<NodeId> = [100.0, 500.0]
            .iter()
            .map(|&x| {
                let mut raptor = Aircraft::new(AircraftKind::Raptor);
                raptor.set_velocity(Vec2::new(10.0, 10.0));
                add_to_air(&mut world, SceneNode::new(raptor).at(Vec2::new(x, 4600.0)))
            })
            .collect();
        let player = world.player().unwrap();
        world
            .scene_graph_mut()
            .behavior_mut::<Aircraft>(player)
            .unwrap()
            .set_velocity(Vec2::new(5.0, 5.0));

        let mut commands = CommandQueue::new();
        commands.push(Command::for_type::<Aircraft, _>(Category::ENEMY_AIRCRAFT, |aircraft, _| {
            aircraft.set_velocity(Vec2::zeros());
        }));
        world.scene_graph_mut().dispatch_queue(&mut commands, 0.0);

        let graph = world.scene_graph();
        for enemy in enemies {
            assert_relative_eq!(graph.behavior::<Aircraft>(enemy).unwrap().velocity(), Vec2::zeros());
        }
        assert_relative_eq!(
            graph.behavior::<Aircraft>(player).unwrap().velocity(),
            Vec2::new(5.0, 5.0)
        );
    }

    #[test]
    fn test_missile_hit_destroys_enemy_and_missile() {
        let mut world = quiet_world();
        let target = Vec2::new(320.0, 4600.0);
        let enemy = add_to_air(
            &mut world,
            SceneNode::new(Aircraft::new(AircraftKind::Raptor)).at(target).rotated(180.0),
        );
        let missile = add_to_air(
            &mut world,
            SceneNode::new(Projectile::launched(ProjectileKind::Missile, Vec2::new(0.0, -150.0)))
                .at(target),
        );

        let pairs = world.scene_graph().collisions();
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&CollisionPair::new(enemy, missile)));

        world.update(0.0);

        // Destroyed at once, but the wreck stays for one more frame
        let wreck = world.scene_graph().get(enemy).unwrap();
        assert!(wreck.is_destroyed());
        assert!(!wreck.is_marked_for_removal());
        assert_eq!(wreck.entity().unwrap().hitpoints(), 0);
        assert!(!world.scene_graph().contains(missile));

        let mut recorder = DrawRecorder::new();
        world.draw(&mut recorder);
        assert_eq!(recorder.count_sprites(data::aircraft(AircraftKind::Raptor).texture_rect), 1);

        world.update(0.0);
        assert!(!world.scene_graph().contains(enemy));
    }

    #[test]
    fn test_bullet_damages_enemy_by_projectile_damage() {
        let mut world = quiet_world();
        let position = Vec2::new(200.0, 4600.0);
        let enemy = add_to_air(
            &mut world,
            SceneNode::new(Aircraft::new(AircraftKind::Avenger)).at(position),
        );
        add_to_air(
            &mut world,
            SceneNode::new(Projectile::new(ProjectileKind::AlliedBullet)).at(position),
        );

        world.update(0.0);

        let aircraft = world.scene_graph().behavior::<Aircraft>(enemy).unwrap();
        assert_eq!(aircraft.hitpoints(), 30);
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let mut world = quiet_world();
        let position = player_position(&world);
        add_to_air(
            &mut world,
            SceneNode::new(Projectile::new(ProjectileKind::EnemyBullet)).at(position),
        );

        world.update(0.0);

        assert_eq!(world.player_aircraft().unwrap().hitpoints(), 90);
    }

    #[test]
    fn test_ramming_enemy_costs_its_hitpoints() {
        let mut world = quiet_world();
        let position = player_position(&world);
        let enemy = add_to_air(
            &mut world,
            SceneNode::new(Aircraft::new(AircraftKind::Raptor)).at(position),
        );

        world.update(0.0);

        assert_eq!(world.player_aircraft().unwrap().hitpoints(), 80);
        assert!(world.scene_graph().get(enemy).unwrap().is_destroyed());
        assert!(world.has_alive_player());
    }

    #[test]
    fn test_pickup_is_applied_and_consumed() {
        let mut world = quiet_world();
        let position = player_position(&world);
        let pickup = add_to_air(
            &mut world,
            SceneNode::new(Pickup::new(PickupKind::FireSpread)).at(position),
        );

        world.update(0.0);

        assert_eq!(world.player_aircraft().unwrap().spread_level(), 2);
        assert!(!world.scene_graph().contains(pickup));
    }

    #[test]
    fn test_missile_homes_on_closest_enemy() {
        let mut world = quiet_world();
        let far = add_to_air(
            &mut world,
            SceneNode::new(Aircraft::new(AircraftKind::Raptor)).at(Vec2::new(100.0, 4550.0)),
        );
        let near = add_to_air(
            &mut world,
            SceneNode::new(Aircraft::new(AircraftKind::Raptor)).at(Vec2::new(450.0, 4600.0)),
        );
        let missile = add_to_air(
            &mut world,
            SceneNode::new(Projectile::launched(ProjectileKind::Missile, Vec2::new(0.0, -150.0)))
                .at(Vec2::new(400.0, 4700.0)),
        );

        world.update(0.0);

        let projectile = world.scene_graph().behavior::<Projectile>(missile).unwrap();
        assert_eq!(projectile.target(), Some(near));
        assert_ne!(projectile.target(), Some(far));
    }

    #[test]
    fn test_projectiles_leaving_battlefield_are_removed() {
        let mut world = quiet_world();
        let stray = add_to_air(
            &mut world,
            SceneNode::new(Projectile::new(ProjectileKind::AlliedBullet)).at(Vec2::new(320.0, 100.0)),
        );
        let visible = add_to_air(
            &mut world,
            SceneNode::new(Projectile::new(ProjectileKind::AlliedBullet)).at(Vec2::new(320.0, 4600.0)),
        );

        world.update(0.0);

        assert!(!world.scene_graph().contains(stray));
        assert!(world.scene_graph().contains(visible));
    }

    #[test]
    fn test_losing_the_player_fails_the_mission() {
        let mut world = quiet_world();
        let player = world.player().unwrap();
        world.scene_graph_mut().get_mut(player).unwrap().entity_mut().unwrap().damage(1000);

        assert!(!world.has_alive_player());
        assert_eq!(world.mission_status(), MissionStatus::Failure);

        world.update(0.0);
        world.update(0.0);

        assert!(world.player().is_none());
        assert!(world.player_aircraft().is_none());
        assert!(!world.has_player_reached_end());
        assert_eq!(world.mission_status(), MissionStatus::Failure);
    }

    #[test]
    fn test_leaving_world_bounds_is_success() {
        let mut world = quiet_world();
        let player = world.player().unwrap();
        world
            .scene_graph_mut()
            .get_mut(player)
            .unwrap()
            .set_position(Vec2::new(320.0, -10.0));

        assert!(world.has_player_reached_end());
        assert_eq!(world.mission_status(), MissionStatus::Success);
    }

    #[test]
    fn test_draw_sets_view_then_paints_background_first() {
        let world = quiet_world();
        let mut recorder = DrawRecorder::new();

        world.draw(&mut recorder);

        assert_eq!(recorder.view(), Some(world.view()));
        match &recorder.commands()[0] {
            DrawCommand::Sprite { texture, texture_rect, .. } => {
                assert_eq!(*texture, TextureId::Jungle);
                assert_eq!(*texture_rect, IntRect::new(0, 0, 640, 5000));
            }
            DrawCommand::Text { .. } => panic!("background must be drawn first"),
        }
        let player_rect = data::aircraft(AircraftKind::Eagle).texture_rect;
        assert_eq!(recorder.count_sprites(player_rect), 1);
    }

    #[test]
    fn test_player_fire_reaches_air_layer_next_frame() {
        let mut world = quiet_world();
        world.command_queue_mut().push(PlayerAction::Fire.command());

        // Frame 1 turns the request into a volley command, frame 2 spawns it
        world.update(0.0);
        assert!(world.scene_graph().nodes_matching(Category::ALLIED_PROJECTILE).is_empty());
        world.update(0.0);

        let bullets = world.scene_graph().nodes_matching(Category::ALLIED_PROJECTILE);
        assert_eq!(bullets.len(), 1);
        let bullet = world.scene_graph().behavior::<Projectile>(bullets[0]).unwrap();
        assert_eq!(bullet.kind(), ProjectileKind::AlliedBullet);
        assert_eq!(bullet.category(), Some(Category::ALLIED_PROJECTILE));
    }
}
