//! Player key bindings and mission status

use std::collections::BTreeMap;

use crate::entity::Aircraft;
use crate::foundation::math::Vec2;
use crate::scene::{Category, Command, CommandQueue};

use super::{InputEvent, KeyCode};

/// Things the player can ask their aircraft to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerAction {
    /// Fly left
    MoveLeft,
    /// Fly right
    MoveRight,
    /// Fly up the screen
    MoveUp,
    /// Fly down the screen
    MoveDown,
    /// Shoot bullets
    Fire,
    /// Launch a homing missile
    LaunchMissile,
}

impl PlayerAction {
    /// Every action
    pub const ALL: [Self; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::MoveUp,
        Self::MoveDown,
        Self::Fire,
        Self::LaunchMissile,
    ];

    /// Held actions repeat every frame; the others trigger once per key press
    pub fn is_realtime(self) -> bool {
        !matches!(self, Self::LaunchMissile)
    }

    /// Command that performs this action on the player's aircraft
    pub fn command(self) -> Command {
        match self {
            Self::MoveLeft => mover(Vec2::new(-1.0, 0.0)),
            Self::MoveRight => mover(Vec2::new(1.0, 0.0)),
            Self::MoveUp => mover(Vec2::new(0.0, -1.0)),
            Self::MoveDown => mover(Vec2::new(0.0, 1.0)),
            Self::Fire => Command::for_type::<Aircraft, _>(Category::PLAYER_AIRCRAFT, |aircraft, _| {
                aircraft.fire();
            }),
            Self::LaunchMissile => {
                Command::for_type::<Aircraft, _>(Category::PLAYER_AIRCRAFT, |aircraft, _| {
                    aircraft.launch_missile();
                })
            }
        }
    }
}

fn mover(direction: Vec2) -> Command {
    Command::for_type::<Aircraft, _>(Category::PLAYER_AIRCRAFT, move |aircraft, _| {
        let speed = aircraft.max_speed();
        aircraft.accelerate(direction * speed);
    })
}

/// Outcome of the current mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissionStatus {
    /// Still flying
    #[default]
    Running,
    /// The player reached the end of the level
    Success,
    /// The player's aircraft was destroyed
    Failure,
}

/// Maps keys to player actions and actions to commands
#[derive(Debug, Clone)]
pub struct PlayerController {
    bindings: BTreeMap<KeyCode, PlayerAction>,
    mission_status: MissionStatus,
}

impl PlayerController {
    /// Create a controller with the default bindings
    ///
    /// Arrow keys move, Space fires, M launches a missile.
    pub fn new() -> Self {
        let bindings = BTreeMap::from([
            (KeyCode::Left, PlayerAction::MoveLeft),
            (KeyCode::Right, PlayerAction::MoveRight),
            (KeyCode::Up, PlayerAction::MoveUp),
            (KeyCode::Down, PlayerAction::MoveDown),
            (KeyCode::Space, PlayerAction::Fire),
            (KeyCode::M, PlayerAction::LaunchMissile),
        ]);

        Self {
            bindings,
            mission_status: MissionStatus::Running,
        }
    }

    /// Push commands for one-shot actions bound to a pressed key
    pub fn handle_event(&self, event: InputEvent, commands: &mut CommandQueue) {
        if let InputEvent::KeyPressed(key) = event {
            if let Some(&action) = self.bindings.get(&key) {
                if !action.is_realtime() {
                    commands.push(action.command());
                }
            }
        }
    }

    /// Push commands for held actions whose key is currently down
    pub fn handle_realtime_input(
        &self,
        is_pressed: impl Fn(KeyCode) -> bool,
        commands: &mut CommandQueue,
    ) {
        for (&key, &action) in &self.bindings {
            if action.is_realtime() && is_pressed(key) {
                commands.push(action.command());
            }
        }
    }

    /// Bind `key` to `action`, replacing any previous key for that action
    pub fn assign_key(&mut self, action: PlayerAction, key: KeyCode) {
        self.bindings.retain(|_, bound| *bound != action);
        self.bindings.insert(key, action);
    }

    /// Key currently bound to `action`
    pub fn assigned_key(&self, action: PlayerAction) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find_map(|(&key, &bound)| (bound == action).then_some(key))
    }

    /// Record the mission outcome
    pub fn set_mission_status(&mut self, status: MissionStatus) {
        if status != self.mission_status {
            log::info!("Mission status: {:?} -> {:?}", self.mission_status, status);
        }
        self.mission_status = status;
    }

    /// Current mission outcome
    pub fn mission_status(&self) -> MissionStatus {
        self.mission_status
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AircraftKind;
    use crate::scene::{SceneGraph, SceneNode};
    use approx::assert_relative_eq;

    fn graph_with_player() -> (SceneGraph, crate::scene::NodeId) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let player = graph
            .attach_new(root, SceneNode::new(Aircraft::new(AircraftKind::Eagle)))
            .unwrap();
        (graph, player)
    }

    #[test]
    fn test_held_keys_accelerate_player() {
        let controller = PlayerController::new();
        let (mut graph, player) = graph_with_player();
        let mut commands = CommandQueue::new();

        controller.handle_realtime_input(|key| matches!(key, KeyCode::Left | KeyCode::Up), &mut commands);
        assert_eq!(commands.len(), 2);
        graph.dispatch_queue(&mut commands, 0.016);

        let velocity = graph.behavior::<Aircraft>(player).unwrap().velocity();
        assert_relative_eq!(velocity, Vec2::new(-200.0, -200.0));
    }

    #[test]
    fn test_missile_is_one_shot() {
        let controller = PlayerController::new();
        let mut commands = CommandQueue::new();

        // Holding M does nothing; pressing it launches once
        controller.handle_realtime_input(|key| key == KeyCode::M, &mut commands);
        assert!(commands.is_empty());

        controller.handle_event(InputEvent::KeyPressed(KeyCode::M), &mut commands);
        controller.handle_event(InputEvent::KeyReleased(KeyCode::M), &mut commands);
        assert_eq!(commands.len(), 1);

        let (mut graph, player) = graph_with_player();
        graph.dispatch_queue(&mut commands, 0.0);
        assert_eq!(graph.behavior::<Aircraft>(player).unwrap().missile_ammo(), 1);
    }

    #[test]
    fn test_pressed_event_ignores_realtime_actions() {
        let controller = PlayerController::new();
        let mut commands = CommandQueue::new();

        controller.handle_event(InputEvent::KeyPressed(KeyCode::Space), &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn test_assign_key_replaces_previous_binding() {
        let mut controller = PlayerController::new();
        controller.assign_key(PlayerAction::Fire, KeyCode::X);

        assert_eq!(controller.assigned_key(PlayerAction::Fire), Some(KeyCode::X));

        let mut commands = CommandQueue::new();
        controller.handle_realtime_input(|key| key == KeyCode::Space, &mut commands);
        assert!(commands.is_empty());
        controller.handle_realtime_input(|key| key == KeyCode::X, &mut commands);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_player_commands_skip_enemies() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let enemy = graph
            .attach_new(root, SceneNode::new(Aircraft::new(AircraftKind::Raptor)))
            .unwrap();
        let mut commands = CommandQueue::new();
        commands.push(PlayerAction::MoveRight.command());

        graph.dispatch_queue(&mut commands, 0.0);

        assert_relative_eq!(graph.behavior::<Aircraft>(enemy).unwrap().velocity(), Vec2::zeros());
    }

    #[test]
    fn test_mission_status_defaults_to_running() {
        let mut controller = PlayerController::new();
        assert_eq!(controller.mission_status(), MissionStatus::Running);
        controller.set_mission_status(MissionStatus::Failure);
        assert_eq!(controller.mission_status(), MissionStatus::Failure);
    }
}
