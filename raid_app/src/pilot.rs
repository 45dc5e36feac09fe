//! Scripted stand-in for a human player

use scroll_engine::input::{InputEvent, KeyCode};

/// Seconds spent weaving in one direction
const WEAVE_PERIOD: f32 = 1.5;

/// Seconds between missile launches
const MISSILE_PERIOD: f32 = 4.0;

/// Deterministic pilot: keeps the trigger down, weaves left and right and
/// launches a missile every few seconds
#[derive(Debug, Default)]
pub struct ScriptedPilot {
    elapsed: f32,
    next_missile: f32,
}

impl ScriptedPilot {
    /// Create a pilot at the start of its script
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            next_missile: MISSILE_PERIOD,
        }
    }

    /// Advance the script and return the key presses that happened
    pub fn advance(&mut self, dt: f32) -> Vec<InputEvent> {
        self.elapsed += dt;

        let mut events = Vec::new();
        if self.elapsed >= self.next_missile {
            events.push(InputEvent::KeyPressed(KeyCode::M));
            events.push(InputEvent::KeyReleased(KeyCode::M));
            self.next_missile += MISSILE_PERIOD;
        }
        events
    }

    /// Whether the script holds `key` down right now
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        let heading_left = (self.elapsed / WEAVE_PERIOD) as u32 % 2 == 0;
        match key {
            KeyCode::Space => true,
            KeyCode::Left => heading_left,
            KeyCode::Right => !heading_left,
            _ => false,
        }
    }
}
