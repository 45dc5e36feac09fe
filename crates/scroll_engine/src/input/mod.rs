//! Input handling
//!
//! The host translates platform events into [`InputEvent`]s and polls key
//! state for held keys; [`PlayerController`] turns both into commands for
//! the player's aircraft.

mod player;

pub use player::{MissionStatus, PlayerAction, PlayerController};

use serde::{Deserialize, Serialize};

/// One-shot input events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down
    KeyPressed(KeyCode),
    /// A key went up
    KeyReleased(KeyCode),
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// M key
    M,
    /// S key
    S,
    /// W key
    W,
    /// X key
    X,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}
