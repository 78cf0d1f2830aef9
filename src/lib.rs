//! Flappy Sim - a flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `input`: Raw input to engine command mapping
//! - `audio`: Sound cues derived from simulation events
//! - `settings` / `highscores`: Player preferences and leaderboard
//! - `storage`: JSON persistence (LocalStorage in the browser)

pub mod audio;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod storage;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per display refresh)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Gravity (velocity change per tick, positive = downward)
    pub const GRAVITY: f32 = 0.1;
    /// Flap impulse magnitude; a flap sets velocity to `-JUMP_IMPULSE`
    pub const JUMP_IMPULSE: f32 = 3.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 40.0;
    pub const ACTOR_START_VELOCITY: f32 = 2.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_SPEED: f32 = 2.0;
    pub const SPAWN_INTERVAL_TICKS: u64 = 120;
    pub const MIN_GAP: f32 = 150.0;
    pub const MAX_GAP: f32 = 200.0;
    pub const MIN_SEGMENT_HEIGHT: f32 = 50.0;
    /// Obstacles are dropped once `x + width` reaches `-DESPAWN_MARGIN`
    pub const DESPAWN_MARGIN: f32 = 50.0;

    /// Default play-field size
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
}
