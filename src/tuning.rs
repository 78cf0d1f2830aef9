//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so hosts can load overrides
//! from JSON. Defaults reproduce the classic 404-page game.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected tuning values
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// The JSON document could not be parsed.
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Obstacles would never (or always) spawn.
    #[error("spawn interval must be at least one tick")]
    ZeroSpawnInterval,

    /// `min_gap` exceeds `max_gap`.
    #[error("gap range is inverted: min {min} > max {max}")]
    InvertedGapRange { min: f32, max: f32 },

    /// A constant that must be finite and non-negative is not.
    #[error("{name} must be finite and non-negative (got {value})")]
    Negative { name: &'static str, value: f32 },

    /// A constant that must be strictly positive is not.
    #[error("{name} must be greater than zero (got {value})")]
    NotPositive { name: &'static str, value: f32 },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to the actor's velocity every tick
    pub gravity: f32,
    /// A flap sets velocity to `-jump_impulse`
    pub jump_impulse: f32,
    /// Fixed horizontal offset of the actor
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    /// Velocity the actor starts each session with
    pub start_velocity: f32,
    pub obstacle_width: f32,
    /// Leftward obstacle movement per tick
    pub obstacle_speed: f32,
    /// Ticks between obstacle spawns
    pub spawn_interval: u64,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Smallest top segment a generated obstacle may have
    pub min_segment_height: f32,
    pub despawn_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            start_velocity: ACTOR_START_VELOCITY,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL_TICKS,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,
            min_segment_height: MIN_SEGMENT_HEIGHT,
            despawn_margin: DESPAWN_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON overlay on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every constant is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_interval == 0 {
            return Err(TuningError::ZeroSpawnInterval);
        }

        for (name, value) in [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("actor_x", self.actor_x),
            ("min_gap", self.min_gap),
            ("max_gap", self.max_gap),
            ("min_segment_height", self.min_segment_height),
            ("despawn_margin", self.despawn_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }

        for (name, value) in [
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        if !self.start_velocity.is_finite() {
            return Err(TuningError::Negative {
                name: "start_velocity",
                value: self.start_velocity,
            });
        }

        if self.min_gap > self.max_gap {
            return Err(TuningError::InvertedGapRange {
                min: self.min_gap,
                max: self.max_gap,
            });
        }

        Ok(())
    }
}
