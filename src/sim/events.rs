//! Discrete notifications emitted by the simulation
//!
//! The simulation never plays sounds or touches the DOM; presentation code
//! receives these through an [`EventSink`] and reacts on its own.

use serde::{Deserialize, Serialize};

/// Something observable happened during a command or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Idle -> Running
    Started,
    /// Session reinitialized and running again
    Restarted,
    /// Actor flapped
    Flapped,
    /// A new obstacle entered at the right edge
    ObstacleSpawned { elapsed_ticks: u64 },
    /// Actor passed an obstacle; carries the new score
    Scored { score: u32 },
    /// Actor reached the bottom of the field
    GroundCollision { score: u32 },
    /// Actor ran into an obstacle segment
    ObstacleCollision { score: u32 },
}

impl GameEvent {
    /// True for the events that end a session
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameEvent::GroundCollision { .. } | GameEvent::ObstacleCollision { .. }
        )
    }
}

/// Receiver for simulation events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
