//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per external clock tick, no internal timers
//! - Injected RNG only
//! - Stable iteration order (obstacles in creation order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ObstacleHit, actor_obstacle_collision};
pub use engine::Engine;
pub use events::{EventSink, GameEvent, NullSink};
pub use snapshot::{ObstacleView, Snapshot};
pub use state::{Actor, Field, GamePhase, GameState, Obstacle};
pub use tick::{Command, activate, apply, initialize, resize, restart, start, tick};
