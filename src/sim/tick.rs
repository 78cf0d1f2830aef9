//! Fixed timestep simulation tick
//!
//! Session lifecycle (initialize/start/restart), the flap command, and the
//! per-tick physics/obstacle update. Every function takes the session state
//! explicitly; none of them keep hidden state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{ObstacleHit, actor_obstacle_collision};
use super::events::{EventSink, GameEvent};
use super::state::{Actor, Field, GamePhase, GameState, Obstacle};
use crate::tuning::Tuning;

/// Discrete commands delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Leave the idle screen
    Start,
    /// Flap
    Activate,
    /// Begin a fresh session
    Restart,
}

/// Reset every entity of the session for the given field
///
/// The actor respawns mid-field, obstacles, score and the tick counter are
/// cleared, and a finished session becomes running again. An idle session
/// stays idle: only [`start`] leaves the idle screen.
pub fn initialize(state: &mut GameState, tuning: &Tuning, field: Field) {
    state.field = field;
    state.actor = Actor::spawn(tuning, field);
    state.obstacles.clear();
    state.score = 0;
    state.elapsed_ticks = 0;
    if state.phase == GamePhase::Over {
        state.phase = GamePhase::Running;
    }
}

/// Idle -> Running. Returns false (and changes nothing) in any other phase.
pub fn start(state: &mut GameState, tuning: &Tuning, events: &mut impl EventSink) -> bool {
    if state.phase != GamePhase::Idle {
        return false;
    }
    state.phase = GamePhase::Running;
    initialize(state, tuning, state.field);
    log::info!(
        "Session started on {}x{} field",
        state.field.width,
        state.field.height
    );
    events.emit(GameEvent::Started);
    true
}

/// Reinitialize and run, from any phase
pub fn restart(state: &mut GameState, tuning: &Tuning, events: &mut impl EventSink) {
    let previous = state.score;
    initialize(state, tuning, state.field);
    state.phase = GamePhase::Running;
    log::info!("Session restarted (previous score {})", previous);
    events.emit(GameEvent::Restarted);
}

/// Flap: override the actor's velocity with the upward impulse
///
/// Ignored unless the session is running.
pub fn activate(state: &mut GameState, tuning: &Tuning, events: &mut impl EventSink) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    state.actor.vel = -tuning.jump_impulse;
    events.emit(GameEvent::Flapped);
    true
}

/// Adopt new field dimensions without repositioning anything
pub fn resize(state: &mut GameState, field: Field) {
    log::debug!("Field resized to {}x{}", field.width, field.height);
    state.field = field;
}

/// Dispatch a command. Returns whether it had any effect.
pub fn apply(
    state: &mut GameState,
    tuning: &Tuning,
    command: Command,
    events: &mut impl EventSink,
) -> bool {
    match command {
        Command::Start => start(state, tuning, events),
        Command::Activate => activate(state, tuning, events),
        Command::Restart => {
            restart(state, tuning, events);
            true
        }
    }
}

/// Advance the session by one tick
///
/// No-op unless running. Order: gravity, motion, ceiling clamp, ground
/// check, spawn, per-obstacle move/collide/score, despawn, tick counter.
/// A ground or obstacle collision ends the session and skips the rest of
/// the tick.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut impl EventSink,
) {
    if state.phase != GamePhase::Running {
        return;
    }

    // Actor physics
    let actor = &mut state.actor;
    actor.vel += tuning.gravity;
    actor.pos.y += actor.vel;
    if actor.pos.y < 0.0 {
        actor.pos.y = 0.0;
        actor.vel = 0.0;
    }

    if state.actor.bottom() >= state.field.height {
        let score = state.score;
        end_session(state, GameEvent::GroundCollision { score });
        events.emit(GameEvent::GroundCollision { score });
        return;
    }

    // Spawn; a zero interval never spawns
    if state.elapsed_ticks.checked_rem(tuning.spawn_interval) == Some(0) {
        let id = state.next_obstacle_id();
        let obstacle = Obstacle::generate(id, tuning, state.field, rng);
        log::debug!(
            "Spawned obstacle {} at tick {} (top {:.1}, bottom {:.1})",
            id,
            state.elapsed_ticks,
            obstacle.top,
            obstacle.bottom
        );
        state.obstacles.push(obstacle);
        events.emit(GameEvent::ObstacleSpawned {
            elapsed_ticks: state.elapsed_ticks,
        });
    }

    // Move, collide, score
    let actor = &state.actor;
    let field_height = state.field.height;
    let mut crash: Option<(u32, ObstacleHit)> = None;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= tuning.obstacle_speed;

        if let Some(hit) = actor_obstacle_collision(actor, obstacle, field_height) {
            crash = Some((obstacle.id, hit));
            break;
        }

        if !obstacle.passed && actor.pos.x > obstacle.trailing_edge() {
            obstacle.passed = true;
            state.score += 1;
            log::debug!("Passed obstacle {}, score {}", obstacle.id, state.score);
            events.emit(GameEvent::Scored { score: state.score });
        }
    }

    if let Some((id, hit)) = crash {
        log::debug!("Hit {:?} segment of obstacle {}", hit, id);
        let score = state.score;
        end_session(state, GameEvent::ObstacleCollision { score });
        events.emit(GameEvent::ObstacleCollision { score });
        return;
    }

    // Despawn
    let margin = tuning.despawn_margin;
    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.trailing_edge() > -margin);
    if state.obstacles.len() != before {
        log::debug!("Despawned {} obstacle(s)", before - state.obstacles.len());
    }

    state.elapsed_ticks += 1;
}

fn end_session(state: &mut GameState, cause: GameEvent) {
    state.phase = GamePhase::Over;
    log::info!(
        "Game over after {} ticks: {:?}, final score {}",
        state.elapsed_ticks,
        cause,
        state.score
    );
}
