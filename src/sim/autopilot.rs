//! Demo-mode controller
//!
//! Flies the actor for attract screens and the headless runner. It aims the
//! actor's centre at the middle of the next unpassed gap and flaps whenever
//! the next tick would leave it too far below that line.

use super::state::GameState;
use crate::tuning::Tuning;

/// How far below the target line the actor may sink before flapping
pub const FLAP_TOLERANCE: f32 = 10.0;

/// Vertical line the actor's centre is steered toward
pub fn target_y(state: &GameState) -> f32 {
    let field_height = state.field.height;
    state
        .obstacles
        .iter()
        .find(|o| !o.passed)
        .map(|o| o.top + o.gap(field_height) / 2.0)
        .unwrap_or(field_height / 2.0)
}

/// Whether to flap before the next tick
pub fn should_flap(state: &GameState, tuning: &Tuning) -> bool {
    if !state.is_running() {
        return false;
    }
    let actor = &state.actor;
    let centre = actor.pos.y + actor.size.y / 2.0;
    let predicted = centre + actor.vel + tuning.gravity;
    predicted > target_y(state) + FLAP_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Field, GamePhase, Obstacle};

    fn running() -> (Tuning, GameState) {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, Field::new(800.0, 600.0));
        state.phase = GamePhase::Running;
        (tuning, state)
    }

    #[test]
    fn test_targets_field_centre_without_obstacles() {
        let (_, state) = running();
        assert_eq!(target_y(&state), 300.0);
    }

    #[test]
    fn test_targets_first_unpassed_gap() {
        let (_, mut state) = running();
        state.obstacles.push(Obstacle {
            id: 1,
            x: -20.0,
            width: 60.0,
            top: 400.0,
            bottom: 50.0,
            passed: true,
        });
        state.obstacles.push(Obstacle {
            id: 2,
            x: 220.0,
            width: 60.0,
            top: 100.0,
            bottom: 300.0,
            passed: false,
        });
        // Gap of 200 starting at 100
        assert_eq!(target_y(&state), 200.0);
    }

    #[test]
    fn test_flaps_only_when_sinking_below_target() {
        let (tuning, mut state) = running();
        // Centre at 320, falling: below the 300 line by more than the tolerance
        state.actor.pos.y = 300.0;
        state.actor.vel = 2.0;
        assert!(should_flap(&state, &tuning));

        // Centre at 260 and rising
        state.actor.pos.y = 240.0;
        state.actor.vel = -2.0;
        assert!(!should_flap(&state, &tuning));
    }

    #[test]
    fn test_never_flaps_outside_running() {
        let (tuning, mut state) = running();
        state.actor.pos.y = 500.0;
        state.phase = GamePhase::Over;
        assert!(!should_flap(&state, &tuning));
    }
}
