//! Read-only view of a session for presentation
//!
//! Renderers get boxes in screen space and never touch [`GameState`].

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::{Field, GamePhase, GameState};

/// One obstacle, already resolved into its two drawable segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub top: Aabb,
    pub bottom: Aabb,
    pub passed: bool,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub field: Field,
    pub actor: Aabb,
    pub actor_velocity: f32,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub elapsed_ticks: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let field_height = state.field.height;
        Self {
            phase: state.phase,
            field: state.field,
            actor: state.actor.bounds(),
            actor_velocity: state.actor.vel,
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    top: o.top_bounds(),
                    bottom: o.bottom_bounds(field_height),
                    passed: o.passed,
                })
                .collect(),
            score: state.score,
            elapsed_ticks: state.elapsed_ticks,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self::capture(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_capture_resolves_segments() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, Field::new(800.0, 600.0));
        let id = state.next_obstacle_id();
        state.obstacles.push(Obstacle {
            id,
            x: 500.0,
            width: 60.0,
            top: 100.0,
            bottom: 250.0,
            passed: false,
        });

        let snapshot = Snapshot::from(&state);

        assert_eq!(snapshot.phase, GamePhase::Idle);
        assert_eq!(snapshot.actor.min, Vec2::new(50.0, 300.0));
        assert_eq!(snapshot.obstacles.len(), 1);
        let view = &snapshot.obstacles[0];
        assert_eq!(view.top.size, Vec2::new(60.0, 100.0));
        assert_eq!(view.bottom.min, Vec2::new(500.0, 350.0));
        assert_eq!(view.bottom.max().y, 600.0);
    }

    #[test]
    fn test_json_contains_hud_fields() {
        let state = GameState::new(&Tuning::default(), Field::default());
        let json = Snapshot::capture(&state).to_json().expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parses");
        assert_eq!(value["score"], 0);
        assert_eq!(value["phase"], state.phase.as_str());
        assert_eq!(value["phase"], "idle");
        assert!(value["obstacles"].as_array().is_some_and(|a| a.is_empty()));
    }

    #[test]
    fn test_phase_spelling_matches_host_api() {
        for phase in [GamePhase::Idle, GamePhase::Running, GamePhase::Over] {
            let json = serde_json::to_string(&phase).expect("serializes");
            assert_eq!(json, format!("\"{}\"", phase.as_str()));
            let back: GamePhase = serde_json::from_str(&json).expect("parses");
            assert_eq!(back, phase);
        }
    }
}
