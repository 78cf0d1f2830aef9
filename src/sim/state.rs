//! Game state and core simulation types
//!
//! All state of one play session lives here. Nothing in this module reads
//! a clock or a global RNG; randomness is passed in by the caller.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Waiting for a start command
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Session ended; only a restart leaves this phase
    Over,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::Over => "over",
        }
    }
}

/// Play-field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner; y grows downward
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vel: f32,
    pub size: Vec2,
}

impl Actor {
    /// Fresh actor at mid-field height
    pub fn spawn(tuning: &Tuning, field: Field) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, field.height / 2.0),
            vel: tuning.start_velocity,
            size: Vec2::new(tuning.actor_width, tuning.actor_height),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A top/bottom barrier pair with a passable gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Height of the segment hanging from the top of the field
    pub top: f32,
    /// Height of the segment standing on the bottom of the field
    pub bottom: f32,
    /// Set once the actor has gone past it
    pub passed: bool,
}

impl Obstacle {
    /// Generate an obstacle at the right edge of the field
    ///
    /// Draws the gap first, then the top height, each uniformly. When the
    /// field is too short for `gap + 2 * min_segment_height` the top height
    /// pins to its lower bound instead of sampling an inverted range, and
    /// the gap shrinks to whatever is left so the bottom never goes negative.
    pub fn generate<R: Rng + ?Sized>(id: u32, tuning: &Tuning, field: Field, rng: &mut R) -> Self {
        let gap = tuning.min_gap + rng.random::<f32>() * (tuning.max_gap - tuning.min_gap);

        let min_top = tuning.min_segment_height;
        let max_top = field.height - gap - tuning.min_segment_height;
        let span = (max_top - min_top).max(0.0);
        let top = (min_top + rng.random::<f32>() * span).min(field.height.max(0.0));
        // Fields shorter than the drawn gap squeeze the gap, never the bottom
        let gap = gap.min(field.height - top);

        Self {
            id,
            x: field.width,
            width: tuning.obstacle_width,
            top,
            bottom: field.height - top - gap,
            passed: false,
        }
    }

    /// Vertical opening between the two segments
    pub fn gap(&self, field_height: f32) -> f32 {
        field_height - self.top - self.bottom
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    pub fn top_bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, 0.0), Vec2::new(self.width, self.top))
    }

    pub fn bottom_bounds(&self, field_height: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, field_height - self.bottom),
            Vec2::new(self.width, self.bottom),
        )
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub field: Field,
    pub actor: Actor,
    /// Live obstacles in creation order (newest has the largest x)
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Ticks simulated this session; drives spawn timing
    pub elapsed_ticks: u64,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create an idle session for the given field
    pub fn new(tuning: &Tuning, field: Field) -> Self {
        Self {
            phase: GamePhase::Idle,
            field,
            actor: Actor::spawn(tuning, field),
            obstacles: Vec::new(),
            score: 0,
            elapsed_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, Field::new(800.0, 600.0));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_ticks, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.actor.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.actor.size, Vec2::new(40.0, 40.0));
        assert!((state.actor.vel - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_generated_obstacle_spans_field() {
        let tuning = Tuning::default();
        let field = Field::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(7);

        for id in 0..200 {
            let obstacle = Obstacle::generate(id, &tuning, field, &mut rng);
            let gap = obstacle.gap(field.height);
            assert!(gap >= tuning.min_gap - 1e-3 && gap <= tuning.max_gap + 1e-3);
            assert!(obstacle.top >= tuning.min_segment_height);
            assert!(obstacle.bottom >= tuning.min_segment_height - 1e-3);
            assert!((obstacle.top + gap + obstacle.bottom - field.height).abs() < 1e-3);
            assert_eq!(obstacle.x, field.width);
            assert!(!obstacle.passed);
        }
    }

    #[test]
    fn test_short_field_pins_top_height() {
        let tuning = Tuning::default();
        let field = Field::new(400.0, 200.0);
        let mut rng = Pcg32::seed_from_u64(3);

        for id in 0..100 {
            let obstacle = Obstacle::generate(id, &tuning, field, &mut rng);
            assert_eq!(obstacle.top, tuning.min_segment_height);
            assert!(obstacle.bottom >= 0.0, "bottom {}", obstacle.bottom);
            let gap = obstacle.gap(field.height);
            assert!(gap >= 0.0 && gap <= tuning.max_gap);
            assert!((obstacle.top + gap + obstacle.bottom - field.height).abs() < 1e-3);
        }
    }

    #[test]
    fn test_field_shorter_than_top_segment() {
        let tuning = Tuning::default();
        let field = Field::new(400.0, 30.0);
        let mut rng = Pcg32::seed_from_u64(11);

        let obstacle = Obstacle::generate(1, &tuning, field, &mut rng);
        assert_eq!(obstacle.top, 30.0);
        assert_eq!(obstacle.bottom, 0.0);
        assert_eq!(obstacle.gap(field.height), 0.0);
    }

    #[test]
    fn test_segment_bounds() {
        let obstacle = Obstacle {
            id: 1,
            x: 100.0,
            width: 60.0,
            top: 120.0,
            bottom: 280.0,
            passed: false,
        };
        let top = obstacle.top_bounds();
        assert_eq!(top.min, Vec2::new(100.0, 0.0));
        assert_eq!(top.max(), Vec2::new(160.0, 120.0));

        let bottom = obstacle.bottom_bounds(600.0);
        assert_eq!(bottom.min, Vec2::new(100.0, 320.0));
        assert_eq!(bottom.max(), Vec2::new(160.0, 600.0));
        assert!((obstacle.gap(600.0) - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_obstacle_ids_increase() {
        let mut state = GameState::new(&Tuning::default(), Field::default());
        let a = state.next_obstacle_id();
        let b = state.next_obstacle_id();
        assert!(b > a);
    }
}
