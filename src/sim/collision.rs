//! Collision detection for axis-aligned boxes
//!
//! The actor and both obstacle segments are plain rectangles in screen
//! space (y grows downward), so everything reduces to AABB overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Actor, Obstacle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Which part of an obstacle the actor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleHit {
    Top,
    Bottom,
}

/// Test the actor against both segments of an obstacle
///
/// Horizontal overlap is required first; vertically the actor collides when
/// its top is above the top segment's lower edge or its bottom is below the
/// bottom segment's upper edge.
pub fn actor_obstacle_collision(
    actor: &Actor,
    obstacle: &Obstacle,
    field_height: f32,
) -> Option<ObstacleHit> {
    let actor_box = actor.bounds();
    if actor_box.overlaps(&obstacle.top_bounds()) {
        return Some(ObstacleHit::Top);
    }
    if actor_box.overlaps(&obstacle.bottom_bounds(field_height)) {
        return Some(ObstacleHit::Bottom);
    }
    None
}
