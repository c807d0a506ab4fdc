use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::simulation::BLOCK_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Movement state derived from the actor's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Falling,
    Grounded,
    Swimming,
}

/// The one dynamic body in the world
///
/// Gravity and input write a pending `displacement`; collision resolution
/// consumes it and updates the position and contact flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner in world pixels
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Positive is downward
    pub vertical_velocity: f32,
    #[serde(skip)]
    pub displacement: Vec2,
    pub is_grounded: bool,
    pub in_water: bool,
    pub can_jump: bool,
    pub facing: Facing,
}

impl Actor {
    pub const WIDTH: f32 = 0.6 * BLOCK_SIZE;
    pub const HEIGHT: f32 = 1.8 * BLOCK_SIZE;

    /// Create an airborne actor at the given top-left position
    pub fn new(position: Vec2) -> Self {
        Self::with_size(position, Self::WIDTH, Self::HEIGHT)
    }

    pub fn with_size(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            width,
            height,
            vertical_velocity: 0.0,
            displacement: Vec2::ZERO,
            is_grounded: false,
            in_water: false,
            can_jump: false,
            facing: Facing::default(),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size() * 0.5
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    /// Does the actor's box overlap the rectangle (strictly, touching edges don't count)?
    pub fn overlaps(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        self.left() < x + width && self.right() > x && self.top() < y + height && self.bottom() > y
    }

    pub fn motion_state(&self) -> MotionState {
        if self.in_water {
            MotionState::Swimming
        } else if self.is_grounded {
            MotionState::Grounded
        } else {
            MotionState::Falling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_new() {
        let actor = Actor::new(Vec2::new(10.0, 20.0));
        assert_eq!(actor.width, 0.6 * BLOCK_SIZE);
        assert_eq!(actor.height, 1.8 * BLOCK_SIZE);
        assert_eq!(actor.vertical_velocity, 0.0);
        assert_eq!(actor.displacement, Vec2::ZERO);
        assert!(!actor.is_grounded);
        assert!(!actor.can_jump);
        assert_eq!(actor.facing, Facing::Right);
        assert_eq!(actor.motion_state(), MotionState::Falling);
    }

    #[test]
    fn test_edges_and_center() {
        let actor = Actor::with_size(Vec2::new(0.0, 0.0), 40.0, 100.0);
        assert_eq!(actor.right(), 40.0);
        assert_eq!(actor.bottom(), 100.0);
        assert_eq!(actor.center(), Vec2::new(20.0, 50.0));
    }

    #[test]
    fn test_overlaps_excludes_touching_edges() {
        let actor = Actor::with_size(Vec2::new(64.0, 0.0), 32.0, 64.0);
        assert!(actor.overlaps(64.0, 0.0, 64.0, 64.0));
        assert!(!actor.overlaps(0.0, 0.0, 64.0, 64.0));
        assert!(!actor.overlaps(64.0, 64.0, 64.0, 64.0));
    }

    #[test]
    fn test_motion_state() {
        let mut actor = Actor::new(Vec2::ZERO);
        actor.is_grounded = true;
        assert_eq!(actor.motion_state(), MotionState::Grounded);
        actor.in_water = true;
        assert_eq!(actor.motion_state(), MotionState::Swimming);
    }
}
