use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::actor::Actor;

/// Viewport over the world, passed explicitly to whatever needs screen mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World pixel position of the screen's top-left corner
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            width,
            height,
        }
    }

    /// Keep the actor's centre in the middle of the view
    pub fn center_on(&mut self, actor: &Actor) {
        self.position = actor.center() - Vec2::new(self.width, self.height) * 0.5;
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    /// Is any part of the rectangle on screen?
    pub fn is_visible(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        x < self.position.x + self.width
            && x + width > self.position.x
            && y < self.position.y + self.height
            && y + height > self.position.y
    }
}
