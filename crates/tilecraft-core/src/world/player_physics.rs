//! Player physics system - gravity, jumping and horizontal input

use serde::{Deserialize, Serialize};

use crate::entity::actor::{Actor, Facing};

/// Tunable movement constants (pixels and seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// px/s² (downward)
    pub gravity_acceleration: f32,
    /// Maximum fall speed in px/s
    pub terminal_velocity: f32,
    /// Vertical velocity multiplier applied each frame while grounded
    pub ground_friction: f32,
    /// Upward launch speed in px/s
    pub jump_velocity: f32,
    pub movement_speed: f32,
    pub water_movement_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_acceleration: 980.0,
            terminal_velocity: 1000.0,
            ground_friction: 0.8,
            jump_velocity: 375.0,
            movement_speed: 300.0,
            water_movement_speed: 150.0,
        }
    }
}

/// Player physics system - writes the actor's pending displacement
///
/// Nothing here touches the grid; `Collision::update_player_position`
/// applies the displacement afterwards.
pub struct PlayerPhysics;

impl PlayerPhysics {
    /// Accelerate (airborne) or damp (grounded) the vertical velocity and
    /// add this frame's vertical movement to the pending displacement
    pub fn apply_gravity(actor: &mut Actor, config: &PhysicsConfig, dt: f32) {
        if actor.is_grounded {
            actor.vertical_velocity *= config.ground_friction;
        } else {
            actor.vertical_velocity = (actor.vertical_velocity
                + config.gravity_acceleration * dt)
                .min(config.terminal_velocity);
        }
        actor.displacement.y += actor.vertical_velocity * dt;
    }

    /// Launch upward if the actor can jump; returns whether it did
    pub fn jump(actor: &mut Actor, config: &PhysicsConfig) -> bool {
        if !actor.can_jump {
            return false;
        }
        actor.vertical_velocity = -config.jump_velocity;
        actor.is_grounded = false;
        actor.can_jump = false;
        true
    }

    /// Set this frame's horizontal displacement from an input direction in -1..=1
    pub fn move_horizontal(actor: &mut Actor, config: &PhysicsConfig, direction: f32, dt: f32) {
        let speed = if actor.in_water {
            config.water_movement_speed
        } else {
            config.movement_speed
        };
        actor.displacement.x = direction * speed * dt;

        if direction < 0.0 {
            actor.facing = Facing::Left;
        } else if direction > 0.0 {
            actor.facing = Facing::Right;
        }
    }
}
