//! World - owns the grid, the actor and the systems that run each frame

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::chunk_manager::ChunkManager;
use super::collision::Collision;
use super::generation::ChunkGenerator;
use super::interaction::{BlockInteraction, BlockSupply, BreakResult, InteractionConfig, PlaceResult};
use super::player_physics::{PhysicsConfig, PlayerPhysics};
use super::worldgen_config::{ConfigError, WorldGenConfig};
use crate::entity::actor::Actor;
use crate::entity::input::InputState;
use crate::simulation::{BLOCK_SIZE, BlockType, WaterConfig, WaterSimulation};

/// Every tunable the world needs, grouped by system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub seed: u64,
    pub worldgen: WorldGenConfig,
    pub physics: PhysicsConfig,
    pub water: WaterConfig,
    pub interaction: InteractionConfig,
    /// Viewport size in pixels
    pub view_width: f32,
    pub view_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            worldgen: WorldGenConfig::default(),
            physics: PhysicsConfig::default(),
            water: WaterConfig::default(),
            interaction: InteractionConfig::default(),
            view_width: 1280.0,
            view_height: 720.0,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.worldgen.validate()?;
        self.water.validate()?;
        if self.interaction.max_reach < 0.0 {
            return Err(ConfigError::invalid(
                "interaction.max_reach",
                "must not be negative",
            ));
        }
        if self.physics.ground_friction < 0.0 || self.physics.ground_friction > 1.0 {
            return Err(ConfigError::invalid(
                "physics.ground_friction",
                "must be inside 0..=1",
            ));
        }
        Ok(())
    }
}

/// The game world
pub struct World {
    config: WorldConfig,

    /// Loaded chunks around the actor
    pub chunks: ChunkManager,

    generator: ChunkGenerator,

    /// Water automaton (time-gated)
    pub water: WaterSimulation,

    /// The player-controlled body
    pub actor: Actor,

    pub camera: Camera,

    frame: u64,
}

impl World {
    /// Generate the initial load window and drop the actor onto column 0
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let generator = ChunkGenerator::from_config(config.seed, config.worldgen.clone());
        let mut chunks = ChunkManager::new(config.worldgen.load_radius);
        chunks.load_chunks(0.0, &generator);

        let surface = chunks.surface_row(0).unwrap_or(0) as f32;
        let actor = Actor::new(Vec2::new(
            (BLOCK_SIZE - Actor::WIDTH) * 0.5,
            surface * BLOCK_SIZE - Actor::HEIGHT,
        ));

        let mut camera = Camera::new(config.view_width, config.view_height);
        camera.center_on(&actor);

        let water = WaterSimulation::new(config.water.clone(), config.seed);

        log::info!(
            "Created world '{}' with seed {} ({} chunks loaded, spawn at {:?})",
            config.worldgen.name,
            config.seed,
            chunks.chunk_count(),
            actor.position
        );

        Ok(Self {
            config,
            chunks,
            generator,
            water,
            actor,
            camera,
            frame: 0,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame: input, gravity, collision, chunk streaming, then water
    ///
    /// Returns the number of water ticks that ran.
    pub fn update(&mut self, input: &InputState, dt: f32) -> u32 {
        let physics = &self.config.physics;

        PlayerPhysics::move_horizontal(&mut self.actor, physics, input.horizontal(), dt);
        if input.jump_pressed {
            PlayerPhysics::jump(&mut self.actor, physics);
        }
        PlayerPhysics::apply_gravity(&mut self.actor, physics, dt);
        Collision::update_player_position(&mut self.actor, &self.chunks);

        self.chunks.load_chunks(self.actor.position.x, &self.generator);
        let ticks = self.water.advance(dt, &mut self.chunks);

        self.camera.center_on(&self.actor);
        self.frame += 1;

        if ticks > 0 {
            log::trace!(
                "Frame {}: {} water ticks, actor at {:?} ({:?})",
                self.frame,
                ticks,
                self.actor.position,
                self.actor.motion_state()
            );
        }
        ticks
    }

    /// Break the block under a screen position
    pub fn break_block_at(&mut self, screen_x: f32, screen_y: f32) -> BreakResult {
        BlockInteraction::break_block(
            screen_x,
            screen_y,
            &self.camera,
            &self.actor,
            &mut self.chunks,
            &self.config.interaction,
        )
    }

    /// Place a block at a screen position if `supply` has one
    pub fn place_block_at(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        block_type: BlockType,
        supply: &impl BlockSupply,
    ) -> PlaceResult {
        BlockInteraction::place_block(
            screen_x,
            screen_y,
            &self.camera,
            &self.actor,
            &mut self.chunks,
            &self.config.interaction,
            block_type,
            supply,
        )
    }

    /// Block type under the actor's feet (for footstep sounds)
    pub fn surface_type(&self) -> BlockType {
        Collision::get_surface_type(&self.actor, &self.chunks)
    }

    /// Screen position of the centre of a world pixel position
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.camera.world_to_screen(world)
    }
}
