//! World management - chunks, generation, collision and interaction

pub mod camera;
mod chunk;
mod chunk_manager;
mod collision;
pub mod generation;
pub mod interaction;
mod player_physics;
pub mod rng_trait;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;
pub mod worldgen_config;

pub use camera::Camera;
pub use chunk::Chunk;
pub use chunk_manager::ChunkManager;
pub use collision::Collision;
pub use generation::ChunkGenerator;
pub use interaction::{
    BlockHit, BlockInteraction, BlockSupply, BreakResult, CreativeSupply, InteractionConfig,
    PlaceResult,
};
pub use player_physics::{PhysicsConfig, PlayerPhysics};
pub use rng_trait::{WorldRng, chunk_rng};
pub use stats::{NoopStats, SimStats, WaterStats};
pub use world::{World, WorldConfig};
pub use worldgen_config::{
    ConfigError, NoiseLayerConfig, NoiseTypeConfig, OreConfig, OreParams, PondConfig,
    TerrainParams, VegetationParams, WorldGenConfig,
};
