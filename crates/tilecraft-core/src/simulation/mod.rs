//! Simulation systems - block types and water flow

pub mod water;

// Re-export from tilecraft-simulation so the rest of the crate has one import path
pub use tilecraft_simulation::{
    BLOCK_SIZE, Block, BlockType, CHUNK_AREA, CHUNK_HEIGHT, CHUNK_PIXEL_WIDTH, CHUNK_WIDTH,
    MAX_WATER_LEVEL, SurfaceSound,
};

pub use water::{WaterConfig, WaterSimulation};
