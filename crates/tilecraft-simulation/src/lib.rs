//! Block data for Tilecraft
//!
//! This crate provides the foundational data types shared by the world grid:
//! - Block types and their properties (BlockType, SurfaceSound)
//! - The block cell value (Block)
//! - Grid constants (CHUNK_WIDTH, CHUNK_HEIGHT, BLOCK_SIZE, MAX_WATER_LEVEL)

mod block;
mod block_type;

pub use block::{
    BLOCK_SIZE, Block, CHUNK_AREA, CHUNK_HEIGHT, CHUNK_PIXEL_WIDTH, CHUNK_WIDTH, MAX_WATER_LEVEL,
};
pub use block_type::{BlockType, SurfaceSound};
