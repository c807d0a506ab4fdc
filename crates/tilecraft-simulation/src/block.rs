//! Block cell type and grid constants
//!
//! Foundational types for the tile grid.

use crate::BlockType;
use serde::{Deserialize, Serialize};

/// Width of a chunk in blocks
pub const CHUNK_WIDTH: usize = 64;

/// Height of a chunk (and of the world) in blocks
pub const CHUNK_HEIGHT: usize = 128;

/// Total blocks in a chunk
pub const CHUNK_AREA: usize = CHUNK_WIDTH * CHUNK_HEIGHT;

/// Edge length of one block in world pixels
pub const BLOCK_SIZE: f32 = 64.0;

/// Width of a chunk in world pixels
pub const CHUNK_PIXEL_WIDTH: f32 = CHUNK_WIDTH as f32 * BLOCK_SIZE;

/// Highest water level a flowing water block can reach (0 is a source)
pub const MAX_WATER_LEVEL: u8 = 8;

/// A single cell of the world grid
///
/// `x`/`y` are the world pixel coordinates of the top-left corner.
/// Only water blocks carry a water level; every other type reports 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    x: f32,
    y: f32,
    block_type: BlockType,
    water_level: u8,
}

impl Block {
    /// Create a block. Water created this way is a source (level 0).
    pub fn new(x: f32, y: f32, block_type: BlockType) -> Self {
        Self {
            x,
            y,
            block_type,
            water_level: 0,
        }
    }

    /// Create an air block
    pub fn air(x: f32, y: f32) -> Self {
        Self::new(x, y, BlockType::Air)
    }

    /// Create a water block with the given level, clamped to [`MAX_WATER_LEVEL`]
    pub fn water(x: f32, y: f32, water_level: u8) -> Self {
        Self {
            x,
            y,
            block_type: BlockType::Water,
            water_level: water_level.min(MAX_WATER_LEVEL),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// Water fill / distance from source (always 0 for non-water blocks)
    pub fn water_level(&self) -> u8 {
        self.water_level
    }

    pub fn is_air(&self) -> bool {
        self.block_type == BlockType::Air
    }

    pub fn is_water(&self) -> bool {
        self.block_type == BlockType::Water
    }

    /// A water block that never depletes on its own
    pub fn is_source(&self) -> bool {
        self.is_water() && self.water_level == 0
    }

    pub fn is_solid(&self) -> bool {
        self.block_type.is_solid()
    }

    /// Same position, different contents
    pub fn with_type(&self, block_type: BlockType) -> Self {
        Self::new(self.x, self.y, block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_has_no_water_level() {
        let block = Block::new(64.0, 128.0, BlockType::Stone);
        assert_eq!(block.block_type(), BlockType::Stone);
        assert_eq!(block.water_level(), 0);
        assert_eq!(block.x(), 64.0);
        assert_eq!(block.y(), 128.0);
        assert!(block.is_solid());
    }

    #[test]
    fn test_water_level_is_clamped() {
        let block = Block::water(0.0, 0.0, 200);
        assert!(block.is_water());
        assert_eq!(block.water_level(), MAX_WATER_LEVEL);
        assert!(!block.is_source());
    }

    #[test]
    fn test_source_block() {
        let block = Block::water(0.0, 0.0, 0);
        assert!(block.is_source());
        assert!(!block.is_solid());

        let via_new = Block::new(0.0, 0.0, BlockType::Water);
        assert!(via_new.is_source());
    }

    #[test]
    fn test_with_type_drops_water_level() {
        let water = Block::water(10.0, 20.0, 3);
        let air = water.with_type(BlockType::Air);
        assert!(air.is_air());
        assert_eq!(air.water_level(), 0);
        assert_eq!(air.x(), 10.0);
        assert_eq!(air.y(), 20.0);
    }

    #[test]
    fn test_default_is_air() {
        assert!(Block::default().is_air());
    }
}
