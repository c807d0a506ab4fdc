//! Chunk storage - a fixed-size vertical slice of the world grid

use crate::simulation::{BLOCK_SIZE, Block, BlockType, CHUNK_AREA, CHUNK_HEIGHT, CHUNK_WIDTH};

/// A `CHUNK_WIDTH × CHUNK_HEIGHT` slice of the world, addressed by its horizontal
/// chunk index. Blocks are stored column-major so `[column][row]` lookups and
/// whole-column scans are contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    /// Chunk index along the horizontal axis
    pub position: i32,
    blocks: Vec<Block>,
    /// Modified since generation
    pub dirty: bool,
}

impl Chunk {
    /// Create an all-air chunk
    pub fn new(position: i32) -> Self {
        let offset = Self::offset_for(position);
        let mut blocks = Vec::with_capacity(CHUNK_AREA);
        for x in 0..CHUNK_WIDTH {
            for y in 0..CHUNK_HEIGHT {
                blocks.push(Block::air(
                    offset + x as f32 * BLOCK_SIZE,
                    y as f32 * BLOCK_SIZE,
                ));
            }
        }

        Self {
            position,
            blocks,
            dirty: false,
        }
    }

    /// World pixel x of the left edge of a chunk at `position`
    pub fn offset_for(position: i32) -> f32 {
        position as f32 * CHUNK_WIDTH as f32 * BLOCK_SIZE
    }

    /// World pixel x of this chunk's left edge
    pub fn offset(&self) -> f32 {
        Self::offset_for(self.position)
    }

    /// Is (x, y) a valid local cell?
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < CHUNK_WIDTH && (y as usize) < CHUNK_HEIGHT
    }

    #[inline]
    fn index(x: usize, y: usize) -> usize {
        x * CHUNK_HEIGHT + y
    }

    /// Get the block at a local cell
    pub fn get_block(&self, x: usize, y: usize) -> Option<&Block> {
        if x >= CHUNK_WIDTH || y >= CHUNK_HEIGHT {
            return None;
        }
        self.blocks.get(Self::index(x, y))
    }

    /// Block type at a local cell (Air outside the chunk)
    pub fn block_type(&self, x: usize, y: usize) -> BlockType {
        self.get_block(x, y)
            .map(Block::block_type)
            .unwrap_or(BlockType::Air)
    }

    /// Replace the block at a local cell with a fresh block of `block_type`.
    /// Writes outside the chunk are dropped; returns whether the write happened.
    pub fn set_block_type(&mut self, x: usize, y: usize, block_type: BlockType) -> bool {
        self.write(x, y, |bx, by| Block::new(bx, by, block_type))
    }

    /// Put a water block with the given level at a local cell
    pub fn set_water(&mut self, x: usize, y: usize, water_level: u8) -> bool {
        self.write(x, y, |bx, by| Block::water(bx, by, water_level))
    }

    fn write(&mut self, x: usize, y: usize, make: impl FnOnce(f32, f32) -> Block) -> bool {
        if x >= CHUNK_WIDTH || y >= CHUNK_HEIGHT {
            log::trace!(
                "Dropped out-of-bounds write at ({}, {}) in chunk {}",
                x,
                y,
                self.position
            );
            return false;
        }
        let block = make(
            self.offset() + x as f32 * BLOCK_SIZE,
            y as f32 * BLOCK_SIZE,
        );
        self.blocks[Self::index(x, y)] = block;
        self.dirty = true;
        true
    }

    /// All blocks, column-major (read-only, for rendering)
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// All blocks of one column, top row first (empty when `x` is outside the chunk)
    pub fn column(&self, x: usize) -> &[Block] {
        if x >= CHUNK_WIDTH {
            return &[];
        }
        let start = Self::index(x, 0);
        &self.blocks[start..start + CHUNK_HEIGHT]
    }

    /// Iterate over every block with its local coordinates (column by column)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (i / CHUNK_HEIGHT, i % CHUNK_HEIGHT, block))
    }

    /// Topmost non-air row of a column
    pub fn surface_row(&self, x: usize) -> Option<usize> {
        self.column(x).iter().position(|block| !block.is_air())
    }

    /// Number of blocks of a given type
    pub fn count(&self, block_type: BlockType) -> usize {
        self.blocks
            .iter()
            .filter(|block| block.block_type() == block_type)
            .count()
    }

    /// Number of non-air blocks
    pub fn count_non_air(&self) -> usize {
        self.blocks.iter().filter(|block| !block.is_air()).count()
    }
}
