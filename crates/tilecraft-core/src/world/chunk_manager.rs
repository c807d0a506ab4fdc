//! Chunk lifecycle management - the horizontal load window and grid cell access

use std::ops::RangeInclusive;

use super::chunk::Chunk;
use super::generation::ChunkGenerator;
use crate::simulation::{BLOCK_SIZE, Block, BlockType, CHUNK_HEIGHT, CHUNK_PIXEL_WIDTH, CHUNK_WIDTH};

/// Loaded chunks, ordered by ascending position with no duplicates
///
/// Cells are addressed either by local (chunk, column, row) or by a global
/// column index `position × CHUNK_WIDTH + column` plus a row.
#[derive(Debug, Clone)]
pub struct ChunkManager {
    chunks: Vec<Chunk>,

    /// Chunks kept on each side of the actor's chunk
    pub load_radius: i32,

    /// Center of the last `load_chunks` call
    pub last_center: Option<i32>,
}

impl ChunkManager {
    /// `load_radius` is clamped to at least 1; collision treats unloaded chunks as walls
    pub fn new(load_radius: i32) -> Self {
        Self {
            chunks: Vec::new(),
            load_radius: load_radius.max(1),
            last_center: None,
        }
    }

    /// Chunk index containing a world pixel x
    pub fn chunk_index_for(world_x: f32) -> i32 {
        (world_x / CHUNK_PIXEL_WIDTH).floor() as i32
    }

    /// Global (column, row) of the cell containing a world pixel position
    pub fn world_to_cell(world_x: f32, world_y: f32) -> (i32, i32) {
        (
            (world_x / BLOCK_SIZE).floor() as i32,
            (world_y / BLOCK_SIZE).floor() as i32,
        )
    }

    /// Split a global column into (chunk position, local column)
    pub fn cell_to_chunk(world_col: i32) -> (i32, usize) {
        let width = CHUNK_WIDTH as i32;
        (
            world_col.div_euclid(width),
            world_col.rem_euclid(width) as usize,
        )
    }

    /// Chunk position, local column and row for a world pixel position
    pub fn world_to_chunk_coords(world_x: f32, world_y: f32) -> (i32, usize, i32) {
        let (col, row) = Self::world_to_cell(world_x, world_y);
        let (position, local) = Self::cell_to_chunk(col);
        (position, local, row)
    }

    /// Positions that should be loaded around `center`
    pub fn window(&self, center: i32) -> RangeInclusive<i32> {
        (center - self.load_radius)..=(center + self.load_radius)
    }

    /// Load chunks around the actor and evict the ones outside the window
    ///
    /// Missing chunks are generated synchronously, so every position in the
    /// window is present when this returns.
    pub fn load_chunks(&mut self, actor_x: f32, generator: &ChunkGenerator) {
        let center = Self::chunk_index_for(actor_x);
        let window = self.window(center);

        let before = self.chunks.len();
        self.chunks
            .retain(|chunk| window.contains(&chunk.position));
        let evicted = before - self.chunks.len();
        if evicted > 0 {
            log::debug!(
                "[LOAD] Evicted {} chunks outside {}..={}",
                evicted,
                window.start(),
                window.end()
            );
        }

        for position in window.clone() {
            if let Err(index) = self.search(position) {
                log::debug!("[LOAD] Generating chunk {}", position);
                self.chunks.insert(index, generator.generate(position));
            }
        }

        self.last_center = Some(center);
        self.check_order();
    }

    /// Insert a chunk, replacing any chunk already at its position
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        let replaced = match self.search(chunk.position) {
            Ok(index) => Some(std::mem::replace(&mut self.chunks[index], chunk)),
            Err(index) => {
                self.chunks.insert(index, chunk);
                None
            }
        };
        self.check_order();
        replaced
    }

    /// Drop every loaded chunk
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.last_center = None;
    }

    fn search(&self, position: i32) -> Result<usize, usize> {
        self.chunks
            .binary_search_by_key(&position, |chunk| chunk.position)
    }

    fn check_order(&self) {
        let ordered = self
            .chunks
            .windows(2)
            .all(|pair| pair[0].position < pair[1].position);
        debug_assert!(ordered, "chunk list out of order or holding duplicates");
        if !ordered {
            log::error!("Chunk list out of order or holding duplicates");
        }
    }

    pub fn get_chunk(&self, position: i32) -> Option<&Chunk> {
        self.search(position).ok().map(|index| &self.chunks[index])
    }

    pub fn get_chunk_mut(&mut self, position: i32) -> Option<&mut Chunk> {
        match self.search(position) {
            Ok(index) => Some(&mut self.chunks[index]),
            Err(_) => None,
        }
    }

    pub fn has_chunk(&self, position: i32) -> bool {
        self.search(position).is_ok()
    }

    /// Left and right neighbours of a chunk position (if loaded)
    pub fn neighbors(&self, position: i32) -> (Option<&Chunk>, Option<&Chunk>) {
        (self.get_chunk(position - 1), self.get_chunk(position + 1))
    }

    /// Loaded chunks in ascending position order (read-only, for rendering)
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.iter_mut()
    }

    pub fn positions(&self) -> Vec<i32> {
        self.chunks.iter().map(|chunk| chunk.position).collect()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Block at a global cell, `None` when the chunk is not loaded or the row is off-grid
    pub fn block_at_cell(&self, world_col: i32, row: i32) -> Option<&Block> {
        if row < 0 || row >= CHUNK_HEIGHT as i32 {
            return None;
        }
        let (position, local) = Self::cell_to_chunk(world_col);
        self.get_chunk(position)?.get_block(local, row as usize)
    }

    pub fn block_type_at_cell(&self, world_col: i32, row: i32) -> Option<BlockType> {
        self.block_at_cell(world_col, row).map(Block::block_type)
    }

    /// Block containing a world pixel position
    pub fn block_at_world(&self, world_x: f32, world_y: f32) -> Option<&Block> {
        let (col, row) = Self::world_to_cell(world_x, world_y);
        self.block_at_cell(col, row)
    }

    /// Overwrite a global cell; dropped (returns false) outside loaded chunks or the grid
    pub fn set_block_at_cell(&mut self, world_col: i32, row: i32, block_type: BlockType) -> bool {
        if row < 0 {
            return false;
        }
        let (position, local) = Self::cell_to_chunk(world_col);
        match self.get_chunk_mut(position) {
            Some(chunk) => chunk.set_block_type(local, row as usize, block_type),
            None => false,
        }
    }

    /// Put water at a global cell; same drop rules as [`Self::set_block_at_cell`]
    pub fn set_water_at_cell(&mut self, world_col: i32, row: i32, water_level: u8) -> bool {
        if row < 0 {
            return false;
        }
        let (position, local) = Self::cell_to_chunk(world_col);
        match self.get_chunk_mut(position) {
            Some(chunk) => chunk.set_water(local, row as usize, water_level),
            None => false,
        }
    }

    /// Topmost non-air row of a global column
    pub fn surface_row(&self, world_col: i32) -> Option<usize> {
        let (position, local) = Self::cell_to_chunk(world_col);
        self.get_chunk(position)?.surface_row(local)
    }
}

impl Default for ChunkManager {
    fn default() -> Self {
        Self::new(2)
    }
}
