//! Block interaction - breaking and placing blocks under the cursor

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::chunk_manager::ChunkManager;
use crate::entity::actor::Actor;
use crate::simulation::{BLOCK_SIZE, Block, BlockType, CHUNK_WIDTH, WaterSimulation};

/// Source of placeable blocks (usually the inventory)
///
/// The interaction layer only asks; callers remove the placed block from
/// their own stock when `place_block` returns `Placed`.
pub trait BlockSupply {
    fn has_block(&self, block_type: BlockType) -> bool;
}

/// Supply with every block available
pub struct CreativeSupply;

impl BlockSupply for CreativeSupply {
    fn has_block(&self, _block_type: BlockType) -> bool {
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Reach in blocks, measured centre to centre
    pub max_reach: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { max_reach: 6.0 }
    }
}

/// A block under the cursor and where it lives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    pub block: Block,
    pub chunk_position: i32,
    pub column: usize,
    pub row: usize,
}

impl BlockHit {
    /// Global column index
    pub fn world_column(&self) -> i32 {
        self.chunk_position * CHUNK_WIDTH as i32 + self.column as i32
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.block.x(), self.block.y()) + Vec2::splat(BLOCK_SIZE * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakResult {
    /// The block was removed; the caller may credit this type
    Broken(BlockType),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceResult {
    Placed,
    NoTarget,
    Occupied,
    OutOfReach,
    OverlapsActor,
    NotInInventory,
    NotPlaceable,
}

/// Block interaction - static methods over the actor, camera and chunk list
pub struct BlockInteraction;

impl BlockInteraction {
    /// Resolve a screen position to a loaded, in-grid block
    pub fn get_block_at_position(
        screen_x: f32,
        screen_y: f32,
        camera: &Camera,
        chunks: &ChunkManager,
    ) -> Option<BlockHit> {
        let world = camera.screen_to_world(Vec2::new(screen_x, screen_y));
        let (chunk_position, column, row) = ChunkManager::world_to_chunk_coords(world.x, world.y);
        if row < 0 {
            return None;
        }
        let block = *chunks
            .get_chunk(chunk_position)?
            .get_block(column, row as usize)?;

        Some(BlockHit {
            block,
            chunk_position,
            column,
            row: row as usize,
        })
    }

    /// Distance in blocks between the actor's centre and the block's centre
    pub fn distance_in_blocks(actor: &Actor, hit: &BlockHit) -> f32 {
        actor.center().distance(hit.center()) / BLOCK_SIZE
    }

    pub fn is_within_reach(actor: &Actor, hit: &BlockHit, max_reach: f32) -> bool {
        Self::distance_in_blocks(actor, hit) <= max_reach
    }

    /// Break the block under the cursor
    ///
    /// Air, bedrock and blocks out of reach are left alone. Breaking a water
    /// source drains its whole connected body; flowing water just clears one
    /// cell and yields nothing.
    pub fn break_block(
        screen_x: f32,
        screen_y: f32,
        camera: &Camera,
        actor: &Actor,
        chunks: &mut ChunkManager,
        config: &InteractionConfig,
    ) -> BreakResult {
        let Some(hit) = Self::get_block_at_position(screen_x, screen_y, camera, chunks) else {
            return BreakResult::Nothing;
        };
        let block_type = hit.block.block_type();
        if !block_type.is_breakable() || !Self::is_within_reach(actor, &hit, config.max_reach) {
            return BreakResult::Nothing;
        }

        let (col, row) = (hit.world_column(), hit.row as i32);
        if block_type == BlockType::Water {
            if hit.block.is_source() {
                let removed = WaterSimulation::remove_connected_water(chunks, col, row);
                log::debug!("[BREAK] Drained {} water blocks at ({}, {})", removed, col, row);
                return BreakResult::Broken(BlockType::Water);
            }
            chunks.set_block_at_cell(col, row, BlockType::Air);
            return BreakResult::Nothing;
        }

        chunks.set_block_at_cell(col, row, BlockType::Air);
        log::debug!("[BREAK] Broke {} at ({}, {})", block_type, col, row);
        BreakResult::Broken(block_type)
    }

    /// Place a block into the empty cell under the cursor
    #[allow(clippy::too_many_arguments)]
    pub fn place_block(
        screen_x: f32,
        screen_y: f32,
        camera: &Camera,
        actor: &Actor,
        chunks: &mut ChunkManager,
        config: &InteractionConfig,
        block_type: BlockType,
        supply: &impl BlockSupply,
    ) -> PlaceResult {
        if matches!(block_type, BlockType::Air | BlockType::Bedrock) {
            return PlaceResult::NotPlaceable;
        }
        let Some(hit) = Self::get_block_at_position(screen_x, screen_y, camera, chunks) else {
            return PlaceResult::NoTarget;
        };
        if !Self::is_within_reach(actor, &hit, config.max_reach) {
            return PlaceResult::OutOfReach;
        }
        if !hit.block.is_air() {
            return PlaceResult::Occupied;
        }
        if block_type.is_solid()
            && actor.overlaps(hit.block.x(), hit.block.y(), BLOCK_SIZE, BLOCK_SIZE)
        {
            return PlaceResult::OverlapsActor;
        }
        if !supply.has_block(block_type) {
            return PlaceResult::NotInInventory;
        }

        let (col, row) = (hit.world_column(), hit.row as i32);
        let written = if block_type == BlockType::Water {
            WaterSimulation::place_water_source(chunks, col, row)
        } else {
            chunks.set_block_at_cell(col, row, block_type)
        };
        if !written {
            return PlaceResult::NoTarget;
        }

        log::debug!("[PLACE] Placed {} at ({}, {})", block_type, col, row);
        PlaceResult::Placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::chunk::Chunk;

    struct EmptySupply;

    impl BlockSupply for EmptySupply {
        fn has_block(&self, _block_type: BlockType) -> bool {
            false
        }
    }

    /// Chunk 0 with a stone floor at row 10; actor standing on it at column 2
    fn setup() -> (ChunkManager, Actor, Camera) {
        let mut chunks = ChunkManager::new(0);
        chunks.insert_chunk(Chunk::new(0));
        for col in 0..CHUNK_WIDTH as i32 {
            chunks.set_block_at_cell(col, 10, BlockType::Stone);
        }
        chunks.set_block_at_cell(5, 11, BlockType::Bedrock);
        let actor = Actor::new(Vec2::new(2.0 * BLOCK_SIZE, 10.0 * BLOCK_SIZE - Actor::HEIGHT));
        (chunks, actor, Camera::new(800.0, 600.0))
    }

    /// Screen position of the centre of a cell (camera at the origin)
    fn cell(col: i32, row: i32) -> (f32, f32) {
        ((col as f32 + 0.5) * BLOCK_SIZE, (row as f32 + 0.5) * BLOCK_SIZE)
    }

    #[test]
    fn test_get_block_at_position() {
        let (chunks, _, mut camera) = setup();
        let (x, y) = cell(3, 10);
        let hit = BlockInteraction::get_block_at_position(x, y, &camera, &chunks).unwrap();
        assert_eq!(hit.block.block_type(), BlockType::Stone);
        assert_eq!((hit.chunk_position, hit.column, hit.row), (0, 3, 10));

        // Outside loaded chunks
        camera.position = Vec2::new(-1000.0, 0.0);
        assert!(BlockInteraction::get_block_at_position(x, y, &camera, &chunks).is_none());

        // Above the grid
        camera.position = Vec2::new(0.0, -2000.0);
        assert!(BlockInteraction::get_block_at_position(x, y, &camera, &chunks).is_none());
    }

    #[test]
    fn test_reach_is_euclidean() {
        let (chunks, actor, camera) = setup();
        let near = cell(4, 10);
        let far = cell(12, 10);
        let near = BlockInteraction::get_block_at_position(near.0, near.1, &camera, &chunks).unwrap();
        let far = BlockInteraction::get_block_at_position(far.0, far.1, &camera, &chunks).unwrap();

        assert!(BlockInteraction::is_within_reach(&actor, &near, 6.0));
        assert!(!BlockInteraction::is_within_reach(&actor, &far, 6.0));
    }

    #[test]
    fn test_break_stone() {
        let (mut chunks, actor, camera) = setup();
        let config = InteractionConfig::default();
        let (x, y) = cell(3, 10);

        let result = BlockInteraction::break_block(x, y, &camera, &actor, &mut chunks, &config);
        assert_eq!(result, BreakResult::Broken(BlockType::Stone));
        assert_eq!(chunks.block_type_at_cell(3, 10), Some(BlockType::Air));
    }

    #[test]
    fn test_break_rejects_air_bedrock_and_far_blocks() {
        let (mut chunks, actor, camera) = setup();
        let config = InteractionConfig::default();
        let before = chunks.clone();

        let (x, y) = cell(3, 5);
        assert_eq!(
            BlockInteraction::break_block(x, y, &camera, &actor, &mut chunks, &config),
            BreakResult::Nothing
        );
        let (x, y) = cell(5, 11);
        assert_eq!(
            BlockInteraction::break_block(x, y, &camera, &actor, &mut chunks, &config),
            BreakResult::Nothing
        );
        let (x, y) = cell(30, 10);
        assert_eq!(
            BlockInteraction::break_block(x, y, &camera, &actor, &mut chunks, &config),
            BreakResult::Nothing
        );

        for (a, b) in before.iter().zip(chunks.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_break_water_source_drains_body() {
        let (mut chunks, actor, camera) = setup();
        let config = InteractionConfig::default();
        chunks.set_water_at_cell(4, 9, 0);
        chunks.set_water_at_cell(5, 9, 1);
        chunks.set_water_at_cell(6, 9, 2);

        let (x, y) = cell(4, 9);
        assert_eq!(
            BlockInteraction::break_block(x, y, &camera, &actor, &mut chunks, &config),
            BreakResult::Broken(BlockType::Water)
        );
        assert_eq!(chunks.get_chunk(0).unwrap().count(BlockType::Water), 0);
    }

    #[test]
    fn test_break_flowing_water_gives_nothing() {
        let (mut chunks, actor, camera) = setup();
        let config = InteractionConfig::default();
        chunks.set_water_at_cell(4, 9, 0);
        chunks.set_water_at_cell(5, 9, 1);

        let (x, y) = cell(5, 9);
        assert_eq!(
            BlockInteraction::break_block(x, y, &camera, &actor, &mut chunks, &config),
            BreakResult::Nothing
        );
        assert_eq!(chunks.block_type_at_cell(5, 9), Some(BlockType::Air));
        assert_eq!(chunks.block_type_at_cell(4, 9), Some(BlockType::Water));
    }

    #[test]
    fn test_place_block() {
        let (mut chunks, actor, camera) = setup();
        let config = InteractionConfig::default();
        let (x, y) = cell(5, 9);

        let result = BlockInteraction::place_block(
            x, y, &camera, &actor, &mut chunks, &config, BlockType::Dirt, &CreativeSupply,
        );
        assert_eq!(result, PlaceResult::Placed);
        assert_eq!(chunks.block_type_at_cell(5, 9), Some(BlockType::Dirt));

        let result = BlockInteraction::place_block(
            x, y, &camera, &actor, &mut chunks, &config, BlockType::Dirt, &CreativeSupply,
        );
        assert_eq!(result, PlaceResult::Occupied);
    }

    #[test]
    fn test_place_rejections() {
        let (mut chunks, actor, mut camera) = setup();
        let config = InteractionConfig::default();
        let (x, y) = cell(5, 9);

        assert_eq!(
            BlockInteraction::place_block(
                x, y, &camera, &actor, &mut chunks, &config, BlockType::Air, &CreativeSupply,
            ),
            PlaceResult::NotPlaceable
        );
        assert_eq!(
            BlockInteraction::place_block(
                x, y, &camera, &actor, &mut chunks, &config, BlockType::Dirt, &EmptySupply,
            ),
            PlaceResult::NotInInventory
        );

        // Actor occupies column 2, rows 8..=9
        let (ax, ay) = cell(2, 9);
        assert_eq!(
            BlockInteraction::place_block(
                ax, ay, &camera, &actor, &mut chunks, &config, BlockType::Dirt, &CreativeSupply,
            ),
            PlaceResult::OverlapsActor
        );
        // Non-solid blocks may overlap the actor
        assert_eq!(
            BlockInteraction::place_block(
                ax, ay, &camera, &actor, &mut chunks, &config, BlockType::Poppy, &CreativeSupply,
            ),
            PlaceResult::Placed
        );

        let (fx, fy) = cell(20, 9);
        assert_eq!(
            BlockInteraction::place_block(
                fx, fy, &camera, &actor, &mut chunks, &config, BlockType::Dirt, &CreativeSupply,
            ),
            PlaceResult::OutOfReach
        );

        camera.position = Vec2::new(-5000.0, 0.0);
        assert_eq!(
            BlockInteraction::place_block(
                x, y, &camera, &actor, &mut chunks, &config, BlockType::Dirt, &CreativeSupply,
            ),
            PlaceResult::NoTarget
        );
    }

    #[test]
    fn test_place_water_makes_source_and_flowing_water_is_occupied() {
        let (mut chunks, actor, camera) = setup();
        let config = InteractionConfig::default();
        let (x, y) = cell(4, 9);

        assert_eq!(
            BlockInteraction::place_block(
                x, y, &camera, &actor, &mut chunks, &config, BlockType::Water, &CreativeSupply,
            ),
            PlaceResult::Placed
        );
        assert!(chunks.block_at_cell(4, 9).unwrap().is_source());

        chunks.set_water_at_cell(5, 9, 3);
        let (x, y) = cell(5, 9);
        assert_eq!(
            BlockInteraction::place_block(
                x, y, &camera, &actor, &mut chunks, &config, BlockType::Stone, &CreativeSupply,
            ),
            PlaceResult::Occupied
        );
    }
}
