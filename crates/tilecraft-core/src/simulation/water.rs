//! Water propagation automaton
//!
//! Water blocks carry a level: 0 is a source, higher values are further from
//! their source. Each tick every existing water block may fall one cell,
//! spread one cell sideways, or (when isolated) evaporate.

use std::collections::VecDeque;

use ahash::AHashSet;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

use crate::simulation::{BlockType, CHUNK_HEIGHT, CHUNK_WIDTH, MAX_WATER_LEVEL};
use crate::world::ChunkManager;
use crate::world::rng_trait::WorldRng;
use crate::world::stats::{SimStats, WaterStats};
use crate::world::worldgen_config::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterConfig {
    /// Highest level falling water can reach
    pub max_water_level: u8,
    /// Level added per cell of downward flow
    pub flow_rate: u8,
    /// Blocks at or beyond this level stop spreading sideways
    pub max_spread_distance: u8,
    pub enable_evaporation: bool,
    /// Chance per tick that an isolated non-source block dries up
    pub evaporation_chance: f32,
    /// Seconds between ticks
    pub update_interval: f32,
    /// Backlog beyond this many ticks in one frame is dropped
    pub max_ticks_per_frame: u32,
    /// Falling non-source water leaves Air behind
    pub drain_falling_water: bool,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            max_water_level: MAX_WATER_LEVEL,
            flow_rate: 1,
            max_spread_distance: 7,
            enable_evaporation: true,
            evaporation_chance: 0.05,
            update_interval: 0.25,
            max_ticks_per_frame: 4,
            drain_falling_water: false,
        }
    }
}

impl WaterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_water_level == 0 || self.max_water_level > MAX_WATER_LEVEL {
            return Err(ConfigError::invalid(
                "water.max_water_level",
                format!("must be inside 1..={}", MAX_WATER_LEVEL),
            ));
        }
        if self.max_spread_distance > self.max_water_level {
            return Err(ConfigError::invalid(
                "water.max_spread_distance",
                "must not exceed max_water_level",
            ));
        }
        if !(0.0..=1.0).contains(&self.evaporation_chance) {
            return Err(ConfigError::invalid(
                "water.evaporation_chance",
                "must be a probability",
            ));
        }
        if self.update_interval.is_nan() || self.update_interval <= 0.0 {
            return Err(ConfigError::invalid(
                "water.update_interval",
                "must be positive",
            ));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::invalid(
                "water.max_ticks_per_frame",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Cells already written or processed during the current tick
type Visited = AHashSet<(i32, usize, usize)>;

fn visit_key(col: i32, row: i32) -> (i32, usize, usize) {
    let (position, local) = ChunkManager::cell_to_chunk(col);
    (position, local, row as usize)
}

fn is_replaceable(chunks: &ChunkManager, col: i32, row: i32) -> bool {
    chunks
        .block_type_at_cell(col, row)
        .is_some_and(BlockType::is_water_replaceable)
}

fn is_water(chunks: &ChunkManager, col: i32, row: i32) -> bool {
    chunks.block_type_at_cell(col, row) == Some(BlockType::Water)
}

/// Time-gated water automaton with its own RNG and counters
pub struct WaterSimulation {
    pub config: WaterConfig,
    accumulator: f32,
    rng: Xoshiro256StarStar,
    pub stats: WaterStats,
}

impl WaterSimulation {
    pub fn new(config: WaterConfig, seed: u64) -> Self {
        Self {
            config,
            accumulator: 0.0,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            stats: WaterStats::default(),
        }
    }

    /// Accumulate frame time and run the ticks that are due; returns how many ran
    pub fn advance(&mut self, dt: f32, chunks: &mut ChunkManager) -> u32 {
        let interval = self.config.update_interval;
        if interval <= 0.0 {
            self.update_water(chunks);
            return 1;
        }

        self.accumulator += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= interval {
            if ticks >= self.config.max_ticks_per_frame {
                log::debug!(
                    "Water backlog of {:.2}s dropped after {} ticks",
                    self.accumulator,
                    ticks
                );
                self.accumulator %= interval;
                break;
            }
            self.update_water(chunks);
            self.accumulator -= interval;
            ticks += 1;
        }
        ticks
    }

    /// Seconds accumulated towards the next tick
    pub fn pending_time(&self) -> f32 {
        self.accumulator
    }

    /// Run exactly one tick
    pub fn update_water(&mut self, chunks: &mut ChunkManager) {
        Self::tick(&self.config, chunks, &mut self.rng, &mut self.stats);
    }

    /// One tick over all loaded chunks
    ///
    /// Chunks are visited in ascending position, rows top to bottom, columns
    /// left to right. Cells written during the tick are not processed again
    /// until the next one.
    pub fn tick<R: WorldRng + ?Sized, S: SimStats>(
        config: &WaterConfig,
        chunks: &mut ChunkManager,
        rng: &mut R,
        stats: &mut S,
    ) {
        let mut visited = Visited::default();
        let width = CHUNK_WIDTH as i32;

        for position in chunks.positions() {
            for row in 0..CHUNK_HEIGHT as i32 {
                for x in 0..width {
                    let col = position * width + x;
                    let Some(block) = chunks.block_at_cell(col, row) else {
                        continue;
                    };
                    if !block.is_water() || !visited.insert(visit_key(col, row)) {
                        continue;
                    }
                    let level = block.water_level();

                    if Self::flow_downward(config, chunks, col, row, level, &mut visited, stats) {
                        continue;
                    }
                    Self::flow_sideways(config, chunks, col, row, level, &mut visited, stats);
                    Self::check_evaporation(config, chunks, col, row, level, rng, stats);
                }
            }
        }

        stats.record_tick();
    }

    /// Fall into the cell below if water can replace it
    fn flow_downward<S: SimStats>(
        config: &WaterConfig,
        chunks: &mut ChunkManager,
        col: i32,
        row: i32,
        level: u8,
        visited: &mut Visited,
        stats: &mut S,
    ) -> bool {
        let below = row + 1;
        if !is_replaceable(chunks, col, below) {
            return false;
        }

        let new_level = level
            .saturating_add(config.flow_rate)
            .min(config.max_water_level);
        chunks.set_water_at_cell(col, below, new_level);
        visited.insert(visit_key(col, below));
        stats.record_water_flow();

        if config.drain_falling_water && level > 0 {
            chunks.set_block_at_cell(col, row, BlockType::Air);
        }
        true
    }

    /// Spread one cell left, then one cell right
    fn flow_sideways<S: SimStats>(
        config: &WaterConfig,
        chunks: &mut ChunkManager,
        col: i32,
        row: i32,
        level: u8,
        visited: &mut Visited,
        stats: &mut S,
    ) {
        if level >= config.max_spread_distance {
            return;
        }
        let new_level = (level + 1).min(config.max_spread_distance);

        for side in [col - 1, col + 1] {
            if is_replaceable(chunks, side, row) {
                chunks.set_water_at_cell(side, row, new_level);
                visited.insert(visit_key(side, row));
                stats.record_water_flow();
            }
        }
    }

    fn check_evaporation<R: WorldRng + ?Sized, S: SimStats>(
        config: &WaterConfig,
        chunks: &mut ChunkManager,
        col: i32,
        row: i32,
        level: u8,
        rng: &mut R,
        stats: &mut S,
    ) {
        if !config.enable_evaporation || level == 0 {
            return;
        }
        let isolated = [(col - 1, row), (col + 1, row), (col, row - 1), (col, row + 1)]
            .iter()
            .all(|&(c, r)| !is_water(chunks, c, r));
        if isolated && rng.check_probability(config.evaporation_chance) {
            chunks.set_block_at_cell(col, row, BlockType::Air);
            stats.record_evaporation();
            log::trace!("Water at ({}, {}) evaporated", col, row);
        }
    }

    /// Put a source block (level 0) at a global cell; false outside loaded chunks or the grid
    pub fn place_water_source(chunks: &mut ChunkManager, col: i32, row: i32) -> bool {
        chunks.set_water_at_cell(col, row, 0)
    }

    /// Remove the whole 4-connected body of water containing a cell
    ///
    /// Sources and flowing water alike become Air. The search never leaves
    /// loaded chunks. Returns how many blocks were removed.
    pub fn remove_connected_water(chunks: &mut ChunkManager, col: i32, row: i32) -> usize {
        if !is_water(chunks, col, row) {
            return 0;
        }

        let mut seen: AHashSet<(i32, i32)> = AHashSet::new();
        let mut queue = VecDeque::new();
        seen.insert((col, row));
        queue.push_back((col, row));

        let mut removed = 0;
        while let Some((c, r)) = queue.pop_front() {
            chunks.set_block_at_cell(c, r, BlockType::Air);
            removed += 1;

            for next in [(c - 1, r), (c + 1, r), (c, r - 1), (c, r + 1)] {
                if is_water(chunks, next.0, next.1) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        log::debug!("Removed {} connected water blocks from ({}, {})", removed, col, row);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Chunk;
    use crate::world::stats::NoopStats;

    /// RNG returning one fixed value
    struct TestRng(f32);

    impl WorldRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            self.0 >= 0.5
        }

        fn gen_f32(&mut self) -> f32 {
            self.0
        }
    }

    fn no_evaporation() -> WaterConfig {
        WaterConfig {
            enable_evaporation: false,
            ..WaterConfig::default()
        }
    }

    /// Empty chunks -1..=1 with a stone floor at `floor_row`
    fn basin(floor_row: i32) -> ChunkManager {
        let mut chunks = ChunkManager::new(1);
        for position in -1..=1 {
            chunks.insert_chunk(Chunk::new(position));
        }
        let width = CHUNK_WIDTH as i32;
        for col in -width..2 * width {
            chunks.set_block_at_cell(col, floor_row, BlockType::Stone);
        }
        chunks
    }

    fn level_at(chunks: &ChunkManager, col: i32, row: i32) -> Option<u8> {
        chunks
            .block_at_cell(col, row)
            .filter(|block| block.is_water())
            .map(|block| block.water_level())
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(WaterConfig::default().validate().is_ok());

        let bad = WaterConfig {
            update_interval: 0.0,
            ..WaterConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = WaterConfig {
            max_spread_distance: 9,
            ..WaterConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = WaterConfig {
            max_ticks_per_frame: 0,
            ..WaterConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::Invalid { field: "water.max_ticks_per_frame", .. })
        ));
    }

    #[test]
    fn test_spreads_on_floor_with_distance_levels() {
        let config = WaterConfig {
            max_spread_distance: 4,
            ..no_evaporation()
        };
        let mut chunks = basin(11);
        assert!(WaterSimulation::place_water_source(&mut chunks, 10, 10));

        for _ in 0..6 {
            WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        }

        for distance in 0..=4 {
            assert_eq!(level_at(&chunks, 10 - distance, 10), Some(distance as u8));
            assert_eq!(level_at(&chunks, 10 + distance, 10), Some(distance as u8));
        }
        assert_eq!(level_at(&chunks, 5, 10), None);
        assert_eq!(level_at(&chunks, 15, 10), None);
    }

    #[test]
    fn test_downward_has_precedence() {
        let config = no_evaporation();
        let mut chunks = basin(20);
        WaterSimulation::place_water_source(&mut chunks, 5, 10);

        let mut stats = WaterStats::default();
        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut stats);

        assert_eq!(level_at(&chunks, 5, 11), Some(1));
        assert_eq!(level_at(&chunks, 4, 10), None);
        assert_eq!(level_at(&chunks, 6, 10), None);
        assert_eq!(stats.flows, 1);
        assert_eq!(stats.ticks, 1);
    }

    #[test]
    fn test_falling_column_moves_one_cell_per_tick() {
        let config = no_evaporation();
        let mut chunks = basin(20);
        WaterSimulation::place_water_source(&mut chunks, 5, 10);

        for _ in 0..3 {
            WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        }
        assert_eq!(level_at(&chunks, 5, 13), Some(3));
        assert_eq!(level_at(&chunks, 5, 14), None);
    }

    #[test]
    fn test_falling_level_clamps_to_max() {
        let config = WaterConfig {
            flow_rate: 5,
            ..no_evaporation()
        };
        let mut chunks = basin(20);
        chunks.set_water_at_cell(5, 10, 6);

        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        assert_eq!(level_at(&chunks, 5, 11), Some(config.max_water_level));
    }

    #[test]
    fn test_drain_falling_water() {
        let config = WaterConfig {
            drain_falling_water: true,
            ..no_evaporation()
        };
        let mut chunks = basin(20);
        chunks.set_water_at_cell(5, 10, 2);
        WaterSimulation::place_water_source(&mut chunks, 8, 10);

        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        assert_eq!(level_at(&chunks, 5, 10), None);
        assert_eq!(level_at(&chunks, 5, 11), Some(3));
        // Sources never drain
        assert_eq!(level_at(&chunks, 8, 10), Some(0));
    }

    #[test]
    fn test_washes_away_poppies_but_not_solids() {
        let config = no_evaporation();
        let mut chunks = basin(11);
        chunks.set_block_at_cell(9, 10, BlockType::Poppy);
        chunks.set_block_at_cell(11, 10, BlockType::Dirt);
        WaterSimulation::place_water_source(&mut chunks, 10, 10);

        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        assert_eq!(level_at(&chunks, 9, 10), Some(1));
        assert_eq!(chunks.block_type_at_cell(11, 10), Some(BlockType::Dirt));
    }

    #[test]
    fn test_spreads_across_chunk_boundary() {
        let config = no_evaporation();
        let mut chunks = basin(11);
        WaterSimulation::place_water_source(&mut chunks, 0, 10);

        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        assert_eq!(level_at(&chunks, -1, 10), Some(1));
        assert_eq!(level_at(&chunks, 1, 10), Some(1));
        assert_eq!(chunks.get_chunk(-1).unwrap().block_type(CHUNK_WIDTH - 1, 10), BlockType::Water);
    }

    #[test]
    fn test_unloaded_neighbour_blocks_flow() {
        let config = no_evaporation();
        let mut chunks = ChunkManager::new(0);
        chunks.insert_chunk(Chunk::new(0));
        for col in 0..CHUNK_WIDTH as i32 {
            chunks.set_block_at_cell(col, 11, BlockType::Stone);
        }
        WaterSimulation::place_water_source(&mut chunks, 0, 10);

        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        assert_eq!(level_at(&chunks, 1, 10), Some(1));
        assert!(chunks.block_at_cell(-1, 10).is_none());
    }

    #[test]
    fn test_water_on_bottom_row_stays() {
        let config = no_evaporation();
        let mut chunks = ChunkManager::new(0);
        chunks.insert_chunk(Chunk::new(0));
        let bottom = CHUNK_HEIGHT as i32 - 1;
        chunks.set_block_at_cell(4, bottom, BlockType::Stone);
        chunks.set_block_at_cell(6, bottom, BlockType::Stone);
        WaterSimulation::place_water_source(&mut chunks, 5, bottom);

        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.5), &mut NoopStats);
        assert_eq!(level_at(&chunks, 5, bottom), Some(0));
    }

    #[test]
    fn test_isolated_water_evaporates() {
        let config = WaterConfig::default();
        let mut chunks = basin(11);
        chunks.set_water_at_cell(3, 10, 7);
        WaterSimulation::place_water_source(&mut chunks, 20, 10);
        chunks.set_block_at_cell(19, 10, BlockType::Stone);
        chunks.set_block_at_cell(21, 10, BlockType::Stone);

        let mut stats = WaterStats::default();
        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.0), &mut stats);
        assert_eq!(level_at(&chunks, 3, 10), None);
        assert_eq!(level_at(&chunks, 20, 10), Some(0));
        assert_eq!(stats.evaporations, 1);
    }

    #[test]
    fn test_evaporation_respects_chance() {
        let config = WaterConfig::default();
        let mut chunks = basin(11);
        chunks.set_water_at_cell(3, 10, 7);

        WaterSimulation::tick(&config, &mut chunks, &mut TestRng(0.9), &mut NoopStats);
        assert_eq!(level_at(&chunks, 3, 10), Some(7));
    }

    #[test]
    fn test_advance_is_time_gated() {
        let mut sim = WaterSimulation::new(no_evaporation(), 1);
        let mut chunks = basin(20);
        WaterSimulation::place_water_source(&mut chunks, 5, 10);

        assert_eq!(sim.advance(0.1, &mut chunks), 0);
        assert_eq!(sim.advance(0.1, &mut chunks), 0);
        assert_eq!(level_at(&chunks, 5, 11), None);

        assert_eq!(sim.advance(0.1, &mut chunks), 1);
        assert_eq!(level_at(&chunks, 5, 11), Some(1));
        assert!((sim.pending_time() - 0.05).abs() < 1e-4);
        assert_eq!(sim.stats.ticks, 1);
    }

    #[test]
    fn test_advance_caps_ticks_per_frame() {
        let mut sim = WaterSimulation::new(no_evaporation(), 1);
        let mut chunks = basin(20);

        assert_eq!(sim.advance(10.0, &mut chunks), 4);
        assert!(sim.pending_time() < sim.config.update_interval);
    }

    #[test]
    fn test_place_water_source_bounds() {
        let mut chunks = basin(20);
        assert!(WaterSimulation::place_water_source(&mut chunks, 2, 3));
        assert_eq!(level_at(&chunks, 2, 3), Some(0));
        assert!(!WaterSimulation::place_water_source(&mut chunks, 500, 3));
        assert!(!WaterSimulation::place_water_source(&mut chunks, 2, CHUNK_HEIGHT as i32));
        assert!(!WaterSimulation::place_water_source(&mut chunks, 2, -1));
    }

    #[test]
    fn test_remove_connected_water() {
        let mut chunks = basin(11);
        for col in 3..=6 {
            chunks.set_water_at_cell(col, 10, (col - 3) as u8);
        }
        chunks.set_water_at_cell(4, 9, 0);
        // Separate pool
        chunks.set_water_at_cell(9, 10, 0);

        assert_eq!(WaterSimulation::remove_connected_water(&mut chunks, 5, 10), 5);
        for col in 3..=6 {
            assert_eq!(level_at(&chunks, col, 10), None);
        }
        assert_eq!(level_at(&chunks, 9, 10), Some(0));
        assert_eq!(WaterSimulation::remove_connected_water(&mut chunks, 5, 10), 0);
    }

    #[test]
    fn test_remove_connected_water_spans_chunks() {
        let mut chunks = basin(11);
        for col in -3..=3 {
            chunks.set_water_at_cell(col, 10, 0);
        }
        assert_eq!(WaterSimulation::remove_connected_water(&mut chunks, 3, 10), 7);
        assert_eq!(chunks.get_chunk(-1).unwrap().count(BlockType::Water), 0);
    }
}
