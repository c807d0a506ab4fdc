use crate::simulation::{BlockType, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::world::chunk::Chunk;
use crate::world::rng_trait::{WorldRng, chunk_rng};
use crate::world::worldgen_config::{OreConfig, WorldGenConfig};
use fastnoise_lite::FastNoiseLite;

/// Lowest row the surface may sit on (the row below it is bedrock)
const MAX_SURFACE_ROW: i32 = CHUNK_HEIGHT as i32 - 2;

/// Chunk generator: sine-and-noise terrain, ore veins, vegetation and ponds
///
/// `generate(position)` depends only on the seed, the config and `position`,
/// so evicted chunks come back identical when they are loaded again.
pub struct ChunkGenerator {
    pub seed: u64,

    config: WorldGenConfig,

    // Evaluated along the global column index, so hills continue across chunks
    height_noise: FastNoiseLite,
}

impl ChunkGenerator {
    /// Create a ChunkGenerator with default configuration
    pub fn new(seed: u64) -> Self {
        Self::from_config(seed, WorldGenConfig::default())
    }

    pub fn from_config(seed: u64, config: WorldGenConfig) -> Self {
        let height_noise = config.terrain.height_noise.to_fastnoise(seed);
        Self {
            seed,
            config,
            height_noise,
        }
    }

    /// Replace the configuration and rebuild noise layers, keeping the seed
    pub fn update_config(&mut self, config: WorldGenConfig) {
        let seed = self.seed;
        *self = Self::from_config(seed, config);
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Surface row of a global column before ponds are carved
    pub fn surface_height(&self, world_col: i32) -> usize {
        let terrain = &self.config.terrain;
        let col = world_col as f32;
        let wave = (col * terrain.wave_frequency).sin() * terrain.wave_amplitude;
        let noise = self.height_noise.get_noise_2d(col, 0.0) * terrain.noise_amplitude;
        let row = (terrain.base_height as f32 + wave + noise).round() as i32;
        row.clamp(0, MAX_SURFACE_ROW) as usize
    }

    /// Generate a complete chunk at the given chunk position
    pub fn generate(&self, position: i32) -> Chunk {
        let mut chunk = Chunk::new(position);
        let mut rng = chunk_rng(self.seed, position);

        let first_col = position * CHUNK_WIDTH as i32;
        let surfaces: Vec<usize> = (0..CHUNK_WIDTH)
            .map(|x| self.surface_height(first_col + x as i32))
            .collect();

        self.fill_terrain(&mut chunk, &surfaces);
        self.place_ores(&mut chunk, &surfaces, &mut rng);
        self.place_vegetation(&mut chunk, &surfaces, &mut rng);
        self.carve_pond(&mut chunk, &surfaces, &mut rng);

        chunk.dirty = false;
        log::trace!(
            "Generated chunk {} ({} non-air blocks)",
            position,
            chunk.count_non_air()
        );
        chunk
    }

    fn fill_terrain(&self, chunk: &mut Chunk, surfaces: &[usize]) {
        let dirt_depth = self.config.terrain.dirt_depth as usize;

        for (x, &surface) in surfaces.iter().enumerate() {
            for y in surface..CHUNK_HEIGHT {
                let block_type = if y == CHUNK_HEIGHT - 1 {
                    BlockType::Bedrock
                } else {
                    match y - surface {
                        0 => BlockType::Grass,
                        depth if depth <= dirt_depth => BlockType::Dirt,
                        _ => BlockType::Stone,
                    }
                };
                chunk.set_block_type(x, y, block_type);
            }
        }
    }

    fn place_ores<R: WorldRng + ?Sized>(&self, chunk: &mut Chunk, surfaces: &[usize], rng: &mut R) {
        let ores = &self.config.ores;
        if ores.ore_generation_chance <= 0.0 {
            return;
        }

        for (x, &surface) in surfaces.iter().enumerate() {
            for y in surface..CHUNK_HEIGHT {
                let depth = (y - surface) as i32;
                for ore in &ores.ores {
                    if chunk.block_type(x, y) != BlockType::Stone || depth < ore.min_depth {
                        continue;
                    }
                    if rng.check_probability(ores.ore_generation_chance * ore.chance) {
                        grow_vein(chunk, x as i32, y as i32, ore, rng);
                    }
                }
            }
        }
    }

    fn place_vegetation<R: WorldRng + ?Sized>(
        &self,
        chunk: &mut Chunk,
        surfaces: &[usize],
        rng: &mut R,
    ) {
        let veg = &self.config.vegetation;

        for (x, &surface) in surfaces.iter().enumerate() {
            if chunk.block_type(x, surface) != BlockType::Grass || surface == 0 {
                continue;
            }
            let above = surface as i32 - 1;
            let roll = rng.gen_f32();

            if roll < veg.tree_chance {
                let trunk = rng.gen_range_i32(veg.min_trunk_height, veg.max_trunk_height);
                grow_tree(chunk, x as i32, above, trunk, veg.canopy_radius);
            } else if roll < veg.tree_chance + veg.poppy_chance {
                place_if_air(chunk, x as i32, above, BlockType::Poppy);
            } else if roll < veg.tree_chance + veg.poppy_chance + veg.pumpkin_chance {
                place_if_air(chunk, x as i32, above, BlockType::Pumpkin);
            }
        }
    }

    fn carve_pond<R: WorldRng + ?Sized>(&self, chunk: &mut Chunk, surfaces: &[usize], rng: &mut R) {
        let pond = &self.config.pond;
        if !rng.check_probability(pond.pond_chance) {
            return;
        }

        let radius = rng.gen_range_i32(pond.pond_min_size, pond.pond_max_size);
        let max_center = CHUNK_WIDTH as i32 - 1 - radius;
        if max_center < radius {
            return;
        }
        let center = rng.gen_range_i32(radius, max_center);
        let water_line = surfaces[center as usize] as i32;

        for dx in -radius..=radius {
            let x = center + dx;

            for y in 0..water_line {
                if Chunk::in_bounds(x, y) {
                    chunk.set_block_type(x as usize, y as usize, BlockType::Air);
                }
            }

            for dy in 0..=radius {
                let y = water_line + dy;
                if dx * dx + dy * dy > radius * radius || !Chunk::in_bounds(x, y) {
                    continue;
                }
                if chunk.block_type(x as usize, y as usize) == BlockType::Bedrock {
                    continue;
                }
                chunk.set_water(x as usize, y as usize, 0);
            }
        }

        log::trace!(
            "Carved pond of radius {} at column {} in chunk {}",
            radius,
            center,
            chunk.position
        );
    }
}

/// Random 4-way walk turning stone into `ore`; steps that would leave the chunk are skipped
fn grow_vein<R: WorldRng + ?Sized>(chunk: &mut Chunk, x: i32, y: i32, ore: &OreConfig, rng: &mut R) {
    let length = rng.gen_range_i32(ore.min_vein_size as i32, ore.max_vein_size as i32);
    let (mut cx, mut cy) = (x, y);

    for _ in 0..length {
        if chunk.block_type(cx as usize, cy as usize) == BlockType::Stone {
            chunk.set_block_type(cx as usize, cy as usize, ore.block_type);
        }

        let (dx, dy) = match rng.gen_range_i32(0, 3) {
            0 => (-1, 0),
            1 => (1, 0),
            2 => (0, -1),
            _ => (0, 1),
        };
        if Chunk::in_bounds(cx + dx, cy + dy) {
            cx += dx;
            cy += dy;
        }
    }
}

/// OakLog trunk rising from `base` with a diamond of leaves around its top
fn grow_tree(chunk: &mut Chunk, x: i32, base: i32, trunk_height: i32, canopy_radius: i32) {
    let top = base - trunk_height + 1;
    for y in top..=base {
        place_if_air(chunk, x, y, BlockType::OakLog);
    }

    for dx in -canopy_radius..=canopy_radius {
        for dy in -canopy_radius..=canopy_radius {
            if dx.abs() + dy.abs() <= canopy_radius {
                place_if_air(chunk, x + dx, top + dy, BlockType::Leaves);
            }
        }
    }
}

fn place_if_air(chunk: &mut Chunk, x: i32, y: i32, block_type: BlockType) {
    if Chunk::in_bounds(x, y) && chunk.block_type(x as usize, y as usize) == BlockType::Air {
        chunk.set_block_type(x as usize, y as usize, block_type);
    }
}
