//! World generation configuration - serializable parameters for chunk generation
//!
//! Everything the chunk generator needs apart from the seed lives here, so
//! presets can be stored as RON and tweaked without touching code.
//! The seed is NOT part of the config - same config + different seed = different world.

use crate::simulation::{BlockType, CHUNK_HEIGHT, CHUNK_WIDTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize RON: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Complete chunk generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGenConfig {
    /// Display name for this configuration
    pub name: String,

    /// Surface height shape
    pub terrain: TerrainParams,

    /// Ore veins inside the stone band
    pub ores: OreParams,

    /// Trees, poppies and pumpkins
    pub vegetation: VegetationParams,

    /// Surface ponds
    pub pond: PondConfig,

    /// Chunks kept loaded on each side of the actor's chunk
    pub load_radius: i32,
}

/// Terrain height generation parameters
///
/// Surface row = `base_height + sin(col × wave_frequency) × wave_amplitude
/// + noise(col) × noise_amplitude`, where `col` is the global column index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Average surface row, counted from the top of the world
    pub base_height: i32,
    /// Frequency of the rolling sine hills
    pub wave_frequency: f32,
    /// Sine amplitude in rows
    pub wave_amplitude: f32,
    /// Noise layer breaking up the sine wave
    pub height_noise: NoiseLayerConfig,
    /// Noise amplitude in rows
    pub noise_amplitude: f32,
    /// Dirt rows between the grass cap and the stone band
    pub dirt_depth: i32,
}

/// Noise type options (maps to fastnoise_lite::NoiseType)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseTypeConfig {
    OpenSimplex2,
    OpenSimplex2S,
    Perlin,
    Value,
}

/// Configuration for a single 1D noise layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseLayerConfig {
    /// Added to the world seed so layers are independent
    pub seed_offset: i32,
    pub noise_type: NoiseTypeConfig,
    pub frequency: f32,
    /// Fractal octaves (1 disables fBm)
    pub octaves: u32,
}

/// Ore vein placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OreParams {
    /// Base chance that a stone cell seeds a vein, scaled by each ore's own chance
    pub ore_generation_chance: f32,
    /// Ores in the order they are rolled
    pub ores: Vec<OreConfig>,
}

/// Individual ore generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OreConfig {
    pub block_type: BlockType,
    /// Multiplier on `ore_generation_chance`
    pub chance: f32,
    /// Minimum depth in rows below the local surface
    pub min_depth: i32,
    /// Shortest vein walk
    pub min_vein_size: u32,
    /// Longest vein walk (inclusive)
    pub max_vein_size: u32,
}

/// Vegetation placement on grass-capped columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VegetationParams {
    pub tree_chance: f32,
    pub poppy_chance: f32,
    pub pumpkin_chance: f32,
    pub min_trunk_height: i32,
    pub max_trunk_height: i32,
    /// Leaves diamond radius around the trunk top
    pub canopy_radius: i32,
}

/// Surface pond carving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PondConfig {
    /// Chance per chunk
    pub pond_chance: f32,
    /// Smallest radius in blocks
    pub pond_min_size: i32,
    /// Largest radius in blocks
    pub pond_max_size: i32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            terrain: TerrainParams::default(),
            ores: OreParams::default(),
            vegetation: VegetationParams::default(),
            pond: PondConfig::default(),
            load_radius: 2,
        }
    }
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_height: 24,
            wave_frequency: 0.3,
            wave_amplitude: 2.0,
            height_noise: NoiseLayerConfig::default(),
            noise_amplitude: 1.5,
            dirt_depth: 3,
        }
    }
}

impl Default for NoiseLayerConfig {
    fn default() -> Self {
        Self {
            seed_offset: 0,
            noise_type: NoiseTypeConfig::OpenSimplex2,
            frequency: 0.05,
            octaves: 1,
        }
    }
}

impl Default for OreParams {
    fn default() -> Self {
        Self {
            ore_generation_chance: 0.05,
            ores: vec![
                OreConfig {
                    block_type: BlockType::Coal,
                    chance: 0.1,
                    min_depth: 4,
                    min_vein_size: 3,
                    max_vein_size: 8,
                },
                OreConfig {
                    block_type: BlockType::Iron,
                    chance: 0.08,
                    min_depth: 28,
                    min_vein_size: 2,
                    max_vein_size: 6,
                },
                OreConfig {
                    block_type: BlockType::Gold,
                    chance: 0.05,
                    min_depth: 52,
                    min_vein_size: 2,
                    max_vein_size: 5,
                },
                OreConfig {
                    block_type: BlockType::Diamond,
                    chance: 0.02,
                    min_depth: 78,
                    min_vein_size: 1,
                    max_vein_size: 4,
                },
            ],
        }
    }
}

impl Default for VegetationParams {
    fn default() -> Self {
        Self {
            tree_chance: 0.1,
            poppy_chance: 0.08,
            pumpkin_chance: 0.02,
            min_trunk_height: 4,
            max_trunk_height: 6,
            canopy_radius: 2,
        }
    }
}

impl Default for PondConfig {
    fn default() -> Self {
        Self {
            pond_chance: 0.25,
            pond_min_size: 3,
            pond_max_size: 6,
        }
    }
}

impl NoiseTypeConfig {
    /// Convert to fastnoise_lite::NoiseType
    pub fn to_fastnoise(self) -> fastnoise_lite::NoiseType {
        match self {
            NoiseTypeConfig::OpenSimplex2 => fastnoise_lite::NoiseType::OpenSimplex2,
            NoiseTypeConfig::OpenSimplex2S => fastnoise_lite::NoiseType::OpenSimplex2S,
            NoiseTypeConfig::Perlin => fastnoise_lite::NoiseType::Perlin,
            NoiseTypeConfig::Value => fastnoise_lite::NoiseType::Value,
        }
    }
}

impl NoiseLayerConfig {
    /// Create a FastNoiseLite instance from this config
    pub fn to_fastnoise(&self, base_seed: u64) -> fastnoise_lite::FastNoiseLite {
        let mut noise = fastnoise_lite::FastNoiseLite::with_seed(
            (base_seed as i32).wrapping_add(self.seed_offset),
        );
        noise.set_noise_type(Some(self.noise_type.to_fastnoise()));
        noise.set_frequency(Some(self.frequency));
        if self.octaves > 1 {
            noise.set_fractal_type(Some(fastnoise_lite::FractalType::FBm));
            noise.set_fractal_octaves(Some(self.octaves as i32));
        }
        noise
    }
}

impl WorldGenConfig {
    /// Flat world: constant surface height, no ores, no vegetation, no ponds
    pub fn preset_flat() -> Self {
        Self {
            name: "Flat World".to_string(),
            terrain: TerrainParams {
                wave_amplitude: 0.0,
                noise_amplitude: 0.0,
                ..TerrainParams::default()
            },
            ores: OreParams {
                ore_generation_chance: 0.0,
                ..OreParams::default()
            },
            vegetation: VegetationParams {
                tree_chance: 0.0,
                poppy_chance: 0.0,
                pumpkin_chance: 0.0,
                ..VegetationParams::default()
            },
            pond: PondConfig {
                pond_chance: 0.0,
                ..PondConfig::default()
            },
            load_radius: 2,
        }
    }

    /// Wet world: frequent, large ponds
    pub fn preset_lakes() -> Self {
        Self {
            name: "Lakes".to_string(),
            pond: PondConfig {
                pond_chance: 0.9,
                pond_min_size: 5,
                pond_max_size: 10,
            },
            ..Self::default()
        }
    }

    /// Check value ranges the generator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let height = CHUNK_HEIGHT as i32;
        if !(0..height).contains(&self.terrain.base_height) {
            return Err(ConfigError::invalid(
                "terrain.base_height",
                format!("must be inside 0..{}", height),
            ));
        }
        if self.terrain.dirt_depth < 0 {
            return Err(ConfigError::invalid("terrain.dirt_depth", "must not be negative"));
        }
        if self.load_radius < 1 {
            return Err(ConfigError::invalid(
                "load_radius",
                "must be at least 1 so the next chunk is loaded before the actor reaches it",
            ));
        }

        check_probability("ores.ore_generation_chance", self.ores.ore_generation_chance)?;
        for ore in &self.ores.ores {
            if !ore.block_type.is_ore() {
                return Err(ConfigError::invalid(
                    "ores.block_type",
                    format!("{} is not an ore", ore.block_type),
                ));
            }
            check_probability("ores.chance", ore.chance)?;
            if ore.min_vein_size > ore.max_vein_size {
                return Err(ConfigError::invalid(
                    "ores.min_vein_size",
                    "must not exceed max_vein_size",
                ));
            }
        }

        let veg = &self.vegetation;
        check_probability("vegetation.tree_chance", veg.tree_chance)?;
        check_probability("vegetation.poppy_chance", veg.poppy_chance)?;
        check_probability("vegetation.pumpkin_chance", veg.pumpkin_chance)?;
        if veg.tree_chance + veg.poppy_chance + veg.pumpkin_chance > 1.0 {
            return Err(ConfigError::invalid(
                "vegetation",
                "tree, poppy and pumpkin chances must sum to at most 1",
            ));
        }
        if veg.min_trunk_height < 1 || veg.min_trunk_height > veg.max_trunk_height {
            return Err(ConfigError::invalid(
                "vegetation.min_trunk_height",
                "must be at least 1 and not exceed max_trunk_height",
            ));
        }
        if veg.canopy_radius < 0 {
            return Err(ConfigError::invalid("vegetation.canopy_radius", "must not be negative"));
        }

        check_probability("pond.pond_chance", self.pond.pond_chance)?;
        if self.pond.pond_min_size < 1 || self.pond.pond_min_size > self.pond.pond_max_size {
            return Err(ConfigError::invalid(
                "pond.pond_min_size",
                "must be at least 1 and not exceed pond_max_size",
            ));
        }
        if self.pond.pond_max_size * 2 + 1 > CHUNK_WIDTH as i32 {
            return Err(ConfigError::invalid(
                "pond.pond_max_size",
                "pond must fit inside one chunk",
            ));
        }

        Ok(())
    }

    /// Parse a RON preset and validate it
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: WorldGenConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is not a probability", value)))
    }
}
