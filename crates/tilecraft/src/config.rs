//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `config.ron` file (if exists)
//! 3. Environment variables prefixed with `TILECRAFT_`
//! 4. Command-line flags (applied by the caller)
//!
//! Example environment variable: `TILECRAFT_WORLD__WATER__UPDATE_INTERVAL=0.1`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tilecraft_core::world::WorldConfig;

/// Main driver configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Frames to simulate before exiting
    pub frames: u64,
    /// Fixed frame time in seconds
    pub dt: f32,
    /// Place blocks without consuming them from the inventory
    pub creative: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: 1.0 / 60.0,
            creative: false,
        }
    }
}

impl GameConfig {
    /// Layer defaults, `<name>.ron` and `TILECRAFT_*` variables, then validate the world part
    pub fn load(name: &str) -> Result<Self> {
        Self::load_layers(name, Self::environment())
    }

    /// `TILECRAFT_SESSION__FRAMES=120` sets `session.frames`
    fn environment() -> Environment {
        Environment::with_prefix("TILECRAFT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_layers(name: &str, environment: Environment) -> Result<Self> {
        let defaults = Config::try_from(&GameConfig::default())
            .context("Failed to serialize default configuration")?;

        let builder = Config::builder()
            // Layer 1: WorldConfig / SessionConfig defaults
            .add_source(defaults)
            // Layer 2: RON file next to the working directory, skipped when absent
            .add_source(
                File::with_name(name)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables
            .add_source(environment);

        let config = builder.build().context("Failed to build configuration")?;

        let game: GameConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        game.world
            .validate()
            .context("Invalid world configuration")?;
        Ok(game)
    }
}
