use anyhow::Context;
use clap::Parser;
use tilecraft::{GameConfig, Session};
use tilecraft_core::world::World;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u64>,

    /// Fixed frame time in seconds
    #[arg(long)]
    dt: Option<f32>,

    /// Place blocks without consuming inventory
    #[arg(long)]
    creative: bool,

    /// Config file name without extension
    #[arg(long, default_value = "config")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = GameConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(frames) = args.frames {
        config.session.frames = frames;
    }
    if let Some(dt) = args.dt {
        anyhow::ensure!(dt > 0.0, "--dt must be positive, got {}", dt);
        config.session.dt = dt;
    }
    if args.creative {
        config.session.creative = true;
    }

    log::info!(
        "Starting Tilecraft (seed {}, {} frames at {:.4}s)",
        config.world.seed,
        config.session.frames,
        config.session.dt
    );

    let world = World::new(config.world).context("Failed to create world")?;
    let report = Session::new(world, config.session).run();

    println!(
        "frames={} water_ticks={} broken={} placed={} crafted={} position=({:.1}, {:.1}) chunks={:?}",
        report.frames,
        report.water_ticks,
        report.blocks_broken,
        report.blocks_placed,
        report.recipes_crafted,
        report.final_position.x,
        report.final_position.y,
        report.loaded_chunks
    );
    Ok(())
}
