use clap::Parser;
use orchard::{SimConfig, Simulation};
use orchard_fly::Difficulty;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON). Defaults to ./orchard.ron if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u64>,

    /// Number of flies to spawn
    #[arg(long)]
    flies: Option<usize>,

    /// Random seed for fly decisions and tree picks
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty: easy, normal, hard, insane (or 0-3)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Run without a player in the orchard
    #[arg(long)]
    no_player: bool,

    /// Print the report as RON instead of text
    #[arg(long)]
    ron: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = SimConfig::load(args.config.as_deref())?;

    // Command-line flags win over file and environment
    if let Some(frames) = args.frames {
        config.run.frames = frames;
    }
    if let Some(flies) = args.flies {
        config.world.fly_count = flies;
    }
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(difficulty) = args.difficulty {
        config.fly.difficulty = difficulty;
    }
    if args.no_player {
        config.player.enabled = false;
    }

    log::info!(
        "Starting Orchard: {} flies, difficulty {}, seed {}",
        config.world.fly_count,
        config.fly.difficulty,
        config.run.seed
    );

    let mut simulation = Simulation::from_config(&config)?;
    let report = simulation.run();

    if args.ron {
        println!("{}", report.to_ron()?);
    } else {
        println!("{report}");
    }

    Ok(())
}
