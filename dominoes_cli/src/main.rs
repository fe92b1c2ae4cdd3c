use std::path::PathBuf;

use clap::Parser;
use dominoes::{Tournament, DEFAULT_MAX_SCORE};
use dominoes_cli::{play_tournament, Autoplay, Config, Console, MoveSource, Recorder, SessionEnd};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// The score that ends the tournament
    #[arg(short, long, default_value_t = DEFAULT_MAX_SCORE)]
    max_score: u32,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Resume the game saved in this file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Where the "save" command writes the game
    #[arg(long, default_value = "saved_game.txt")]
    save_to: PathBuf,

    /// Let the computer's heuristic play the human's seat
    #[arg(short, long, default_value_t = false)]
    autoplay: bool,

    /// Record every move as JSON files into this directory
    #[arg(short, long)]
    record_moves_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    let recorder = if let Some(dir_path) = args.record_moves_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut config = Config {
        rng,
        recorder,
        save_to: args.save_to,
    };

    let mut tournament = match &args.load {
        Some(path) => Tournament::load(path, &mut config.rng)?,
        None => Tournament::new(args.max_score, &mut config.rng),
    };

    let mut source: Box<dyn MoveSource> = if args.autoplay {
        Box::new(Autoplay)
    } else {
        Box::new(Console::new(std::io::stdin().lock(), std::io::stdout()))
    };

    match play_tournament(&mut tournament, source.as_mut(), &mut config)? {
        SessionEnd::TournamentOver => info!("Tournament finished"),
        SessionEnd::Saved => info!(path = %config.save_to.display(), "Game saved"),
        SessionEnd::Quit => println!("Goodbye, the game was not saved"),
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
