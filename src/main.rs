use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use after_humanity::config::GameConfig;
use after_humanity::engine::Engine;
use after_humanity::tui;
use after_humanity::world::WorldSeed;

#[derive(Parser, Debug)]
#[command(name = "after-humanity")]
#[command(about = "A top-down survival game with procedural maps, base building and moral dilemmas")]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World seed for the first run (random if omitted)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Print the initial run as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = match args.verbose {
        0 => "after_humanity=info",
        1 => "after_humanity=debug",
        _ => "after_humanity=trace",
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None if args.dump => builder.with_writer(std::io::stderr).init(),
        None => builder.with_writer(std::io::sink).init(),
    }

    info!("After Humanity v{}", env!("CARGO_PKG_VERSION"));

    // Load or create configuration
    let config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    let seed = match args.seed {
        Some(value) => WorldSeed::from_seed(value),
        None => WorldSeed::generate(),
    };
    let engine = Engine::with_seed(config, seed)?;

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&engine.run_view())?);
        return Ok(());
    }

    tui::run(engine).await
}
