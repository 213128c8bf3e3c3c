//! Headless entry point: `tilegrid [--config FILE] [--store DIR] SESSION`.
//!
//! Replays a recorded input session against the stored map and prints the
//! resulting schema.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tilegrid_app::{App, AppConfig, AppError, parse_session};
use tilegrid_core::storage::FileStorage;

#[derive(Parser, Debug)]
#[command(name = "tilegrid", version, about = "Replay a recorded session against a tile map")]
struct Cli {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store directory; overrides the config's `store_dir`.
    #[arg(long)]
    store: Option<PathBuf>,
    /// JSON array of recorded session events.
    session: PathBuf,
}

fn run(args: Cli) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let store = match args.store.or_else(|| config.store_dir.clone()) {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    log::info!("Using store at {}", store.base_path().display());

    let events = parse_session(&std::fs::read_to_string(&args.session)?)?;
    let mut app = App::new(&config, &store)?;
    app.replay(&events)?;

    println!("{}", app.map().schema().to_json()?);
    Ok(())
}

#[cfg(feature = "native")]
fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Starting tilegrid");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("tilegrid: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() -> ExitCode {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
    ExitCode::FAILURE
}
