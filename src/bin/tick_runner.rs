//! Headless Tick Runner
//!
//! Advances one or more saved game states by N ticks and prints the
//! resulting domain events. Scenarios run in parallel; ticks within a
//! scenario run in order.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use starfront::catalog::Catalog;
use starfront::core::config::EngineConfig;
use starfront::core::error::Result;
use starfront::galaxy::entities::GameState;
use starfront::tick::{advance_ticks, TickOutput};

/// Headless Tick Runner - advance saved games without a server
#[derive(Parser, Debug)]
#[command(name = "tick_runner")]
#[command(about = "Advance game state snapshots and print the emitted events")]
struct Args {
    /// Game state JSON files
    #[arg(required = true)]
    scenarios: Vec<PathBuf>,

    /// Ticks to advance each scenario
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Unit/specialist catalog TOML (built-in fleet when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Engine config TOML (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall clock in epoch milliseconds, used for AFK detection
    #[arg(long, default_value_t = 0)]
    now_ms: u64,

    /// Write final states here as <scenario>.json
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("starfront=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::with_defaults(),
    };
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    tracing::info!(
        scenarios = args.scenarios.len(),
        ticks = args.ticks,
        "Starting tick runner"
    );

    let results: Vec<Result<(GameState, TickOutput)>> = args
        .scenarios
        .par_iter()
        .map(|path| {
            let state = GameState::from_json(&fs::read_to_string(path)?)?;
            Ok(advance_ticks(state, args.ticks, &catalog, &config, args.now_ms))
        })
        .collect();

    let names = output_names(&args.scenarios);
    for ((path, name), result) in args.scenarios.iter().zip(&names).zip(results) {
        let (state, output) = result?;
        print_output(&args.format, path, &state, &output)?;

        if let Some(dir) = &args.out_dir {
            fs::create_dir_all(dir)?;
            let out = dir.join(name);
            fs::write(&out, state.to_json()?)?;
            tracing::info!(path = %out.display(), "Wrote final state");
        }
    }

    Ok(())
}

fn print_output(format: &str, path: &Path, state: &GameState, output: &TickOutput) -> Result<()> {
    if format == "json" {
        for event in &output.game_events {
            println!("{}", serde_json::to_string(event)?);
        }
        return Ok(());
    }

    println!("=== {} (game {}) ===", path.display(), state.game.id);
    println!("Tick: {}  Status: {:?}", state.game.tick, state.game.status);
    for event in &output.game_events {
        println!("  {}", event.describe());
    }
    if let Some(winner) = output.winner_player_id {
        println!("Winner: player {}", winner);
    }
    if !output.stations_to_remove.is_empty() {
        println!("Stations to remove: {:?}", output.stations_to_remove);
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scenario".to_string())
}

/// `<stem>.json` per input; stems shared by several inputs get their
/// argument position appended so no output overwrites another
fn output_names(paths: &[PathBuf]) -> Vec<PathBuf> {
    let stems: Vec<String> = paths.iter().map(|p| file_stem(p)).collect();
    stems
        .iter()
        .enumerate()
        .map(|(i, stem)| {
            let shared = stems.iter().filter(|&s| s == stem).count() > 1;
            if shared {
                PathBuf::from(format!("{}-{}.json", stem, i))
            } else {
                PathBuf::from(format!("{}.json", stem))
            }
        })
        .collect()
}
