use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, IsTerminal};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use geofence::api::{self, AppState};
use geofence::config::FileConfig;
use geofence::engine::{GeofenceEngine, LogSink};
use geofence::replay::{DEMO_VEHICLE, demo_events, parse_events, replay};
use geofence::store::{StoreBackend, VehicleStore};

/// Track vehicle location pings against named polygon zones
///
/// Examples:
///   # Serve the HTTP API with zones from ./geofence.toml (or the built-in zone)
///   geofence serve --bind 127.0.0.1:8080
///
///   # Replay a JSON-lines file of pings on 8 threads
///   geofence replay pings.jsonl --workers 8
///
///   # Run the built-in enter/stay/exit walk-through
///   geofence replay
#[derive(Parser, Debug)]
#[command(name = "geofence")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches geofence.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store backend, overrides the config file
    #[arg(long, global = true)]
    store: Option<StoreBackend>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP ingest and query service
    Serve {
        /// Listen address, overrides the config file
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Feed recorded pings through the engine and report transitions
    Replay {
        /// JSON-lines file of events; runs the demo walk-through when omitted
        file: Option<PathBuf>,

        /// Worker threads; each vehicle stays on one worker
        #[arg(short = 'w', long, default_value = "4")]
        workers: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)
            .with_context(|| format!("Failed to load config file: {:?}", path))?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let zones = file_config
        .zone_set()
        .context("Failed to build zone list")?;
    let backend = args.store.unwrap_or(file_config.store.backend);
    tracing::debug!(zones = zones.len(), ?backend, "configuration loaded");

    let engine = GeofenceEngine::new(zones, backend.build());

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(file_config.server.bind);
            let state = AppState::new(engine, Arc::new(LogSink));
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?
                .block_on(api::serve(addr, state))
                .with_context(|| format!("Server on {addr} failed"))?;
        }
        Command::Replay { file, workers } => {
            run_replay(&engine, file, workers)?;
        }
    }

    Ok(())
}

fn run_replay(engine: &GeofenceEngine, file: Option<PathBuf>, workers: usize) -> Result<()> {
    let start = Instant::now();

    let (events, rejected) = match file {
        Some(ref path) => {
            let reader = BufReader::new(
                File::open(path).with_context(|| format!("Failed to open {:?}", path))?,
            );
            parse_events(reader).with_context(|| format!("Failed to read {:?}", path))?
        }
        None => {
            let now = chrono::Utc::now().timestamp();
            (demo_events(now), 0)
        }
    };

    let progress = std::io::stderr().is_terminal().then(|| {
        let pb = ProgressBar::new(events.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40.green} {pos}/{len} events {msg}") {
            pb.set_style(style);
        }
        pb
    });

    let mut summary = replay(engine, &LogSink, events, workers, progress.as_ref());
    summary.rejected = rejected;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    tracing::info!(
        processed = summary.processed,
        rejected = summary.rejected,
        transitions = summary.transitions,
        vehicles = engine.store().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "replay complete"
    );

    if file.is_none()
        && let Some(status) = engine.status(DEMO_VEHICLE)
    {
        tracing::info!(
            vehicle = %status.vehicle_id,
            zone = %status.current_zone_id,
            last_seen = %status.last_seen,
            "demo vehicle final status"
        );
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
