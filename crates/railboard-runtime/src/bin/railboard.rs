//! Headless board runner
//!
//! ```text
//! railboard [--config <runtime.json>] <save.txt> [station-uuid ...]
//! ```
//!
//! Loads the save, tracks the given stations (every station when none are
//! given), starts the clock and logs each board whenever it is rebuilt.
//! Stops on Ctrl-C.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use parking_lot::Mutex;
use railboard_core::{RailboardError, RailboardResult, StationId};
use railboard_runtime::{logging, Dispatcher, RuntimeConfig, Scheduler, TickReport};
use railboard_time::SyncRegister;
use tracing::{info, warn};

const USAGE: &str = "usage: railboard [--config <runtime.json>] <save.txt> [station-uuid ...]";

struct Args {
    config: Option<PathBuf>,
    save: PathBuf,
    stations: Vec<StationId>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> RailboardResult<Self> {
        let usage = || RailboardError::InvalidConfig(USAGE.into());

        let mut config = None;
        let mut positional = Vec::new();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                config = Some(PathBuf::from(args.next().ok_or_else(usage)?));
            } else {
                positional.push(arg);
            }
        }

        let mut positional = positional.into_iter();
        let save = PathBuf::from(positional.next().ok_or_else(usage)?);
        Ok(Args {
            config,
            save,
            stations: positional.map(StationId::new).collect(),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("railboard: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RailboardResult<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => RuntimeConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => RuntimeConfig::default(),
    };
    logging::init(&config)?;

    let raw = std::fs::read_to_string(&args.save)?;
    let mut dispatcher = Dispatcher::new(SyncRegister::in_memory(), config.board.clone());
    dispatcher.startup()?;
    dispatcher.load_text(&raw)?;

    let stations = if args.stations.is_empty() {
        dispatcher.stations().iter().map(|s| s.uuid.clone()).collect()
    } else {
        args.stations
    };
    for station in stations {
        let known = dispatcher
            .scenario()
            .is_some_and(|s| s.level_content.has_station(&station));
        if !known {
            warn!(%station, "station not in level content, its board stays empty");
        }
        dispatcher.track_station(station);
    }
    dispatcher.start();

    let shared = Arc::new(Mutex::new(dispatcher));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let stats = Scheduler::new()
        .run(shared, config.tick_interval(), shutdown, log_boards)
        .await;

    info!(ticks = stats.ticks, rebuilds = stats.board_rebuilds, "bye");
    Ok(())
}

fn log_boards(dispatcher: &Dispatcher, report: &TickReport) {
    if report.stations_recomputed == 0 {
        return;
    }

    for board in dispatcher.boards() {
        info!(station = %board.station(), clock = %report.clock_text, rows = board.rows().len(), "board");
        for row in board.rows() {
            info!(
                train = %row.train,
                from = row.from_station_name().unwrap_or("-"),
                to = row.to_station_name().unwrap_or("-"),
                arrival = %row.planned_arrival,
                departure = %row.planned_departure,
                platform = row.platform,
                status = ?row.urgency(),
                "  row"
            );
        }
    }
}
