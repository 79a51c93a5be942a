//! Headless crisis runner.
//!
//! Runs the simulation without a window, printing progress to stdout and
//! optionally exporting the event log and a final snapshot.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crisis_core::{Config, EventLogger, LoopControl, SimError, Simulation};
use crisis_events::{ActorId, CrisisClock};

/// Command line arguments for the headless runner
#[derive(Parser, Debug)]
#[command(name = "crisis_sim")]
#[command(about = "Run the nuclear crisis simulation headless")]
struct Args {
    /// Random seed for reproducibility (defaults to the config seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate (defaults to the config value)
    #[arg(long)]
    ticks: Option<u64>,

    /// Path to a TOML tuning file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write every log entry to this JSONL file
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Write the final world snapshot to this JSON file
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Sleep one tick interval between ticks
    #[arg(long)]
    realtime: bool,

    /// Only print the final summary
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    let seed = args.seed.unwrap_or(config.simulation.seed);
    let ticks = args.ticks.unwrap_or(config.simulation.default_ticks);
    let control = LoopControl::new(config.tick_interval());

    if !args.quiet {
        println!("Nuclear Crisis Simulation");
        println!("=========================");
        println!("Seed: {}", seed);
        println!("Ticks: {}", ticks);
        println!("Initial tension: {:.1}", config.simulation.initial_tension);
        println!();
    }

    let mut logger = match &args.events_out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            EventLogger::new(path)?
        }
        None => EventLogger::null(),
    };

    let mut sim = Simulation::new(config, seed);

    for _ in 0..ticks {
        if sim.is_over() {
            break;
        }
        let total_before = sim.state.log.total();
        let report = sim.step();
        logger.log_batch(sim.state.log.entries_since(total_before))?;

        if !args.quiet {
            if report.tick % 10 == 0 {
                let us = sim.state.actor(ActorId::UnitedStates);
                let dprk = sim.state.actor(ActorId::NorthKorea);
                println!(
                    "[Tick {:>4}] {} | tension {:5.1} ({}) | USA approval {:5.1} stress {:5.1} | DPRK approval {:5.1} stress {:5.1}",
                    report.tick,
                    CrisisClock::from_tick(report.tick),
                    report.tension,
                    sim.state.tension_band().label(),
                    us.approval(),
                    us.stress(),
                    dprk.approval(),
                    dprk.stress(),
                );
            }
            if let Some(outcome) = report.outcome {
                println!();
                println!("*** {} at tick {} ***", outcome.title().to_uppercase(), report.tick);
                println!();
            }
            if report.tick % 100 == 0 {
                println!("Tick {} / {}", report.tick, ticks);
            }
        }

        if args.realtime {
            std::thread::sleep(control.tick_interval());
        }
    }

    logger.flush()?;

    let snapshot = sim.snapshot();
    if let Some(path) = &args.snapshot_out {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
    }

    println!();
    println!("Simulation complete!");
    println!("  Ticks run: {}", sim.state.tick);
    println!(
        "  Final tension: {:.1} ({})",
        snapshot.tension,
        snapshot.tension_band.label()
    );
    println!(
        "  Outcome: {}",
        snapshot
            .outcome
            .map(|o| o.title())
            .unwrap_or("Crisis ongoing")
    );
    println!("  Log entries: {}", snapshot.log_entries_total);
    println!("  Units on map: {}", snapshot.units.len());
    if let Some(path) = &args.events_out {
        println!("  Events written to {}", path.display());
    }
    if let Some(path) = &args.snapshot_out {
        println!("  Snapshot written to {}", path.display());
    }

    Ok(())
}
