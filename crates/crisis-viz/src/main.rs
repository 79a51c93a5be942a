//! Nuclear Crisis Simulation window
//!
//! Run with: cargo run -p crisis-viz
//!
//! Examples:
//!   cargo run -p crisis-viz -- --seed 7 --speed 2
//!   cargo run -p crisis-viz -- --config crisis.toml --paused

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crisis_core::{Config, LoopControl, Simulation};
use crisis_viz::CrisisVizPlugin;

/// Nuclear Crisis Simulation
#[derive(Parser, Debug)]
#[command(name = "crisis-viz")]
#[command(about = "Watch two AI presidents manage a nuclear crisis")]
struct Args {
    /// Random seed (defaults to the config seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML tuning file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start paused
    #[arg(long)]
    paused: bool,

    /// Initial speed multiplier (0.25 to 2.0)
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
}

fn main() -> AppExit {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: could not load {}: {}", path.display(), e);
                return AppExit::error();
            }
        },
        None => Config::load_or_default(),
    };
    let seed = args.seed.unwrap_or(config.simulation.seed);

    let mut control = LoopControl::new(config.tick_interval());
    control.set_speed(args.speed);
    control.paused = args.paused;

    App::new()
        .insert_resource(Simulation::new(config, seed))
        .insert_resource(control)
        .add_plugins(CrisisVizPlugin)
        .run()
}
