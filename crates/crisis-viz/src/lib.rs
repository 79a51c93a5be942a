//! Visualization layer: Bevy front-end for the crisis simulation.

pub mod debug;
pub mod layout;
pub mod neural;
pub mod overlay;
pub mod palette;
pub mod plugin;
pub mod sim_runner;
pub mod units;
pub mod world;

pub use plugin::CrisisVizPlugin;
