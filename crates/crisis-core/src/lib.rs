//! Nuclear Crisis Simulation Core
//!
//! Decision model, world updater, neural mapping and loop control for a
//! two-actor crisis on a single tension scalar. The window front-end and the
//! headless runner both drive a [`Simulation`].

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub mod actor;
pub mod config;
pub mod control;
pub mod decision;
pub mod error;
pub mod geo;
pub mod log;
pub mod neural;
pub mod sim;
pub mod world;

pub use actor::{Actor, RECENT_DECISIONS};
pub use config::{Config, ConfigError, DEFAULT_CONFIG_PATH};
pub use control::{LoopControl, TickTimer};
pub use decision::{decide, weighted_random_choice, WeightedAction};
pub use error::{SimError, SimResult};
pub use geo::{Gazetteer, Geocoder, MapProjection};
pub use log::{EventLog, EventLogger};
pub use neural::{
    activations, ActivationHistory, ActivationLevel, BrainRegion, NeuralLayout, RegionActivations,
    HISTORY_LEN,
};
pub use sim::{Simulation, TickReport};
pub use world::WorldState;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
