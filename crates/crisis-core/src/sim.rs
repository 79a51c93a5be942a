//! Simulation driver.
//!
//! Owns the world, the seeded RNG and the configuration. One call to
//! [`Simulation::step`] is one tick.

use bevy_ecs::prelude::*;

use crisis_events::{Action, ActorId, Outcome, WorldSnapshot};

use crate::config::Config;
use crate::decision::decide;
use crate::geo::{Gazetteer, Geocoder};
use crate::world::WorldState;
use crate::SimRng;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Actions applied, in order
    pub actions: Vec<Action>,
    pub tension: f32,
    /// Outcome first announced during this tick
    pub outcome: Option<Outcome>,
}

/// The running crisis
#[derive(Resource)]
pub struct Simulation {
    pub state: WorldState,
    pub config: Config,
    rng: SimRng,
    seed: u64,
    geocoder: Box<dyn Geocoder>,
}

impl Simulation {
    /// Creates a simulation with the built-in gazetteer.
    pub fn new(config: Config, seed: u64) -> Self {
        Self::with_geocoder(config, seed, Box::new(Gazetteer::new()))
    }

    pub fn with_geocoder(config: Config, seed: u64, geocoder: Box<dyn Geocoder>) -> Self {
        let state = WorldState::new(&config, geocoder.as_ref());
        tracing::info!(seed, tension = state.tension(), "simulation initialized");
        Self {
            state,
            config,
            rng: SimRng::seeded(seed),
            seed,
            geocoder,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Outcome holding right now, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome(&self.config)
    }

    /// Whether ticking should stop.
    pub fn is_over(&self) -> bool {
        self.config.simulation.stop_on_outcome && self.outcome().is_some()
    }

    /// Advances one tick: the United States decides and acts, then North
    /// Korea, then the passive rules run.
    ///
    /// Once the run is over this is a no-op returning an empty report.
    pub fn step(&mut self) -> TickReport {
        let before = self.state.announcements();
        if self.is_over() {
            return TickReport {
                tick: self.state.tick,
                actions: Vec::new(),
                tension: self.state.tension(),
                outcome: None,
            };
        }

        self.state.tick += 1;
        let mut actions = Vec::with_capacity(ActorId::ALL.len());

        for id in ActorId::ALL {
            if self.is_over() {
                break;
            }
            let action = decide(
                self.state.actor(id),
                self.state.tension(),
                &self.config,
                &mut self.rng.0,
            );
            self.state
                .apply(&action, &self.config, self.geocoder.as_ref());
            actions.push(action);
        }

        if !self.is_over() {
            self.state.apply_passive(&self.config);
        }

        let announced = self.state.announcements() > before;
        TickReport {
            tick: self.state.tick,
            actions,
            tension: self.state.tension(),
            outcome: if announced {
                self.state.last_announced()
            } else {
                None
            },
        }
    }

    /// Runs up to `ticks` ticks, stopping early if the run ends.
    pub fn run(&mut self, ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < ticks && !self.is_over() {
            self.step();
            ran += 1;
        }
        ran
    }

    /// Starts over from tick 0 with a new seed and the same config.
    pub fn restart(&mut self, seed: u64) {
        self.state = WorldState::new(&self.config, self.geocoder.as_ref());
        self.rng = SimRng::seeded(seed);
        self.seed = seed;
        tracing::info!(seed, "simulation restarted");
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.state.snapshot(self.seed, &self.config)
    }
}
