//! World State and Updater
//!
//! Applies actions to the shared tension scalar and the acting actor, keeps
//! the unit map current, and announces terminal outcomes exactly once.

use crisis_events::{
    clamp_scalar, Action, ActionKind, ActorId, LogEntry, Nation, Outcome, Posture, SimTimestamp,
    TensionBand, UnitMarker, UnitStatus, WorldSnapshot, SCALAR_MAX, SCALAR_MIN,
};

use crate::actor::Actor;
use crate::config::Config;
use crate::geo::Geocoder;
use crate::log::EventLog;

/// Everything the simulation mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub tick: u64,
    tension: f32,
    actors: [Actor; 2],
    pub units: Vec<UnitMarker>,
    pub log: EventLog,
    /// Consecutive Negotiate/Deescalate actions, reset by aggression
    pub negotiation_streak: u32,
    next_unit_id: u32,
    deployments: [usize; 2],
    escalation_announced: bool,
    resolution_announced: bool,
    last_announced: Option<Outcome>,
}

impl WorldState {
    /// Builds the tick-0 world and places the initial units.
    ///
    /// Initial units are not logged. Sites the geocoder cannot resolve are
    /// skipped with a warning.
    pub fn new(config: &Config, geocoder: &dyn Geocoder) -> Self {
        let mut world = Self {
            tick: 0,
            tension: clamp_scalar(config.simulation.initial_tension),
            actors: [
                Actor::new(ActorId::UnitedStates, &config.united_states),
                Actor::new(ActorId::NorthKorea, &config.north_korea),
            ],
            units: Vec::new(),
            log: EventLog::new(config.log.max_entries),
            negotiation_streak: 0,
            next_unit_id: 1,
            deployments: [0; 2],
            escalation_announced: false,
            resolution_announced: false,
            last_announced: None,
        };

        for unit in &config.map.initial_units {
            match geocoder.locate(&unit.site) {
                Some(position) => {
                    let id = world.allocate_unit_id();
                    world.units.push(UnitMarker::new(
                        id,
                        unit.unit_type,
                        unit.owner,
                        unit.site.clone(),
                        position,
                    ));
                }
                None => tracing::warn!(site = %unit.site, "unknown initial unit site, skipping"),
            }
        }

        world
    }

    pub fn tension(&self) -> f32 {
        self.tension
    }

    /// Sets tension, clamped to bounds.
    pub fn set_tension(&mut self, value: f32) {
        self.tension = clamp_scalar(value);
    }

    pub fn tension_band(&self) -> TensionBand {
        TensionBand::from_tension(self.tension)
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id.index()]
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.actors[id.index()]
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Units owned by a nation, oldest first.
    pub fn units_of(&self, owner: Nation) -> impl Iterator<Item = &UnitMarker> {
        self.units.iter().filter(move |u| u.owner == owner)
    }

    /// Outcome holding for the current tension and streak, if any.
    ///
    /// Read from the live state each time; an outcome that no longer holds
    /// is not reported even though its announcement stays in the log.
    pub fn outcome(&self, config: &Config) -> Option<Outcome> {
        assess(self.tension, self.negotiation_streak, config)
    }

    /// Most recently announced outcome.
    pub fn last_announced(&self) -> Option<Outcome> {
        self.last_announced
    }

    /// Number of outcome kinds announced so far.
    pub fn announcements(&self) -> u32 {
        u32::from(self.escalation_announced) + u32::from(self.resolution_announced)
    }

    pub fn timestamp(&self) -> SimTimestamp {
        SimTimestamp::at_tick(self.tick)
    }

    /// Applies one action and appends exactly one entry describing it.
    ///
    /// If the action pushes the world into a terminal condition for the
    /// first time, a system entry announcing it follows.
    pub fn apply(&mut self, action: &Action, config: &Config, geocoder: &dyn Geocoder) {
        let kind = action.kind;
        let tuning = config.actions.tuning(kind);
        let stress_delta = action.kind.tension_sign() * action.magnitude * config.dynamics.stress_gain;

        self.set_tension(self.tension + action.tension_delta());
        {
            let actor = self.actor_mut(action.actor);
            actor.adjust_stress(stress_delta);
            actor.adjust_approval(tuning.approval_delta);
            actor.record(kind);
        }

        if kind.is_negotiation() {
            self.negotiation_streak += 1;
        } else if kind.posture() == Posture::Aggressive {
            self.negotiation_streak = 0;
        }

        let owner = action.actor.nation();
        match kind {
            ActionKind::Deploy => self.deploy(action.actor, config, geocoder),
            ActionKind::Escalate => self.set_unit_status(owner, UnitStatus::HighAlert),
            ActionKind::Negotiate | ActionKind::Deescalate => {
                self.set_unit_status(owner, UnitStatus::Active)
            }
            ActionKind::Cyberattack | ActionKind::Propaganda => {}
        }

        let entry = LogEntry::action(
            self.log.next_id(),
            self.timestamp(),
            action.actor,
            kind,
            action.describe(),
        );
        tracing::debug!(tick = self.tick, tension = self.tension, "{}", entry.description);
        self.log.push(entry);

        self.check_outcome(config);
    }

    /// Runs the silent per-tick rules: tension decay and stress coupling.
    pub fn apply_passive(&mut self, config: &Config) {
        let dynamics = &config.dynamics;
        let neutral = clamp_scalar(dynamics.neutral_tension);
        self.set_tension(self.tension + (neutral - self.tension) * dynamics.decay_rate);

        let tension = self.tension;
        for actor in self.actors.iter_mut() {
            let perceived = clamp_scalar(tension * actor.policy.stress_sensitivity);
            let stress = actor.stress();
            actor.set_stress(stress + (perceived - stress) * dynamics.stress_coupling);
        }

        self.check_outcome(config);
    }

    fn check_outcome(&mut self, config: &Config) {
        let Some(outcome) = assess(self.tension, self.negotiation_streak, config) else {
            return;
        };
        let latch = match outcome {
            Outcome::NuclearEscalation => &mut self.escalation_announced,
            Outcome::DiplomaticResolution => &mut self.resolution_announced,
        };
        if *latch {
            return;
        }
        *latch = true;
        self.last_announced = Some(outcome);

        tracing::info!(tick = self.tick, "{}", outcome.title());
        let entry = LogEntry::outcome(self.log.next_id(), self.timestamp(), outcome);
        self.log.push(entry);
    }

    fn deploy(&mut self, actor: ActorId, config: &Config, geocoder: &dyn Geocoder) {
        let actor_config = config.actor(actor);
        let slot = self.deployments[actor.index()];
        self.deployments[actor.index()] += 1;

        if actor_config.deployment_sites.is_empty() || actor_config.unit_types.is_empty() {
            return;
        }
        let site = &actor_config.deployment_sites[slot % actor_config.deployment_sites.len()];
        let unit_type = actor_config.unit_types[slot % actor_config.unit_types.len()];

        let Some(position) = geocoder.locate(site) else {
            tracing::warn!(%actor, %site, "unknown deployment site, no unit placed");
            return;
        };

        let owner = actor.nation();
        let owned = self.units_of(owner).count();
        if owned >= config.map.max_units_per_actor {
            if let Some(oldest) = self.units.iter().position(|u| u.owner == owner) {
                let removed = self.units.remove(oldest);
                tracing::debug!(unit = %removed.label(), site = %removed.site, "unit stands down");
            }
        }

        let id = self.allocate_unit_id();
        self.units
            .push(UnitMarker::new(id, unit_type, owner, site.clone(), position));
    }

    fn set_unit_status(&mut self, owner: Nation, status: UnitStatus) {
        for unit in self.units.iter_mut().filter(|u| u.owner == owner) {
            unit.status = status;
        }
    }

    fn allocate_unit_id(&mut self) -> u32 {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        id
    }

    /// Serializable summary of the current state.
    pub fn snapshot(&self, seed: u64, config: &Config) -> WorldSnapshot {
        WorldSnapshot {
            timestamp: self.timestamp(),
            seed,
            tension: self.tension,
            tension_band: self.tension_band(),
            actors: self.actors.iter().map(Actor::snapshot).collect(),
            units: self.units.clone(),
            log_entries_total: self.log.total(),
            outcome: self.outcome(config),
        }
    }
}

/// Terminal condition holding for the given tension and streak, if any.
pub fn assess(tension: f32, negotiation_streak: u32, config: &Config) -> Option<Outcome> {
    if tension >= SCALAR_MAX {
        Some(Outcome::NuclearEscalation)
    } else if tension <= SCALAR_MIN && negotiation_streak >= config.dynamics.resolution_streak {
        Some(Outcome::DiplomaticResolution)
    } else {
        None
    }
}
