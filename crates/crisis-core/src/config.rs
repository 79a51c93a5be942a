//! Configuration System
//!
//! Loads tuning parameters from `crisis.toml` so the scenario can be adjusted
//! without recompiling. Every section and key is optional; omitted values
//! take the defaults below. A partially written actor section falls back to
//! [`ActorConfig::default`] for its missing keys, not to that actor's
//! scenario defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crisis_events::{ActionKind, ActorId, Nation, UnitType, SCALAR_MAX, SCALAR_MIN};

/// Default tuning file path
pub const DEFAULT_CONFIG_PATH: &str = "crisis.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub dynamics: DynamicsConfig,
    pub actions: ActionsConfig,
    pub united_states: ActorConfig,
    pub north_korea: ActorConfig,
    pub map: MapConfig,
    pub log: LogConfig,
}

/// Run-level parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed used when none is given on the command line
    pub seed: u64,
    /// Ticks the headless runner simulates by default
    pub default_ticks: u64,
    /// Tension at tick 0
    pub initial_tension: f32,
    /// Wall-clock time per tick at speed 1.0
    pub tick_interval_ms: u64,
    /// Stop ticking once an outcome holds
    pub stop_on_outcome: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            default_ticks: 500,
            initial_tension: 50.0,
            tick_interval_ms: 1000,
            stop_on_outcome: true,
        }
    }
}

/// Passive world rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Tension value decay pulls toward
    pub neutral_tension: f32,
    /// Fraction of the distance to neutral removed each tick
    pub decay_rate: f32,
    /// Stress change per point of action magnitude
    pub stress_gain: f32,
    /// Fraction of the gap between stress and perceived tension closed each tick
    pub stress_coupling: f32,
    /// Consecutive negotiation actions required for a diplomatic resolution
    pub resolution_streak: u32,
    /// Relative spread applied to action magnitudes (0.25 = +/- 25%)
    pub delta_jitter: f32,
    /// Relative noise applied to candidate weights
    pub weight_noise: f32,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            neutral_tension: 50.0,
            decay_rate: 0.02,
            stress_gain: 0.5,
            stress_coupling: 0.05,
            resolution_streak: 4,
            delta_jitter: 0.25,
            weight_noise: 0.2,
        }
    }
}

/// Tuning for a single action kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionTuning {
    /// Tension change before jitter
    pub magnitude: f32,
    /// Selection weight before personality modifiers
    pub weight: f32,
    /// Approval change for the acting actor
    pub approval_delta: f32,
}

impl ActionTuning {
    pub const fn new(magnitude: f32, weight: f32, approval_delta: f32) -> Self {
        Self {
            magnitude,
            weight,
            approval_delta,
        }
    }
}

/// Per-kind action tuning
///
/// A kind's table may set any subset of its fields; the rest keep that
/// kind's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ActionOverrides")]
pub struct ActionsConfig {
    pub escalate: ActionTuning,
    pub deescalate: ActionTuning,
    pub deploy: ActionTuning,
    pub negotiate: ActionTuning,
    pub cyberattack: ActionTuning,
    pub propaganda: ActionTuning,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            escalate: ActionTuning::new(8.0, 1.0, -2.0),
            deescalate: ActionTuning::new(6.0, 1.0, -1.0),
            deploy: ActionTuning::new(4.0, 1.0, 1.0),
            negotiate: ActionTuning::new(5.0, 1.0, 2.0),
            cyberattack: ActionTuning::new(5.0, 0.8, -1.5),
            propaganda: ActionTuning::new(2.0, 0.8, 3.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TuningOverride {
    magnitude: Option<f32>,
    weight: Option<f32>,
    approval_delta: Option<f32>,
}

impl TuningOverride {
    fn over(self, base: ActionTuning) -> ActionTuning {
        ActionTuning {
            magnitude: self.magnitude.unwrap_or(base.magnitude),
            weight: self.weight.unwrap_or(base.weight),
            approval_delta: self.approval_delta.unwrap_or(base.approval_delta),
        }
    }
}

/// `[actions]` as written in the file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActionOverrides {
    escalate: TuningOverride,
    deescalate: TuningOverride,
    deploy: TuningOverride,
    negotiate: TuningOverride,
    cyberattack: TuningOverride,
    propaganda: TuningOverride,
}

impl From<ActionOverrides> for ActionsConfig {
    fn from(raw: ActionOverrides) -> Self {
        let base = ActionsConfig::default();
        Self {
            escalate: raw.escalate.over(base.escalate),
            deescalate: raw.deescalate.over(base.deescalate),
            deploy: raw.deploy.over(base.deploy),
            negotiate: raw.negotiate.over(base.negotiate),
            cyberattack: raw.cyberattack.over(base.cyberattack),
            propaganda: raw.propaganda.over(base.propaganda),
        }
    }
}

impl ActionsConfig {
    /// Tuning for the given kind.
    pub fn tuning(&self, kind: ActionKind) -> &ActionTuning {
        match kind {
            ActionKind::Escalate => &self.escalate,
            ActionKind::Deescalate => &self.deescalate,
            ActionKind::Deploy => &self.deploy,
            ActionKind::Negotiate => &self.negotiate,
            ActionKind::Cyberattack => &self.cyberattack,
            ActionKind::Propaganda => &self.propaganda,
        }
    }
}

/// Personality parameters steering an actor's decisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Stress above which the actor favours aggressive actions
    pub stress_threshold: f32,
    /// Probability of an irrational pick from all actions
    pub impulsiveness: f32,
    pub aggression: f32,
    pub caution: f32,
    /// How strongly low approval drives propaganda
    pub populism: f32,
    /// Multiplier from global tension to perceived tension
    pub stress_sensitivity: f32,
}

/// Initial state and personality of one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub initial_approval: f32,
    pub initial_stress: f32,
    pub stress_threshold: f32,
    pub impulsiveness: f32,
    pub aggression: f32,
    pub caution: f32,
    pub populism: f32,
    pub stress_sensitivity: f32,
    /// Gazetteer names where Deploy places units, used in rotation
    pub deployment_sites: Vec<String>,
    /// Unit types Deploy cycles through
    pub unit_types: Vec<UnitType>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            initial_approval: 50.0,
            initial_stress: 40.0,
            stress_threshold: 60.0,
            impulsiveness: 0.1,
            aggression: 0.5,
            caution: 0.5,
            populism: 0.5,
            stress_sensitivity: 1.0,
            deployment_sites: vec!["Sea of Japan".into()],
            unit_types: vec![UnitType::Submarine],
        }
    }
}

impl ActorConfig {
    /// Scenario defaults for the United States.
    pub fn united_states() -> Self {
        Self {
            initial_approval: 45.0,
            initial_stress: 40.0,
            stress_threshold: 60.0,
            impulsiveness: 0.1,
            aggression: 0.5,
            caution: 0.7,
            populism: 0.6,
            stress_sensitivity: 1.0,
            deployment_sites: vec![
                "Guam".into(),
                "Okinawa".into(),
                "Sea of Japan".into(),
                "Yellow Sea".into(),
            ],
            unit_types: vec![UnitType::Carrier, UnitType::Submarine, UnitType::AirBase],
        }
    }

    /// Scenario defaults for North Korea. Stress climbs faster with tension.
    pub fn north_korea() -> Self {
        Self {
            initial_approval: 95.0,
            initial_stress: 50.0,
            stress_threshold: 55.0,
            impulsiveness: 0.2,
            aggression: 0.8,
            caution: 0.3,
            populism: 0.9,
            stress_sensitivity: 1.25,
            deployment_sites: vec![
                "Yongbyon".into(),
                "Pyongyang".into(),
                "Sea of Japan".into(),
                "Yellow Sea".into(),
            ],
            unit_types: vec![UnitType::MissileSite, UnitType::Submarine],
        }
    }

    /// Personality portion of this config.
    pub fn policy(&self) -> Policy {
        Policy {
            stress_threshold: self.stress_threshold,
            impulsiveness: self.impulsiveness,
            aggression: self.aggression,
            caution: self.caution,
            populism: self.populism,
            stress_sensitivity: self.stress_sensitivity,
        }
    }
}

/// A unit present before the first tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialUnit {
    pub unit_type: UnitType,
    pub owner: Nation,
    pub site: String,
}

/// Strategic map bounds and unit limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub north: f64,
    pub south: f64,
    /// Western edge in degrees east
    pub west: f64,
    /// Eastern edge in degrees east; may exceed 180 to span the date line
    pub east: f64,
    pub max_units_per_actor: usize,
    pub initial_units: Vec<InitialUnit>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            north: 50.0,
            south: 0.0,
            west: 110.0,
            east: 210.0,
            max_units_per_actor: 6,
            initial_units: vec![
                InitialUnit {
                    unit_type: UnitType::Carrier,
                    owner: Nation::UnitedStates,
                    site: "Guam".into(),
                },
                InitialUnit {
                    unit_type: UnitType::Submarine,
                    owner: Nation::NorthKorea,
                    site: "Sea of Japan".into(),
                },
                InitialUnit {
                    unit_type: UnitType::AirBase,
                    owner: Nation::Japan,
                    site: "Okinawa".into(),
                },
            ],
        }
    }
}

/// Event log retention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Entries kept in memory; older ones scroll out
    pub max_entries: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { max_entries: 500 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            dynamics: DynamicsConfig::default(),
            actions: ActionsConfig::default(),
            united_states: ActorConfig::united_states(),
            north_korea: ActorConfig::north_korea(),
            map: MapConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `crisis.toml` from the working directory, or uses defaults.
    pub fn load_or_default() -> Self {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if !path.exists() {
            tracing::debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Serializes this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Config section for an actor.
    pub fn actor(&self, id: ActorId) -> &ActorConfig {
        match id {
            ActorId::UnitedStates => &self.united_states,
            ActorId::NorthKorea => &self.north_korea,
        }
    }

    /// Wall-clock duration of a tick at speed 1.0.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_interval_ms)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        check_scalar("simulation.initial_tension", sim.initial_tension)?;
        if sim.tick_interval_ms == 0 {
            return Err(ConfigError::invalid("simulation.tick_interval_ms must be positive"));
        }

        let dyn_ = &self.dynamics;
        check_scalar("dynamics.neutral_tension", dyn_.neutral_tension)?;
        check_unit("dynamics.decay_rate", dyn_.decay_rate)?;
        check_unit("dynamics.stress_coupling", dyn_.stress_coupling)?;
        check_unit("dynamics.delta_jitter", dyn_.delta_jitter)?;
        check_unit("dynamics.weight_noise", dyn_.weight_noise)?;
        check_non_negative("dynamics.stress_gain", dyn_.stress_gain)?;

        for kind in ActionKind::ALL {
            let tuning = self.actions.tuning(kind);
            check_non_negative(&format!("actions.{}.magnitude", kind), tuning.magnitude)?;
            check_non_negative(&format!("actions.{}.weight", kind), tuning.weight)?;
            if !tuning.approval_delta.is_finite() {
                return Err(ConfigError::invalid(format!(
                    "actions.{}.approval_delta must be finite",
                    kind
                )));
            }
        }

        for id in ActorId::ALL {
            let section = match id {
                ActorId::UnitedStates => "united_states",
                ActorId::NorthKorea => "north_korea",
            };
            let actor = self.actor(id);
            check_scalar(&format!("{}.initial_approval", section), actor.initial_approval)?;
            check_scalar(&format!("{}.initial_stress", section), actor.initial_stress)?;
            check_scalar(&format!("{}.stress_threshold", section), actor.stress_threshold)?;
            check_unit(&format!("{}.impulsiveness", section), actor.impulsiveness)?;
            check_non_negative(&format!("{}.aggression", section), actor.aggression)?;
            check_non_negative(&format!("{}.caution", section), actor.caution)?;
            check_non_negative(&format!("{}.populism", section), actor.populism)?;
            check_non_negative(
                &format!("{}.stress_sensitivity", section),
                actor.stress_sensitivity,
            )?;
            if actor.deployment_sites.is_empty() {
                return Err(ConfigError::invalid(format!(
                    "{}.deployment_sites must not be empty",
                    section
                )));
            }
            if actor.unit_types.is_empty() {
                return Err(ConfigError::invalid(format!(
                    "{}.unit_types must not be empty",
                    section
                )));
            }
        }

        let map = &self.map;
        if !(map.north > map.south) || !(map.east > map.west) {
            return Err(ConfigError::invalid(
                "map bounds must satisfy north > south and east > west",
            ));
        }
        if map.max_units_per_actor == 0 {
            return Err(ConfigError::invalid("map.max_units_per_actor must be positive"));
        }
        if self.log.max_entries == 0 {
            return Err(ConfigError::invalid("log.max_entries must be positive"));
        }

        Ok(())
    }
}

fn check_scalar(key: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (SCALAR_MIN..=SCALAR_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!(
            "{} must be within [{}, {}], got {}",
            key, SCALAR_MIN, SCALAR_MAX, value
        )))
    }
}

fn check_unit(key: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!(
            "{} must be within [0, 1], got {}",
            key, value
        )))
    }
}

fn check_non_negative(key: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!(
            "{} must be a non-negative number, got {}",
            key, value
        )))
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value is out of its allowed range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
