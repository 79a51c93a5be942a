//! World Snapshot Types
//!
//! Serializable summaries of the world state, written by the headless
//! runner at the end of a run.

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::outcome::{Outcome, TensionBand};
use crate::timestamp::SimTimestamp;
use crate::unit::UnitMarker;

/// Per-actor summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub actor: ActorId,
    pub approval: f32,
    pub stress: f32,
    pub current_action: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_decisions: Vec<String>,
}

/// Full-world summary at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub timestamp: SimTimestamp,
    pub seed: u64,
    pub tension: f32,
    pub tension_band: TensionBand,
    pub actors: Vec<ActorSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitMarker>,
    /// Entries ever appended, including ones scrolled out of the log.
    pub log_entries_total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl WorldSnapshot {
    /// Snapshot for the given actor, if present.
    pub fn actor(&self, id: ActorId) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|a| a.actor == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parse() {
        let json = r#"{
            "timestamp": {"tick": 12, "clock": "day_1.09:00"},
            "seed": 42,
            "tension": 63.5,
            "tension_band": "high",
            "actors": [
                {"actor": "united_states", "approval": 44.0, "stress": 51.0, "current_action": "negotiate"},
                {"actor": "north_korea", "approval": 97.0, "stress": 70.5, "current_action": "deploy"}
            ],
            "log_entries_total": 24
        }"#;
        let snapshot: WorldSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.timestamp.tick, 12);
        assert_eq!(snapshot.tension_band, TensionBand::High);
        assert!(snapshot.units.is_empty());
        assert_eq!(snapshot.outcome, None);
        let dprk = snapshot.actor(ActorId::NorthKorea).unwrap();
        assert_eq!(dprk.current_action, "deploy");
    }
}
