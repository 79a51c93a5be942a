//! Event Log Entries
//!
//! Immutable records appended to the world's event log.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::actor::ActorId;
use crate::outcome::Outcome;
use crate::timestamp::SimTimestamp;

/// What produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EntryKind {
    /// An actor's decision was applied.
    Action(ActionKind),
    /// The simulation announced a terminal condition.
    Outcome(Outcome),
}

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential identifier (e.g., "evt_00000042")
    pub entry_id: String,
    pub timestamp: SimTimestamp,
    /// Originating actor; `None` for system announcements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorId>,
    pub kind: EntryKind,
    pub description: String,
}

impl LogEntry {
    /// Creates an entry for an applied action.
    pub fn action(
        entry_id: impl Into<String>,
        timestamp: SimTimestamp,
        actor: ActorId,
        kind: ActionKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            timestamp,
            actor: Some(actor),
            kind: EntryKind::Action(kind),
            description: description.into(),
        }
    }

    /// Creates a system entry announcing an outcome.
    pub fn outcome(entry_id: impl Into<String>, timestamp: SimTimestamp, outcome: Outcome) -> Self {
        Self {
            entry_id: entry_id.into(),
            timestamp,
            actor: None,
            kind: EntryKind::Outcome(outcome),
            description: outcome.announcement().to_string(),
        }
    }

    /// Returns true for entries not produced by an actor.
    pub fn is_system(&self) -> bool {
        self.actor.is_none()
    }

    /// Single-line form used by the log panel and the headless runner.
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.timestamp.clock, self.description)
    }
}

/// Formats the n-th entry identifier.
pub fn format_entry_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
