//! Shared data types for the crisis simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Both the simulation core and the visualization depend on it.

pub mod action;
pub mod actor;
pub mod event;
pub mod outcome;
pub mod snapshot;
pub mod timestamp;
pub mod unit;

pub use action::{Action, ActionKind, Posture};
pub use actor::{ActorId, Nation};
pub use event::{format_entry_id, EntryKind, LogEntry};
pub use outcome::{Outcome, TensionBand};
pub use snapshot::{ActorSnapshot, WorldSnapshot};
pub use timestamp::{CrisisClock, ParseClockError, SimTimestamp, START_HOUR, TICK_MINUTES};
pub use unit::{GeoPoint, UnitMarker, UnitStatus, UnitType};

/// Lower bound shared by tension, approval and stress.
pub const SCALAR_MIN: f32 = 0.0;

/// Upper bound shared by tension, approval and stress.
pub const SCALAR_MAX: f32 = 100.0;

/// Clamps a scalar into `[SCALAR_MIN, SCALAR_MAX]`.
///
/// NaN maps to the lower bound so a bad delta can never poison state.
pub fn clamp_scalar(value: f32) -> f32 {
    if value.is_nan() {
        SCALAR_MIN
    } else {
        value.clamp(SCALAR_MIN, SCALAR_MAX)
    }
}
