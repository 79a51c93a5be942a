//! Simulation Timestamp Types
//!
//! A tick counter paired with a human-readable crisis clock.
//!
//! # Example
//!
//! ```
//! use crisis_events::SimTimestamp;
//!
//! let ts = SimTimestamp::at_tick(5);
//! assert_eq!(ts.tick, 5);
//! assert_eq!(ts.clock.to_string(), "day_1.07:15");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Simulated minutes that pass per tick.
pub const TICK_MINUTES: u64 = 15;

/// Hour of day one at which the crisis begins.
pub const START_HOUR: u64 = 6;

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Wall clock inside the scenario.
///
/// Serializes to strings like "day_2.14:30".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrisisClock {
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
}

impl CrisisClock {
    /// Creates a CrisisClock.
    pub fn new(day: u32, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Clock reading at the given tick.
    pub fn from_tick(tick: u64) -> Self {
        let total = START_HOUR * 60 + tick.saturating_mul(TICK_MINUTES);
        let day = 1 + total / MINUTES_PER_DAY;
        let rem = total % MINUTES_PER_DAY;
        Self {
            day: u32::try_from(day).unwrap_or(u32::MAX),
            hour: (rem / 60) as u8,
            minute: (rem % 60) as u8,
        }
    }
}

impl fmt::Display for CrisisClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day_{}.{:02}:{:02}", self.day, self.hour, self.minute)
    }
}

/// Error type for parsing CrisisClock from strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseClockError {
    #[error("invalid clock format: '{0}', expected 'day_N.HH:MM'")]
    InvalidFormat(String),
    #[error("invalid day: '{0}'")]
    InvalidDay(String),
    #[error("invalid hour: '{0}'")]
    InvalidHour(String),
    #[error("invalid minute: '{0}'")]
    InvalidMinute(String),
}

impl FromStr for CrisisClock {
    type Err = ParseClockError;

    /// Parses a CrisisClock from a string like "day_2.14:30".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day_part, time_part) = s
            .split_once('.')
            .ok_or_else(|| ParseClockError::InvalidFormat(s.to_string()))?;

        let day = day_part
            .strip_prefix("day_")
            .ok_or_else(|| ParseClockError::InvalidFormat(s.to_string()))?
            .parse::<u32>()
            .map_err(|_| ParseClockError::InvalidDay(day_part.to_string()))?;
        if day == 0 {
            return Err(ParseClockError::InvalidDay(day_part.to_string()));
        }

        let (hour_part, minute_part) = time_part
            .split_once(':')
            .ok_or_else(|| ParseClockError::InvalidFormat(s.to_string()))?;

        let hour = hour_part
            .parse::<u8>()
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| ParseClockError::InvalidHour(hour_part.to_string()))?;
        let minute = minute_part
            .parse::<u8>()
            .ok()
            .filter(|m| *m < 60)
            .ok_or_else(|| ParseClockError::InvalidMinute(minute_part.to_string()))?;

        Ok(CrisisClock { day, hour, minute })
    }
}

// Serialized as a plain string
impl Serialize for CrisisClock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CrisisClock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A point in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTimestamp {
    /// Monotonically increasing simulation tick.
    pub tick: u64,
    /// Crisis clock derived from the tick.
    pub clock: CrisisClock,
}

impl SimTimestamp {
    /// Timestamp for the given tick.
    pub fn at_tick(tick: u64) -> Self {
        Self {
            tick,
            clock: CrisisClock::from_tick(tick),
        }
    }

    /// Timestamp at the start of the simulation.
    pub fn start() -> Self {
        Self::at_tick(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_start() {
        let clock = CrisisClock::from_tick(0);
        assert_eq!(clock, CrisisClock::new(1, 6, 0));
        assert_eq!(clock.to_string(), "day_1.06:00");
    }

    #[test]
    fn test_clock_day_rollover() {
        // 18 hours after 06:00 is midnight of day 2
        let ticks_to_midnight = 18 * 60 / TICK_MINUTES;
        assert_eq!(
            CrisisClock::from_tick(ticks_to_midnight),
            CrisisClock::new(2, 0, 0)
        );
        assert_eq!(
            CrisisClock::from_tick(ticks_to_midnight - 1),
            CrisisClock::new(1, 23, 45)
        );
    }

    #[test]
    fn test_clock_parse() {
        let clock: CrisisClock = "day_3.14:30".parse().unwrap();
        assert_eq!(clock, CrisisClock::new(3, 14, 30));
    }

    #[test]
    fn test_clock_display_parse_agree() {
        let clock = CrisisClock::from_tick(1234);
        let parsed: CrisisClock = clock.to_string().parse().unwrap();
        assert_eq!(clock, parsed);
    }

    #[test]
    fn test_parse_clock_error() {
        assert!(matches!(
            "nonsense".parse::<CrisisClock>(),
            Err(ParseClockError::InvalidFormat(_))
        ));
        assert!(matches!(
            "day_x.10:00".parse::<CrisisClock>(),
            Err(ParseClockError::InvalidDay(_))
        ));
        assert!(matches!(
            "day_0.10:00".parse::<CrisisClock>(),
            Err(ParseClockError::InvalidDay(_))
        ));
        assert!(matches!(
            "day_1.25:00".parse::<CrisisClock>(),
            Err(ParseClockError::InvalidHour(_))
        ));
        assert!(matches!(
            "day_1.10:75".parse::<CrisisClock>(),
            Err(ParseClockError::InvalidMinute(_))
        ));
    }

    #[test]
    fn test_parse_clock_error_messages() {
        let err = "nonsense".parse::<CrisisClock>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid clock format: 'nonsense', expected 'day_N.HH:MM'"
        );
        let err = "day_1.25:00".parse::<CrisisClock>().unwrap_err();
        assert_eq!(err.to_string(), "invalid hour: '25'");

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_timestamp_serialization() {
        let ts = SimTimestamp::at_tick(4);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#"{"tick":4,"clock":"day_1.07:00"}"#);
        let parsed: SimTimestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }
}
