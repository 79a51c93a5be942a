//! Outcome and tension band interpretations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal conditions of the crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Tension reached its maximum bound.
    NuclearEscalation,
    /// Tension reached its minimum bound under sustained negotiation.
    DiplomaticResolution,
}

impl Outcome {
    /// Banner title.
    pub fn title(self) -> &'static str {
        match self {
            Outcome::NuclearEscalation => "Nuclear Escalation",
            Outcome::DiplomaticResolution => "Diplomatic Resolution",
        }
    }

    /// Log line written when the outcome is first reached.
    pub fn announcement(self) -> &'static str {
        match self {
            Outcome::NuclearEscalation => {
                "NUCLEAR ESCALATION: tension has reached its maximum"
            }
            Outcome::DiplomaticResolution => {
                "DIPLOMATIC RESOLUTION: sustained talks have defused the crisis"
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Coarse label for a tension value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensionBand {
    Calm,
    Elevated,
    High,
    Severe,
    Critical,
}

impl TensionBand {
    /// Band for a tension value in `[0, 100]`.
    pub fn from_tension(tension: f32) -> Self {
        match tension {
            t if t >= 90.0 => TensionBand::Critical,
            t if t >= 70.0 => TensionBand::Severe,
            t if t >= 50.0 => TensionBand::High,
            t if t >= 25.0 => TensionBand::Elevated,
            _ => TensionBand::Calm,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TensionBand::Calm => "Calm",
            TensionBand::Elevated => "Elevated",
            TensionBand::High => "High",
            TensionBand::Severe => "Severe",
            TensionBand::Critical => "Critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tension_band_thresholds() {
        assert_eq!(TensionBand::from_tension(0.0), TensionBand::Calm);
        assert_eq!(TensionBand::from_tension(24.9), TensionBand::Calm);
        assert_eq!(TensionBand::from_tension(25.0), TensionBand::Elevated);
        assert_eq!(TensionBand::from_tension(50.0), TensionBand::High);
        assert_eq!(TensionBand::from_tension(75.0), TensionBand::Severe);
        assert_eq!(TensionBand::from_tension(100.0), TensionBand::Critical);
    }

    #[test]
    fn test_tension_band_ordering() {
        assert!(TensionBand::Calm < TensionBand::Critical);
        assert!(TensionBand::High < TensionBand::Severe);
    }

    #[test]
    fn test_outcome_titles() {
        assert_eq!(Outcome::NuclearEscalation.to_string(), "Nuclear Escalation");
        assert_eq!(
            Outcome::DiplomaticResolution.to_string(),
            "Diplomatic Resolution"
        );
    }
}
