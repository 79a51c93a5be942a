//! Action Types
//!
//! The discrete choices an actor can make in a tick.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actor::ActorId;

/// Broad stance of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    /// Raises tension and the actor's stress.
    Aggressive,
    /// Lowers tension and the actor's stress.
    Diplomatic,
}

/// Tag of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Escalate,
    Deescalate,
    Deploy,
    Negotiate,
    Cyberattack,
    Propaganda,
}

impl ActionKind {
    /// Every action kind, aggressive kinds first.
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Escalate,
        ActionKind::Deploy,
        ActionKind::Cyberattack,
        ActionKind::Negotiate,
        ActionKind::Deescalate,
        ActionKind::Propaganda,
    ];

    /// Kinds chosen by a stressed actor.
    pub const AGGRESSIVE: [ActionKind; 3] = [
        ActionKind::Escalate,
        ActionKind::Deploy,
        ActionKind::Cyberattack,
    ];

    /// Kinds chosen by a composed actor.
    pub const DIPLOMATIC: [ActionKind; 3] = [
        ActionKind::Negotiate,
        ActionKind::Deescalate,
        ActionKind::Propaganda,
    ];

    /// Returns the stance of this kind.
    pub fn posture(self) -> Posture {
        match self {
            ActionKind::Escalate | ActionKind::Deploy | ActionKind::Cyberattack => {
                Posture::Aggressive
            }
            ActionKind::Negotiate | ActionKind::Deescalate | ActionKind::Propaganda => {
                Posture::Diplomatic
            }
        }
    }

    /// +1 for kinds that push tension up, -1 for kinds that pull it down.
    pub fn tension_sign(self) -> f32 {
        match self.posture() {
            Posture::Aggressive => 1.0,
            Posture::Diplomatic => -1.0,
        }
    }

    /// Whether this kind counts toward a sustained negotiation streak.
    pub fn is_negotiation(self) -> bool {
        matches!(self, ActionKind::Negotiate | ActionKind::Deescalate)
    }

    /// Lowercase label used in config keys and compact displays.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Escalate => "escalate",
            ActionKind::Deescalate => "deescalate",
            ActionKind::Deploy => "deploy",
            ActionKind::Negotiate => "negotiate",
            ActionKind::Cyberattack => "cyberattack",
            ActionKind::Propaganda => "propaganda",
        }
    }

    /// Headline the given actor's government issues for this kind.
    pub fn headline(self, actor: ActorId) -> &'static str {
        match (actor, self) {
            (ActorId::UnitedStates, ActionKind::Escalate) => {
                "Raises DEFCON level and issues ultimatum"
            }
            (ActorId::UnitedStates, ActionKind::Deescalate) => {
                "Pulls bombers back from forward patrols"
            }
            (ActorId::UnitedStates, ActionKind::Deploy) => "Deploys carrier group to the region",
            (ActorId::UnitedStates, ActionKind::Negotiate) => {
                "Proposes emergency UN Security Council meeting"
            }
            (ActorId::UnitedStates, ActionKind::Cyberattack) => {
                "Disrupts missile telemetry networks"
            }
            (ActorId::UnitedStates, ActionKind::Propaganda) => {
                "Addresses the nation on resolve and restraint"
            }
            (ActorId::NorthKorea, ActionKind::Escalate) => "Conducts missile test over Japan",
            (ActorId::NorthKorea, ActionKind::Deescalate) => {
                "Suspends artillery drills near the border"
            }
            (ActorId::NorthKorea, ActionKind::Deploy) => "Moves submarines out of port",
            (ActorId::NorthKorea, ActionKind::Negotiate) => {
                "Signals openness to talks through Beijing"
            }
            (ActorId::NorthKorea, ActionKind::Cyberattack) => {
                "Launches intrusion against allied banks"
            }
            (ActorId::NorthKorea, ActionKind::Propaganda) => {
                "Releases statement condemning US aggression"
            }
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A discrete decision made by one actor in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub actor: ActorId,
    /// Size of the push on tension; never negative.
    pub magnitude: f32,
}

impl Action {
    /// Creates an action. Negative or non-finite magnitudes become 0.
    pub fn new(actor: ActorId, kind: ActionKind, magnitude: f32) -> Self {
        let magnitude = if magnitude.is_finite() {
            magnitude.max(0.0)
        } else {
            0.0
        };
        Self {
            kind,
            actor,
            magnitude,
        }
    }

    /// Signed change this action applies to tension before clamping.
    pub fn tension_delta(&self) -> f32 {
        self.kind.tension_sign() * self.magnitude
    }

    /// Log line describing the action.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.actor, self.kind.headline(self.actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postures_partition_kinds() {
        for kind in ActionKind::AGGRESSIVE {
            assert_eq!(kind.posture(), Posture::Aggressive);
        }
        for kind in ActionKind::DIPLOMATIC {
            assert_eq!(kind.posture(), Posture::Diplomatic);
        }
        assert_eq!(
            ActionKind::AGGRESSIVE.len() + ActionKind::DIPLOMATIC.len(),
            ActionKind::ALL.len()
        );
    }

    #[test]
    fn test_action_magnitude_sanitized() {
        assert_eq!(
            Action::new(ActorId::UnitedStates, ActionKind::Escalate, -4.0).magnitude,
            0.0
        );
        assert_eq!(
            Action::new(ActorId::UnitedStates, ActionKind::Escalate, f32::NAN).magnitude,
            0.0
        );
        assert_eq!(
            Action::new(ActorId::UnitedStates, ActionKind::Escalate, 7.5).magnitude,
            7.5
        );
    }

    #[test]
    fn test_tension_delta_sign() {
        let up = Action::new(ActorId::NorthKorea, ActionKind::Cyberattack, 3.0);
        let down = Action::new(ActorId::NorthKorea, ActionKind::Propaganda, 3.0);
        assert_eq!(up.tension_delta(), 3.0);
        assert_eq!(down.tension_delta(), -3.0);
    }

    #[test]
    fn test_describe_names_actor() {
        let action = Action::new(ActorId::NorthKorea, ActionKind::Escalate, 10.0);
        assert_eq!(
            action.describe(),
            "North Korea: Conducts missile test over Japan"
        );
    }

    #[test]
    fn test_negotiation_kinds() {
        assert!(ActionKind::Negotiate.is_negotiation());
        assert!(ActionKind::Deescalate.is_negotiation());
        assert!(!ActionKind::Propaganda.is_negotiation());
        assert!(!ActionKind::Deploy.is_negotiation());
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ActionKind::Cyberattack).unwrap(),
            r#""cyberattack""#
        );
    }
}
