//! Actor and Nation identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nations that can own units on the strategic map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nation {
    UnitedStates,
    NorthKorea,
    SouthKorea,
    Japan,
    China,
    Russia,
}

impl Nation {
    /// Full display name.
    pub fn name(self) -> &'static str {
        match self {
            Nation::UnitedStates => "United States",
            Nation::NorthKorea => "North Korea",
            Nation::SouthKorea => "South Korea",
            Nation::Japan => "Japan",
            Nation::China => "China",
            Nation::Russia => "Russia",
        }
    }

    /// Short code used in compact labels.
    pub fn code(self) -> &'static str {
        match self {
            Nation::UnitedStates => "USA",
            Nation::NorthKorea => "DPRK",
            Nation::SouthKorea => "ROK",
            Nation::Japan => "JPN",
            Nation::China => "PRC",
            Nation::Russia => "RUS",
        }
    }

    /// Returns the actor leading this nation, if it is one of the two parties.
    pub fn actor(self) -> Option<ActorId> {
        match self {
            Nation::UnitedStates => Some(ActorId::UnitedStates),
            Nation::NorthKorea => Some(ActorId::NorthKorea),
            _ => None,
        }
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two decision-making parties.
///
/// There are exactly two actors; both exist for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorId {
    UnitedStates,
    NorthKorea,
}

impl ActorId {
    /// Both actors in turn order.
    pub const ALL: [ActorId; 2] = [ActorId::UnitedStates, ActorId::NorthKorea];

    /// The nation this actor leads.
    pub fn nation(self) -> Nation {
        match self {
            ActorId::UnitedStates => Nation::UnitedStates,
            ActorId::NorthKorea => Nation::NorthKorea,
        }
    }

    /// Title shown on the president panel.
    pub fn leader_title(self) -> &'static str {
        match self {
            ActorId::UnitedStates => "President of the United States",
            ActorId::NorthKorea => "Supreme Leader of the DPRK",
        }
    }

    /// The opposing actor.
    pub fn opponent(self) -> ActorId {
        match self {
            ActorId::UnitedStates => ActorId::NorthKorea,
            ActorId::NorthKorea => ActorId::UnitedStates,
        }
    }

    /// Position of this actor in [`ActorId::ALL`].
    pub fn index(self) -> usize {
        match self {
            ActorId::UnitedStates => 0,
            ActorId::NorthKorea => 1,
        }
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nation().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_nation_mapping() {
        for actor in ActorId::ALL {
            assert_eq!(actor.nation().actor(), Some(actor));
        }
        assert_eq!(Nation::Japan.actor(), None);
    }

    #[test]
    fn test_actor_index_matches_all() {
        for (i, actor) in ActorId::ALL.iter().enumerate() {
            assert_eq!(actor.index(), i);
        }
    }

    #[test]
    fn test_opponent() {
        assert_eq!(ActorId::UnitedStates.opponent(), ActorId::NorthKorea);
        assert_eq!(ActorId::NorthKorea.opponent(), ActorId::UnitedStates);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&ActorId::NorthKorea).unwrap(),
            r#""north_korea""#
        );
        assert_eq!(
            serde_json::to_string(&Nation::SouthKorea).unwrap(),
            r#""south_korea""#
        );
    }
}
