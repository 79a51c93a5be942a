//! Unit markers placed on the strategic map.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actor::Nation;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Kind of military asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Carrier,
    Submarine,
    AirBase,
    MissileSite,
}

impl UnitType {
    pub fn name(self) -> &'static str {
        match self {
            UnitType::Carrier => "Aircraft Carrier",
            UnitType::Submarine => "Submarine",
            UnitType::AirBase => "Air Base",
            UnitType::MissileSite => "Missile Site",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Readiness of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    #[default]
    Active,
    /// Owner has escalated since the unit last stood easy.
    HighAlert,
}

/// A unit on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMarker {
    /// Sequential identifier, unique within a run.
    pub unit_id: u32,
    pub unit_type: UnitType,
    pub owner: Nation,
    /// Gazetteer name of the site the unit occupies.
    pub site: String,
    pub position: GeoPoint,
    #[serde(default)]
    pub status: UnitStatus,
}

impl UnitMarker {
    pub fn new(
        unit_id: u32,
        unit_type: UnitType,
        owner: Nation,
        site: impl Into<String>,
        position: GeoPoint,
    ) -> Self {
        Self {
            unit_id,
            unit_type,
            owner,
            site: site.into(),
            position,
            status: UnitStatus::Active,
        }
    }

    /// Label drawn next to the marker.
    pub fn label(&self) -> String {
        format!("{} {}", self.owner.code(), self.unit_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_label() {
        let unit = UnitMarker::new(
            1,
            UnitType::Submarine,
            Nation::NorthKorea,
            "Sea of Japan",
            GeoPoint::new(40.0, 135.0),
        );
        assert_eq!(unit.label(), "DPRK Submarine");
        assert_eq!(unit.status, UnitStatus::Active);
    }

    #[test]
    fn test_status_defaults_when_missing() {
        let json = r#"{"unit_id":3,"unit_type":"air_base","owner":"japan","site":"Okinawa","position":{"lat":26.2,"lng":127.7}}"#;
        let unit: UnitMarker = serde_json::from_str(json).unwrap();
        assert_eq!(unit.status, UnitStatus::Active);
        assert_eq!(unit.unit_type, UnitType::AirBase);
    }
}
