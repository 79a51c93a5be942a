//! Geocoding and map projection.
//!
//! Place names resolve through a [`Geocoder`]. Only the offline
//! [`Gazetteer`] ships; anything backed by a live service would be another
//! implementation of the same trait.

use std::fmt::Debug;

use crisis_events::GeoPoint;

use crate::config::MapConfig;

/// Resolves a place name to coordinates.
pub trait Geocoder: Send + Sync + Debug {
    fn locate(&self, name: &str) -> Option<GeoPoint>;
}

/// Built-in place table.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: Vec<(&'static str, GeoPoint)>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self {
            places: vec![
                ("Hawaii", GeoPoint::new(21.3069, -157.8583)),
                ("Guam", GeoPoint::new(13.4443, 144.7937)),
                ("Japan", GeoPoint::new(35.6762, 139.6503)),
                ("South Korea", GeoPoint::new(37.5665, 126.9780)),
                ("North Korea", GeoPoint::new(39.0392, 125.7625)),
                ("Pyongyang", GeoPoint::new(39.0194, 125.7381)),
                ("Yongbyon", GeoPoint::new(39.7960, 125.7550)),
                ("Sea of Japan", GeoPoint::new(40.0, 135.0)),
                ("Yellow Sea", GeoPoint::new(35.0, 123.0)),
                ("Okinawa", GeoPoint::new(26.2124, 127.6809)),
            ],
        }
    }

    /// All known places in table order.
    pub fn places(&self) -> impl Iterator<Item = (&'static str, GeoPoint)> + '_ {
        self.places.iter().copied()
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for Gazetteer {
    fn locate(&self, name: &str) -> Option<GeoPoint> {
        let name = name.trim();
        self.places
            .iter()
            .find(|(place, _)| place.eq_ignore_ascii_case(name))
            .map(|(_, point)| *point)
    }
}

/// Equirectangular projection of the theatre onto a unit square.
///
/// Longitudes west of the western edge are shifted by 360 degrees so the
/// map can span the date line (Hawaii sits at about 202 E).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl MapProjection {
    pub fn from_config(map: &MapConfig) -> Self {
        Self {
            north: map.north,
            south: map.south,
            west: map.west,
            east: map.east,
        }
    }

    /// Projects to `(x, y)` with x growing east and y growing north, both in
    /// `[0, 1]` for points inside the bounds.
    pub fn project(&self, point: GeoPoint) -> (f32, f32) {
        let mut lng = point.lng;
        if lng < self.west {
            lng += 360.0;
        }
        let x = (lng - self.west) / (self.east - self.west);
        let y = (point.lat - self.south) / (self.north - self.south);
        (x as f32, y as f32)
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        let (x, y) = self.project(point);
        (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)
    }
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_case_insensitive() {
        let gazetteer = Gazetteer::new();
        let guam = gazetteer.locate("guam").unwrap();
        assert!((guam.lat - 13.4443).abs() < 1e-9);
        assert!(gazetteer.locate("  Sea of Japan ").is_some());
        assert!(gazetteer.locate("Atlantis").is_none());
    }

    #[test]
    fn test_every_place_on_default_map() {
        let projection = MapProjection::default();
        let gazetteer = Gazetteer::new();
        for (name, point) in gazetteer.places() {
            assert!(projection.contains(point), "{} is off the map", name);
        }
    }

    #[test]
    fn test_projection_orientation() {
        let projection = MapProjection::default();
        let gazetteer = Gazetteer::new();
        let (px, py) = projection.project(gazetteer.locate("Pyongyang").unwrap());
        let (hx, hy) = projection.project(gazetteer.locate("Hawaii").unwrap());
        let (gx, gy) = projection.project(gazetteer.locate("Guam").unwrap());
        // Hawaii is east of Pyongyang across the date line
        assert!(hx > px);
        // Guam is south of Pyongyang
        assert!(gy < py);
        assert!(gx > px);
        assert!(hy < py);
    }
}
