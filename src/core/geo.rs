use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees, stored in GeoJSON order (longitude first).
///
/// Serializes as a `[lng, lat]` array so route geometries from a directions
/// service deserialize straight into `Vec<Coordinate>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Creates a new coordinate from longitude and latitude
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// True when neither component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Great-circle distance in meters, see [`crate::core::geodesy::distance`]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        crate::core::geodesy::distance(*self, *other)
    }

    /// Initial bearing toward `other`, see [`crate::core::geodesy::bearing`]
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        crate::core::geodesy::bearing(*self, *other)
    }

    /// Component-wise offset toward `target`, scaled by `factor`.
    pub fn approach(&self, target: &Coordinate, factor: f64) -> Coordinate {
        Coordinate::new(
            self.lng + (target.lng - self.lng) * factor,
            self.lat + (target.lat - self.lat) * factor,
        )
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self::new(lng, lat)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lng, coord.lat]
    }
}

impl From<geo_types::Coord<f64>> for Coordinate {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}

impl From<Coordinate> for geo_types::Coord<f64> {
    fn from(coord: Coordinate) -> Self {
        geo_types::Coord {
            x: coord.lng,
            y: coord.lat,
        }
    }
}

impl From<geo_types::Point<f64>> for Coordinate {
    fn from(point: geo_types::Point<f64>) -> Self {
        Self::new(point.x(), point.y())
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lng, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(-74.0060, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_nan_is_invalid() {
        assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
        assert!(!Coordinate::new(0.0, 91.0).is_valid());
    }

    #[test]
    fn test_serializes_as_lng_lat_array() {
        let coord: Coordinate = serde_json::from_str("[78.9629, 20.5937]").unwrap();
        assert_eq!(coord, Coordinate::new(78.9629, 20.5937));
        assert_eq!(serde_json::to_string(&coord).unwrap(), "[78.9629,20.5937]");
    }

    #[test]
    fn test_approach_moves_fraction_of_gap() {
        let from = Coordinate::new(0.0, 0.0);
        let to = Coordinate::new(10.0, -20.0);
        assert_eq!(from.approach(&to, 0.5), Coordinate::new(5.0, -10.0));
        assert_eq!(from.approach(&to, 0.0), from);
    }

    #[test]
    fn test_geo_types_interop() {
        let coord = Coordinate::new(2.35, 48.85);
        let raw: geo_types::Coord<f64> = coord.into();
        assert_eq!(raw.x, 2.35);
        assert_eq!(Coordinate::from(raw), coord);
    }
}
