//! Great-circle helpers on a spherical Earth.
//!
//! Both functions are total: they never panic and never return NaN for
//! finite inputs.

use super::constants::EARTH_RADIUS_M;
use super::geo::Coordinate;

/// Haversine distance between `a` and `b` in meters.
///
/// The haversine term is clamped to `[0, 1]` before the inverse trig step,
/// so coincident and antipodal points stay in the function's domain.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial compass bearing from `a` toward `b`, in degrees within `[0, 360)`.
///
/// Precondition: `a != b`. For equal points the result is meaningless
/// (though still a finite number in range).
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let y = delta_lng.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lng.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Wraps any finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [(f64, f64); 8] = [
        (0.0, 0.0),
        (78.9629, 20.5937),
        (-74.0060, 40.7128),
        (-118.2437, 34.0522),
        (179.9, -45.0),
        (-179.9, 45.0),
        (0.0, 89.9),
        (12.5, -89.9),
    ];

    fn samples() -> impl Iterator<Item = Coordinate> {
        SAMPLES.iter().map(|&(lng, lat)| Coordinate::new(lng, lat))
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for a in samples() {
            assert_eq!(distance(a, a), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        for a in samples() {
            for b in samples() {
                assert!((distance(a, b) - distance(b, a)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111_194.93).abs() < 0.5, "got {d}");
    }

    #[test]
    fn test_known_city_distance() {
        let nyc = Coordinate::new(-74.0060, 40.7128);
        let la = Coordinate::new(-118.2437, 34.0522);
        // Roughly 3936 km on a 6371 km sphere
        assert!((distance(nyc, la) - 3_936_000.0).abs() < 10_000.0);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(180.0, 0.0);
        let d = distance(a, b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::new(0.0, 0.0);
        assert!(bearing(origin, Coordinate::new(0.0, 1.0)).abs() < 1e-9);
        assert!((bearing(origin, Coordinate::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(origin, Coordinate::new(0.0, -1.0)) - 180.0).abs() < 1e-9);
        assert!((bearing(origin, Coordinate::new(-1.0, 0.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_is_always_in_range() {
        for a in samples() {
            for b in samples() {
                if a == b {
                    continue;
                }
                let deg = bearing(a, b);
                assert!((0.0..360.0).contains(&deg), "{a} -> {b} gave {deg}");
            }
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
    }
}
