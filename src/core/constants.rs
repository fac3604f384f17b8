//! Core constants taken from the reference route-playback behaviour.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Mean Earth radius used by the haversine distance, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Vehicle speed at a 1x multiplier, in km/h.
pub const BASE_SPEED_KMH: f64 = 100.0;

/// km/h → m/s.
pub const KMH_TO_MPS: f64 = 1000.0 / 3600.0;

/// How many path vertices ahead of the current segment the camera aims at.
pub const LOOK_AHEAD_SPAN: usize = 2;

/// Fraction of the remaining gap the camera target closes on every tick.
pub const CAMERA_SMOOTHING_FACTOR: f64 = 0.05;

/// Duration of each per-tick viewport ease, in milliseconds.
pub const CAMERA_EASE_DURATION_MS: u64 = 300;

/// Zoom level the viewport flies to when playback starts.
pub const INTRO_ZOOM: f64 = 15.0;

/// Duration of the initial fly-to toward the start of the route.
pub const INTRO_DURATION_MS: u64 = 2000;

/// Directions services return at most this many candidates per query.
pub const MAX_ALTERNATIVES: usize = 3;

/// Average speed used for the "estimated drive time" in route summaries.
pub const SUMMARY_AVERAGE_SPEED_KMH: f64 = 60.0;

/// Zoom level used when a geocoded place type is unknown.
pub const DEFAULT_PLACE_ZOOM: f64 = 13.0;
