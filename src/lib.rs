//! # Routeplay
//!
//! A headless route-playback engine for web-map style hosts.
//!
//! Given the coordinates of a route returned by a directions service, the
//! engine animates a vehicle marker along it in real time: distance is
//! integrated from measured frame deltas, mapped onto the path, and turned
//! into a marker pose plus a trailing camera ease. Rendering is left to a
//! [`MapSurface`] implementation supplied by the host.

pub mod animation;
pub mod core;
pub mod geocoding;
pub mod mapbox;
pub mod playback;
pub mod prelude;
pub mod route;
pub mod surface;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{CameraConfig, PlaybackConfig, PlaybackOptions, PlaybackProfile},
    geo::Coordinate,
    geodesy::{bearing, distance},
};

pub use playback::{
    camera::CameraFollower,
    controller::{PlaybackController, TickOutcome},
    path::{Location, Path},
    session::{PlaybackStatus, PositionUpdate, SessionId},
};

pub use surface::{MapSurface, MarkerHandle, SurfaceCommand, ViewportEase};

pub use route::{
    rank_routes, RouteCandidate, RoutePlan, RoutePlanner, RouteProvider, RouteRequest, RouteStyle,
    RouteSummary,
};

pub use mapbox::MapboxConfig;

pub use geocoding::{GeocodingProvider, Place, PlaceType};

pub use animation::interpolation::EasingFunction;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("No route loaded; find a route before starting playback")]
    EmptyPath,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No route found: {0}")]
    NoRoute(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Map surface error: {0}")]
    Surface(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = RouteError;
