//! Prelude module for common routeplay types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use routeplay::prelude::*;`

pub use crate::core::{
    config::{CameraConfig, PlaybackConfig, PlaybackOptions, PlaybackProfile},
    geo::Coordinate,
    geodesy::{bearing, distance},
};

pub use crate::playback::{
    camera::CameraFollower,
    controller::{PlaybackController, TickOutcome},
    path::{Location, Path},
    session::{PlaybackSession, PlaybackStatus, PositionUpdate, SessionId},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::playback::driver::{run_to_completion, FrameClock};

pub use crate::surface::{
    channel::ChannelSurface, recording::RecordingSurface, MapSurface, MarkerHandle, SurfaceCommand,
    ViewportEase,
};

pub use crate::route::{
    rank_routes, MapboxDirections, RouteCandidate, RoutePlan, RoutePlanner, RouteProvider,
    RouteRequest, RouteStyle, RouteSummary,
};

pub use crate::geocoding::{GeocodingProvider, MapboxGeocoder, Place, PlaceType};

pub use crate::mapbox::MapboxConfig;

pub use crate::animation::interpolation::{EasingFunction, Interpolatable, Interpolation};

pub use crate::{Error, Result, RouteError};
