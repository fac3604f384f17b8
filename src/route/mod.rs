//! Route retrieval: turn two place names into ranked, playable paths.

pub mod mapbox;

use crate::core::constants::{MAX_ALTERNATIVES, SUMMARY_AVERAGE_SPEED_KMH};
use crate::core::geo::Coordinate;
use crate::geocoding::{GeocodingProvider, Place};
use crate::playback::path::Path;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use mapbox::{parse_directions_response, MapboxDirections};

/// Origin and destination as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
}

impl RouteRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Result<Self> {
        let origin = origin.into().trim().to_string();
        let destination = destination.into().trim().to_string();
        if origin.is_empty() || destination.is_empty() {
            return Err(Error::Geocoding(
                "both origin and destination are required".to_string(),
            ));
        }
        Ok(Self {
            origin,
            destination,
        })
    }
}

/// One route returned by a directions service
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    pub path: Path,
    /// Meters, as reported by the service
    pub distance_m: f64,
    /// Seconds, as reported by the service
    pub duration_s: f64,
}

impl RouteCandidate {
    /// South-west and north-east corners of the route geometry
    pub fn bounds(&self) -> (Coordinate, Coordinate) {
        let coords = self.path.coordinates();
        let mut min = coords[0];
        let mut max = coords[0];
        for c in &coords[1..] {
            min.lng = min.lng.min(c.lng);
            min.lat = min.lat.min(c.lat);
            max.lng = max.lng.max(c.lng);
            max.lat = max.lat.max(c.lat);
        }
        (min, max)
    }
}

#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Candidate routes between two points, in no particular order
    async fn routes(&self, origin: Coordinate, destination: Coordinate)
        -> Result<Vec<RouteCandidate>>;
}

/// Sorts by duration, fastest first, keeping at most [`MAX_ALTERNATIVES`].
pub fn rank_routes(mut candidates: Vec<RouteCandidate>) -> Vec<RouteCandidate> {
    candidates.sort_by(|a, b| {
        a.duration_s
            .partial_cmp(&b.duration_s)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(MAX_ALTERNATIVES);
    candidates
}

/// Line style a host should draw a ranked route with
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteStyle {
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

const ROUTE_COLORS: [&str; 3] = ["#3b9ddd", "#FF5722", "#4CAF50"];
const FALLBACK_COLOR: &str = "#999";

impl RouteStyle {
    pub fn for_rank(rank: usize) -> Self {
        let color = ROUTE_COLORS.get(rank).copied().unwrap_or(FALLBACK_COLOR);
        if rank == 0 {
            Self {
                color,
                width: 6.0,
                opacity: 1.0,
            }
        } else {
            Self {
                color,
                width: 4.0,
                opacity: 0.6,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
    /// Routes offered besides the fastest one
    pub alternatives: usize,
}

impl RouteSummary {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_s / 60.0
    }

    /// `"1 hr 5 min"` or `"42 min"`
    pub fn formatted_duration(&self) -> String {
        let total = self.duration_s.max(0.0) as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        if hours > 0 {
            format!("{hours} hr {minutes} min")
        } else {
            format!("{minutes} min")
        }
    }

    /// Drive time in minutes at a flat average speed
    pub fn estimated_drive_minutes(&self, average_kmh: f64) -> f64 {
        if average_kmh <= 0.0 {
            return f64::INFINITY;
        }
        self.distance_km() / average_kmh * 60.0
    }
}

impl std::fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} km, {} (est. {:.1} min at {} km/h), {} alternative(s)",
            self.distance_km(),
            self.formatted_duration(),
            self.estimated_drive_minutes(SUMMARY_AVERAGE_SPEED_KMH),
            SUMMARY_AVERAGE_SPEED_KMH,
            self.alternatives
        )
    }
}

/// Outcome of planning: resolved endpoints and ranked routes
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub origin: Place,
    pub destination: Place,
    /// Fastest first, never empty
    routes: Vec<RouteCandidate>,
}

impl RoutePlan {
    /// Ranks `candidates`; fails with [`Error::NoRoute`] when there are none.
    pub fn new(origin: Place, destination: Place, candidates: Vec<RouteCandidate>) -> Result<Self> {
        let routes = rank_routes(candidates);
        if routes.is_empty() {
            return Err(Error::NoRoute(format!(
                "{} to {}",
                origin.name, destination.name
            )));
        }
        Ok(Self {
            origin,
            destination,
            routes,
        })
    }

    /// Ranked routes, fastest first
    pub fn routes(&self) -> &[RouteCandidate] {
        &self.routes
    }

    pub fn fastest(&self) -> &RouteCandidate {
        &self.routes[0]
    }

    pub fn alternatives(&self) -> &[RouteCandidate] {
        &self.routes[1..]
    }

    pub fn summary(&self) -> RouteSummary {
        let fastest = self.fastest();
        RouteSummary {
            distance_m: fastest.distance_m,
            duration_s: fastest.duration_s,
            alternatives: self.routes.len() - 1,
        }
    }

    pub fn styled(&self) -> impl Iterator<Item = (&RouteCandidate, RouteStyle)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(rank, route)| (route, RouteStyle::for_rank(rank)))
    }

    pub fn into_fastest_path(mut self) -> Path {
        self.routes.swap_remove(0).path
    }
}

/// Geocodes both ends of a request, then asks the router for routes.
pub struct RoutePlanner<G, R> {
    geocoder: G,
    router: R,
}

impl<G: GeocodingProvider, R: RouteProvider> RoutePlanner<G, R> {
    pub fn new(geocoder: G, router: R) -> Self {
        Self { geocoder, router }
    }

    pub async fn plan(&self, request: &RouteRequest) -> Result<RoutePlan> {
        let (origin, destination) = futures::try_join!(
            self.resolve(&request.origin),
            self.resolve(&request.destination)
        )?;

        #[cfg(feature = "debug")]
        log::info!(
            "routing {} {} -> {} {}",
            origin.name,
            origin.coordinate,
            destination.name,
            destination.coordinate
        );

        let candidates = self
            .router
            .routes(origin.coordinate, destination.coordinate)
            .await?;
        RoutePlan::new(origin, destination, candidates)
    }

    async fn resolve(&self, query: &str) -> Result<Place> {
        self.geocoder
            .geocode(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Geocoding(format!("no place matches {query:?}")))
    }
}
