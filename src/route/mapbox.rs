//! Mapbox Directions v5 client and wire model.

use super::{RouteCandidate, RouteProvider};
use crate::core::geo::Coordinate;
use crate::mapbox::{http_client, MapboxConfig};
use crate::playback::path::Path;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    geometry: Geometry,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Coordinate>,
}

/// Parses a directions response body into route candidates, in the
/// service's order. Routes with unusable geometry are dropped.
pub fn parse_directions_response(body: &str) -> Result<Vec<RouteCandidate>> {
    let response: DirectionsResponse = serde_json::from_str(body)?;
    if response.code.is_none() && response.routes.is_empty() {
        if let Some(message) = response.message {
            return Err(Error::NoRoute(message));
        }
    }
    match response.code.as_deref() {
        None | Some("Ok") => {}
        Some("NoRoute") | Some("NoSegment") => {
            return Err(Error::NoRoute(
                response.message.unwrap_or_else(|| "no route found".to_string()),
            ))
        }
        Some(code) => {
            return Err(Error::NoRoute(format!(
                "{code}: {}",
                response.message.unwrap_or_default()
            )))
        }
    }

    let mut candidates = Vec::with_capacity(response.routes.len());
    for route in response.routes {
        match Path::new(route.geometry.coordinates) {
            Ok(path) => candidates.push(RouteCandidate {
                path,
                distance_m: route.distance,
                duration_s: route.duration,
            }),
            Err(_e) => {
                #[cfg(feature = "debug")]
                log::warn!("skipping route with bad geometry: {}", _e);
            }
        }
    }
    Ok(candidates)
}

pub struct MapboxDirections {
    config: MapboxConfig,
}

impl MapboxDirections {
    pub fn new(config: MapboxConfig) -> Self {
        Self { config }
    }

    fn url(&self, origin: Coordinate, destination: Coordinate) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.config.base_url)
            .map_err(|e| Error::Config(format!("bad base url {}: {e}", self.config.base_url)))?;
        let waypoints = format!(
            "{},{};{},{}",
            origin.lng, origin.lat, destination.lng, destination.lat
        );
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base url {} cannot be a base", self.config.base_url)))?
            .extend([
                "directions",
                "v5",
                "mapbox",
                self.config.profile.as_str(),
                waypoints.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("geometries", "geojson")
            .append_pair("overview", "full")
            .append_pair("alternatives", "true")
            .append_pair("steps", "true")
            .append_pair("access_token", &self.config.access_token);
        Ok(url)
    }
}

#[async_trait]
impl RouteProvider for MapboxDirections {
    async fn routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>> {
        for endpoint in [origin, destination] {
            if !endpoint.is_valid() {
                return Err(Error::InvalidCoordinates(endpoint.to_string()));
            }
        }

        let url = self.url(origin, destination)?;
        #[cfg(feature = "debug")]
        log::debug!("requesting directions {} -> {}", origin, destination);

        let body = http_client()
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_directions_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "code": "Ok",
        "routes": [
            {
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[73.85, 18.52], [73.5, 18.7], [72.87, 19.07]]
                },
                "distance": 148000.5,
                "duration": 10800.0,
                "legs": []
            },
            {
                "geometry": { "type": "LineString", "coordinates": [[73.85, 18.52]] },
                "distance": 1.0,
                "duration": 1.0
            }
        ],
        "waypoints": []
    }"#;

    #[test]
    fn test_parse_routes() {
        let routes = parse_directions_response(FIXTURE).unwrap();
        // second route has a single vertex and is dropped
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path.len(), 3);
        assert_eq!(routes[0].distance_m, 148000.5);
        assert_eq!(routes[0].duration_s, 10800.0);
        assert_eq!(routes[0].path.end(), Coordinate::new(72.87, 19.07));
    }

    #[test]
    fn test_no_route_code() {
        let body = r#"{ "code": "NoRoute", "message": "No route found", "routes": [] }"#;
        assert!(matches!(
            parse_directions_response(body),
            Err(Error::NoRoute(m)) if m == "No route found"
        ));
    }

    #[test]
    fn test_message_without_code_is_an_error() {
        let body = r#"{ "message": "Not Authorized - Invalid Token" }"#;
        assert!(matches!(
            parse_directions_response(body),
            Err(Error::NoRoute(m)) if m.contains("Invalid Token")
        ));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            parse_directions_response("<html>"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_url_layout() {
        let directions = MapboxDirections::new(MapboxConfig::new("pk.abc"));
        let url = directions
            .url(Coordinate::new(73.85, 18.52), Coordinate::new(72.87, 19.07))
            .unwrap();
        assert_eq!(url.path(), "/directions/v5/mapbox/driving/73.85,18.52;72.87,19.07");
        let query = url.query().unwrap();
        assert_eq!(
            query,
            "geometries=geojson&overview=full&alternatives=true&steps=true&access_token=pk.abc"
        );
    }

    #[tokio::test]
    async fn test_rejects_invalid_endpoint() {
        let directions = MapboxDirections::new(MapboxConfig::new("pk.abc"));
        let result = directions
            .routes(Coordinate::new(200.0, 0.0), Coordinate::new(0.0, 0.0))
            .await;
        assert!(matches!(result, Err(Error::InvalidCoordinates(_))));
    }
}
