//! Mapbox Geocoding v5 client and wire model.

use super::{GeocodingProvider, Place, PlaceType};
use crate::core::geo::Coordinate;
use crate::mapbox::{http_client, MapboxConfig};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<Feature>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    place_name: String,
    center: Coordinate,
    #[serde(default)]
    place_type: Vec<String>,
}

impl From<Feature> for Place {
    fn from(feature: Feature) -> Self {
        let place_type = feature
            .place_type
            .first()
            .map(|raw| PlaceType::parse(raw))
            .unwrap_or(PlaceType::Other);
        Place::new(feature.place_name, feature.center, place_type)
    }
}

/// Parses a geocoding response body into places, in the service's ranking.
pub fn parse_geocoding_response(body: &str) -> Result<Vec<Place>> {
    let response: GeocodingResponse = serde_json::from_str(body)?;
    if response.features.is_empty() {
        if let Some(message) = response.message {
            return Err(Error::Geocoding(message));
        }
    }
    Ok(response
        .features
        .into_iter()
        .filter(|f| f.center.is_valid())
        .map(Place::from)
        .collect())
}

pub struct MapboxGeocoder {
    config: MapboxConfig,
}

impl MapboxGeocoder {
    pub fn new(config: MapboxConfig) -> Self {
        Self { config }
    }

    fn url(&self, query: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.config.base_url)
            .map_err(|e| Error::Config(format!("bad base url {}: {e}", self.config.base_url)))?;
        let file = format!("{query}.json");
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base url {} cannot be a base", self.config.base_url)))?
            .extend(["geocoding", "v5", "mapbox.places", file.as_str()]);
        url.query_pairs_mut()
            .append_pair("access_token", &self.config.access_token);
        Ok(url)
    }
}

#[async_trait]
impl GeocodingProvider for MapboxGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<Place>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.url(query)?;
        #[cfg(feature = "debug")]
        log::debug!("geocoding {:?}", query);

        let body = http_client()
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_geocoding_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "query": ["pune"],
        "features": [
            {
                "id": "place.1",
                "place_type": ["place"],
                "text": "Pune",
                "place_name": "Pune, Maharashtra, India",
                "center": [73.8553, 18.5196]
            },
            {
                "id": "poi.2",
                "place_type": ["poi"],
                "place_name": "Pune Junction, Pune, India",
                "center": [73.8743, 18.5286]
            },
            {
                "id": "postcode.3",
                "place_type": ["postcode"],
                "place_name": "411001, Pune, India",
                "center": [73.87, 18.52]
            }
        ]
    }"#;

    #[test]
    fn test_parse_ranked_places() {
        let places = parse_geocoding_response(FIXTURE).unwrap();
        assert_eq!(places.len(), 3);
        assert_eq!(places[0].name, "Pune, Maharashtra, India");
        assert_eq!(places[0].coordinate, Coordinate::new(73.8553, 18.5196));
        assert_eq!(places[0].zoom, 12.0);
        assert_eq!(places[1].place_type, PlaceType::Poi);
        assert_eq!(places[1].zoom, 16.0);
        assert_eq!(places[2].zoom, 13.0);
    }

    #[test]
    fn test_empty_feature_list() {
        let places = parse_geocoding_response(r#"{ "features": [] }"#).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_service_error_message() {
        let result = parse_geocoding_response(r#"{ "message": "Not Authorized - Invalid Token" }"#);
        assert!(matches!(result, Err(Error::Geocoding(m)) if m.contains("Invalid Token")));
    }

    #[test]
    fn test_url_escapes_query() {
        let geocoder = MapboxGeocoder::new(MapboxConfig::new("pk.abc"));
        let url = geocoder.url("New Delhi/Gate").unwrap();
        assert!(url
            .as_str()
            .starts_with("https://api.mapbox.com/geocoding/v5/mapbox.places/New%20Delhi%2FGate.json"));
        assert!(url.as_str().ends_with("access_token=pk.abc"));
    }

    #[tokio::test]
    async fn test_blank_query_skips_the_network() {
        let geocoder = MapboxGeocoder::new(MapboxConfig::new("pk.abc"));
        assert!(geocoder.geocode("   ").await.unwrap().is_empty());
    }
}
