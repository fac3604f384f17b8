//! Geocoding interface: free text in, ranked places out.

pub mod mapbox;

use crate::core::{constants::DEFAULT_PLACE_ZOOM, geo::Coordinate};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use mapbox::MapboxGeocoder;

/// Kind of feature a geocoder matched, which decides how far to zoom in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Country,
    Region,
    State,
    Province,
    District,
    Place,
    City,
    Town,
    Locality,
    Neighborhood,
    Address,
    Poi,
    #[serde(other)]
    Other,
}

impl PlaceType {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "country" => PlaceType::Country,
            "region" => PlaceType::Region,
            "state" => PlaceType::State,
            "province" => PlaceType::Province,
            "district" => PlaceType::District,
            "place" => PlaceType::Place,
            "city" => PlaceType::City,
            "town" => PlaceType::Town,
            "locality" => PlaceType::Locality,
            "neighborhood" => PlaceType::Neighborhood,
            "address" => PlaceType::Address,
            "poi" => PlaceType::Poi,
            _ => PlaceType::Other,
        }
    }

    /// Viewport zoom that frames a feature of this kind
    pub fn zoom_level(self) -> f64 {
        match self {
            PlaceType::Country => 4.0,
            PlaceType::Region | PlaceType::State | PlaceType::Province => 6.0,
            PlaceType::District => 8.0,
            PlaceType::Place | PlaceType::City | PlaceType::Town => 12.0,
            PlaceType::Locality | PlaceType::Neighborhood => 14.0,
            PlaceType::Address | PlaceType::Poi => 16.0,
            PlaceType::Other => DEFAULT_PLACE_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub coordinate: Coordinate,
    pub place_type: PlaceType,
    pub zoom: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, coordinate: Coordinate, place_type: PlaceType) -> Self {
        Self {
            name: name.into(),
            coordinate,
            place_type,
            zoom: place_type.zoom_level(),
        }
    }
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Places matching `query`, best match first. An empty query yields
    /// no places.
    async fn geocode(&self, query: &str) -> Result<Vec<Place>>;
}
