//! Shared plumbing for the Mapbox geocoding and directions clients.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// One connection pool for every provider in the process
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("routeplay/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

pub(crate) fn http_client() -> &'static reqwest::Client {
    &HTTP_CLIENT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapboxConfig {
    pub access_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directions routing profile, e.g. `driving` or `walking`
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_profile() -> String {
    "driving".to_string()
}

impl MapboxConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: default_base_url(),
            profile: default_profile(),
        }
    }

    /// Reads the token from `MAPBOX_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(Error::Config(format!("{ACCESS_TOKEN_ENV} is not set"))),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }
}
