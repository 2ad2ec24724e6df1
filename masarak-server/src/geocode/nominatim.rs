//! Nominatim (OpenStreetMap) geocoding client.
//!
//! Used only as a last-ditch fallback when local resolution fails, and for
//! reverse geocoding. Every request carries a hard timeout; a search must
//! never block on this upstream beyond its deadline.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::GeocodeError;

/// An external place-name geocoder.
///
/// This abstraction lets the resolver be tested without network access.
pub trait ExternalGeocoder: Send + Sync {
    /// Resolve a free-text place name to a coordinate.
    fn locate(&self, name: &str)
    -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL, e.g. `https://nominatim.openstreetmap.org`.
    pub base_url: String,

    /// Hard per-request deadline.
    pub timeout: Duration,

    /// ISO country code filter for forward searches.
    pub country_code: String,

    /// Context appended to forward queries ("دمشق, سوريا").
    pub search_context: String,
}

impl NominatimConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(3),
            country_code: "sy".to_string(),
            search_context: "دمشق, سوريا".to_string(),
        }
    }
}

/// HTTP client for the Nominatim API.
pub struct NominatimClient {
    http: reqwest::Client,
    config: NominatimConfig,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct ReverseHit {
    display_name: String,
}

impl NominatimClient {
    /// Create a client. Fails only if the HTTP client cannot be built.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Reverse geocode: coordinate → display name.
    pub async fn reverse(&self, point: Coordinate) -> Result<String, GeocodeError> {
        let url = format!("{}/reverse", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("lat", &point.lat.to_string()),
                ("lon", &point.lon.to_string()),
                ("accept-language", "ar"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let hit: ReverseHit = response.json().await?;
        if hit.display_name.is_empty() {
            return Err(GeocodeError::NoResult(point.to_string()));
        }
        Ok(hit.display_name)
    }
}

impl ExternalGeocoder for NominatimClient {
    async fn locate(&self, name: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!("{}/search", self.config.base_url);
        let query = format!("{name}, {}", self.config.search_context);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("q", query.as_str()),
                ("limit", "1"),
                ("countrycodes", self.config.country_code.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let hits: Vec<SearchHit> = response.json().await?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResult(name.to_string()))?;

        let lat: f64 = hit.lat.parse().map_err(|_| GeocodeError::Malformed {
            message: format!("non-numeric latitude '{}'", hit.lat),
        })?;
        let lon: f64 = hit.lon.parse().map_err(|_| GeocodeError::Malformed {
            message: format!("non-numeric longitude '{}'", hit.lon),
        })?;

        Coordinate::new(lat, lon).map_err(|e| GeocodeError::Malformed {
            message: e.to_string(),
        })
    }
}
