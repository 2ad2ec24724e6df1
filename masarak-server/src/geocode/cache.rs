//! TTL cache in front of the external geocoder.
//!
//! Place names repeat heavily (everyone searches for the same squares), so
//! successful lookups are cached by normalized name. Failures are not
//! cached; the next query retries.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coordinate;

use super::error::GeocodeError;
use super::nominatim::ExternalGeocoder;
use super::normalize::normalize_name;

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// TTL for cached lookups.
    pub ttl: Duration,

    /// Maximum number of cached names.
    pub max_capacity: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// A caching wrapper around any [`ExternalGeocoder`].
pub struct CachedGeocoder<G> {
    inner: G,
    cache: MokaCache<String, Coordinate>,
}

impl<G: ExternalGeocoder> CachedGeocoder<G> {
    pub fn new(inner: G, config: &GeocodeCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { inner, cache }
    }

    /// The wrapped geocoder, for operations that bypass the cache
    /// (reverse geocoding).
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: ExternalGeocoder> ExternalGeocoder for CachedGeocoder<G> {
    async fn locate(&self, name: &str) -> Result<Coordinate, GeocodeError> {
        let key = normalize_name(name);

        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let coordinate = self.inner.locate(name).await?;
        self.cache.insert(key, coordinate).await;
        Ok(coordinate)
    }
}
