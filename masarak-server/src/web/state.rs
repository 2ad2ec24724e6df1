//! Application state for the web layer.

use std::sync::Arc;

use crate::geocode::{AreaIndex, CachedGeocoder, NominatimClient, ResolverConfig};
use crate::network::NetworkHandle;
use crate::planner::SearchConfig;
use crate::ratings::InMemoryRatings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Live network snapshot handle, swapped atomically on reload.
    pub network: NetworkHandle,

    /// Known city areas for coordinate-free geocoding.
    pub areas: Arc<AreaIndex>,

    /// Name-resolution thresholds.
    pub resolver_config: Arc<ResolverConfig>,

    /// Planner configuration.
    pub search_config: Arc<SearchConfig>,

    /// Aggregated rider ratings.
    pub ratings: Arc<InMemoryRatings>,

    /// Optional external geocoder; `None` runs the service offline.
    pub geocoder: Option<Arc<CachedGeocoder<NominatimClient>>>,
}

impl AppState {
    pub fn new(
        network: NetworkHandle,
        areas: AreaIndex,
        resolver_config: ResolverConfig,
        search_config: SearchConfig,
        ratings: InMemoryRatings,
        geocoder: Option<CachedGeocoder<NominatimClient>>,
    ) -> Self {
        Self {
            network,
            areas: Arc::new(areas),
            resolver_config: Arc::new(resolver_config),
            search_config: Arc::new(search_config),
            ratings: Arc::new(ratings),
            geocoder: geocoder.map(Arc::new),
        }
    }
}
