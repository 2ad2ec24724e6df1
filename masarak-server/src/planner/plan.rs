//! The full query pipeline: validate, resolve, search, rank.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::StationId;
use crate::geocode::{AreaIndex, ExternalGeocoder, NoMatch, Resolution, Resolver, ResolverConfig};
use crate::network::Network;
use crate::ratings::RatingSource;

use super::config::SearchConfig;
use super::rank::{RankedItineraries, rank};
use super::search::find_itineraries;

/// Hard ceiling on per-query transfer overrides. Chains past this length
/// are never worth riding on a city bus network.
pub const MAX_TRANSFER_OVERRIDE: usize = 3;

/// Hard ceiling on per-query result-count overrides.
pub const MAX_RESULTS_OVERRIDE: usize = 50;

#[derive(Debug, Error)]
pub enum PlanError {
    /// The request itself is unusable and gets a 400.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A free-text name could not be matched to any station or area.
    #[error("could not resolve {0:?} to any station")]
    Resolution(String),

    /// Both endpoints resolved but no chain of routes connects them.
    #[error("no direct or transfer itinerary connects the requested stops")]
    NoItinerary,
}

/// A trip-planning query as the client poses it.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub from: String,
    pub to: String,
    pub max_transfers: Option<usize>,
    pub max_results: Option<usize>,
}

impl PlanRequest {
    fn validate(&self) -> Result<(), PlanError> {
        if self.from.trim().is_empty() {
            return Err(PlanError::InvalidQuery("origin name is empty".into()));
        }
        if self.to.trim().is_empty() {
            return Err(PlanError::InvalidQuery("destination name is empty".into()));
        }
        if let Some(transfers) = self.max_transfers {
            if transfers > MAX_TRANSFER_OVERRIDE {
                return Err(PlanError::InvalidQuery(format!(
                    "max_transfers must be at most {MAX_TRANSFER_OVERRIDE}"
                )));
            }
        }
        if let Some(results) = self.max_results {
            if results == 0 || results > MAX_RESULTS_OVERRIDE {
                return Err(PlanError::InvalidQuery(format!(
                    "max_results must be between 1 and {MAX_RESULTS_OVERRIDE}"
                )));
            }
        }
        Ok(())
    }
}

/// A successful plan: ranked suggestions plus a degraded-service marker
/// set when an endpoint was only resolvable through the external
/// geocoder.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub ranked: RankedItineraries,
    pub degraded: bool,
}

/// Borrows a network snapshot and the shared configuration for the
/// duration of one query.
pub struct Planner<'a> {
    network: &'a Network,
    areas: &'a AreaIndex,
    resolver_config: &'a ResolverConfig,
    search_config: &'a SearchConfig,
    ratings: &'a dyn RatingSource,
}

impl<'a> Planner<'a> {
    pub fn new(
        network: &'a Network,
        areas: &'a AreaIndex,
        resolver_config: &'a ResolverConfig,
        search_config: &'a SearchConfig,
        ratings: &'a dyn RatingSource,
    ) -> Self {
        Self {
            network,
            areas,
            resolver_config,
            search_config,
            ratings,
        }
    }

    /// Answer one trip query.
    ///
    /// Both endpoints resolve concurrently; an external geocoder, when
    /// provided, backs up names the network and area index cannot place.
    pub async fn suggest<G: ExternalGeocoder>(
        &self,
        request: &PlanRequest,
        external: Option<&G>,
    ) -> Result<PlanOutcome, PlanError> {
        request.validate()?;

        let resolver = Resolver::new(self.network, self.areas, self.resolver_config);
        let (from, to) = tokio::join!(
            resolver.resolve_with_fallback(&request.from, external),
            resolver.resolve_with_fallback(&request.to, external),
        );
        let from = from.map_err(|NoMatch(name)| PlanError::Resolution(name))?;
        let to = to.map_err(|NoMatch(name)| PlanError::Resolution(name))?;

        let config = self
            .search_config
            .with_overrides(request.max_transfers, request.max_results);
        let origins = station_ids(&from);
        let dests = station_ids(&to);
        debug!(
            origins = origins.len(),
            dests = dests.len(),
            max_transfers = config.max_transfers,
            "endpoints resolved"
        );

        let found = find_itineraries(self.network, &origins, &dests, &config);
        if found.is_empty() {
            return Err(PlanError::NoItinerary);
        }

        let confidence = endpoint_confidence(&from).min(endpoint_confidence(&to));
        let penalty = 1.0 + (1.0 - confidence);
        let ranked = rank(found, &config, self.ratings, penalty);
        info!(
            direct = ranked.direct.len(),
            transfer = ranked.transfer.len(),
            degraded = from.degraded || to.degraded,
            "plan complete"
        );

        Ok(PlanOutcome {
            ranked,
            degraded: from.degraded || to.degraded,
        })
    }
}

fn station_ids(resolution: &Resolution) -> Vec<StationId> {
    resolution
        .matches
        .iter()
        .map(|m| m.station.clone())
        .collect()
}

/// Confidence of an endpoint is the best of its candidate matches.
fn endpoint_confidence(resolution: &Resolution) -> f64 {
    resolution
        .matches
        .iter()
        .map(|m| m.confidence)
        .fold(0.0, f64::max)
}
