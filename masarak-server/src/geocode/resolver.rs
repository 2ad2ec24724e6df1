//! Name-to-station resolution.
//!
//! Resolution runs a fixed pipeline over the network's static name index:
//! exact normalized match, fuzzy match above the confidence floor, then
//! area-level fallback around a known centroid. The core pipeline is pure;
//! the optional external geocoder is consulted only after everything local
//! has failed, and its failure can only degrade the result, never escalate.

use tracing::{debug, warn};

use crate::domain::{Coordinate, StationId};
use crate::network::Network;

use super::areas::AreaIndex;
use super::error::NoMatch;
use super::nominatim::ExternalGeocoder;
use super::normalize::{normalize_name, similarity};

/// Resolver tuning knobs.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Minimum similarity/confidence for any returned match.
    pub min_confidence: f64,

    /// Radius around an area centroid to collect stations from.
    pub area_radius_m: f64,

    /// Confidence ceiling for fuzzy area-level fallback matches.
    pub area_confidence_cap: f64,

    /// Radius around an externally geocoded point.
    pub external_radius_m: f64,

    /// Confidence ceiling for externally geocoded matches.
    pub external_confidence_cap: f64,

    /// Maximum matches returned per name.
    pub max_matches: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.6,
            area_radius_m: 1500.0,
            area_confidence_cap: 0.6,
            external_radius_m: 1200.0,
            external_confidence_cap: 0.5,
            max_matches: 5,
        }
    }
}

/// One candidate station for a resolved name.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMatch {
    pub station: StationId,

    /// Estimated correctness of the match, in [0, 1].
    pub confidence: f64,
}

/// The outcome of resolving one name.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Candidates, best first.
    pub matches: Vec<StationMatch>,

    /// True when only the external fallback produced candidates.
    pub degraded: bool,
}

/// Resolves free-text names against one network snapshot.
pub struct Resolver<'a> {
    network: &'a Network,
    areas: &'a AreaIndex,
    config: &'a ResolverConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(network: &'a Network, areas: &'a AreaIndex, config: &'a ResolverConfig) -> Self {
        Self {
            network,
            areas,
            config,
        }
    }

    /// Resolve a name using only local data. Pure: no I/O, no clock.
    pub fn resolve(&self, name: &str) -> Result<Vec<StationMatch>, NoMatch> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Err(NoMatch(name.to_string()));
        }

        // Exact station name.
        if let Some(id) = self.network.station_by_normalized_name(&normalized) {
            return Ok(vec![StationMatch {
                station: id.clone(),
                confidence: 1.0,
            }]);
        }

        // Exact area name: every station around the centroid, scaled by
        // proximity.
        if let Some(area) = self.areas.find(&normalized) {
            let matches = self.stations_near(area.centroid, self.config.area_radius_m, 1.0);
            if !matches.is_empty() {
                return Ok(matches);
            }
        }

        // Fuzzy station name.
        let fuzzy = self.fuzzy_stations(&normalized);
        if !fuzzy.is_empty() {
            return Ok(fuzzy);
        }

        // Area-level fallback: nearest fuzzy-matched area centroid,
        // confidence capped at the fallback ceiling.
        if let Some((area, _)) = self
            .areas
            .fuzzy_find(&normalized, self.config.min_confidence)
        {
            let matches = self.stations_near(
                area.centroid,
                self.config.area_radius_m,
                self.config.area_confidence_cap,
            );
            if !matches.is_empty() {
                debug!(name, area = %area.name, "resolved via area fallback");
                return Ok(matches);
            }
        }

        Err(NoMatch(name.to_string()))
    }

    /// Resolve with the optional external geocoder as a last resort.
    ///
    /// An external timeout or failure degrades to `NoMatch` rather than
    /// propagating: resolution never fails a query because an upstream was
    /// slow.
    pub async fn resolve_with_fallback<G: ExternalGeocoder>(
        &self,
        name: &str,
        external: Option<&G>,
    ) -> Result<Resolution, NoMatch> {
        match self.resolve(name) {
            Ok(matches) => Ok(Resolution {
                matches,
                degraded: false,
            }),
            Err(no_match) => {
                if let Some(geocoder) = external {
                    match geocoder.locate(name).await {
                        Ok(point) => {
                            let matches = self.stations_near(
                                point,
                                self.config.external_radius_m,
                                self.config.external_confidence_cap,
                            );
                            if !matches.is_empty() {
                                debug!(name, "resolved via external geocoder");
                                return Ok(Resolution {
                                    matches,
                                    degraded: true,
                                });
                            }
                        }
                        Err(e) => {
                            warn!(name, error = %e, "external geocoding failed; degrading");
                        }
                    }
                }
                Err(no_match)
            }
        }
    }

    /// Fuzzy matches over the station name index, best first, ties broken
    /// by station id.
    fn fuzzy_stations(&self, normalized: &str) -> Vec<StationMatch> {
        let mut scored: Vec<StationMatch> = self
            .network
            .name_index()
            .filter_map(|(indexed, id)| {
                let sim = similarity(normalized, indexed);
                (sim >= self.config.min_confidence).then(|| StationMatch {
                    station: id.clone(),
                    confidence: sim,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.station.cmp(&b.station))
        });
        scored.truncate(self.config.max_matches);
        scored
    }

    /// Stations within `radius_m` of a point, confidence scaled from `cap`
    /// at the point down to `cap / 2` at the radius edge.
    fn stations_near(&self, point: Coordinate, radius_m: f64, cap: f64) -> Vec<StationMatch> {
        let mut matches: Vec<StationMatch> = self
            .network
            .nearby(point, radius_m)
            .into_iter()
            .map(|s| StationMatch {
                station: s.id,
                confidence: cap * (1.0 - s.distance_m / (2.0 * radius_m)),
            })
            .collect();
        matches.truncate(self.config.max_matches);
        matches
    }
}
