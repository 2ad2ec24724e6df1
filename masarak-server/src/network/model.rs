//! The static network graph and its derived indexes.

use std::collections::BTreeMap;

use crate::domain::{Coordinate, Route, RouteId, Station, StationId};
use crate::geocode::normalize_name;

use super::error::NetworkError;

/// The full transit network: stations, routes, and derived adjacency.
///
/// Built once from static data and read-only afterwards; queries share a
/// snapshot via `Arc` (see [`NetworkHandle`](super::NetworkHandle)) so a
/// reload never disturbs an in-flight search.
///
/// All indexes use ordered maps so iteration order (and therefore result
/// order, given the documented tie-breaks) is reproducible.
#[derive(Debug, Clone)]
pub struct Network {
    stations: BTreeMap<StationId, Station>,
    routes: BTreeMap<RouteId, Route>,

    /// Normalized display name → station. Later entries win on collision.
    name_index: BTreeMap<String, StationId>,

    /// (route, station) → position in the route's sequence.
    positions: BTreeMap<RouteId, BTreeMap<StationId, usize>>,
}

/// A station annotated with its distance from a query point.
#[derive(Debug, Clone)]
pub struct NearbyStation {
    pub id: StationId,
    pub name: String,
    pub coordinate: Coordinate,
    pub routes: usize,
    pub distance_m: f64,
}

impl Network {
    /// Build a network from stations and routes, validating unique
    /// identifiers and rejecting dangling station references.
    ///
    /// Each station's set of serving routes is derived here.
    pub fn build(stations: Vec<Station>, routes: Vec<Route>) -> Result<Self, NetworkError> {
        let mut station_map: BTreeMap<StationId, Station> = BTreeMap::new();
        for station in stations {
            if station_map.contains_key(&station.id) {
                return Err(NetworkError::DuplicateStation(station.id));
            }
            station_map.insert(station.id.clone(), station);
        }

        let mut route_map: BTreeMap<RouteId, Route> = BTreeMap::new();
        let mut positions: BTreeMap<RouteId, BTreeMap<StationId, usize>> = BTreeMap::new();

        for route in routes {
            if route_map.contains_key(&route.id) {
                return Err(NetworkError::DuplicateRoute(route.id));
            }

            let mut route_positions = BTreeMap::new();
            for (pos, station_id) in route.stations().iter().enumerate() {
                let Some(station) = station_map.get_mut(station_id) else {
                    return Err(NetworkError::UnknownStation {
                        route: route.id.clone(),
                        station: station_id.clone(),
                    });
                };
                station.routes.insert(route.id.clone());
                route_positions.insert(station_id.clone(), pos);
            }

            positions.insert(route.id.clone(), route_positions);
            route_map.insert(route.id.clone(), route);
        }

        let name_index = station_map
            .values()
            .map(|s| (normalize_name(&s.name), s.id.clone()))
            .collect();

        Ok(Self {
            stations: station_map,
            routes: route_map,
            name_index,
            positions,
        })
    }

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    /// All stations, ordered by identifier.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All routes, ordered by identifier.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Routes serving a station, ordered by identifier.
    pub fn routes_at(&self, station: &StationId) -> impl Iterator<Item = &RouteId> {
        self.stations
            .get(station)
            .into_iter()
            .flat_map(|s| s.routes.iter())
    }

    /// Transfer candidates at a station: routes physically intersecting
    /// there, excluding the route already being ridden.
    pub fn transfer_candidates<'a>(
        &'a self,
        station: &StationId,
        riding: &'a RouteId,
    ) -> impl Iterator<Item = &'a RouteId> {
        self.routes_at(station).filter(move |r| *r != riding)
    }

    /// Position of a station in a route's sequence, O(log n).
    pub fn position(&self, route: &RouteId, station: &StationId) -> Option<usize> {
        self.positions.get(route)?.get(station).copied()
    }

    /// Exact lookup in the normalized name index.
    pub fn station_by_normalized_name(&self, normalized: &str) -> Option<&StationId> {
        self.name_index.get(normalized)
    }

    /// The normalized name index, for fuzzy matching.
    pub fn name_index(&self) -> impl Iterator<Item = (&str, &StationId)> {
        self.name_index.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stations within `radius_m` of a point, ascending by Haversine
    /// distance (ties broken by station id).
    pub fn nearby(&self, origin: Coordinate, radius_m: f64) -> Vec<NearbyStation> {
        let mut found: Vec<NearbyStation> = self
            .stations
            .values()
            .filter_map(|s| {
                let distance_m = origin.distance_m(&s.coordinate);
                (distance_m <= radius_m).then(|| NearbyStation {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    coordinate: s.coordinate,
                    routes: s.route_count(),
                    distance_m,
                })
            })
            .collect();

        found.sort_by(|a, b| {
            a.distance_m
                .partial_cmp(&b.distance_m)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        found
    }
}
