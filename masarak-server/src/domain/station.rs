//! Stations: named, located stops in the bus network.

use std::collections::BTreeSet;

use super::{Coordinate, RouteId, StationId};

/// A stop in the transit network.
///
/// Immutable after network load: the set of serving routes is filled in
/// when the [`Network`](crate::network::Network) is built and never
/// mutated at query time.
#[derive(Debug, Clone)]
pub struct Station {
    /// Unique, stable identifier.
    pub id: StationId,

    /// Display name shown to riders.
    pub name: String,

    /// Geographic position.
    pub coordinate: Coordinate,

    /// Routes serving this station. Ordered for deterministic iteration.
    pub routes: BTreeSet<RouteId>,
}

impl Station {
    /// Create a station with no serving routes yet.
    pub fn new(id: StationId, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            routes: BTreeSet::new(),
        }
    }

    /// Number of routes serving this station.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_station_has_no_routes() {
        let station = Station::new(
            StationId::parse("المزة").unwrap(),
            "المزة",
            Coordinate::new(33.5234, 36.2456).unwrap(),
        );
        assert_eq!(station.route_count(), 0);
        assert_eq!(station.name, "المزة");
    }
}
