//! Routes: ordered station sequences traversed by one bus line.

use std::collections::BTreeSet;

use super::{DomainError, RouteId, StationId};

/// Whether a route may be ridden against its listed station order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Traversable only in listed order.
    OneWay,
    /// Traversable in either order.
    Bidirectional,
}

/// An ordered sequence of stations traversed by one transit line.
///
/// Insertion order is travel order. A route has at least two stations and
/// never visits the same station twice (both checked by [`Route::new`]).
#[derive(Debug, Clone)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    /// Display color for the client's route badges, e.g. `#2563eb`.
    pub color: Option<String>,
    pub direction: Direction,
    stations: Vec<StationId>,
}

impl Route {
    /// Create a route, validating the station sequence.
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        color: Option<String>,
        direction: Direction,
        stations: Vec<StationId>,
    ) -> Result<Self, DomainError> {
        if stations.len() < 2 {
            return Err(DomainError::TooFewStations(id));
        }

        let mut seen = BTreeSet::new();
        for station in &stations {
            if !seen.insert(station) {
                return Err(DomainError::DuplicateStation {
                    route: id,
                    station: station.clone(),
                });
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            color,
            direction,
            stations,
        })
    }

    /// The station sequence in travel order.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Position of a station in the sequence, if served.
    pub fn position_of(&self, station: &StationId) -> Option<usize> {
        self.stations.iter().position(|s| s == station)
    }

    /// Whether a rider boarding at `from` can reach `to` on this route.
    ///
    /// One-way routes only travel in listed order; bidirectional routes
    /// travel either way. Boarding and alighting at the same position is
    /// not a trip.
    pub fn reaches(&self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        to > from || self.direction == Direction::Bidirectional
    }

    /// Inclusive station slice from `from` to `to`, reversed when riding
    /// a bidirectional route against listed order.
    ///
    /// Caller must ensure both positions are in bounds and
    /// [`reaches`](Self::reaches) holds.
    pub fn slice(&self, from: usize, to: usize) -> Vec<StationId> {
        if from <= to {
            self.stations[from..=to].to_vec()
        } else {
            let mut slice = self.stations[to..=from].to_vec();
            slice.reverse();
            slice
        }
    }

    /// Number of station-to-station hops between two positions.
    pub fn hops(from: usize, to: usize) -> usize {
        from.abs_diff(to)
    }
}
