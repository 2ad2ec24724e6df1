//! Itineraries: query results describing one way to make a trip.

use std::fmt;

use super::{DomainError, RouteId, StationId};

/// A trip along a single route.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectItinerary {
    pub route: RouteId,

    /// Inclusive station slice from origin to destination, in travel order.
    pub stations: Vec<StationId>,

    pub duration_mins: i64,
    pub fare: u32,

    /// Aggregated rider rating, filled in during ranking.
    pub rating: Option<f32>,

    /// Weighted rank score, lower is better. Filled in during ranking.
    pub score: f64,
}

/// A trip chaining two or more routes at designated transfer stations.
///
/// Invariants (checked by [`TransferItinerary::new`]): at least two routes,
/// exactly one fewer transfer station than routes, and no route boarded
/// twice.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferItinerary {
    routes: Vec<RouteId>,
    transfer_stations: Vec<StationId>,

    pub duration_mins: i64,
    pub fare: u32,
    pub rating: Option<f32>,
    pub score: f64,
}

impl TransferItinerary {
    /// Create a transfer itinerary, validating the route chain.
    pub fn new(
        routes: Vec<RouteId>,
        transfer_stations: Vec<StationId>,
        duration_mins: i64,
        fare: u32,
    ) -> Result<Self, DomainError> {
        if routes.len() < 2 || transfer_stations.len() != routes.len() - 1 {
            return Err(DomainError::MalformedTransferChain {
                routes: routes.len(),
                transfers: transfer_stations.len(),
            });
        }

        for (i, route) in routes.iter().enumerate() {
            if routes[..i].contains(route) {
                return Err(DomainError::RepeatedRoute(route.clone()));
            }
        }

        Ok(Self {
            routes,
            transfer_stations,
            duration_mins,
            fare,
            rating: None,
            score: 0.0,
        })
    }

    /// The boarded routes, in travel order.
    pub fn routes(&self) -> &[RouteId] {
        &self.routes
    }

    /// The transfer stations, in travel order.
    pub fn transfer_stations(&self) -> &[StationId] {
        &self.transfer_stations
    }

    /// Number of route changes.
    pub fn transfers(&self) -> usize {
        self.transfer_stations.len()
    }
}

/// One way to make the requested trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Itinerary {
    Direct(DirectItinerary),
    Transfer(TransferItinerary),
}

impl Itinerary {
    pub fn is_direct(&self) -> bool {
        matches!(self, Itinerary::Direct(_))
    }

    pub fn duration_mins(&self) -> i64 {
        match self {
            Itinerary::Direct(d) => d.duration_mins,
            Itinerary::Transfer(t) => t.duration_mins,
        }
    }

    pub fn fare(&self) -> u32 {
        match self {
            Itinerary::Direct(d) => d.fare,
            Itinerary::Transfer(t) => t.fare,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Itinerary::Direct(d) => d.score,
            Itinerary::Transfer(t) => t.score,
        }
    }

    pub fn set_score(&mut self, score: f64) {
        match self {
            Itinerary::Direct(d) => d.score = score,
            Itinerary::Transfer(t) => t.score = score,
        }
    }

    pub fn rating(&self) -> Option<f32> {
        match self {
            Itinerary::Direct(d) => d.rating,
            Itinerary::Transfer(t) => t.rating,
        }
    }

    pub fn set_rating(&mut self, rating: Option<f32>) {
        match self {
            Itinerary::Direct(d) => d.rating = rating,
            Itinerary::Transfer(t) => t.rating = rating,
        }
    }

    /// Identity key for deduplication: two itineraries with the same
    /// ordered route sequence and transfer stations are the same trip.
    pub fn key(&self) -> ItineraryKey {
        match self {
            Itinerary::Direct(d) => ItineraryKey {
                routes: vec![d.route.clone()],
                transfers: Vec::new(),
            },
            Itinerary::Transfer(t) => ItineraryKey {
                routes: t.routes.to_vec(),
                transfers: t.transfer_stations.to_vec(),
            },
        }
    }

    /// Stable textual trip identifier, used by the rate-trip endpoint and
    /// the aggregated-ratings lookup.
    pub fn trip_id(&self) -> String {
        self.key().to_string()
    }
}

/// Deduplication/tie-break key: ordered routes plus transfer stations.
///
/// The derived `Ord` gives the lexicographic route-identifier tie-break
/// that keeps result ordering reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItineraryKey {
    pub routes: Vec<RouteId>,
    pub transfers: Vec<StationId>,
}

impl fmt::Display for ItineraryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, route) in self.routes.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            f.write_str(route.as_str())?;
        }
        for (i, station) in self.transfers.iter().enumerate() {
            f.write_str(if i == 0 { " @ " } else { ", " })?;
            f.write_str(station.as_str())?;
        }
        Ok(())
    }
}
