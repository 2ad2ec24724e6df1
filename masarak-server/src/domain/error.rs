//! Domain error types.
//!
//! These errors represent validation failures in the static data model.
//! They are distinct from network-load and HTTP errors.

use super::{RouteId, StationId};

/// Domain-level validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A route must visit at least two stations
    #[error("route {0} must have at least two stations")]
    TooFewStations(RouteId),

    /// A route visits the same station more than once
    #[error("route {route} visits station {station} more than once")]
    DuplicateStation { route: RouteId, station: StationId },

    /// A transfer itinerary reuses a route
    #[error("itinerary boards route {0} more than once")]
    RepeatedRoute(RouteId),

    /// A transfer itinerary has mismatched legs and transfer points
    #[error(
        "itinerary with {routes} routes must have {routes} - 1 transfer stations, got {transfers}"
    )]
    MalformedTransferChain { routes: usize, transfers: usize },
}
