//! Network build and load error types.

use crate::domain::{DomainError, InvalidCoordinate, InvalidId, RouteId, StationId};

/// Errors raised while building or loading a network.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Two stations share an identifier
    #[error("duplicate station id: {0}")]
    DuplicateStation(StationId),

    /// Two routes share an identifier
    #[error("duplicate route id: {0}")]
    DuplicateRoute(RouteId),

    /// A route references a station that does not exist
    #[error("route {route} references unknown station {station}")]
    UnknownStation { route: RouteId, station: StationId },

    /// Route-level validation failed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A record in the data file carried an invalid identifier
    #[error("invalid identifier in network data: {0}")]
    InvalidId(#[from] InvalidId),

    /// A record in the data file carried an invalid coordinate
    #[error("invalid coordinate in network data: {0}")]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Could not read the network data file
    #[error("failed to read network file: {0}")]
    Io(#[from] std::io::Error),

    /// The network data file is not valid JSON
    #[error("failed to parse network file: {0}")]
    Json(#[from] serde_json::Error),
}
