//! Core domain types for the Masarak route planner.

mod error;
mod geo;
mod ids;
mod itinerary;
mod route;
mod station;

pub use error::DomainError;
pub use geo::{
    Coordinate, EARTH_RADIUS_KM, InvalidCoordinate, format_distance, format_duration,
    haversine_distance_m,
};
pub use ids::{InvalidId, RouteId, StationId};
pub use itinerary::{DirectItinerary, Itinerary, ItineraryKey, TransferItinerary};
pub use route::{Direction, Route};
pub use station::Station;
