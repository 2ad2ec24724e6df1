//! Data transfer objects for web requests and responses.
//!
//! Field names and casing mirror what the mobile client already sends
//! and renders, camelCase warts included.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, format_distance, format_duration};
use crate::network::{NearbyStation, Network};
use crate::planner::PlanOutcome;

/// Request body for the suggest endpoint.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub from_station_name: String,
    pub to_station_name: String,

    /// Per-query transfer-bound override.
    pub max_transfers: Option<usize>,

    /// Per-query cap on each result group.
    pub max_results: Option<usize>,
}

/// A direct suggestion.
#[derive(Debug, Serialize)]
pub struct DirectRouteDto {
    /// Stable trip identifier, accepted back by the rate endpoint.
    pub id: String,

    pub route: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Station names in travel order, origin and destination included.
    pub stations: Vec<String>,

    /// Arabic display string, e.g. `25 دقيقة`.
    pub duration: String,

    pub duration_mins: i64,

    /// Fare in Syrian pounds.
    pub price: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

/// A transfer suggestion.
///
/// `route1`, `route2` and `transferStation` describe the common
/// one-transfer case the client renders; the full chain is always in
/// `routes` and `transferStations`.
#[derive(Debug, Serialize)]
pub struct TransferRouteDto {
    pub id: String,

    pub route1: String,
    pub route2: String,

    #[serde(rename = "transferStation")]
    pub transfer_station: String,

    pub routes: Vec<String>,

    #[serde(rename = "transferStations")]
    pub transfer_stations: Vec<String>,

    pub duration: String,
    pub duration_mins: i64,
    pub price: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

/// Response body for the suggest endpoint.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub direct: Vec<DirectRouteDto>,
    pub transfer: Vec<TransferRouteDto>,

    /// Why both groups are empty: `not_found` or `no_itinerary`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,

    /// Set when an endpoint was resolved through the external geocoder.
    pub degraded: bool,
}

impl SuggestResponse {
    /// An empty result carrying its reason. Resolution and connectivity
    /// misses are answers, not errors.
    pub fn empty(reason: &'static str) -> Self {
        Self {
            direct: Vec::new(),
            transfer: Vec::new(),
            reason: Some(reason),
            degraded: false,
        }
    }

    pub fn from_outcome(network: &Network, outcome: PlanOutcome) -> Self {
        let direct = outcome
            .ranked
            .direct
            .iter()
            .filter_map(|i| direct_dto(network, i))
            .collect();
        let transfer = outcome
            .ranked
            .transfer
            .iter()
            .filter_map(|i| transfer_dto(network, i))
            .collect();
        Self {
            direct,
            transfer,
            reason: None,
            degraded: outcome.degraded,
        }
    }
}

fn direct_dto(network: &Network, itinerary: &Itinerary) -> Option<DirectRouteDto> {
    let Itinerary::Direct(d) = itinerary else {
        return None;
    };
    let route = network.route(&d.route)?;
    let stations = d
        .stations
        .iter()
        .map(|id| {
            network
                .station(id)
                .map_or_else(|| id.to_string(), |s| s.name.clone())
        })
        .collect();

    Some(DirectRouteDto {
        id: itinerary.trip_id(),
        route: route.name.clone(),
        color: route.color.clone(),
        stations,
        duration: format_duration(d.duration_mins),
        duration_mins: d.duration_mins,
        price: d.fare,
        rating: d.rating,
    })
}

fn transfer_dto(network: &Network, itinerary: &Itinerary) -> Option<TransferRouteDto> {
    let Itinerary::Transfer(t) = itinerary else {
        return None;
    };
    let route_names: Vec<String> = t
        .routes()
        .iter()
        .map(|id| {
            network
                .route(id)
                .map_or_else(|| id.to_string(), |r| r.name.clone())
        })
        .collect();
    let station_names: Vec<String> = t
        .transfer_stations()
        .iter()
        .map(|id| {
            network
                .station(id)
                .map_or_else(|| id.to_string(), |s| s.name.clone())
        })
        .collect();

    Some(TransferRouteDto {
        id: itinerary.trip_id(),
        route1: route_names.first()?.clone(),
        route2: route_names.last()?.clone(),
        transfer_station: station_names.first()?.clone(),
        routes: route_names,
        transfer_stations: station_names,
        duration: format_duration(t.duration_mins),
        duration_mins: t.duration_mins,
        price: t.fare,
        rating: t.rating,
    })
}

/// Request body for the rate endpoint.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    /// The `id` of a previously suggested trip.
    pub trip_id: String,

    /// Star rating, 1 through 5.
    pub rating: f32,

    /// Free-text comment; accepted and logged, not stored.
    pub comment: Option<String>,
}

/// Response body for the rate endpoint: the updated aggregate.
#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub trip_id: String,
    pub rating: Option<f32>,
}

/// Query string for the nearby-stations endpoint.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,

    /// Search radius in meters, default 1000.
    pub radius: Option<f64>,
}

/// A station near the queried point.
#[derive(Debug, Serialize)]
pub struct NearbyStationDto {
    pub name: String,

    /// Arabic display string, e.g. `250م`.
    pub distance: String,

    pub distance_m: f64,

    /// How many routes serve the station.
    pub routes: usize,

    pub latitude: f64,
    pub longitude: f64,
}

impl From<NearbyStation> for NearbyStationDto {
    fn from(s: NearbyStation) -> Self {
        Self {
            name: s.name,
            distance: format_distance(s.distance_m),
            distance_m: s.distance_m,
            routes: s.routes,
            latitude: s.coordinate.lat,
            longitude: s.coordinate.lon,
        }
    }
}

/// Response body for the nearby-stations endpoint.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub stations: Vec<NearbyStationDto>,
}

/// One route in the full-network listing.
#[derive(Debug, Serialize)]
pub struct RouteDto {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub bidirectional: bool,
    pub stations: Vec<String>,
}

/// Response body for the full-network listing.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteDto>,
}

/// Query string for the reverse-geocode endpoint.
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Response body for the reverse-geocode endpoint.
#[derive(Debug, Serialize)]
pub struct ReverseResponse {
    pub name: String,

    /// Where the name came from: `nominatim` or `area`.
    pub source: &'static str,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_wire_field_names() {
        let dto = TransferRouteDto {
            id: "خط جادات سلمية > خط المزة جبل @ ساحة المحافظة".to_string(),
            route1: "خط جادات سلمية".to_string(),
            route2: "خط المزة جبل".to_string(),
            transfer_station: "ساحة المحافظة".to_string(),
            routes: vec!["خط جادات سلمية".to_string(), "خط المزة جبل".to_string()],
            transfer_stations: vec!["ساحة المحافظة".to_string()],
            duration: format_duration(35),
            duration_mins: 35,
            price: 5500,
            rating: None,
        };

        let json = serde_json::to_value(&dto).unwrap();
        let obj = json.as_object().unwrap();

        // The mobile client reads these camelCase keys verbatim.
        assert_eq!(obj["transferStation"], "ساحة المحافظة");
        assert_eq!(obj["transferStations"][0], "ساحة المحافظة");
        assert_eq!(obj["price"], 5500);
        assert!(!obj.contains_key("transfer_station"));
        assert!(!obj.contains_key("transfer_stations"));
        // Absent rating is omitted, not serialized as null.
        assert!(!obj.contains_key("rating"));
    }

    #[test]
    fn direct_wire_field_names() {
        let dto = DirectRouteDto {
            id: "خط المزة جبل".to_string(),
            route: "خط المزة جبل".to_string(),
            color: Some("#2563eb".to_string()),
            stations: vec!["المزة".to_string(), "وسط البلد".to_string()],
            duration: format_duration(20),
            duration_mins: 20,
            price: 2500,
            rating: Some(4.5),
        };

        let json = serde_json::to_value(&dto).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["route"], "خط المزة جبل");
        assert_eq!(obj["duration"], "20 دقيقة");
        assert_eq!(obj["price"], 2500);
        assert_eq!(obj["color"], "#2563eb");
    }
}
