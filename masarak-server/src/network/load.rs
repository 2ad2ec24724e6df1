//! Loading a network from its JSON data file.
//!
//! The file format mirrors the backend's route administration export:
//! stations with coordinates, routes as ordered station-name sequences,
//! and an optional seed of aggregated trip ratings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Coordinate, Direction, Route, RouteId, Station, StationId};

use super::error::NetworkError;
use super::model::Network;

/// Top-level shape of the network data file.
#[derive(Debug, Deserialize)]
pub struct NetworkFile {
    pub stations: Vec<StationRecord>,
    pub routes: Vec<RouteRecord>,

    /// Optional aggregated ratings seed, keyed by trip id.
    #[serde(default)]
    pub ratings: BTreeMap<String, f32>,
}

/// A station record in the data file.
#[derive(Debug, Deserialize)]
pub struct StationRecord {
    /// Defaults to the display name when absent.
    pub id: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A route record in the data file.
#[derive(Debug, Deserialize)]
pub struct RouteRecord {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub bidirectional: bool,
    /// Station ids in travel order.
    pub stations: Vec<String>,
}

/// A loaded network plus its ratings seed.
#[derive(Debug)]
pub struct LoadedNetwork {
    pub network: Network,
    pub ratings: BTreeMap<String, f32>,
}

/// Parse and build a network from a JSON string.
pub fn from_json_str(json: &str) -> Result<LoadedNetwork, NetworkError> {
    let file: NetworkFile = serde_json::from_str(json)?;

    let stations = file
        .stations
        .into_iter()
        .map(|rec| {
            let id = StationId::parse(rec.id.as_deref().unwrap_or(&rec.name))?;
            let coordinate = Coordinate::new(rec.latitude, rec.longitude)?;
            Ok(Station::new(id, rec.name, coordinate))
        })
        .collect::<Result<Vec<_>, NetworkError>>()?;

    let routes = file
        .routes
        .into_iter()
        .map(|rec| {
            let id = RouteId::parse(rec.id.as_deref().unwrap_or(&rec.name))?;
            let direction = if rec.bidirectional {
                Direction::Bidirectional
            } else {
                Direction::OneWay
            };
            let stations = rec
                .stations
                .iter()
                .map(|s| StationId::parse(s))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Route::new(id, rec.name, rec.color, direction, stations)?)
        })
        .collect::<Result<Vec<_>, NetworkError>>()?;

    Ok(LoadedNetwork {
        network: Network::build(stations, routes)?,
        ratings: file.ratings,
    })
}

/// Read, parse, and build a network from a JSON file on disk.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<LoadedNetwork, NetworkError> {
    let json = std::fs::read_to_string(path)?;
    from_json_str(&json)
}
