//! Built-in Damascus network, used when no data file is configured.

use std::collections::BTreeMap;

use crate::domain::{Coordinate, Direction, Route, RouteId, Station, StationId};

use super::load::LoadedNetwork;
use super::model::Network;

const STATIONS: &[(&str, f64, f64)] = &[
    ("المزة", 33.5234, 36.2456),
    ("الجبل", 33.5190, 36.2550),
    ("ساحة المحافظة", 33.5067, 36.2734),
    ("ساحة الأمويين", 33.5123, 36.2919),
    ("وسط البلد", 33.5110, 36.2890),
    ("جادات سلمية", 33.4987, 36.3123),
    ("شارع الثورة", 33.5102, 36.3050),
    ("البحصة", 33.5085, 36.2930),
    ("باب توما", 33.5156, 36.3089),
    ("القيمرية", 33.5098, 36.2945),
    ("دمشق القديمة", 33.5123, 36.2919),
    ("المهاجرين", 33.5298, 36.2891),
    ("الصالحية", 33.5345, 36.2756),
    ("الشعلان", 33.5067, 36.2734),
    ("البرامكة", 33.5049, 36.2820),
    ("القصاع", 33.5201, 36.2623),
    ("ساحة العباسيين", 33.5089, 36.2847),
];

const ROUTES: &[(&str, &str, Direction, &[&str])] = &[
    (
        "خط المزة جبل",
        "#2563eb",
        Direction::Bidirectional,
        &[
            "المزة",
            "الجبل",
            "ساحة المحافظة",
            "ساحة الأمويين",
            "وسط البلد",
        ],
    ),
    (
        "خط جادات سلمية",
        "#16a34a",
        Direction::OneWay,
        &["جادات سلمية", "شارع الثورة", "البحصة", "ساحة المحافظة"],
    ),
    (
        "خط باب توما",
        "#dc2626",
        Direction::Bidirectional,
        &["باب توما", "القيمرية", "دمشق القديمة", "وسط البلد"],
    ),
    (
        "خط المهاجرين",
        "#9333ea",
        Direction::OneWay,
        &[
            "المهاجرين",
            "الصالحية",
            "الشعلان",
            "البرامكة",
            "ساحة المحافظة",
        ],
    ),
    (
        "خط العباسيين",
        "#f59e0b",
        Direction::Bidirectional,
        &["ساحة العباسيين", "القصاع", "باب توما"],
    ),
];

const RATING_SEED: &[(&str, f32)] = &[
    ("خط المزة جبل", 4.5),
    ("خط جادات سلمية", 4.2),
    ("خط باب توما", 4.0),
    ("خط المهاجرين", 3.8),
    ("خط العباسيين", 4.1),
    ("خط جادات سلمية > خط المزة جبل @ ساحة المحافظة", 4.2),
];

/// The built-in Damascus bus network with its ratings seed.
pub fn damascus() -> LoadedNetwork {
    let stations = STATIONS
        .iter()
        .map(|(name, lat, lon)| {
            let id = StationId::parse(name).expect("built-in station name is a valid id");
            let coordinate =
                Coordinate::new(*lat, *lon).expect("built-in station coordinate is valid");
            Station::new(id, *name, coordinate)
        })
        .collect();

    let routes = ROUTES
        .iter()
        .map(|(name, color, direction, stops)| {
            let id = RouteId::parse(name).expect("built-in route name is a valid id");
            let stops = stops
                .iter()
                .map(|s| StationId::parse(s).expect("built-in station name is a valid id"))
                .collect();
            Route::new(id, *name, Some((*color).to_string()), *direction, stops)
                .expect("built-in route sequence is valid")
        })
        .collect();

    let network =
        Network::build(stations, routes).expect("built-in Damascus network data is consistent");

    let ratings: BTreeMap<String, f32> = RATING_SEED
        .iter()
        .map(|(k, v)| ((*k).to_string(), *v))
        .collect();

    LoadedNetwork { network, ratings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_network_builds() {
        let loaded = damascus();
        assert_eq!(loaded.network.station_count(), 17);
        assert_eq!(loaded.network.route_count(), 5);
    }

    #[test]
    fn governorate_square_is_a_transfer_point() {
        let loaded = damascus();
        let square = StationId::parse("ساحة المحافظة").unwrap();
        let serving: Vec<_> = loaded.network.routes_at(&square).collect();
        assert!(serving.len() >= 3, "expected several routes at the square");
    }

    #[test]
    fn ratings_seed_covers_all_routes() {
        let loaded = damascus();
        for route in loaded.network.routes() {
            assert!(
                loaded.ratings.contains_key(route.id.as_str()),
                "no rating seed for {}",
                route.id
            );
        }
    }
}
