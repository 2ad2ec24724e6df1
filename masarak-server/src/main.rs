use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use masarak_server::geocode::{
    AreaIndex, CachedGeocoder, GeocodeCacheConfig, NominatimClient, NominatimConfig,
    ResolverConfig,
};
use masarak_server::network::{NetworkHandle, damascus, from_json_file};
use masarak_server::planner::SearchConfig;
use masarak_server::ratings::InMemoryRatings;
use masarak_server::web::{AppState, create_router};

/// Default interval between data-file reload checks (10 minutes).
const DEFAULT_REFRESH_SECS: u64 = 10 * 60;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load the network: a data file when configured, the built-in
    // Damascus network otherwise.
    let network_file = std::env::var("MASARAK_NETWORK_FILE").ok();
    let loaded = match network_file.as_deref() {
        Some(path) => {
            from_json_file(path).expect("Failed to load the configured network file")
        }
        None => {
            info!("MASARAK_NETWORK_FILE not set, using the built-in Damascus network");
            damascus()
        }
    };
    info!(
        stations = loaded.network.station_count(),
        routes = loaded.network.route_count(),
        "network loaded"
    );

    let ratings = InMemoryRatings::seeded(loaded.ratings);
    let network = NetworkHandle::new(loaded.network);

    // The external geocoder is optional; without it the service resolves
    // names against the network and area index only.
    let geocoder = match std::env::var("MASARAK_NOMINATIM_URL") {
        Ok(url) => {
            let client = NominatimClient::new(NominatimConfig::new(url))
                .expect("Failed to create the Nominatim client");
            Some(CachedGeocoder::new(client, &GeocodeCacheConfig::default()))
        }
        Err(_) => {
            warn!("MASARAK_NOMINATIM_URL not set, external geocoding disabled");
            None
        }
    };

    // Reload the data file periodically so edits go live without a
    // restart. Queries in flight keep their snapshot.
    if let Some(path) = network_file {
        let refresh_secs = std::env::var("MASARAK_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_SECS);
        let handle = network.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(refresh_secs));
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match handle.reload_from(&path).await {
                    Ok(stations) => info!(stations, "network reloaded"),
                    Err(e) => error!(error = %e, "network reload failed, keeping old snapshot"),
                }
            }
        });
    }

    let state = AppState::new(
        network,
        AreaIndex::damascus(),
        ResolverConfig::default(),
        SearchConfig::default(),
        ratings,
        geocoder,
    );

    let app = create_router(state);

    let addr: SocketAddr = std::env::var("MASARAK_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("MASARAK_ADDR is not a valid socket address");
    println!("Masarak route planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health              - Health check");
    println!("  GET  /api/routes/all      - Full network listing");
    println!("  POST /api/routes/suggest  - Trip suggestions");
    println!("  POST /api/routes/rate     - Rate a suggested trip");
    println!("  GET  /api/stations/nearby - Stations near a point");
    println!("  GET  /api/geocode/reverse - Name a coordinate");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
