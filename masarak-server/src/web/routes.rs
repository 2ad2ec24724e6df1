//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, info, warn};

use crate::domain::Coordinate;
use crate::planner::{PlanError, PlanRequest, Planner};
use crate::ratings::RatingSource;

use super::dto::*;
use super::state::AppState;

/// Largest accepted nearby-search radius, in meters.
const MAX_NEARBY_RADIUS_M: f64 = 50_000.0;

const DEFAULT_NEARBY_RADIUS_M: f64 = 1_000.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes/all", get(list_routes))
        .route("/api/routes/suggest", post(suggest_routes))
        .route("/api/routes/rate", post(rate_trip))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/geocode/reverse", get(reverse_geocode))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The whole network, for the client's map screen.
async fn list_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let network = state.network.snapshot().await;
    let routes = network
        .routes()
        .map(|route| RouteDto {
            id: route.id.to_string(),
            name: route.name.clone(),
            color: route.color.clone(),
            bidirectional: route.direction == crate::domain::Direction::Bidirectional,
            stations: route
                .stations()
                .iter()
                .map(|id| {
                    network
                        .station(id)
                        .map_or_else(|| id.to_string(), |s| s.name.clone())
                })
                .collect(),
        })
        .collect();

    Json(RoutesResponse { routes })
}

/// Plan a trip between two free-text place names.
///
/// Unresolvable names and disconnected endpoints come back as 200 with
/// empty groups and a reason, matching how the client distinguishes "no
/// route found" from a broken request.
async fn suggest_routes(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let network = state.network.snapshot().await;
    let planner = Planner::new(
        &network,
        &state.areas,
        &state.resolver_config,
        &state.search_config,
        state.ratings.as_ref(),
    );
    let request = PlanRequest {
        from: req.from_station_name,
        to: req.to_station_name,
        max_transfers: req.max_transfers,
        max_results: req.max_results,
    };

    match planner.suggest(&request, state.geocoder.as_deref()).await {
        Ok(outcome) => Ok(Json(SuggestResponse::from_outcome(&network, outcome))),
        Err(PlanError::InvalidQuery(message)) => Err(AppError::BadRequest { message }),
        Err(PlanError::Resolution(name)) => {
            info!(%name, "no station match for query endpoint");
            Ok(Json(SuggestResponse::empty("not_found")))
        }
        Err(PlanError::NoItinerary) => Ok(Json(SuggestResponse::empty("no_itinerary"))),
    }
}

/// Record a rider rating for a suggested trip.
async fn rate_trip(
    State(state): State<AppState>,
    Json(req): Json<RateRequest>,
) -> Result<Json<RateResponse>, AppError> {
    state
        .ratings
        .record(&req.trip_id, req.rating)
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    if let Some(comment) = req.comment.as_deref() {
        info!(trip = %req.trip_id, comment, "rider comment");
    }

    Ok(Json(RateResponse {
        rating: state.ratings.rating_for(&req.trip_id),
        trip_id: req.trip_id,
    }))
}

/// Stations within a radius of a point, nearest first.
async fn nearby_stations(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, AppError> {
    let origin =
        Coordinate::new(query.latitude, query.longitude).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;
    let radius = query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_M);
    if !radius.is_finite() || radius <= 0.0 || radius > MAX_NEARBY_RADIUS_M {
        return Err(AppError::BadRequest {
            message: format!("radius must be in (0, {MAX_NEARBY_RADIUS_M}] meters"),
        });
    }

    let network = state.network.snapshot().await;
    let stations = network
        .nearby(origin, radius)
        .into_iter()
        .map(NearbyStationDto::from)
        .collect();

    Ok(Json(NearbyResponse { stations }))
}

/// Name a coordinate: the external geocoder when configured, the area
/// index otherwise or when the upstream is down.
async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<ReverseResponse>, AppError> {
    let point =
        Coordinate::new(query.latitude, query.longitude).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    if let Some(geocoder) = &state.geocoder {
        match geocoder.inner().reverse(point).await {
            Ok(name) => {
                return Ok(Json(ReverseResponse {
                    name,
                    source: "nominatim",
                }));
            }
            Err(e) => warn!(error = %e, "reverse geocoding failed, using area index"),
        }
    }

    match state.areas.nearest(point) {
        Some((area, _)) => Ok(Json(ReverseResponse {
            name: area.name.clone(),
            source: "area",
        })),
        None => Err(AppError::NotFound {
            message: "no known area near that point".to_string(),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::{AreaIndex, ResolverConfig};
    use crate::network::{NetworkHandle, damascus};
    use crate::planner::SearchConfig;
    use crate::ratings::InMemoryRatings;

    fn test_state() -> AppState {
        let loaded = damascus();
        AppState::new(
            NetworkHandle::new(loaded.network),
            AreaIndex::damascus(),
            ResolverConfig::default(),
            SearchConfig::default(),
            InMemoryRatings::seeded(loaded.ratings),
            None,
        )
    }

    fn suggest_body(from: &str, to: &str) -> SuggestRequest {
        SuggestRequest {
            from_station_name: from.to_string(),
            to_station_name: to.to_string(),
            max_transfers: None,
            max_results: None,
        }
    }

    #[tokio::test]
    async fn suggest_returns_the_direct_trip() {
        let state = test_state();
        let Json(resp) = suggest_routes(
            State(state),
            Json(suggest_body("المزة", "وسط البلد")),
        )
        .await
        .unwrap();

        assert!(resp.reason.is_none());
        assert_eq!(resp.direct.len(), 1);
        assert_eq!(resp.direct[0].route, "خط المزة جبل");
        assert_eq!(resp.direct[0].price, 2500);
        assert_eq!(resp.direct[0].duration, "20 دقيقة");
        assert_eq!(resp.direct[0].stations.first().map(String::as_str), Some("المزة"));
    }

    #[tokio::test]
    async fn suggest_returns_the_transfer_trip() {
        let state = test_state();
        let Json(resp) = suggest_routes(
            State(state),
            Json(suggest_body("جادات سلمية", "وسط البلد")),
        )
        .await
        .unwrap();

        assert!(resp.direct.is_empty());
        assert_eq!(resp.transfer.len(), 1);
        let t = &resp.transfer[0];
        assert_eq!(t.route1, "خط جادات سلمية");
        assert_eq!(t.route2, "خط المزة جبل");
        assert_eq!(t.transfer_station, "ساحة المحافظة");
        assert_eq!(t.price, 5500);
        assert_eq!(t.rating, Some(4.2));
    }

    #[tokio::test]
    async fn unknown_endpoint_is_an_empty_answer_not_an_error() {
        let state = test_state();
        let Json(resp) = suggest_routes(
            State(state),
            Json(suggest_body("مدينة أخرى تماما", "وسط البلد")),
        )
        .await
        .unwrap();

        assert!(resp.direct.is_empty() && resp.transfer.is_empty());
        assert_eq!(resp.reason, Some("not_found"));
    }

    #[tokio::test]
    async fn blank_endpoint_is_a_bad_request() {
        let state = test_state();
        let result = suggest_routes(State(state), Json(suggest_body("", "وسط البلد"))).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn rating_round_trips_through_the_aggregate() {
        let state = test_state();
        let Json(resp) = rate_trip(
            State(state.clone()),
            Json(RateRequest {
                trip_id: "خط العباسيين".to_string(),
                rating: 5.0,
                comment: Some("سائق محترم".to_string()),
            }),
        )
        .await
        .unwrap();

        // Seeded 4.1, one new 5.0 vote.
        let aggregate = resp.rating.unwrap();
        assert!((aggregate - 4.55).abs() < 1e-6);
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let state = test_state();
        let result = rate_trip(
            State(state),
            Json(RateRequest {
                trip_id: "خط العباسيين".to_string(),
                rating: 0.0,
                comment: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn nearby_orders_by_distance() {
        let state = test_state();
        let Json(resp) = nearby_stations(
            State(state),
            Query(NearbyQuery {
                latitude: 33.5067,
                longitude: 36.2734,
                radius: Some(2_000.0),
            }),
        )
        .await
        .unwrap();

        assert!(!resp.stations.is_empty());
        assert_eq!(resp.stations[0].distance_m, 0.0);
        for pair in resp.stations.windows(2) {
            assert!(pair[0].distance_m <= pair[1].distance_m);
        }
    }

    #[tokio::test]
    async fn nearby_rejects_bad_input() {
        let state = test_state();
        let bad_coord = nearby_stations(
            State(state.clone()),
            Query(NearbyQuery {
                latitude: 95.0,
                longitude: 36.0,
                radius: None,
            }),
        )
        .await;
        assert!(matches!(bad_coord, Err(AppError::BadRequest { .. })));

        let bad_radius = nearby_stations(
            State(state),
            Query(NearbyQuery {
                latitude: 33.5,
                longitude: 36.3,
                radius: Some(-5.0),
            }),
        )
        .await;
        assert!(matches!(bad_radius, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn reverse_geocode_falls_back_to_the_area_index() {
        let state = test_state();
        let Json(resp) = reverse_geocode(
            State(state),
            Query(ReverseQuery {
                latitude: 33.5234,
                longitude: 36.2456,
            }),
        )
        .await
        .unwrap();

        assert_eq!(resp.source, "area");
        assert!(!resp.name.is_empty());
    }

    #[tokio::test]
    async fn list_routes_includes_colors_and_stations() {
        let state = test_state();
        let Json(resp) = list_routes(State(state)).await;

        assert_eq!(resp.routes.len(), 5);
        let mazzeh = resp
            .routes
            .iter()
            .find(|r| r.name == "خط المزة جبل")
            .unwrap();
        assert_eq!(mazzeh.color.as_deref(), Some("#2563eb"));
        assert!(mazzeh.bidirectional);
        assert_eq!(mazzeh.stations.len(), 5);
    }
}
