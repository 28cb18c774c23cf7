//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::domain::{Place, RouteCandidate};
use crate::pipeline::PlanError;
use crate::store::{Choice, SavedRoute, StoreError, now_secs};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes", get(route_candidates))
        .route("/api/routes/user", get(user_routes))
        .route("/api/routes/saved/:route_id", get(saved_route))
        .route("/api/choose", post(choose_route))
        .route("/api/stats/city-savings", get(city_savings))
        .route("/api/stats/user-savings", get(user_savings))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Route candidates between two places.
async fn route_candidates(
    State(state): State<AppState>,
    Query(req): Query<RoutesQuery>,
) -> Result<Json<Vec<RouteCandidate>>, AppError> {
    let origin = req.origin.as_deref().and_then(Place::parse);
    let dest = req.dest.as_deref().and_then(Place::parse);
    let (Some(origin), Some(dest)) = (origin, dest) else {
        return Err(AppError::BadRequest {
            message: "origin and dest required".to_string(),
        });
    };

    let candidates = state
        .pipeline
        .plan(&origin, &dest, &req.mode_list())
        .await?;

    Ok(Json(candidates))
}

/// Persist a chosen route and record the choice.
async fn choose_route(
    State(state): State<AppState>,
    Json(req): Json<ChooseRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let route_id = req.route_id.filter(|id| !id.trim().is_empty());
    let (Some(route_id), Some(route)) = (route_id, req.route) else {
        return Err(AppError::BadRequest {
            message: "routeId or route data missing".to_string(),
        });
    };

    let now = now_secs()?;
    let saved = route.into_saved(route_id.clone(), req.user_id.clone(), now);
    if state.store.save_route(saved).await? {
        info!(route_id = %route_id, "saved chosen route");
    }

    state
        .store
        .record_choice(Choice {
            user_id: req.user_id,
            route_id,
            chosen_at_secs: now,
        })
        .await?;

    Ok(Json(StatusResponse { status: "ok" }))
}

/// Routes saved by a user, newest first.
async fn user_routes(
    State(state): State<AppState>,
    Query(req): Query<UserQuery>,
) -> Result<Json<Vec<SavedRoute>>, AppError> {
    let user_id = required_user(req)?;
    Ok(Json(state.store.routes_for_user(&user_id).await))
}

/// A single saved route.
async fn saved_route(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<SavedRoute>, AppError> {
    state
        .store
        .get(&route_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("route not found: {route_id}"),
        })
}

/// Total emissions over every saved route.
async fn city_savings(State(state): State<AppState>) -> Json<CitySavingsResponse> {
    let totals = state.store.city_totals().await;
    Json(CitySavingsResponse {
        total_emission_g: totals.total_emission_g,
    })
}

/// Total emissions over one user's saved routes.
async fn user_savings(
    State(state): State<AppState>,
    Query(req): Query<UserQuery>,
) -> Result<Json<UserSavingsResponse>, AppError> {
    let user_id = required_user(req)?;
    let totals = state.store.user_totals(&user_id).await;

    Ok(Json(UserSavingsResponse {
        user_id,
        total_emission_g: totals.total_emission_g,
        route_count: totals.route_count,
    }))
}

fn required_user(req: UserQuery) -> Result<String, AppError> {
    req.user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "userId required".to_string(),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidLocation(_) => AppError::BadRequest {
                message: "invalid origin or destination".to_string(),
            },
            PlanError::MalformedRequest(_) => AppError::BadRequest {
                message: "origin and dest required".to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, CachedGeocoder};
    use crate::geocode::{NominatimClient, NominatimConfig};
    use crate::pipeline::{Pipeline, PipelineConfig};
    use crate::predictor::{MlClient, MlConfig};
    use crate::store::RouteStore;

    /// State whose upstreams are all unreachable, so every step falls back.
    fn offline_state() -> AppState {
        let geocoder = NominatimClient::new(
            NominatimConfig::new().with_search_url("http://127.0.0.1:9/search"),
        )
        .unwrap();
        let predictor =
            MlClient::new(MlConfig::new("http://127.0.0.1:9/predict").with_timeout(2)).unwrap();
        let pipeline = Pipeline::new(
            CachedGeocoder::new(geocoder, &CacheConfig::default()),
            None,
            predictor,
            PipelineConfig::default().without_delays(),
        );
        AppState::new(pipeline, RouteStore::in_memory())
    }

    fn bad_request_message(err: AppError) -> String {
        match err {
            AppError::BadRequest { message } => message,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    fn choose_body(json: serde_json::Value) -> Json<ChooseRequest> {
        Json(serde_json::from_value(json).unwrap())
    }

    #[tokio::test]
    async fn routes_require_origin_and_dest() {
        let query = RoutesQuery {
            origin: Some("12.9716,77.5946".to_string()),
            ..Default::default()
        };
        let err = route_candidates(State(offline_state()), Query(query))
            .await
            .unwrap_err();

        assert_eq!(bad_request_message(err), "origin and dest required");
    }

    #[tokio::test]
    async fn routes_with_coordinates_fall_back_offline() {
        let query = RoutesQuery {
            origin: Some("12.9716,77.5946".to_string()),
            dest: Some("12.9352, 77.6245".to_string()),
            modes: Some("driving-car,cycling-regular".to_string()),
        };
        let Json(candidates) = route_candidates(State(offline_state()), Query(query))
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].distance_km, 6.222);
        assert_eq!(candidates[0].emission_g, 1194.54);
        assert_eq!(candidates[1].emission_g, 0.0);
        assert!(candidates.iter().all(|c| c.provenance.is_degraded()));
    }

    #[tokio::test]
    async fn unresolvable_place_is_bad_request() {
        let query = RoutesQuery {
            origin: Some("Nowhere In Particular".to_string()),
            dest: Some("12.9352,77.6245".to_string()),
            modes: None,
        };
        let err = route_candidates(State(offline_state()), Query(query))
            .await
            .unwrap_err();

        assert_eq!(bad_request_message(err), "invalid origin or destination");
    }

    #[tokio::test]
    async fn choose_requires_route_and_id() {
        let state = offline_state();

        let err = choose_route(
            State(state.clone()),
            choose_body(serde_json::json!({"routeId": "r1"})),
        )
        .await
        .unwrap_err();
        assert_eq!(bad_request_message(err), "routeId or route data missing");

        let err = choose_route(
            State(state),
            choose_body(serde_json::json!({"route": {"mode": "bus"}})),
        )
        .await
        .unwrap_err();
        assert_eq!(bad_request_message(err), "routeId or route data missing");
    }

    #[tokio::test]
    async fn choose_saves_once_and_feeds_stats() {
        let state = offline_state();
        let body = || {
            choose_body(serde_json::json!({
                "userId": "u1",
                "routeId": "r1",
                "route": {"mode": "driving-car", "distance_km": 6.222, "emission_g": 1194.54}
            }))
        };

        for _ in 0..2 {
            let Json(resp) = choose_route(State(state.clone()), body()).await.unwrap();
            assert_eq!(resp.status, "ok");
        }

        let Json(city) = city_savings(State(state.clone())).await;
        assert_eq!(city.total_emission_g, 1194.54);

        let Json(user) = user_savings(
            State(state.clone()),
            Query(UserQuery {
                user_id: Some("u1".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(user.route_count, 1);
        assert_eq!(user.total_emission_g, 1194.54);

        let Json(routes) = user_routes(
            State(state.clone()),
            Query(UserQuery {
                user_id: Some("u1".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].origin_name, "Unknown Origin");

        assert_eq!(state.store.choices_for_user("u1").await.len(), 2);

        let Json(saved) = saved_route(State(state.clone()), Path("r1".to_string()))
            .await
            .unwrap();
        assert_eq!(saved.mode, "driving-car");

        let err = saved_route(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn user_endpoints_require_user() {
        let state = offline_state();

        let err = user_savings(State(state.clone()), Query(UserQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(bad_request_message(err), "userId required");

        let err = user_routes(State(state), Query(UserQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(bad_request_message(err), "userId required");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(resp) = health().await;
        assert_eq!(resp.status, "ok");
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.timestamp).is_ok());
    }

    #[test]
    fn error_status_codes() {
        let resp = AppError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(StoreError::Clock).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn router_builds() {
        let _router = create_router(offline_state());
    }
}
