//! HTTP API for the ranking and settlement service.
//!
//! # Endpoints Overview
//!
//! - `PUT /settleTournament/{id}` - Run the settlement procedure for one tournament
//! - `GET /playerRanks` - All players ranked by balance
//! - `GET /tournamentLeaderboardReport/{id}` - One tournament's leaderboard by points
//! - `GET /health` - Server health status
//!
//! Every handler validates its own path parameter before any store call, and
//! every failure is answered with a JSON `{"error": ...}` body — a request
//! that fails never takes the process down with it.

pub mod reports;
pub mod request_id;
pub mod settlement;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tournament_ranks::ranking::TournamentId;
use tournament_ranks::{RankingManager, SettlementManager};
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// The managers are constructed at startup and injected here; handlers never
/// reach for a global store handle, so tests can substitute doubles.
#[derive(Clone)]
pub struct AppState {
    pub ranking: Arc<RankingManager>,
    pub settlement: Arc<SettlementManager>,
}

/// JSON error body, `{"error": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON confirmation body, `{"message": ...}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Arguments
///
/// - `state`: Application state with managers
///
/// # Returns
///
/// Configured Axum router ready to serve requests
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/settleTournament/{id}", put(settlement::settle_tournament))
        .route("/playerRanks", get(reports::player_ranks))
        .route(
            "/tournamentLeaderboardReport/{id}",
            get(reports::tournament_leaderboard),
        )
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parse a path parameter as a positive tournament id.
///
/// Malformed or non-positive input is a client error answered before the
/// store is ever involved.
pub(crate) fn parse_positive_id(
    raw: &str,
) -> Result<TournamentId, (StatusCode, Json<ErrorResponse>)> {
    match raw.parse::<TournamentId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid tournament id: {raw}"),
            }),
        )),
    }
}

/// Health check endpoint for monitoring and load balancers.
///
/// Pings the store through the report repository and returns `200 OK` when
/// reachable, `503 Service Unavailable` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = state.ranking.ping().await.is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
    });

    (status_code, Json(response))
}
