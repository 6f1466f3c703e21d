//! Report API handlers: player ranks and tournament leaderboards.
//!
//! Both endpoints are reads with no request body and no authentication.
//! Unknown ids are a valid, empty result — not an error.
//!
//! # Examples
//!
//! ```bash
//! curl http://localhost:8080/playerRanks
//! curl http://localhost:8080/tournamentLeaderboardReport/3
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tournament_ranks::{LeaderboardEntry, PlayerRank};

use super::{AppState, ErrorResponse, parse_positive_id};
use crate::metrics;

/// List all players ranked by balance, highest first.
///
/// # Response
///
/// Returns `200 OK` with an array of players (empty when none exist):
/// ```json
/// [
///   {
///     "playerId": 1,
///     "firstName": "Ada",
///     "lastName": "Lovelace",
///     "email": "ada@example.com",
///     "balance": "100.00",
///     "rank": 1
///   }
/// ]
/// ```
///
/// Players with equal balance share a rank; their relative order is
/// undefined.
///
/// # Errors
///
/// - `500 Internal Server Error`: store unreachable, query failure, or timeout
pub async fn player_ranks(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerRank>>, (StatusCode, Json<ErrorResponse>)> {
    match state.ranking.player_ranks().await {
        Ok(players) => {
            metrics::report_rows("player_ranks", players.len());
            Ok(Json(players))
        }
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: err.client_message(),
            }),
        )),
    }
}

/// Report one tournament's leaderboard, ranked by points.
///
/// # Path Parameters
///
/// - `id`: Tournament ID (positive integer)
///
/// # Response
///
/// Returns `200 OK` with an array of participants. A tournament with no
/// participants — including an id that was never seen — yields `[]`:
/// ```json
/// [
///   {"tournamentId": 3, "playerId": 9, "rank": 1},
///   {"tournamentId": 3, "playerId": 4, "rank": 2}
/// ]
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: id is not a positive integer (the store is not called)
/// - `500 Internal Server Error`: store unreachable, query failure, or timeout
pub async fn tournament_leaderboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LeaderboardEntry>>, (StatusCode, Json<ErrorResponse>)> {
    let tournament_id = parse_positive_id(&id)?;

    match state.ranking.tournament_leaderboard(tournament_id).await {
        Ok(entries) => {
            metrics::report_rows("tournament_leaderboard", entries.len());
            Ok(Json(entries))
        }
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: err.client_message(),
            }),
        )),
    }
}
