//! Settlement API handler.
//!
//! # Examples
//!
//! ```bash
//! curl -X PUT http://localhost:8080/settleTournament/3
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{AppState, ErrorResponse, MessageResponse, parse_positive_id};
use crate::metrics;

/// Run the settlement procedure for one tournament.
///
/// The store owns the procedure; this handler validates the id, triggers the
/// call once, and reports the outcome. There is no retry and no
/// already-settled guard — invoking settlement twice is between the caller
/// and the procedure.
///
/// # Path Parameters
///
/// - `id`: Tournament ID (positive integer)
///
/// # Response
///
/// Returns `200 OK` on success:
/// ```json
/// {"message": "Tournament settled."}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: id is not a positive integer (the store is not called)
/// - `500 Internal Server Error`: the procedure failed or the store was
///   unreachable; the body carries `{"error": ...}`
pub async fn settle_tournament(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let tournament_id = parse_positive_id(&id)?;

    match state.settlement.settle(tournament_id).await {
        Ok(()) => {
            metrics::settlements_total(true);
            Ok(Json(MessageResponse {
                message: "Tournament settled.".to_string(),
            }))
        }
        Err(err) => {
            metrics::settlements_total(false);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.client_message(),
                }),
            ))
        }
    }
}
