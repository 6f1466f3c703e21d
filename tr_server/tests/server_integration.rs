//! Integration tests for the HTTP API.
//!
//! The router is exercised end to end through `tower::ServiceExt::oneshot`
//! with in-memory repository doubles, so no database is required. The
//! settlement double counts procedure calls, which lets tests prove that
//! invalid input never reaches the store.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tournament_ranks::db::{ReportRepository, SettlementRepository};
use tournament_ranks::ranking::{RankingResult, competition_ranks};
use tournament_ranks::settlement::{SettlementError, SettlementResult};
use tournament_ranks::{LeaderboardEntry, PlayerRank, RankingManager, SettlementManager};
use tower::ServiceExt; // For `oneshot` method

// ============================================================================
// Test Doubles
// ============================================================================

/// Report double over plain vectors, ranked with the same competition
/// semantics as the SQL `RANK()` queries.
#[derive(Default)]
struct InMemoryReports {
    /// (player_id, first_name, balance)
    players: Vec<(i64, &'static str, Decimal)>,
    /// (tournament_id, player_id, points)
    participation: Vec<(i64, i64, i64)>,
}

#[async_trait]
impl ReportRepository for InMemoryReports {
    async fn list_player_ranks(&self) -> RankingResult<Vec<PlayerRank>> {
        Ok(competition_ranks(self.players.clone(), |(_, _, balance)| *balance)
            .into_iter()
            .map(|((player_id, first_name, balance), rank)| PlayerRank {
                player_id,
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                email: format!("{}@example.com", first_name.to_lowercase()),
                balance,
                rank,
            })
            .collect())
    }

    async fn tournament_leaderboard(
        &self,
        tournament_id: i64,
    ) -> RankingResult<Vec<LeaderboardEntry>> {
        let rows: Vec<(i64, i64, i64)> = self
            .participation
            .iter()
            .filter(|(tid, _, _)| *tid == tournament_id)
            .copied()
            .collect();

        Ok(competition_ranks(rows, |(_, _, points)| *points)
            .into_iter()
            .map(|((tournament_id, player_id, _), rank)| LeaderboardEntry {
                tournament_id,
                player_id,
                rank,
            })
            .collect())
    }

    async fn ping(&self) -> RankingResult<()> {
        Ok(())
    }
}

/// Settlement double that counts procedure calls and optionally fails.
struct CountingSettlement {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingSettlement {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettlementRepository for CountingSettlement {
    async fn settle_tournament(&self, _tournament_id: i64) -> SettlementResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(SettlementError::Procedure(sqlx::Error::Protocol(
                "sp_settle_tournament raised".to_string(),
            )))
        } else {
            Ok(())
        }
    }
}

/// Helper to build the router over the doubles
fn test_app(reports: InMemoryReports, settlement: Arc<CountingSettlement>) -> axum::Router {
    let state = tr_server::api::AppState {
        ranking: Arc::new(RankingManager::new(Arc::new(reports))),
        settlement: Arc::new(SettlementManager::new(settlement)),
    };
    tr_server::api::create_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = test_app(InMemoryReports::default(), CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

// ============================================================================
// Player Ranks Tests
// ============================================================================

#[tokio::test]
async fn test_player_ranks_empty_store_is_200_with_empty_array() {
    let app = test_app(InMemoryReports::default(), CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/playerRanks")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_player_ranks_ties_share_rank() {
    let reports = InMemoryReports {
        players: vec![
            (1, "Ada", dec!(100.00)),
            (2, "Grace", dec!(100.00)),
            (3, "Edsger", dec!(50.00)),
        ],
        participation: Vec::new(),
    };
    let app = test_app(reports, CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/playerRanks")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    // The two tied balances share rank 1, the next distinct balance resumes
    // at its position.
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["rank"], 1);
    assert_eq!(entries[2]["rank"], 3);
    assert_eq!(entries[2]["playerId"], 3);
}

#[tokio::test]
async fn test_player_ranks_wire_format_is_camel_case() {
    let reports = InMemoryReports {
        players: vec![(7, "Ada", dec!(12.50))],
        participation: Vec::new(),
    };
    let app = test_app(reports, CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/playerRanks")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    let entry = &body.as_array().unwrap()[0];

    assert_eq!(entry["playerId"], 7);
    assert_eq!(entry["firstName"], "Ada");
    assert_eq!(entry["lastName"], "Tester");
    assert_eq!(entry["email"], "ada@example.com");
    assert_eq!(entry["balance"], "12.50");
    assert_eq!(entry["rank"], 1);
}

// ============================================================================
// Leaderboard Tests
// ============================================================================

#[tokio::test]
async fn test_leaderboard_unknown_tournament_is_200_with_empty_array() {
    let reports = InMemoryReports {
        players: Vec::new(),
        participation: vec![(1, 10, 300)],
    };
    let app = test_app(reports, CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/tournamentLeaderboardReport/99")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_leaderboard_ranks_by_points_scoped_to_tournament() {
    let reports = InMemoryReports {
        players: Vec::new(),
        participation: vec![
            (1, 10, 300),
            (1, 11, 200),
            (1, 12, 200),
            (1, 13, 50),
            // Another tournament's rows must not leak in.
            (2, 10, 999),
        ],
    };
    let app = test_app(reports, CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/tournamentLeaderboardReport/1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 4);

    for entry in entries {
        assert_eq!(entry["tournamentId"], 1);
    }

    assert_eq!(entries[0]["playerId"], 10);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["rank"], 2);
    assert_eq!(entries[2]["rank"], 2);
    assert_eq!(entries[3]["rank"], 4);
}

#[tokio::test]
async fn test_leaderboard_rejects_non_numeric_id() {
    let app = test_app(InMemoryReports::default(), CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/tournamentLeaderboardReport/not-a-number")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().len() > 0);
}

// ============================================================================
// Settlement Tests
// ============================================================================

#[tokio::test]
async fn test_settle_tournament_success() {
    let settlement = CountingSettlement::succeeding();
    let app = test_app(InMemoryReports::default(), settlement.clone());

    let request = Request::builder()
        .method("PUT")
        .uri("/settleTournament/3")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Tournament settled.");
    assert_eq!(settlement.call_count(), 1);
}

#[tokio::test]
async fn test_settle_rejects_non_numeric_id_before_any_store_call() {
    let settlement = CountingSettlement::succeeding();
    let app = test_app(InMemoryReports::default(), settlement.clone());

    let request = Request::builder()
        .method("PUT")
        .uri("/settleTournament/abc")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().len() > 0);
    assert_eq!(settlement.call_count(), 0, "store must not be called");
}

#[tokio::test]
async fn test_settle_rejects_non_positive_ids() {
    for bad_id in ["0", "-7"] {
        let settlement = CountingSettlement::succeeding();
        let app = test_app(InMemoryReports::default(), settlement.clone());

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/settleTournament/{bad_id}"))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(settlement.call_count(), 0);
    }
}

#[tokio::test]
async fn test_settle_failure_returns_500_and_server_keeps_serving() {
    let settlement = CountingSettlement::failing();
    let app = test_app(InMemoryReports::default(), settlement.clone());

    let request = Request::builder()
        .method("PUT")
        .uri("/settleTournament/3")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().len() > 0);
    assert_eq!(settlement.call_count(), 1, "exactly one attempt, no retry");

    // The process keeps serving after a failed settlement.
    let request = Request::builder()
        .uri("/playerRanks")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_404_for_invalid_endpoint() {
    let app = test_app(InMemoryReports::default(), CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/api/invalid/endpoint")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settle_requires_put_method() {
    let app = test_app(InMemoryReports::default(), CountingSettlement::succeeding());

    let request = Request::builder()
        .method("GET")
        .uri("/settleTournament/3")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// CORS Tests
// ============================================================================

#[tokio::test]
async fn test_cors_headers_present() {
    let app = test_app(InMemoryReports::default(), CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS headers should be present"
    );
}

// ============================================================================
// Request ID Tests
// ============================================================================

#[tokio::test]
async fn test_request_id_propagates_to_response() {
    let app = test_app(InMemoryReports::default(), CountingSettlement::succeeding());

    let request = Request::builder()
        .uri("/playerRanks")
        .header("x-request-id", "itest-42")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "itest-42");
}

// ============================================================================
// Concurrent Request Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_reports() {
    let reports = InMemoryReports {
        players: vec![(1, "Ada", dec!(10.00))],
        participation: vec![(1, 1, 5)],
    };
    let app = test_app(reports, CountingSettlement::succeeding());

    let mut handles = Vec::new();

    for i in 0..10 {
        let app_clone = app.clone();
        let uri = if i % 2 == 0 {
            "/playerRanks".to_string()
        } else {
            "/tournamentLeaderboardReport/1".to_string()
        };
        let handle = tokio::spawn(async move {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            app_clone.oneshot(request).await
        });
        handles.push(handle);
    }

    let mut success_count = 0;
    for handle in handles {
        let response = handle.await.expect("Task should complete").unwrap();
        if response.status() == StatusCode::OK {
            success_count += 1;
        }
    }

    assert_eq!(success_count, 10, "All concurrent requests should succeed");
}
