//! Ranking manager over an injected report repository.

use super::errors::{RankingError, RankingResult};
use super::models::{LeaderboardEntry, PlayerRank, TournamentId};
use crate::db::repository::ReportRepository;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Ranking manager
///
/// Both views are pure reads: safe to retry, safe to run concurrently with
/// each other and with settlements. A reader may observe a rank snapshot that
/// is stale relative to a settlement committing at the same time.
pub struct RankingManager {
    repository: Arc<dyn ReportRepository>,
    report_timeout: Duration,
}

impl RankingManager {
    /// Create a new ranking manager
    ///
    /// # Arguments
    ///
    /// * `repository` - Report repository (Postgres in production, a double in tests)
    ///
    /// # Returns
    ///
    /// * `RankingManager` - New ranking manager instance
    ///
    /// The read timeout defaults to 10 seconds and can be tuned with the
    /// `REPORT_TIMEOUT_SECS` environment variable.
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        let report_timeout_secs = std::env::var("REPORT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            repository,
            report_timeout: Duration::from_secs(report_timeout_secs),
        }
    }

    /// Create a manager with an explicit read timeout
    pub fn with_timeout(repository: Arc<dyn ReportRepository>, report_timeout: Duration) -> Self {
        Self {
            repository,
            report_timeout,
        }
    }

    /// All players ranked by balance, highest first.
    ///
    /// Equal balances share a rank and the next distinct balance resumes at
    /// its position; the order among tied players is undefined. An empty
    /// player table yields an empty vector, not an error.
    ///
    /// # Returns
    ///
    /// * `RankingResult<Vec<PlayerRank>>` - Ranked players or error
    pub async fn player_ranks(&self) -> RankingResult<Vec<PlayerRank>> {
        self.bounded(self.repository.list_player_ranks())
            .await
            .map_err(|err| {
                log::error!("listing player ranks: {err}");
                err
            })
    }

    /// One tournament's participants ranked by points, highest first.
    ///
    /// Rank semantics match [`player_ranks`](Self::player_ranks). A
    /// tournament with no participants — including an id that was never seen
    /// — yields an empty vector, not an error.
    ///
    /// # Arguments
    ///
    /// * `tournament_id` - Tournament to report on
    ///
    /// # Returns
    ///
    /// * `RankingResult<Vec<LeaderboardEntry>>` - Ranked participants or error
    pub async fn tournament_leaderboard(
        &self,
        tournament_id: TournamentId,
    ) -> RankingResult<Vec<LeaderboardEntry>> {
        self.bounded(self.repository.tournament_leaderboard(tournament_id))
            .await
            .map_err(|err| {
                log::error!("leaderboard for tournament {tournament_id}: {err}");
                err
            })
    }

    /// Check that the store behind the reports is reachable
    pub async fn ping(&self) -> RankingResult<()> {
        self.bounded(self.repository.ping()).await
    }

    /// Bound a read with the configured timeout.
    async fn bounded<T>(&self, fut: impl Future<Output = RankingResult<T>>) -> RankingResult<T> {
        match tokio::time::timeout(self.report_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(RankingError::Timeout(self.report_timeout.as_secs())),
        }
    }
}
