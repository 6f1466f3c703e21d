//! Repository trait definitions for testability and dependency injection.
//!
//! This module provides trait-based abstractions over database operations,
//! enabling better testing through mock implementations and dependency
//! injection. All inputs reach the store as bound parameters; nothing is ever
//! concatenated into SQL text.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::ranking::errors::RankingResult;
use crate::ranking::models::{LeaderboardEntry, PlayerRank, TournamentId};
use crate::settlement::errors::SettlementResult;

/// Trait for read-only report queries
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Fetch all players with their rank by balance, highest balance first
    async fn list_player_ranks(&self) -> RankingResult<Vec<PlayerRank>>;

    /// Fetch one tournament's participation rows with their rank by points
    async fn tournament_leaderboard(
        &self,
        tournament_id: TournamentId,
    ) -> RankingResult<Vec<LeaderboardEntry>>;

    /// Check that the store is reachable
    async fn ping(&self) -> RankingResult<()>;
}

/// Trait for the settlement procedure call
#[async_trait]
pub trait SettlementRepository: Send + Sync {
    /// Invoke the opaque settlement procedure for one tournament
    async fn settle_tournament(&self, tournament_id: TournamentId) -> SettlementResult<()>;
}

/// Default PostgreSQL implementation of `ReportRepository`
pub struct PgReportRepository {
    pool: Arc<PgPool>,
}

impl PgReportRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn list_player_ranks(&self) -> RankingResult<Vec<PlayerRank>> {
        let rows = sqlx::query(
            "SELECT player_id, first_name, last_name, email, balance,
                    RANK() OVER (ORDER BY balance DESC) AS rank
             FROM player",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .iter()
            .map(|r| PlayerRank {
                player_id: r.get("player_id"),
                first_name: r.get("first_name"),
                last_name: r.get("last_name"),
                email: r.get("email"),
                balance: r.get("balance"),
                rank: r.get("rank"),
            })
            .collect())
    }

    async fn tournament_leaderboard(
        &self,
        tournament_id: TournamentId,
    ) -> RankingResult<Vec<LeaderboardEntry>> {
        let rows = sqlx::query(
            "SELECT tournament_id, player_id,
                    RANK() OVER (ORDER BY points DESC) AS rank
             FROM player_tournament
             WHERE tournament_id = $1",
        )
        .bind(tournament_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .iter()
            .map(|r| LeaderboardEntry {
                tournament_id: r.get("tournament_id"),
                player_id: r.get("player_id"),
                rank: r.get("rank"),
            })
            .collect())
    }

    async fn ping(&self) -> RankingResult<()> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

/// Default PostgreSQL implementation of `SettlementRepository`
pub struct PgSettlementRepository {
    pool: Arc<PgPool>,
}

impl PgSettlementRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettlementRepository for PgSettlementRepository {
    async fn settle_tournament(&self, tournament_id: TournamentId) -> SettlementResult<()> {
        // One call, one tournament. The procedure's internals are owned by
        // the database; its success or failure is the whole contract here.
        sqlx::query("CALL sp_settle_tournament($1)")
            .bind(tournament_id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
