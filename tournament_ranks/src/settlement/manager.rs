//! Settlement manager over an injected settlement repository.

use super::errors::SettlementResult;
use crate::db::repository::SettlementRepository;
use crate::ranking::models::TournamentId;
use std::sync::Arc;

/// Settlement manager
pub struct SettlementManager {
    repository: Arc<dyn SettlementRepository>,
}

impl SettlementManager {
    /// Create a new settlement manager
    ///
    /// # Arguments
    ///
    /// * `repository` - Settlement repository (Postgres in production, a double in tests)
    ///
    /// # Returns
    ///
    /// * `SettlementManager` - New settlement manager instance
    pub fn new(repository: Arc<dyn SettlementRepository>) -> Self {
        Self { repository }
    }

    /// Settle one tournament.
    ///
    /// Issues exactly one procedure call. The call is never retried —
    /// settlement has side effects that may be unsafe to duplicate — and
    /// idempotence is not assumed. Whether a second settlement of the same
    /// tournament is rejected or tolerated is the procedure's contract, not
    /// this layer's; no existence or already-settled check happens here.
    ///
    /// # Arguments
    ///
    /// * `tournament_id` - Tournament to settle
    ///
    /// # Returns
    ///
    /// * `SettlementResult<()>` - Ok on success, error with the underlying cause
    pub async fn settle(&self, tournament_id: TournamentId) -> SettlementResult<()> {
        log::info!("settling tournament {tournament_id}");
        self.repository
            .settle_tournament(tournament_id)
            .await
            .map_err(|err| {
                log::error!("settling tournament {tournament_id}: {err}");
                err
            })
    }
}
