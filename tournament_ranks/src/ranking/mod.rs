//! Ranking module providing read-only views over players and tournaments.
//!
//! This module implements:
//! - Global player ranking by balance (competition ranking, ties share a rank)
//! - Per-tournament leaderboards ranked by points
//! - Bounded query timeouts for every read path
//!
//! Ranks are always computed at query time from current data and never
//! stored or cached.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tournament_ranks::db::{Database, PgReportRepository};
//! use tournament_ranks::ranking::RankingManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let pool = Arc::new(db.pool().clone());
//!     let ranking = RankingManager::new(Arc::new(PgReportRepository::new(pool)));
//!
//!     for entry in ranking.tournament_leaderboard(42).await? {
//!         println!("player {} holds rank {}", entry.player_id, entry.rank);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{RankingError, RankingResult};
pub use manager::RankingManager;
pub use models::{LeaderboardEntry, PlayerId, PlayerRank, TournamentId, competition_ranks};
