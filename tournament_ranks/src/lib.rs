//! # Tournament Ranks
//!
//! A ranking and settlement library over PostgreSQL for a player/tournament
//! schema. The database owns the hard parts: ranks come from `RANK()` window
//! queries and settlement is an opaque stored procedure. This crate binds
//! parameters, runs the query or procedure call, and maps rows to typed
//! records.
//!
//! ## Core Modules
//!
//! - [`db`]: connection pooling, schema migration, and repository traits with
//!   their PostgreSQL implementations
//! - [`ranking`]: read-only ranking views (global player ranks, per-tournament
//!   leaderboards)
//! - [`settlement`]: the settlement trigger for a single tournament
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tournament_ranks::db::{Database, DatabaseConfig, PgReportRepository};
//! use tournament_ranks::ranking::RankingManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let pool = Arc::new(db.pool().clone());
//!
//!     let ranking = RankingManager::new(Arc::new(PgReportRepository::new(pool)));
//!     let ranks = ranking.player_ranks().await?;
//!     println!("{} ranked players", ranks.len());
//!
//!     Ok(())
//! }
//! ```

/// Connection pooling, migrations, and repository implementations.
pub mod db;

/// Read-only ranking views.
pub mod ranking;

/// Settlement trigger for a single tournament.
pub mod settlement;

pub use db::{Database, DatabaseConfig};
pub use ranking::{LeaderboardEntry, PlayerRank, RankingManager};
pub use settlement::SettlementManager;
