//! Ranking data models.
//!
//! Field names serialize in camelCase to match the external JSON contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = i64;

/// Player ID type
pub type PlayerId = i64;

/// A player with their global rank by balance.
///
/// `balance` is a decimal so monetary amounts never pass through binary
/// floating point. `rank` is derived at query time and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRank {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub balance: Decimal,
    pub rank: i64,
}

/// A tournament participant with their rank by points within that tournament.
///
/// Points themselves are not part of the projection; only the derived rank
/// leaves this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub rank: i64,
}

/// Assign competition ranks over `rows`, highest score first.
///
/// Equal scores share a rank and the next distinct score resumes at its
/// position, so scores `[100, 100, 50]` rank as `[1, 1, 3]` — the same
/// semantics as SQL `RANK()`. The relative order of tied rows is unspecified;
/// callers must not rely on it.
pub fn competition_ranks<T, S, F>(mut rows: Vec<T>, score: F) -> Vec<(T, i64)>
where
    S: Ord + Copy,
    F: Fn(&T) -> S,
{
    rows.sort_by(|a, b| score(b).cmp(&score(a)));

    let mut ranked = Vec::with_capacity(rows.len());
    let mut current_rank = 0;
    let mut last_score: Option<S> = None;

    for (position, row) in rows.into_iter().enumerate() {
        let row_score = score(&row);
        if last_score != Some(row_score) {
            current_rank = position as i64 + 1;
            last_score = Some(row_score);
        }
        ranked.push((row, current_rank));
    }

    ranked
}
