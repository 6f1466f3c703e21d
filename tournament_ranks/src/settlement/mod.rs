//! Settlement module triggering the store-owned settlement procedure.
//!
//! Settlement finalizes one tournament's outcome. The procedure itself lives
//! in the database and is opaque to this layer: it consumes a tournament id,
//! mutates balances and points for that tournament, and reports success or
//! failure. This layer issues exactly one call per request and never retries.

pub mod errors;
pub mod manager;

pub use errors::{SettlementError, SettlementResult};
pub use manager::SettlementManager;
