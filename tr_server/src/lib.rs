//! Server crate for the tournament ranking and settlement service.
//!
//! Exposes the HTTP API over [`tournament_ranks`] managers plus the process
//! concerns: configuration, logging, and metrics.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
