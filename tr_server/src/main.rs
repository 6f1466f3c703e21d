//! Tournament ranking and settlement HTTP service.
//!
//! Serves three operations over a PostgreSQL store: global player ranks by
//! balance, per-tournament leaderboards by points, and triggering the
//! store-owned settlement procedure for one tournament.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use pico_args::Arguments;
use tournament_ranks::db::{Database, PgReportRepository, PgSettlementRepository};
use tournament_ranks::{RankingManager, SettlementManager};
use tr_server::{api, config::ServerConfig, logging, metrics};
use tracing::info;

const HELP: &str = "\
Run the tournament ranking and settlement service

USAGE:
  tr_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or composed from DB_* vars]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME
                           Connection parts used when DATABASE_URL is unset
  DB_MAX_CONNECTIONS       Connection pool upper bound
  REPORT_TIMEOUT_SECS      Read query timeout in seconds
  METRICS_BIND             Optional Prometheus exporter address
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)?;
    config.validate()?;

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(Error::msg)?;
        info!("Metrics exporter listening on {metrics_bind}");
    }

    info!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    db.run_migrations()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to apply migrations: {}", e))?;

    info!("Database connected");

    // Wire managers over the Postgres repositories
    let pool = Arc::new(db.pool().clone());
    let ranking = Arc::new(RankingManager::new(Arc::new(PgReportRepository::new(
        pool.clone(),
    ))));
    let settlement = Arc::new(SettlementManager::new(Arc::new(
        PgSettlementRepository::new(pool),
    )));

    let app = api::create_router(api::AppState {
        ranking,
        settlement,
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
