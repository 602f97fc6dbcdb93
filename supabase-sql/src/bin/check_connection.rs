//! Connectivity probe for the Supabase Postgres instance
//!
//! Uses the same configuration and TLS policy as `run-supabase-sql`,
//! asks the server for its version, then disconnects. Nothing is modified.

use anyhow::{Context, Result};
use common::init_logging;
use std::time::Instant;
use supabase_sql::{load_env_files, repo_root, ConnectionConfig, Connector, PgConnector, SqlSession};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _guard = init_logging("check-connection");

    load_env_files(&repo_root());

    let config = ConnectionConfig::from_env()?;

    info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        sslmode = %config.ssl_mode,
        "Checking connection"
    );

    let start = Instant::now();
    let mut session = PgConnector
        .connect(&config)
        .await
        .with_context(|| format!("Failed to connect to {}:{}", config.host, config.port))?;

    let version = session.query_scalar("SELECT version()").await;

    if let Err(e) = session.close().await {
        warn!(error = %e, "Failed to close connection");
    }

    let version = version.context("Failed to query server version")?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    info!(elapsed_ms, "Connection OK");
    println!("{}", version);

    Ok(())
}
