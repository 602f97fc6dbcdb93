//! Apply docs/supabase_init.sql to the Supabase Postgres instance
//!
//! Takes no arguments. Connection settings come from the libpq `PG*`
//! variables (PGPASSWORD is required); `.env.local` at the repo root is
//! read first if present.

use anyhow::Result;
use common::{init_logging, ProcessEnv};
use std::io;
use supabase_sql::runner::log_failure;
use supabase_sql::{
    load_env_files, repo_root, resolve_init_sql, run, ConnectionConfig, PgConnector, Progress,
};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _guard = init_logging("run-supabase-sql");

    load_env_files(&repo_root());

    let config = ConnectionConfig::from_env()?;
    let sql_path = resolve_init_sql(&ProcessEnv);

    info!(
        path = %sql_path.display(),
        host = %config.host,
        port = config.port,
        database = %config.database,
        user = %config.user,
        "Running bootstrap script"
    );

    let mut progress = Progress::new(io::stdout());

    if let Err(e) = run(&PgConnector, &config, &sql_path, &mut progress).await {
        log_failure(&e);
        return Err(e.into());
    }

    Ok(())
}
