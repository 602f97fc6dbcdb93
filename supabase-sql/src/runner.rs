//! The bootstrap run: read script, connect, execute, close
//!
//! Every stage failure is fatal. The only cleanup is closing the session,
//! which happens whether or not the script succeeded.

use crate::config::ConnectionConfig;
use crate::error::BootstrapError;
use crate::script::read_script;
use crate::session::{Connector, SqlSession};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

pub const CONNECTING: &str = "Connecting to Supabase Postgres...";
pub const EXECUTING: &str = "Executing SQL script...";
pub const DONE: &str = "Done.";

/// User-facing progress lines, written to `out` (stdout in the binary).
pub struct Progress<W: Write> {
    out: W,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, msg: &str) -> Result<(), BootstrapError> {
        writeln!(self.out, "{}", msg)
            .and_then(|_| self.out.flush())
            .map_err(BootstrapError::Progress)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub path: PathBuf,
    pub script_bytes: usize,
    pub rows_affected: u64,
    pub elapsed: Duration,
}

/// Run the script at `sql_path` against the configured database.
#[instrument(skip_all, fields(path = %sql_path.display(), host = %config.host, database = %config.database))]
pub async fn run<C, W>(
    connector: &C,
    config: &ConnectionConfig,
    sql_path: &Path,
    progress: &mut Progress<W>,
) -> Result<RunReport, BootstrapError>
where
    C: Connector,
    W: Write,
{
    let start = Instant::now();

    let script = read_script(sql_path)?;
    info!(bytes = script.len(), "SQL script loaded");

    progress.line(CONNECTING)?;
    let mut session = connector
        .connect(config)
        .await
        .map_err(|source| BootstrapError::Connect {
            host: config.host.clone(),
            port: config.port,
            source,
        })?;
    info!(port = config.port, sslmode = %config.ssl_mode, "Connected");

    let executed = match progress.line(EXECUTING) {
        Ok(()) => session
            .execute_batch(script.as_str())
            .await
            .map_err(BootstrapError::Execute),
        Err(e) => Err(e),
    };

    // Release the connection before looking at the outcome
    let closed = session.close().await.map_err(BootstrapError::Close);

    let rows_affected = match (executed, closed) {
        (Ok(rows), Ok(())) => rows,
        (Err(e), Ok(())) => return Err(e),
        (Ok(_), Err(e)) => return Err(e),
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "Connection close also failed");
            return Err(e);
        }
    };

    progress.line(DONE)?;

    let report = RunReport {
        path: script.path().to_path_buf(),
        script_bytes: script.len(),
        rows_affected,
        elapsed: start.elapsed(),
    };

    info!(
        rows_affected = report.rows_affected,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "SQL script applied"
    );

    Ok(report)
}

/// Log a failed run with its stage before handing the error back.
pub fn log_failure(err: &BootstrapError) {
    let cause = std::error::Error::source(err)
        .map(|s| s.to_string())
        .unwrap_or_default();
    error!(phase = err.phase(), error = %err, cause = %cause, "Bootstrap failed");
}
