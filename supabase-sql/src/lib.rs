//! Apply the Supabase bootstrap script to a remote Postgres
//!
//! This crate provides:
//! - Connection configuration from `PG*` environment variables
//! - TLS policy (encrypted modes only) and root certificate checks
//! - Script loading and path resolution
//! - A session seam over sqlx, and the runner built on it

pub mod config;
pub mod error;
pub mod paths;
pub mod runner;
pub mod script;
pub mod session;
pub mod ssl;

pub use common::{EnvLookup, ProcessEnv};
pub use config::{ConnectionConfig, Secret};
pub use error::BootstrapError;
pub use paths::{repo_root, resolve_init_sql};
pub use runner::{run, Progress, RunReport};
pub use script::{read_script, SqlScript};
pub use session::{Connector, PgConnector, PgSession, SqlSession};
pub use ssl::SslMode;

use std::path::Path;
use tracing::{debug, warn};

/// Load `.env.local`, then `.env`, from `root`.
///
/// Values already in the process environment are kept, so the shell always
/// wins over the files.
pub fn load_env_files(root: &Path) {
    for name in [".env.local", ".env"] {
        let path = root.join(name);
        match dotenvy::from_path(&path) {
            Ok(()) => debug!(path = %path.display(), "Loaded env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable env file"),
        }
    }
}
