//! Connection configuration from environment variables
//!
//! Uses the libpq variable names so an existing shell setup for `psql`
//! works unchanged.

use crate::ssl::{validate_root_cert, SslMode};
use anyhow::{Context, Result};
use common::{EnvLookup, ProcessEnv};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_HOST: &str = "aws-1-ap-southeast-1.pooler.supabase.com";
pub const DEFAULT_PORT: u16 = 6543;
pub const DEFAULT_DATABASE: &str = "postgres";
pub const DEFAULT_USER: &str = "postgres.lejhjsgalirpnbinbgcc";

/// Reported to the server as `application_name`
pub const APPLICATION_NAME: &str = "supabase-sql";

/// A string that never shows up in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Everything needed to open the connection
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Secret,
    pub ssl_mode: SslMode,
    pub ssl_root_cert: Option<PathBuf>,
}

impl ConnectionConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&ProcessEnv)
    }

    /// Load configuration from any variable source.
    ///
    /// `PGPASSWORD` has no default and must be provided. The other
    /// parameters fall back to their defaults only when absent; a variable
    /// set to the empty string is passed through as-is, except `PGPORT`,
    /// where empty means the default port.
    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self> {
        let password = env
            .required("PGPASSWORD")
            .context("PGPASSWORD is required; the database password is never embedded")?;

        let ssl_mode = env.parse_or("PGSSLMODE", SslMode::default())?;

        let ssl_root_cert = env.optional("PGSSLROOTCERT").map(PathBuf::from);
        if let Some(path) = &ssl_root_cert {
            let certs = validate_root_cert(path)?;
            debug!(path = %path.display(), certs, "Root certificate bundle loaded");
        }

        Ok(Self {
            host: env.or("PGHOST", DEFAULT_HOST),
            port: env.parse_or("PGPORT", DEFAULT_PORT)?,
            database: env.or("PGDATABASE", DEFAULT_DATABASE),
            user: env.or("PGUSER", DEFAULT_USER),
            password: Secret::new(password),
            ssl_mode,
            ssl_root_cert,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([("PGPASSWORD", "hunter2")])
    }

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::from_lookup(&base()).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 6543);
        assert_eq!(config.database, "postgres");
        assert_eq!(config.user, DEFAULT_USER);
        assert_eq!(config.ssl_mode, SslMode::Require);
        assert!(config.ssl_root_cert.is_none());
    }

    #[test]
    fn test_host_override() {
        let mut env = base();
        env.insert("PGHOST", "db.example.com");
        let config = ConnectionConfig::from_lookup(&env).unwrap();
        assert_eq!(config.host, "db.example.com");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_empty_host_is_not_replaced_by_default() {
        let mut env = base();
        env.insert("PGHOST", "");
        let config = ConnectionConfig::from_lookup(&env).unwrap();
        assert_eq!(config.host, "");
    }

    #[test]
    fn test_empty_password_rejected() {
        let mut env = base();
        env.insert("PGPASSWORD", "");
        assert!(ConnectionConfig::from_lookup(&env).is_err());
    }

    #[test]
    fn test_port_override() {
        let mut env = base();
        env.insert("PGPORT", "5432");
        let config = ConnectionConfig::from_lookup(&env).unwrap();
        assert_eq!(config.port, 5432);
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_database_override() {
        let mut env = base();
        env.insert("PGDATABASE", "app");
        let config = ConnectionConfig::from_lookup(&env).unwrap();
        assert_eq!(config.database, "app");
        assert_eq!(config.user, DEFAULT_USER);
    }

    #[test]
    fn test_user_override() {
        let mut env = base();
        env.insert("PGUSER", "migrator");
        let config = ConnectionConfig::from_lookup(&env).unwrap();
        assert_eq!(config.user, "migrator");
        assert_eq!(config.database, DEFAULT_DATABASE);
    }

    #[test]
    fn test_password_override() {
        let mut env = base();
        env.insert("PGPASSWORD", "correct horse");
        let config = ConnectionConfig::from_lookup(&env).unwrap();
        assert_eq!(config.password.expose(), "correct horse");
    }

    #[test]
    fn test_password_required() {
        let err = ConnectionConfig::from_lookup(&HashMap::<&str, &str>::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("PGPASSWORD"));
    }

    #[test]
    fn test_bad_port() {
        let mut env = base();
        env.insert("PGPORT", "65536");
        assert!(ConnectionConfig::from_lookup(&env).is_err());
    }

    #[test]
    fn test_plaintext_sslmode_rejected() {
        let mut env = base();
        env.insert("PGSSLMODE", "disable");
        assert!(ConnectionConfig::from_lookup(&env).is_err());
    }

    #[test]
    fn test_missing_root_cert_rejected() {
        let mut env = base();
        env.insert("PGSSLMODE", "verify-full");
        env.insert("PGSSLROOTCERT", "/nonexistent/root.crt");
        assert!(ConnectionConfig::from_lookup(&env).is_err());
    }

    #[test]
    fn test_password_hidden_from_debug() {
        let config = ConnectionConfig::from_lookup(&base()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("Secret(***)"));
    }
}
