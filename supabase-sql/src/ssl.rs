//! TLS policy for the database connection
//!
//! Only modes that refuse a plaintext transport are accepted. Root
//! certificates are parsed with the openssl crate up front so a bad bundle
//! fails before any network traffic.

use anyhow::{bail, Context, Result};
use openssl::x509::X509;
use sqlx::postgres::PgSslMode;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// TLS requirement for the connection. Every variant encrypts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    /// Encrypt, but don't verify the server certificate
    #[default]
    Require,
    /// Encrypt and verify the certificate chain
    VerifyCa,
    /// Encrypt, verify the chain and the host name
    VerifyFull,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for SslMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "require" => Ok(Self::Require),
            "verify-ca" => Ok(Self::VerifyCa),
            "verify-full" => Ok(Self::VerifyFull),
            "disable" | "allow" | "prefer" => {
                bail!("sslmode '{}' permits an unencrypted connection; use require, verify-ca or verify-full", s)
            }
            other => bail!("unknown sslmode '{}'", other),
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}

/// Check that `path` holds at least one PEM certificate.
///
/// Returns the number of certificates in the bundle.
pub fn validate_root_cert(path: &Path) -> Result<usize> {
    let pem = fs::read(path)
        .with_context(|| format!("Failed to read root certificate {}", path.display()))?;

    let certs = X509::stack_from_pem(&pem)
        .with_context(|| format!("Failed to parse {} as PEM", path.display()))?;

    if certs.is_empty() {
        bail!("{} contains no certificates", path.display());
    }

    Ok(certs.len())
}
