//! Environment variable lookup helpers
//!
//! Configuration is read through the [`EnvLookup`] trait so loaders can be
//! exercised against an in-memory map instead of the process environment.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// A source of named string values.
///
/// Implementors only provide [`EnvLookup::get`]; the remaining methods are
/// the helpers loaders actually call.
pub trait EnvLookup {
    /// Raw lookup. A variable set to the empty string is returned as `Some("")`;
    /// only an absent variable is `None`.
    fn get(&self, name: &str) -> Option<String>;

    /// Get a variable with a default value. The default applies only when the
    /// variable is absent, so an explicit empty value is kept.
    ///
    /// # Example
    /// ```ignore
    /// let host = ProcessEnv.or("PGHOST", "localhost");
    /// ```
    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    /// Get a required variable, returning an error if it is absent or empty.
    fn required(&self, name: &str) -> Result<String> {
        self.optional(name)
            .ok_or_else(|| anyhow!("{} must be set", name))
    }

    /// Get a variable only if it holds a non-empty value.
    ///
    /// Used for optional paths, where `VAR=` means "not configured".
    fn optional(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Parse a variable, falling back to `default` when absent or empty.
    ///
    /// Unlike a silent fallback, a non-empty value that fails to parse is
    /// reported as an error.
    fn parse_or<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(name) {
            Some(raw) => raw
                .parse()
                .map_err(|e: T::Err| anyhow!("{}", e))
                .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
            None => Ok(default),
        }
    }
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl EnvLookup for HashMap<&str, &str> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).map(|v| v.to_string())
    }
}
