//! Shared utilities for the bootstrap tooling
//!
//! - Structured logging initialization
//! - Environment variable lookup helpers

pub mod config;
pub mod logging;

pub use config::{EnvLookup, ProcessEnv};
pub use logging::{init_logging, LogGuard};
