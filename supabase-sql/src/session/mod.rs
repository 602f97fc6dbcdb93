//! Database session seam
//!
//! The runner only needs three things from a database: open a connection,
//! run a batch, close. Keeping them behind traits lets tests substitute a
//! fake that records what happened.

mod postgres;

use crate::config::ConnectionConfig;
use std::future::Future;

pub use postgres::{PgConnector, PgSession};

/// Opens sessions.
pub trait Connector {
    type Session: SqlSession;

    /// Open one connection. The connection is in autocommit mode: nothing
    /// here starts a transaction.
    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Self::Session, sqlx::Error>>;
}

/// A single open connection.
pub trait SqlSession {
    /// Run `sql` as one batch over the simple-query protocol.
    ///
    /// Returns the total rows affected across all statements.
    fn execute_batch(&mut self, sql: &str) -> impl Future<Output = Result<u64, sqlx::Error>>;

    /// Run a single-value query and return its first column as text.
    fn query_scalar(&mut self, sql: &str) -> impl Future<Output = Result<String, sqlx::Error>>;

    /// Terminate the connection gracefully.
    fn close(self) -> impl Future<Output = Result<(), sqlx::Error>>;
}
