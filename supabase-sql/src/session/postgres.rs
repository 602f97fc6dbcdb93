//! PostgreSQL session backed by a single sqlx connection

use super::{Connector, SqlSession};
use crate::config::{ConnectionConfig, APPLICATION_NAME};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::{debug, instrument};

/// Connects with sqlx over TLS.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

impl PgConnector {
    /// Translate our config into sqlx options.
    ///
    /// Built from `new_without_pgpass` so a `.pgpass` file can't supply a
    /// password that wasn't configured.
    pub fn options(config: &ConnectionConfig) -> PgConnectOptions {
        let mut options = PgConnectOptions::new_without_pgpass()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(config.password.expose())
            .ssl_mode(config.ssl_mode.into())
            .application_name(APPLICATION_NAME)
            // Transaction-mode poolers can't keep named prepared statements
            .statement_cache_capacity(0);

        if let Some(root) = &config.ssl_root_cert {
            options = options.ssl_root_cert(root);
        }

        options
    }
}

impl Connector for PgConnector {
    type Session = PgSession;

    #[instrument(skip_all, fields(host = %config.host, port = config.port, sslmode = %config.ssl_mode))]
    async fn connect(&self, config: &ConnectionConfig) -> Result<PgSession, sqlx::Error> {
        let conn = PgConnection::connect_with(&Self::options(config)).await?;
        debug!("Connection established");
        Ok(PgSession { conn })
    }
}

/// An open connection. Dropping it without `close` still drops the socket.
#[derive(Debug)]
pub struct PgSession {
    conn: PgConnection,
}

impl SqlSession for PgSession {
    async fn execute_batch(&mut self, sql: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::raw_sql(sql).execute(&mut self.conn).await?;
        Ok(result.rows_affected())
    }

    async fn query_scalar(&mut self, sql: &str) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>(sql)
            .fetch_one(&mut self.conn)
            .await
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}
