//! Per-operation connection scopes.
//!
//! A [`ContextFactory`] holds the parsed connect options for one connection
//! string. Every service call asks it for a fresh [`DbContext`], does its
//! work, and closes the context again. Nothing is shared between calls.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// Builds [`DbContext`]s for a single SQLite connection string.
#[derive(Debug, Clone)]
pub struct ContextFactory {
    options: SqliteConnectOptions,
}

impl ContextFactory {
    /// Parse a sqlx SQLite URL such as `sqlite:trains.db?mode=rwc`.
    ///
    /// The database file is created on first open if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the connection string is malformed.
    pub fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);
        Ok(Self { options })
    }

    /// Open a new connection scope.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub async fn open(&self) -> Result<DbContext, sqlx::Error> {
        let mut conn = self.options.connect().await?;
        configure_pragmas_conn(&mut conn).await?;
        debug!("Opened database context");
        Ok(DbContext {
            conn,
            opened_at: Instant::now(),
        })
    }
}

/// One open connection, owned by a single service call.
///
/// Call [`DbContext::close`] once the work is done. If the context is dropped
/// early (an error returned with `?`), the underlying connection is released
/// by its own `Drop`.
pub struct DbContext {
    conn: SqliteConnection,
    opened_at: Instant,
}

impl DbContext {
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Close the connection, waiting for SQLite to release the file.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        let elapsed = self.opened_at.elapsed();
        self.conn.close().await?;
        debug!(elapsed_ms = elapsed.as_millis() as u64, "Closed database context");
        Ok(())
    }
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;
    Ok(())
}
