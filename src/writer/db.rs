//! Pooled SQLite access for async callers
//!
//! Statements run on the blocking thread pool. A semaphore sized like the
//! connection pool caps how many are in flight, so a batch that starts one
//! task per record queues on the semaphore instead of on the pool.

use anyhow::{Context, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

use super::value::SqlValue;
use crate::error::LoadError;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    permits: Arc<Semaphore>,
}

impl Database {
    /// Open (creating if needed) the database file
    pub fn open(db_path: &Path, max_connections: u32) -> Result<Self> {
        let max_connections = max_connections.max(1);

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.pragma_update(None, "foreign_keys", true)?;
            conn.busy_timeout(BUSY_TIMEOUT)
        });

        let pool = Pool::builder()
            .max_size(max_connections)
            .build(manager)
            .with_context(|| format!("Failed to open database {:?}", db_path))?;

        // Persistent per file; lets readers run alongside the loaders
        pool.get()
            .context("Failed to get database connection")?
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .context("Failed to configure database")?;

        debug!(path = ?db_path, max_connections, "database opened");

        Ok(Self {
            pool,
            permits: Arc::new(Semaphore::new(max_connections as usize)),
        })
    }

    /// Run one parameterized statement, returning the number of changed rows
    pub async fn execute(&self, sql: Arc<str>, params: Vec<SqlValue>) -> Result<usize, LoadError> {
        let _permit = self.permits.acquire().await?;
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> Result<usize, LoadError> {
            let conn = pool.get()?;
            let mut stmt = conn.prepare_cached(&sql)?;
            for (idx, value) in params.iter().enumerate() {
                value.bind_to(idx + 1, &mut stmt)?;
            }
            Ok(stmt.raw_execute()?)
        })
        .await?
    }

    /// Run DDL (or any parameterless SQL) in one batch
    pub async fn execute_batch(&self, sql: String) -> Result<(), LoadError> {
        let _permit = self.permits.acquire().await?;
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> Result<(), LoadError> {
            let conn = pool.get()?;
            conn.execute_batch(&sql)?;
            Ok(())
        })
        .await?
    }
}
