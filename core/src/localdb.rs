// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Table access over the local SQLite database.
//!
//! Every table keeps a change counter that is bumped after each committed
//! write, so observers can re-run their queries.

mod schedules;
mod tasks;
mod todos;

use std::path::Path;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::watch;

pub use crate::localdb::schedules::{ScheduleRecord, Schedules};
pub use crate::localdb::tasks::{TaskRecord, Tasks};
pub use crate::localdb::todos::{TodoRecord, Todos};
use crate::Error;

/// File name of the database inside the state directory.
pub const DB_FILENAME: &str = "almanac.db";

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub tasks: Tasks,
    pub todos: Todos,
    pub schedules: Schedules,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Error> {
        let pool = match filename {
            Some(filename) => {
                tracing::info!(path = %filename.display(), "connecting to SQLite database");
                let options = SqliteConnectOptions::new()
                    .filename(filename)
                    .create_if_missing(true);
                SqlitePoolOptions::new().connect_with(options).await?
            }
            None => {
                tracing::info!("connecting to in-memory SQLite database");
                // every connection to `:memory:` is a separate database, keep exactly one alive
                let options = SqliteConnectOptions::new().in_memory(true);
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await?
            }
        };

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await?;

        tracing::debug!("database is ready");
        Ok(LocalDb {
            tasks: Tasks::new(pool.clone()),
            todos: Todos::new(pool.clone()),
            schedules: Schedules::new(pool.clone()),
            pool,
        })
    }

    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }
}

/// Version counter of a table, bumped after every committed write.
#[derive(Debug, Clone)]
pub struct Changes(Arc<watch::Sender<u64>>);

impl Changes {
    fn new() -> Self {
        Self(Arc::new(watch::Sender::new(0)))
    }

    fn bump(&self) {
        self.0.send_modify(|version| *version = version.wrapping_add(1));
    }

    /// A receiver that is notified after every write to the table.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.0.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_in_memory_database_with_tables() {
        let db = LocalDb::open(None).await.unwrap();
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&db.pool)
                .await
                .unwrap();
        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert!(names.contains(&"tasks".to_string()));
        assert!(names.contains(&"todos".to_string()));
        assert!(names.contains(&"schedules".to_string()));
    }

    #[tokio::test]
    async fn opens_file_database_and_persists_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILENAME);

        let db = LocalDb::open(Some(&path)).await.unwrap();
        let record = TaskRecord::from(&crate::Task::new("Persisted"));
        db.tasks.insert(&record).await.unwrap();
        db.close().await;

        let db = LocalDb::open(Some(&path)).await.unwrap();
        assert_eq!(db.tasks.list().await.unwrap().len(), 1);
        db.close().await;
    }

    #[test]
    fn changes_bump_notifies_subscribers() {
        let changes = Changes::new();
        let mut rx = changes.subscribe();
        assert!(!rx.has_changed().unwrap());
        changes.bump();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
    }
}
