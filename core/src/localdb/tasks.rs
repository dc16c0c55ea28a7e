// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::Task;
use crate::localdb::Changes;

#[derive(Debug, Clone)]
pub struct Tasks {
    pool: SqlitePool,
    changes: Changes,
}

impl Tasks {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            changes: Changes::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, is_completed, title, description, start_time_millis, end_time_millis
FROM tasks
ORDER BY id;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, is_completed, title, description, start_time_millis, end_time_millis
FROM tasks
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Tasks anchored in `[start, end)`, by start time or by end time when
    /// there is no start. Unscheduled tasks never match.
    pub async fn list_between(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Vec<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, is_completed, title, description, start_time_millis, end_time_millis
FROM tasks
WHERE COALESCE(start_time_millis, end_time_millis) >= ?
  AND COALESCE(start_time_millis, end_time_millis) < ?
ORDER BY COALESCE(start_time_millis, end_time_millis), id;
";

        sqlx::query_as(SQL)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
    }

    /// Inserts the task, replacing any row that has the same id.
    pub async fn insert(&self, task: &TaskRecord) -> Result<i64, sqlx::Error> {
        const SQL: &str = "\
INSERT OR REPLACE INTO tasks (id, is_completed, title, description, start_time_millis, end_time_millis)
VALUES (?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(task.id)
            .bind(task.is_completed)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.start_time_millis)
            .bind(task.end_time_millis)
            .execute(&self.pool)
            .await?;

        self.changes.bump();
        Ok(task.id)
    }

    pub async fn update(&self, task: &TaskRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
UPDATE tasks SET
    is_completed      = ?,
    title             = ?,
    description       = ?,
    start_time_millis = ?,
    end_time_millis   = ?
WHERE id = ?;
";

        sqlx::query(SQL)
            .bind(task.is_completed)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.start_time_millis)
            .bind(task.end_time_millis)
            .bind(task.id)
            .execute(&self.pool)
            .await?;

        self.changes.bump();
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM tasks WHERE id = ?;";

        sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        self.changes.bump();
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    id: i64,
    is_completed: bool,
    title: String,
    description: String,
    start_time_millis: Option<i64>,
    end_time_millis: Option<i64>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            is_completed: task.is_completed,
            title: task.title.clone(),
            description: task.description.clone(),
            start_time_millis: task.start_time_millis,
            end_time_millis: task.end_time_millis,
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            is_completed: record.is_completed,
            title: record.title,
            description: record.description,
            start_time_millis: record.start_time_millis,
            end_time_millis: record.end_time_millis,
        }
    }
}
