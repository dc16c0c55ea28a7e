// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::Todo;
use crate::localdb::Changes;

#[derive(Debug, Clone)]
pub struct Todos {
    pool: SqlitePool,
    changes: Changes,
}

impl Todos {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            changes: Changes::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<TodoRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, is_completed, title, description, date_time_millis
FROM todos
ORDER BY date_time_millis, id;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<TodoRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, is_completed, title, description, date_time_millis
FROM todos
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// To-dos due in `[start, end)`.
    pub async fn list_between(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Vec<TodoRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, is_completed, title, description, date_time_millis
FROM todos
WHERE date_time_millis >= ? AND date_time_millis < ?
ORDER BY date_time_millis, id;
";

        sqlx::query_as(SQL)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
    }

    /// Inserts the to-do and returns its id. A missing id is assigned by
    /// the table, an existing one replaces the stored row.
    pub async fn insert(&self, todo: &TodoRecord) -> Result<i64, sqlx::Error> {
        const SQL: &str = "\
INSERT OR REPLACE INTO todos (id, is_completed, title, description, date_time_millis)
VALUES (?, ?, ?, ?, ?);
";

        let result = sqlx::query(SQL)
            .bind(todo.id)
            .bind(todo.is_completed)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.date_time_millis)
            .execute(&self.pool)
            .await?;

        self.changes.bump();
        Ok(todo.id.unwrap_or_else(|| result.last_insert_rowid()))
    }

    pub async fn update(&self, todo: &TodoRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
UPDATE todos SET
    is_completed     = ?,
    title            = ?,
    description      = ?,
    date_time_millis = ?
WHERE id = ?;
";

        sqlx::query(SQL)
            .bind(todo.is_completed)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.date_time_millis)
            .bind(todo.id)
            .execute(&self.pool)
            .await?;

        self.changes.bump();
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM todos WHERE id = ?;";

        sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        self.changes.bump();
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TodoRecord {
    id: Option<i64>,
    is_completed: bool,
    title: String,
    description: String,
    date_time_millis: i64,
}

impl TodoRecord {
    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl From<&Todo> for TodoRecord {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            is_completed: todo.is_completed,
            title: todo.title.clone(),
            description: todo.description.clone(),
            date_time_millis: todo.date_time_millis,
        }
    }
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: record.id,
            is_completed: record.is_completed,
            title: record.title,
            description: record.description,
            date_time_millis: record.date_time_millis,
        }
    }
}
