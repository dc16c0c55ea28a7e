// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::Schedule;
use crate::localdb::Changes;

const COLUMNS: &str = "\
id, title, description, start_date_millis, start_hour, start_minute, \
end_date_millis, end_hour, end_minute, is_all_day, place, is_completed";

#[derive(Debug, Clone)]
pub struct Schedules {
    pool: SqlitePool,
    changes: Changes,
}

impl Schedules {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            changes: Changes::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<ScheduleRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM schedules \
             ORDER BY start_date_millis, start_hour, start_minute, id;"
        );

        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<ScheduleRecord>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM schedules WHERE id = ?;");

        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Schedules whose days overlap `[start, end)`. A schedule that ends
    /// before it starts only covers its start day.
    pub async fn list_between(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Vec<ScheduleRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM schedules \
             WHERE start_date_millis < ? AND MAX(start_date_millis, end_date_millis) >= ? \
             ORDER BY start_date_millis, start_hour, start_minute, id;"
        );

        sqlx::query_as(&sql)
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool)
            .await
    }

    /// Inserts the schedule and returns its id. A missing id is assigned by
    /// the table, an existing one replaces the stored row.
    pub async fn insert(&self, schedule: &ScheduleRecord) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "INSERT OR REPLACE INTO schedules ({COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);"
        );

        let result = sqlx::query(&sql)
            .bind(schedule.id)
            .bind(&schedule.title)
            .bind(&schedule.description)
            .bind(schedule.start_date_millis)
            .bind(schedule.start_hour)
            .bind(schedule.start_minute)
            .bind(schedule.end_date_millis)
            .bind(schedule.end_hour)
            .bind(schedule.end_minute)
            .bind(schedule.is_all_day)
            .bind(&schedule.place)
            .bind(schedule.is_completed)
            .execute(&self.pool)
            .await?;

        self.changes.bump();
        Ok(schedule.id.unwrap_or_else(|| result.last_insert_rowid()))
    }

    pub async fn update(&self, schedule: &ScheduleRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
UPDATE schedules SET
    title             = ?,
    description       = ?,
    start_date_millis = ?,
    start_hour        = ?,
    start_minute      = ?,
    end_date_millis   = ?,
    end_hour          = ?,
    end_minute        = ?,
    is_all_day        = ?,
    place             = ?,
    is_completed      = ?
WHERE id = ?;
";

        sqlx::query(SQL)
            .bind(&schedule.title)
            .bind(&schedule.description)
            .bind(schedule.start_date_millis)
            .bind(schedule.start_hour)
            .bind(schedule.start_minute)
            .bind(schedule.end_date_millis)
            .bind(schedule.end_hour)
            .bind(schedule.end_minute)
            .bind(schedule.is_all_day)
            .bind(&schedule.place)
            .bind(schedule.is_completed)
            .bind(schedule.id)
            .execute(&self.pool)
            .await?;

        self.changes.bump();
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM schedules WHERE id = ?;";

        sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        self.changes.bump();
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScheduleRecord {
    id: Option<i64>,
    title: String,
    description: String,
    start_date_millis: i64,
    start_hour: i8,
    start_minute: i8,
    end_date_millis: i64,
    end_hour: i8,
    end_minute: i8,
    is_all_day: bool,
    place: String,
    is_completed: bool,
}

impl From<&Schedule> for ScheduleRecord {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id,
            title: schedule.title.clone(),
            description: schedule.description.clone(),
            start_date_millis: schedule.start_date_millis,
            start_hour: schedule.start_hour,
            start_minute: schedule.start_minute,
            end_date_millis: schedule.end_date_millis,
            end_hour: schedule.end_hour,
            end_minute: schedule.end_minute,
            is_all_day: schedule.is_all_day,
            place: schedule.place.clone(),
            is_completed: schedule.is_completed,
        }
    }
}

impl From<ScheduleRecord> for Schedule {
    fn from(record: ScheduleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            start_date_millis: record.start_date_millis,
            start_hour: record.start_hour,
            start_minute: record.start_minute,
            end_date_millis: record.end_date_millis,
            end_hour: record.end_hour,
            end_minute: record.end_minute,
            is_all_day: record.is_all_day,
            place: record.place,
            is_completed: record.is_completed,
        }
    }
}
