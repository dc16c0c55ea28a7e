// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Repositories translate between entities and table records, and expose
//! observed queries that re-run after every write.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt};
use tokio::sync::watch;

use crate::localdb::{Schedules, Tasks, Todos};
use crate::{Error, Schedule, Task, Todo};

/// Storage operations shared by every entity kind.
#[async_trait]
pub trait Repository<T: Send + Sync>: Send + Sync {
    /// Every stored item.
    async fn list(&self) -> Result<Vec<T>, Error>;

    /// The item with `id`, or `None` when nothing is stored under it.
    async fn get(&self, id: i64) -> Result<Option<T>, Error>;

    /// Items falling in the half-open range `[start, end)` of epoch milliseconds.
    async fn list_between(&self, start: i64, end: i64) -> Result<Vec<T>, Error>;

    /// Stores `item` and returns its id, overwriting any item with the same id.
    async fn insert(&self, item: &T) -> Result<i64, Error>;

    /// Rewrites the stored item with the id of `item`; a missing row is left alone.
    async fn update(&self, item: &T) -> Result<(), Error>;

    /// Removes the item with `id`; removing a missing item is not an error.
    async fn delete(&self, id: i64) -> Result<(), Error>;

    /// Notified after every write to the underlying table.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Observes every item: yields the current list, then a fresh one after each write.
pub fn observe_all<T>(repo: Arc<dyn Repository<T>>) -> BoxStream<'static, Result<Vec<T>, Error>>
where
    T: Send + Sync + 'static,
{
    let rx = repo.subscribe();
    observe_query(rx, move || {
        let repo = repo.clone();
        async move { repo.list().await }.boxed()
    })
}

/// Observes a single item, yielding `None` while it does not exist.
pub fn observe<T>(
    repo: Arc<dyn Repository<T>>,
    id: i64,
) -> BoxStream<'static, Result<Option<T>, Error>>
where
    T: Send + Sync + 'static,
{
    let rx = repo.subscribe();
    observe_query(rx, move || {
        let repo = repo.clone();
        async move { repo.get(id).await }.boxed()
    })
}

fn observe_query<O, F>(rx: watch::Receiver<u64>, query: F) -> BoxStream<'static, Result<O, Error>>
where
    O: Send + 'static,
    F: FnMut() -> BoxFuture<'static, Result<O, Error>> + Send + 'static,
{
    stream::unfold((rx, query, true), |(mut rx, mut query, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        // writes that land while querying trigger one more round
        rx.borrow_and_update();
        let result = query().await;
        Some((result, (rx, query, false)))
    })
    .boxed()
}

#[derive(Debug, Clone)]
pub struct TaskRepository {
    tasks: Tasks,
}

impl TaskRepository {
    pub fn new(tasks: Tasks) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn list(&self) -> Result<Vec<Task>, Error> {
        let records = self.tasks.list().await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Task>, Error> {
        Ok(self.tasks.get(id).await?.map(Task::from))
    }

    async fn list_between(&self, start: i64, end: i64) -> Result<Vec<Task>, Error> {
        let records = self.tasks.list_between(start, end).await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn insert(&self, item: &Task) -> Result<i64, Error> {
        tracing::debug!(id = item.id, "inserting task");
        Ok(self.tasks.insert(&item.into()).await?)
    }

    async fn update(&self, item: &Task) -> Result<(), Error> {
        tracing::debug!(id = item.id, "updating task");
        Ok(self.tasks.update(&item.into()).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        tracing::debug!(id, "deleting task");
        Ok(self.tasks.delete(id).await?)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.tasks.subscribe()
    }
}

#[derive(Debug, Clone)]
pub struct TodoRepository {
    todos: Todos,
}

impl TodoRepository {
    pub fn new(todos: Todos) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, Error> {
        let records = self.todos.list().await?;
        Ok(records.into_iter().map(Todo::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, Error> {
        Ok(self.todos.get(id).await?.map(Todo::from))
    }

    async fn list_between(&self, start: i64, end: i64) -> Result<Vec<Todo>, Error> {
        let records = self.todos.list_between(start, end).await?;
        Ok(records.into_iter().map(Todo::from).collect())
    }

    async fn insert(&self, item: &Todo) -> Result<i64, Error> {
        let id = self.todos.insert(&item.into()).await?;
        tracing::debug!(id, "inserted todo");
        Ok(id)
    }

    async fn update(&self, item: &Todo) -> Result<(), Error> {
        let id = item.id.ok_or(Error::MissingId)?;
        tracing::debug!(id, "updating todo");
        Ok(self.todos.update(&item.into()).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        tracing::debug!(id, "deleting todo");
        Ok(self.todos.delete(id).await?)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.todos.subscribe()
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    schedules: Schedules,
}

impl ScheduleRepository {
    pub fn new(schedules: Schedules) -> Self {
        Self { schedules }
    }
}

#[async_trait]
impl Repository<Schedule> for ScheduleRepository {
    async fn list(&self) -> Result<Vec<Schedule>, Error> {
        let records = self.schedules.list().await?;
        Ok(records.into_iter().map(Schedule::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Schedule>, Error> {
        Ok(self.schedules.get(id).await?.map(Schedule::from))
    }

    async fn list_between(&self, start: i64, end: i64) -> Result<Vec<Schedule>, Error> {
        let records = self.schedules.list_between(start, end).await?;
        Ok(records.into_iter().map(Schedule::from).collect())
    }

    async fn insert(&self, item: &Schedule) -> Result<i64, Error> {
        let id = self.schedules.insert(&item.into()).await?;
        tracing::debug!(id, "inserted schedule");
        Ok(id)
    }

    async fn update(&self, item: &Schedule) -> Result<(), Error> {
        let id = item.id.ok_or(Error::MissingId)?;
        tracing::debug!(id, "updating schedule");
        Ok(self.schedules.update(&item.into()).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        tracing::debug!(id, "deleting schedule");
        Ok(self.schedules.delete(id).await?)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.schedules.subscribe()
    }
}
