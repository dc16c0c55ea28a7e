// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use tokio::sync::watch;

use crate::datetime::now_millis;
use crate::{Error, Repository, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub start_time_millis: Option<i64>,
    pub end_time_millis: Option<i64>,

    pub is_loading: bool,
    pub is_done: bool,
    pub is_edit: bool,
    pub message: Option<i32>,
}

/// Holds the state of a task being created or edited.
pub struct TaskEditor {
    repo: Arc<dyn Repository<Task>>,
    id: Option<i64>,
    state: watch::Sender<TaskState>,
}

impl TaskEditor {
    /// Editor for `id`, or for a new unscheduled task when `id` is `None`.
    pub fn new(repo: Arc<dyn Repository<Task>>, id: Option<i64>) -> Self {
        Self {
            repo,
            id,
            state: watch::Sender::new(TaskState::default()),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn state(&self) -> TaskState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state.subscribe()
    }

    #[tracing::instrument(skip(self), fields(id = self.id))]
    pub async fn load(&self) -> Result<(), Error> {
        let Some(id) = self.id else {
            return Ok(());
        };

        self.state.send_modify(|state| state.is_loading = true);
        let found = self.repo.get(id).await?;
        self.state.send_modify(|state| {
            if let Some(task) = found {
                state.title = task.title;
                state.description = task.description;
                state.is_completed = task.is_completed;
                state.start_time_millis = task.start_time_millis;
                state.end_time_millis = task.end_time_millis;
                state.is_edit = true;
            }
            state.is_loading = false;
        });
        Ok(())
    }

    pub fn update_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.state.send_modify(|state| state.title = title);
    }

    pub fn update_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.state.send_modify(|state| state.description = description);
    }

    pub fn set_completed(&self, is_completed: bool) {
        self.state.send_modify(|state| state.is_completed = is_completed);
    }

    pub fn update_start_time_millis(&self, millis: Option<i64>) {
        self.state.send_modify(|state| state.start_time_millis = millis);
    }

    pub fn update_end_time_millis(&self, millis: Option<i64>) {
        self.state.send_modify(|state| state.end_time_millis = millis);
    }

    /// Updates the stored task, or inserts a new one identified by the
    /// current time.
    #[tracing::instrument(skip(self), fields(id = self.id))]
    pub async fn save(&self) -> Result<(), Error> {
        self.state.send_modify(|state| state.is_loading = true);
        let task = {
            let state = self.state.borrow();
            Task {
                id: self.id.unwrap_or_else(now_millis),
                is_completed: state.is_completed,
                title: state.title.clone(),
                description: state.description.clone(),
                start_time_millis: state.start_time_millis,
                end_time_millis: state.end_time_millis,
            }
        };
        match self.id {
            Some(_) => self.repo.update(&task).await?,
            None => {
                self.repo.insert(&task).await?;
            }
        }
        self.done();
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = self.id))]
    pub async fn delete(&self) -> Result<(), Error> {
        let id = self.id.ok_or(Error::MissingId)?;
        self.repo.delete(id).await?;
        self.done();
        Ok(())
    }

    fn done(&self) {
        self.state.send_modify(|state| {
            state.is_loading = false;
            state.is_done = true;
        });
    }
}
