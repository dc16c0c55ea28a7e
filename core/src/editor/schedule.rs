// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use jiff::{SignedDuration, Zoned};
use tokio::sync::watch;

use crate::datetime::{date_to_millis, millis_to_date};
use crate::{Error, Repository, Schedule};

/// Snapshot of the schedule edit screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleState {
    pub title: String,
    pub description: String,
    pub start_date_millis: i64,
    pub start_hour: i8,
    pub start_minute: i8,
    pub end_date_millis: i64,
    pub end_hour: i8,
    pub end_minute: i8,
    pub place: String,
    pub is_all_day: bool,
    pub is_completed: bool,

    pub is_loading: bool,
    pub is_done: bool,
    /// Set once an existing schedule has been loaded.
    pub is_edit: bool,
    /// Reserved for a user facing message code, never populated.
    pub message: Option<i32>,
}

impl ScheduleState {
    fn to_schedule(&self, id: Option<i64>) -> Schedule {
        Schedule {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            start_date_millis: self.start_date_millis,
            start_hour: self.start_hour,
            start_minute: self.start_minute,
            end_date_millis: self.end_date_millis,
            end_hour: self.end_hour,
            end_minute: self.end_minute,
            is_all_day: self.is_all_day,
            place: self.place.clone(),
            is_completed: self.is_completed,
        }
    }

    fn fill(&mut self, schedule: Schedule) {
        self.title = schedule.title;
        self.description = schedule.description;
        self.start_date_millis = schedule.start_date_millis;
        self.start_hour = schedule.start_hour;
        self.start_minute = schedule.start_minute;
        self.end_date_millis = schedule.end_date_millis;
        self.end_hour = schedule.end_hour;
        self.end_minute = schedule.end_minute;
        self.place = schedule.place;
        self.is_all_day = schedule.is_all_day;
        self.is_completed = schedule.is_completed;
    }
}

/// Holds the state of a schedule being created or edited.
pub struct ScheduleEditor {
    repo: Arc<dyn Repository<Schedule>>,
    id: Option<i64>,
    state: watch::Sender<ScheduleState>,
}

impl ScheduleEditor {
    /// Editor for a new schedule on the day containing `selected_date_millis`.
    ///
    /// The schedule starts at the current time of day and lasts `duration`;
    /// the end date follows when that crosses midnight.
    pub fn create(
        repo: Arc<dyn Repository<Schedule>>,
        selected_date_millis: i64,
        now: &Zoned,
        duration: SignedDuration,
    ) -> Result<Self, Error> {
        let tz = now.time_zone();
        let date = millis_to_date(selected_date_millis, tz)?;
        let start = date
            .at(now.hour(), now.minute(), 0, 0)
            .to_zoned(tz.clone())?;
        let end = start.checked_add(duration)?;

        let state = ScheduleState {
            start_date_millis: date_to_millis(start.date(), tz)?,
            start_hour: start.hour(),
            start_minute: start.minute(),
            end_date_millis: date_to_millis(end.date(), tz)?,
            end_hour: end.hour(),
            end_minute: end.minute(),
            ..Default::default()
        };

        Ok(Self {
            repo,
            id: None,
            state: watch::Sender::new(state),
        })
    }

    /// Editor for the stored schedule `id`; call [`ScheduleEditor::load`] to fetch it.
    pub fn edit(repo: Arc<dyn Repository<Schedule>>, id: i64) -> Self {
        Self {
            repo,
            id: Some(id),
            state: watch::Sender::new(ScheduleState::default()),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// A copy of the current state.
    pub fn state(&self) -> ScheduleState {
        self.state.borrow().clone()
    }

    /// Listen to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ScheduleState> {
        self.state.subscribe()
    }

    /// Fills the state from the stored schedule. Does nothing without an id,
    /// and keeps the current fields when the schedule does not exist.
    #[tracing::instrument(skip(self), fields(id = self.id))]
    pub async fn load(&self) -> Result<(), Error> {
        let Some(id) = self.id else {
            return Ok(());
        };

        self.loading();
        let found = self.repo.get(id).await?;
        self.state.send_modify(|state| {
            match found {
                Some(schedule) => {
                    state.fill(schedule);
                    state.is_edit = true;
                }
                None => tracing::debug!("schedule not found, keeping defaults"),
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

    pub fn update_place(&self, place: impl Into<String>) {
        let place = place.into();
        self.state.send_modify(|state| state.place = place);
    }

    pub fn update_start_date_millis(&self, millis: i64) {
        self.state.send_modify(|state| state.start_date_millis = millis);
    }

    pub fn update_start_time(&self, hour: i8, minute: i8) {
        self.state.send_modify(|state| {
            state.start_hour = hour;
            state.start_minute = minute;
        });
    }

    pub fn update_end_date_millis(&self, millis: i64) {
        self.state.send_modify(|state| state.end_date_millis = millis);
    }

    pub fn update_end_time(&self, hour: i8, minute: i8) {
        self.state.send_modify(|state| {
            state.end_hour = hour;
            state.end_minute = minute;
        });
    }

    pub fn set_all_day(&self, is_all_day: bool) {
        self.state.send_modify(|state| state.is_all_day = is_all_day);
    }

    pub fn set_completed(&self, is_completed: bool) {
        self.state.send_modify(|state| state.is_completed = is_completed);
    }

    /// Inserts the schedule when it has no id yet, updates it otherwise.
    ///
    /// The editor keeps its id after an insert, so saving a new schedule
    /// twice stores two rows.
    #[tracing::instrument(skip(self), fields(id = self.id))]
    pub async fn save(&self) -> Result<(), Error> {
        self.loading();
        let schedule = self.state.borrow().to_schedule(self.id);
        match self.id {
            Some(_) => self.repo.update(&schedule).await?,
            None => {
                let id = self.repo.insert(&schedule).await?;
                tracing::debug!(id, "schedule created");
            }
        }
        self.done();
        Ok(())
    }

    /// Deletes the stored schedule, failing with [`Error::MissingId`] when
    /// the editor has no id.
    #[tracing::instrument(skip(self), fields(id = self.id))]
    pub async fn delete(&self) -> Result<(), Error> {
        let id = self.id.ok_or(Error::MissingId)?;
        self.repo.delete(id).await?;
        self.done();
        Ok(())
    }

    fn loading(&self) {
        self.state.send_modify(|state| state.is_loading = true);
    }

    fn done(&self) {
        self.state.send_modify(|state| {
            state.is_loading = false;
            state.is_done = true;
        });
    }
}
