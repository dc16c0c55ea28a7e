// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use jiff::Zoned;
use tokio::fs;

use crate::datetime::today_millis;
use crate::editor::{ScheduleEditor, TaskEditor};
use crate::grid::MonthPager;
use crate::home::CalendarHome;
use crate::localdb::{DB_FILENAME, LocalDb};
use crate::repository::{ScheduleRepository, TaskRepository, TodoRepository};
use crate::{Config, Error, Repository, Schedule, Task, Todo};

/// Almanac application core.
#[derive(Clone)]
pub struct Almanac {
    now: Zoned,
    config: Config,
    db: LocalDb,
    schedules: Arc<ScheduleRepository>,
    tasks: Arc<TaskRepository>,
    todos: Arc<TodoRepository>,
}

impl Almanac {
    /// Creates a new instance, opening the database in the state directory.
    pub async fn new(mut config: Config) -> Result<Self, Error> {
        let now = Zoned::now();

        config.normalize()?;
        prepare(&config).await?;

        let path = config.state_dir.as_ref().map(|a| a.join(DB_FILENAME));
        let db = LocalDb::open(path.as_deref()).await?;

        Ok(Self {
            now,
            schedules: Arc::new(ScheduleRepository::new(db.schedules.clone())),
            tasks: Arc::new(TaskRepository::new(db.tasks.clone())),
            todos: Arc::new(TodoRepository::new(db.todos.clone())),
            config,
            db,
        })
    }

    /// The current time in the almanac instance.
    pub fn now(&self) -> &Zoned {
        &self.now
    }

    /// Refresh the current time to now.
    pub fn refresh_now(&mut self) {
        self.now = Zoned::now();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn schedules(&self) -> Arc<dyn Repository<Schedule>> {
        self.schedules.clone()
    }

    pub fn tasks(&self) -> Arc<dyn Repository<Task>> {
        self.tasks.clone()
    }

    pub fn todos(&self) -> Arc<dyn Repository<Todo>> {
        self.todos.clone()
    }

    /// Editor for a new schedule on the given day, today when `None`.
    pub fn new_schedule(&self, selected_date_millis: Option<i64>) -> Result<ScheduleEditor, Error> {
        let selected = match selected_date_millis {
            Some(millis) => millis,
            None => today_millis(&self.now)?,
        };
        ScheduleEditor::create(
            self.schedules(),
            selected,
            &self.now,
            self.config.default_duration.duration(),
        )
    }

    /// Editor for an existing schedule, already loaded.
    pub async fn edit_schedule(&self, id: i64) -> Result<ScheduleEditor, Error> {
        let editor = ScheduleEditor::edit(self.schedules(), id);
        editor.load().await?;
        Ok(editor)
    }

    /// Editor for a task, loaded when `id` is given.
    pub async fn task_editor(&self, id: Option<i64>) -> Result<TaskEditor, Error> {
        let editor = TaskEditor::new(self.tasks(), id);
        editor.load().await?;
        Ok(editor)
    }

    /// The home screen holder with today selected.
    pub fn home(&self) -> Result<CalendarHome, Error> {
        CalendarHome::new(self.schedules(), self.tasks(), self.todos(), &self.now)
    }

    /// Month pager centered on the current year.
    pub fn month_pager(&self) -> MonthPager {
        MonthPager::new(self.now.year(), self.config.year_span)
    }

    /// Close the almanac, ensuring all pending writes reach the database.
    pub async fn close(self) {
        self.db.close().await;
    }
}

async fn prepare(config: &Config) -> Result<(), Error> {
    if let Some(parent) = &config.state_dir {
        tracing::debug!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
