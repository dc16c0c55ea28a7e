// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! State of the calendar home screen: the displayed month, its items grouped
//! by day, and the items of the selected day.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use jiff::Zoned;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use tokio::sync::watch;

use crate::datetime::{date_to_millis, day_start_millis, millis_to_date, today_millis};
use crate::grid::{MonthView, YearMonth, month_range};
use crate::{Error, Repository, Schedule, Task, Todo};

/// Everything that falls on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayItems {
    pub schedules: Vec<Schedule>,
    pub tasks: Vec<Task>,
    pub todos: Vec<Todo>,
}

impl DayItems {
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty() && self.tasks.is_empty() && self.todos.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeState {
    /// Start of the selected day in milliseconds since the epoch.
    pub selected_date_millis: i64,

    /// The loaded month, `None` before the first [`CalendarHome::load_month`].
    pub month: Option<YearMonth>,

    /// Items of the loaded month keyed by the start of their day.
    pub monthly: BTreeMap<i64, DayItems>,

    /// Items of the selected day.
    pub daily: DayItems,

    pub is_loading: bool,
}

pub struct CalendarHome {
    schedules: Arc<dyn Repository<Schedule>>,
    tasks: Arc<dyn Repository<Task>>,
    todos: Arc<dyn Repository<Todo>>,
    tz: TimeZone,
    state: watch::Sender<HomeState>,
}

impl CalendarHome {
    /// Creates the holder with today selected and no month loaded.
    pub fn new(
        schedules: Arc<dyn Repository<Schedule>>,
        tasks: Arc<dyn Repository<Task>>,
        todos: Arc<dyn Repository<Todo>>,
        now: &Zoned,
    ) -> Result<Self, Error> {
        let state = HomeState {
            selected_date_millis: today_millis(now)?,
            ..Default::default()
        };
        Ok(Self {
            schedules,
            tasks,
            todos,
            tz: now.time_zone().clone(),
            state: watch::Sender::new(state),
        })
    }

    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.subscribe()
    }

    /// Selects the day containing `millis` and shows its items from the
    /// loaded month.
    pub fn select_date(&self, millis: i64) -> Result<(), Error> {
        let day = day_start_millis(millis, &self.tz)?;
        self.state.send_modify(|state| {
            state.selected_date_millis = day;
            state.daily = state.monthly.get(&day).cloned().unwrap_or_default();
        });
        Ok(())
    }

    /// Fetches the items of `month` and groups them by day.
    ///
    /// A schedule spanning several days is listed on each of them within the
    /// month; one that ends before it starts is listed on its start day only.
    #[tracing::instrument(skip_all, fields(month = %month))]
    pub async fn load_month(&self, month: YearMonth) -> Result<(), Error> {
        let (first, next) = month_range(month)?;
        let start = date_to_millis(first, &self.tz)?;
        let end = date_to_millis(next, &self.tz)?;

        self.state.send_modify(|state| state.is_loading = true);
        let schedules = self.schedules.list_between(start, end).await?;
        let tasks = self.tasks.list_between(start, end).await?;
        let todos = self.todos.list_between(start, end).await?;
        tracing::debug!(
            schedules = schedules.len(),
            tasks = tasks.len(),
            todos = todos.len(),
            "month loaded"
        );

        let mut monthly: BTreeMap<i64, DayItems> = BTreeMap::new();
        for schedule in schedules {
            let from = millis_to_date(schedule.start_date_millis, &self.tz)?.max(first);
            let to = millis_to_date(
                schedule.end_date_millis.max(schedule.start_date_millis),
                &self.tz,
            )?;
            let mut day = from;
            while day <= to && day < next {
                let key = date_to_millis(day, &self.tz)?;
                monthly.entry(key).or_default().schedules.push(schedule.clone());
                day = day.tomorrow()?;
            }
        }
        for task in tasks {
            if let Some(at) = task.start_time_millis.or(task.end_time_millis) {
                let key = day_start_millis(at, &self.tz)?;
                monthly.entry(key).or_default().tasks.push(task);
            }
        }
        for todo in todos {
            let key = day_start_millis(todo.date_time_millis, &self.tz)?;
            monthly.entry(key).or_default().todos.push(todo);
        }

        self.state.send_modify(|state| {
            state.daily = monthly
                .get(&state.selected_date_millis)
                .cloned()
                .unwrap_or_default();
            state.month = Some(month);
            state.monthly = monthly;
            state.is_loading = false;
        });
        Ok(())
    }

    /// The loaded month as a grid, or `None` before any month is loaded.
    pub fn month_view(&self, today: Date) -> Option<MonthView> {
        let state = self.state.borrow();
        let month = state.month?;
        let days: HashSet<Date> = state
            .monthly
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .filter_map(|(millis, _)| millis_to_date(*millis, &self.tz).ok())
            .collect();
        let selected = millis_to_date(state.selected_date_millis, &self.tz).ok();
        Some(MonthView::new(month, today, selected, |date| {
            days.contains(&date)
        }))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::localdb::LocalDb;
    use crate::repository::{ScheduleRepository, TaskRepository, TodoRepository};

    struct Fixture {
        schedules: Arc<dyn Repository<Schedule>>,
        tasks: Arc<dyn Repository<Task>>,
        todos: Arc<dyn Repository<Todo>>,
        home: CalendarHome,
    }

    async fn setup(today: Date) -> Fixture {
        let db = LocalDb::open(None)
            .await
            .expect("Failed to create test database");
        let schedules: Arc<dyn Repository<Schedule>> =
            Arc::new(ScheduleRepository::new(db.schedules.clone()));
        let tasks: Arc<dyn Repository<Task>> = Arc::new(TaskRepository::new(db.tasks.clone()));
        let todos: Arc<dyn Repository<Todo>> = Arc::new(TodoRepository::new(db.todos.clone()));
        let now = today.at(12, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
        let home =
            CalendarHome::new(schedules.clone(), tasks.clone(), todos.clone(), &now).unwrap();
        Fixture {
            schedules,
            tasks,
            todos,
            home,
        }
    }

    fn millis(d: Date) -> i64 {
        date_to_millis(d, &TimeZone::UTC).unwrap()
    }

    fn schedule(title: &str, start: Date, end: Date) -> Schedule {
        Schedule {
            title: title.to_string(),
            start_date_millis: millis(start),
            end_date_millis: millis(end),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn starts_with_today_selected() {
        let f = setup(date(2024, 2, 14)).await;
        let state = f.home.state();
        assert_eq!(state.selected_date_millis, millis(date(2024, 2, 14)));
        assert_eq!(state.month, None);
        assert!(f.home.month_view(date(2024, 2, 14)).is_none());
    }

    #[tokio::test]
    async fn load_month_groups_items_by_day() {
        // Arrange
        let f = setup(date(2024, 2, 14)).await;
        f.schedules
            .insert(&schedule("Trip", date(2024, 1, 30), date(2024, 2, 2)))
            .await
            .unwrap();
        f.schedules
            .insert(&schedule("March", date(2024, 3, 1), date(2024, 3, 1)))
            .await
            .unwrap();
        f.tasks
            .insert(&Task {
                start_time_millis: Some(millis(date(2024, 2, 14)) + 3_600_000),
                ..Task::new("Flowers")
            })
            .await
            .unwrap();
        f.todos
            .insert(&Todo {
                date_time_millis: millis(date(2024, 2, 29)) + 60_000,
                ..Todo::new("Leap")
            })
            .await
            .unwrap();

        // Act
        f.home.load_month(YearMonth::new(2024, 2).unwrap()).await.unwrap();

        // Assert
        let state = f.home.state();
        assert!(!state.is_loading);
        let days: Vec<_> = state.monthly.keys().copied().collect();
        assert_eq!(
            days,
            vec![
                millis(date(2024, 2, 1)),
                millis(date(2024, 2, 2)),
                millis(date(2024, 2, 14)),
                millis(date(2024, 2, 29)),
            ]
        );
        assert_eq!(state.daily.tasks.len(), 1);
        assert_eq!(state.daily.tasks[0].title, "Flowers");
        assert!(state.daily.schedules.is_empty());
    }

    #[tokio::test]
    async fn select_date_switches_daily_items() {
        // Arrange
        let f = setup(date(2024, 2, 14)).await;
        f.schedules
            .insert(&schedule("Review", date(2024, 2, 20), date(2024, 2, 20)))
            .await
            .unwrap();
        f.home.load_month(YearMonth::new(2024, 2).unwrap()).await.unwrap();

        // Act
        f.home
            .select_date(millis(date(2024, 2, 20)) + 12_345)
            .unwrap();

        // Assert
        let state = f.home.state();
        assert_eq!(state.selected_date_millis, millis(date(2024, 2, 20)));
        assert_eq!(state.daily.schedules.len(), 1);
        assert_eq!(state.daily.schedules[0].title, "Review");
    }

    #[tokio::test]
    async fn reversed_schedule_only_marks_start_day() {
        // Arrange
        let f = setup(date(2024, 2, 14)).await;
        f.schedules
            .insert(&schedule("Typo", date(2024, 2, 10), date(2024, 2, 5)))
            .await
            .unwrap();

        // Act
        f.home.load_month(YearMonth::new(2024, 2).unwrap()).await.unwrap();

        // Assert
        let days: Vec<_> = f.home.state().monthly.keys().copied().collect();
        assert_eq!(days, vec![millis(date(2024, 2, 10))]);
    }

    #[tokio::test]
    async fn month_view_marks_days_with_items() {
        // Arrange
        let f = setup(date(2024, 2, 14)).await;
        f.todos
            .insert(&Todo {
                date_time_millis: millis(date(2024, 2, 3)),
                ..Todo::new("Call")
            })
            .await
            .unwrap();
        f.home.load_month(YearMonth::new(2024, 2).unwrap()).await.unwrap();

        // Act
        let view = f.home.month_view(date(2024, 2, 14)).unwrap();

        // Assert
        let cell = |d: i8| view.cells[3 + d as usize].unwrap();
        assert!(cell(3).has_items);
        assert!(!cell(4).has_items);
        assert!(cell(14).is_today && cell(14).is_selected);
    }
}
