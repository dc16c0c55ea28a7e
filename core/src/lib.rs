// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the almanac calendar: month grids, schedules, tasks and to-dos
//! stored in SQLite, and the state holders behind each screen.

mod almanac;
mod config;
pub mod datetime;
pub mod editor;
mod error;
pub mod grid;
pub mod home;
pub mod localdb;
pub mod repository;
mod schedule;
mod task;
mod todo;

pub use crate::almanac::Almanac;
pub use crate::config::{
    APP_NAME, Config, ConfigDuration, DEFAULT_YEAR_SPAN, expand_path, get_config_dir,
    parse_duration,
};
pub use crate::error::Error;
pub use crate::grid::{CalendarCell, MonthPager, MonthView, YearMonth};
pub use crate::repository::{Repository, observe, observe_all};
pub use crate::schedule::Schedule;
pub use crate::task::Task;
pub use crate::todo::Todo;
