// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of the almanac calendar.

mod cli;
mod cmd_dashboard;
mod cmd_month;
mod cmd_schedule;
mod cmd_task;
mod cmd_todo;
mod config;
mod month_grid;
mod schedule_formatter;
mod table;
mod task_formatter;
mod todo_formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
