// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::datetime::{date_to_millis, format_date_millis};
use almanac_core::home::{CalendarHome, DayItems};
use almanac_core::{Almanac, YearMonth};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use crate::cmd_schedule::CmdScheduleList;
use crate::cmd_task::CmdTaskList;
use crate::cmd_todo::CmdTodoList;
use crate::month_grid::MonthGrid;
use crate::util::{ArgOutputFormat, parse_date, parse_month};

#[derive(Debug, Clone)]
pub struct CmdMonth {
    pub month: Option<String>,
    pub select: Option<String>,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("m")
            .about("Show a month and the items of a selected day")
            .arg(arg!([MONTH] "Month to show, YYYY-MM; the current month by default"))
            .arg(arg!(-s --select <DATE> "Day to select, YYYY-MM-DD"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            month: matches.get_one("MONTH").cloned(),
            select: matches.get_one("select").cloned(),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        let now = almanac.now();
        let selected = self.select.as_ref().map(|a| parse_date(a, now)).transpose()?;
        let month = match (&self.month, selected) {
            (Some(month), _) => parse_month(almanac, month)?,
            (None, Some(date)) => parse_month(almanac, &YearMonth::of(date).to_string())?,
            (None, None) => YearMonth::of(now.date()),
        };
        tracing::debug!(%month, "showing month");

        let home = almanac.home()?;
        if let Some(date) = selected {
            home.select_date(date_to_millis(date, now.time_zone())?)?;
        }
        home.load_month(month).await?;
        print_home(almanac, &home)
    }
}

/// Prints the loaded month followed by the items of the selected day.
pub fn print_home(almanac: &Almanac, home: &CalendarHome) -> Result<(), Box<dyn Error>> {
    let now = almanac.now();
    let view = home.month_view(now.date()).ok_or("No month loaded")?;
    println!("{}", MonthGrid::new(&view));
    println!();

    let state = home.state();
    let day = format_date_millis(state.selected_date_millis, now.time_zone())?;
    println!("{}", day.bold());
    print_day(almanac, &state.daily);
    Ok(())
}

fn print_day(almanac: &Almanac, items: &DayItems) {
    if items.is_empty() {
        println!("{}", "Nothing planned".italic());
        return;
    }

    const TABLE: ArgOutputFormat = ArgOutputFormat::Table;
    if !items.schedules.is_empty() {
        println!("🗓️ {}", "Schedules".bold());
        CmdScheduleList::print(almanac, &items.schedules, TABLE);
    }
    if !items.tasks.is_empty() {
        println!("📌 {}", "Tasks".bold());
        CmdTaskList::print(almanac, &items.tasks, TABLE);
    }
    if !items.todos.is_empty() {
        println!("✅ {}", "To-Dos".bold());
        CmdTodoList::print(almanac, &items.todos, TABLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_and_selection() {
        let matches = CmdMonth::command().get_matches_from(["month", "2024-02", "-s", "2024-02-14"]);
        let cmd = CmdMonth::from(&matches);
        assert_eq!(cmd.month.as_deref(), Some("2024-02"));
        assert_eq!(cmd.select.as_deref(), Some("2024-02-14"));
    }

    #[test]
    fn month_is_optional() {
        let matches = CmdMonth::command().get_matches_from(["month"]);
        let cmd = CmdMonth::from(&matches);
        assert_eq!(cmd.month, None);
        assert_eq!(cmd.select, None);
    }
}
