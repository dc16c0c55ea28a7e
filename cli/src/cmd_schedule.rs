// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::datetime::{date_to_millis, millis_to_date};
use almanac_core::editor::ScheduleEditor;
use almanac_core::grid::month_range;
use almanac_core::{Almanac, Schedule};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use jiff::Zoned;

use crate::schedule_formatter::ScheduleFormatter;
use crate::util::{ArgOutputFormat, parse_date, parse_hour_minute, parse_month};

/// Optional field changes shared by `schedule new` and `schedule edit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub place: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end_date: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
}

impl ScheduleFields {
    fn args(title_required: bool) -> [Arg; 9] {
        let title = match title_required {
            true => arg!(title: <TITLE> "Title of the schedule"),
            false => arg!(-t --title <TITLE> "New title of the schedule"),
        };
        [
            title,
            arg!(--description <DESCRIPTION> "Description of the schedule"),
            arg!(-p --place <PLACE> "Where the schedule takes place"),
            arg!(-d --date <DATE> "Start date, YYYY-MM-DD, today or tomorrow"),
            arg!(-s --start <TIME> "Start time, HH:MM"),
            arg!(--"end-date" <DATE> "End date, YYYY-MM-DD"),
            arg!(-e --end <TIME> "End time, HH:MM"),
            arg!(--"all-day" "Mark as an all-day schedule").conflicts_with("timed"),
            arg!(--timed "Mark as a schedule with start and end times"),
        ]
    }

    fn from(matches: &ArgMatches) -> Self {
        let all_day = match (matches.get_flag("all-day"), matches.get_flag("timed")) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Self {
            title: matches.get_one("title").cloned(),
            description: matches.get_one("description").cloned(),
            place: matches.get_one("place").cloned(),
            date: matches.get_one("date").cloned(),
            start: matches.get_one("start").cloned(),
            end_date: matches.get_one("end-date").cloned(),
            end: matches.get_one("end").cloned(),
            all_day,
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the changes into the editor.
    ///
    /// Moving the start date without an explicit end date shifts the end date
    /// by the same number of days.
    fn apply(self, editor: &ScheduleEditor, now: &Zoned) -> Result<(), Box<dyn Error>> {
        let tz = now.time_zone();
        if let Some(title) = self.title {
            editor.update_title(title);
        }
        if let Some(description) = self.description {
            editor.update_description(description);
        }
        if let Some(place) = self.place {
            editor.update_place(place);
        }
        if let Some(date) = &self.date {
            let state = editor.state();
            let old_start = millis_to_date(state.start_date_millis, tz)?;
            let old_end = millis_to_date(state.end_date_millis, tz)?;
            let start = parse_date(date, now)?;
            editor.update_start_date_millis(date_to_millis(start, tz)?);
            if self.end_date.is_none() {
                let end = start.checked_add(old_end.since(old_start)?)?;
                editor.update_end_date_millis(date_to_millis(end, tz)?);
            }
        }
        if let Some(end_date) = &self.end_date {
            let end = parse_date(end_date, now)?;
            editor.update_end_date_millis(date_to_millis(end, tz)?);
        }
        if let Some(start) = &self.start {
            let (hour, minute) = parse_hour_minute(start)?;
            editor.update_start_time(hour, minute);
        }
        if let Some(end) = &self.end {
            let (hour, minute) = parse_hour_minute(end)?;
            editor.update_end_time(hour, minute);
        }
        if let Some(all_day) = self.all_day {
            editor.set_all_day(all_day);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleNew {
    pub fields: ScheduleFields,
}

impl CmdScheduleNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new schedule")
            .args(ScheduleFields::args(true))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            fields: ScheduleFields::from(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        tracing::debug!("adding new schedule...");
        let now = almanac.now();
        let editor = almanac.new_schedule(None)?;
        let title = self.fields.title.clone().unwrap_or_default();
        self.fields.apply(&editor, now)?;
        editor.save().await?;

        println!("{} {}", "Created schedule:".green(), title);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleEdit {
    pub id: i64,
    pub fields: ScheduleFields,
    pub completed: Option<bool>,
    pub output_format: ArgOutputFormat,
}

impl CmdScheduleEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a schedule")
            .arg(arg_id())
            .args(ScheduleFields::args(false))
            .arg(arg!(--done "Mark the schedule as completed").conflicts_with("undone"))
            .arg(arg!(--undone "Mark the schedule as not completed"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let completed = match (matches.get_flag("done"), matches.get_flag("undone")) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Ok(Self {
            id: get_id(matches)?,
            fields: ScheduleFields::from(matches),
            completed,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = self.id, "editing schedule...");
        if self.fields.is_empty() && self.completed.is_none() {
            return Err("Nothing to change, see `schedule edit --help`".into());
        }

        let editor = almanac.edit_schedule(self.id).await?;
        if !editor.state().is_edit {
            return Err(format!("Schedule not found: {}", self.id).into());
        }

        self.fields.apply(&editor, almanac.now())?;
        if let Some(completed) = self.completed {
            editor.set_completed(completed);
        }
        editor.save().await?;

        let schedule = get_schedule(almanac, self.id).await?;
        let formatter = ScheduleFormatter::new(almanac.now().time_zone().clone())
            .with_output_format(self.output_format);
        println!("{}", formatter.format(&[schedule]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleShow {
    pub id: i64,
    pub output_format: ArgOutputFormat,
}

impl CmdScheduleShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the details of a schedule")
            .arg(arg_id())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: get_id(matches)?,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        let schedule = get_schedule(almanac, self.id).await?;
        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&schedule)?),
            ArgOutputFormat::Table => {
                let tz = almanac.now().time_zone();
                println!("{}", schedule.title.bold());
                println!("{:>12} {}", "Time:".dimmed(), schedule.format_span(tz)?);
                if !schedule.place.is_empty() {
                    println!("{:>12} {}", "Place:".dimmed(), schedule.place);
                }
                if !schedule.description.is_empty() {
                    println!("{:>12} {}", "Description:".dimmed(), schedule.description);
                }
                let status = match schedule.is_completed {
                    true => "completed",
                    false => "open",
                };
                println!("{:>12} {}", "Status:".dimmed(), status);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleDelete {
    pub ids: Vec<i64>,
}

impl CmdScheduleDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete schedules")
            .arg(arg_id().num_args(1..))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "deleting schedule...");
            ScheduleEditor::edit(almanac.schedules(), id).delete().await?;
            println!("{} {}", "Deleted schedule:".green(), id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleList {
    pub date: Option<String>,
    pub month: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdScheduleList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List schedules of a day or a month, today by default")
            .arg(arg!(-d --date <DATE> "Day to list, YYYY-MM-DD").conflicts_with("month"))
            .arg(arg!(-m --month <MONTH> "Month to list, YYYY-MM"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one("date").cloned(),
            month: matches.get_one("month").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        let now = almanac.now();
        let tz = now.time_zone();
        let (start, end) = match (&self.month, &self.date) {
            (Some(month), _) => month_range(parse_month(almanac, month)?)?,
            (None, Some(date)) => {
                let date = parse_date(date, now)?;
                (date, date.tomorrow()?)
            }
            (None, None) => (now.date(), now.date().tomorrow()?),
        };
        tracing::debug!(%start, %end, "listing schedules...");

        let schedules = almanac
            .schedules()
            .list_between(date_to_millis(start, tz)?, date_to_millis(end, tz)?)
            .await?;
        Self::print(almanac, &schedules, self.output_format);
        Ok(())
    }

    pub fn print(almanac: &Almanac, schedules: &[Schedule], output_format: ArgOutputFormat) {
        if schedules.is_empty() && output_format == ArgOutputFormat::Table {
            println!("{}", "No schedules found".italic());
            return;
        }
        let formatter = ScheduleFormatter::new(almanac.now().time_zone().clone())
            .with_output_format(output_format);
        println!("{}", formatter.format(schedules));
    }
}

async fn get_schedule(almanac: &Almanac, id: i64) -> Result<Schedule, Box<dyn Error>> {
    almanac
        .schedules()
        .get(id)
        .await?
        .ok_or_else(|| format!("Schedule not found: {id}").into())
}

fn arg_id() -> Arg {
    arg!(id: <ID> "The id of the schedule").value_parser(value_parser!(i64))
}

fn get_id(matches: &ArgMatches) -> Result<i64, Box<dyn Error>> {
    matches
        .get_one::<i64>("id")
        .copied()
        .ok_or_else(|| "id is required".into())
}

fn get_ids(matches: &ArgMatches) -> Vec<i64> {
    matches
        .get_many::<i64>("id")
        .map(|ids| ids.copied().collect())
        .unwrap_or_default()
}
