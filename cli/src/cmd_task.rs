// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::datetime::date_to_millis;
use almanac_core::editor::TaskEditor;
use almanac_core::{Almanac, Task};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use jiff::Zoned;

use crate::task_formatter::TaskFormatter;
use crate::util::{ArgOutputFormat, parse_date, parse_datetime_millis};

/// Field changes shared by `task new` and `task edit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub unschedule: bool,
}

impl TaskFields {
    fn args(title_required: bool) -> [Arg; 5] {
        let title = match title_required {
            true => arg!(title: <TITLE> "Title of the task"),
            false => arg!(-t --title <TITLE> "New title of the task"),
        };
        [
            title,
            arg!(--description <DESCRIPTION> "Description of the task"),
            arg!(-s --start <DATETIME> "Start, YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM"),
            arg!(-e --end <DATETIME> "End, YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM"),
            arg!(--unschedule "Clear the start and end times")
                .conflicts_with_all(["start", "end"]),
        ]
    }

    fn from(matches: &ArgMatches) -> Self {
        Self {
            title: matches.get_one("title").cloned(),
            description: matches.get_one("description").cloned(),
            start: matches.get_one("start").cloned(),
            end: matches.get_one("end").cloned(),
            unschedule: matches.get_flag("unschedule"),
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, editor: &TaskEditor, now: &Zoned) -> Result<(), Box<dyn Error>> {
        if let Some(title) = self.title {
            editor.update_title(title);
        }
        if let Some(description) = self.description {
            editor.update_description(description);
        }
        if self.unschedule {
            editor.update_start_time_millis(None);
            editor.update_end_time_millis(None);
        }
        if let Some(start) = &self.start {
            editor.update_start_time_millis(Some(parse_datetime_millis(start, now)?));
        }
        if let Some(end) = &self.end {
            editor.update_end_time_millis(Some(parse_datetime_millis(end, now)?));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskNew {
    pub fields: TaskFields,
}

impl CmdTaskNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new task")
            .args(TaskFields::args(true))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            fields: TaskFields::from(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        tracing::debug!("adding new task...");
        let editor = almanac.task_editor(None).await?;
        let title = self.fields.title.clone().unwrap_or_default();
        self.fields.apply(&editor, almanac.now())?;
        editor.save().await?;

        println!("{} {}", "Created task:".green(), title);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskEdit {
    pub id: i64,
    pub fields: TaskFields,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a task")
            .arg(arg_id())
            .args(TaskFields::args(false))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: get_id(matches)?,
            fields: TaskFields::from(matches),
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = self.id, "editing task...");
        if self.fields.is_empty() {
            return Err("Nothing to change, see `task edit --help`".into());
        }

        let editor = load_task(almanac, self.id).await?;
        self.fields.apply(&editor, almanac.now())?;
        editor.save().await?;
        print_task(almanac, self.id, self.output_format).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskDone {
    pub ids: Vec<i64>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark tasks as done")
            .arg(arg_ids())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "marking task as done");
            set_completed(almanac, id, true, self.output_format).await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskUndo {
    pub ids: Vec<i64>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskUndo {
    pub const NAME: &str = "undo";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark tasks as not done")
            .arg(arg_ids())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "marking task as undone");
            set_completed(almanac, id, false, self.output_format).await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskDelete {
    pub ids: Vec<i64>,
}

impl CmdTaskDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete tasks")
            .arg(arg_ids())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "deleting task...");
            TaskEditor::new(almanac.tasks(), Some(id)).delete().await?;
            println!("{} {}", "Deleted task:".green(), id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskList {
    pub all: bool,
    pub date: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List open tasks")
            .arg(arg!(-a --all "Include completed tasks"))
            .arg(arg!(-d --date <DATE> "Only tasks scheduled on this day, YYYY-MM-DD"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            all: matches.get_flag("all"),
            date: matches.get_one("date").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        tracing::debug!("listing tasks...");
        let now = almanac.now();
        let mut tasks = match &self.date {
            Some(date) => {
                let date = parse_date(date, now)?;
                let start = date_to_millis(date, now.time_zone())?;
                let end = date_to_millis(date.tomorrow()?, now.time_zone())?;
                almanac.tasks().list_between(start, end).await?
            }
            None => almanac.tasks().list().await?,
        };
        if !self.all {
            tasks.retain(|a| !a.is_completed);
        }
        Self::print(almanac, &tasks, self.output_format);
        Ok(())
    }

    pub fn print(almanac: &Almanac, tasks: &[Task], output_format: ArgOutputFormat) {
        if tasks.is_empty() && output_format == ArgOutputFormat::Table {
            println!("{}", "No tasks found".italic());
            return;
        }
        let formatter =
            TaskFormatter::new(almanac.now().time_zone().clone()).with_output_format(output_format);
        println!("{}", formatter.format(tasks));
    }
}

async fn load_task(almanac: &Almanac, id: i64) -> Result<TaskEditor, Box<dyn Error>> {
    let editor = almanac.task_editor(Some(id)).await?;
    match editor.state().is_edit {
        true => Ok(editor),
        false => Err(format!("Task not found: {id}").into()),
    }
}

async fn set_completed(
    almanac: &Almanac,
    id: i64,
    is_completed: bool,
    output_format: ArgOutputFormat,
) -> Result<(), Box<dyn Error>> {
    let editor = load_task(almanac, id).await?;
    editor.set_completed(is_completed);
    editor.save().await?;
    print_task(almanac, id, output_format).await
}

async fn print_task(
    almanac: &Almanac,
    id: i64,
    output_format: ArgOutputFormat,
) -> Result<(), Box<dyn Error>> {
    let task = almanac
        .tasks()
        .get(id)
        .await?
        .ok_or_else(|| format!("Task not found: {id}"))?;
    let formatter =
        TaskFormatter::new(almanac.now().time_zone().clone()).with_output_format(output_format);
    println!("{}", formatter.format(&[task]));
    Ok(())
}

fn arg_id() -> Arg {
    arg!(id: <ID> "The id of the task").value_parser(value_parser!(i64))
}

fn get_id(matches: &ArgMatches) -> Result<i64, Box<dyn Error>> {
    matches
        .get_one::<i64>("id")
        .copied()
        .ok_or_else(|| "id is required".into())
}

fn arg_ids() -> Arg {
    arg_id().num_args(1..)
}

fn get_ids(matches: &ArgMatches) -> Vec<i64> {
    matches
        .get_many::<i64>("id")
        .map(|ids| ids.copied().collect())
        .unwrap_or_default()
}
