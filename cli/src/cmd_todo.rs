// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::datetime::date_to_millis;
use almanac_core::{Almanac, Todo};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use crate::todo_formatter::TodoFormatter;
use crate::util::{ArgOutputFormat, parse_date, parse_datetime_millis};

#[derive(Debug, Clone)]
pub struct CmdTodoNew {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new todo")
            .arg(arg!(title: <TITLE> "Title of the todo"))
            .arg(arg!(--description <DESCRIPTION> "Description of the todo"))
            .arg(arg!(--due <DATETIME> "Due, YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM; now by default"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let title = matches
            .get_one::<String>("title")
            .cloned()
            .ok_or("Title is required for new todo")?;
        Ok(Self {
            title,
            description: matches.get_one("description").cloned(),
            due: matches.get_one("due").cloned(),
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        tracing::debug!("adding new todo...");
        let mut todo = Todo::new(self.title);
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(due) = &self.due {
            todo.date_time_millis = parse_datetime_millis(due, almanac.now())?;
        }

        let id = almanac.todos().insert(&todo).await?;
        todo.id = Some(id);

        let formatter = TodoFormatter::new(almanac.now()).with_output_format(self.output_format);
        println!("{}", formatter.format(&[todo]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoDone {
    pub ids: Vec<i64>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark todos as done")
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
            tracing::debug!(id, "marking todo as done");
            TodoEdit {
                id,
                is_completed: true,
                output_format: self.output_format,
            }
            .run(almanac)
            .await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoUndo {
    pub ids: Vec<i64>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoUndo {
    pub const NAME: &str = "undo";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark todos as not done")
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
            tracing::debug!(id, "marking todo as undone");
            TodoEdit {
                id,
                is_completed: false,
                output_format: self.output_format,
            }
            .run(almanac)
            .await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoDelete {
    pub ids: Vec<i64>,
}

impl CmdTodoDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete todos")
            .arg(arg_ids())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
        }
    }

    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "deleting todo...");
            almanac.todos().delete(id).await?;
            println!("{} {}", "Deleted todo:".green(), id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoList {
    pub all: bool,
    pub date: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List open todos")
            .arg(arg!(-a --all "Include completed todos"))
            .arg(arg!(-d --date <DATE> "Only todos due on this day, YYYY-MM-DD"))
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
        tracing::debug!("listing todos...");
        let now = almanac.now();
        let mut todos = match &self.date {
            Some(date) => {
                let date = parse_date(date, now)?;
                let start = date_to_millis(date, now.time_zone())?;
                let end = date_to_millis(date.tomorrow()?, now.time_zone())?;
                almanac.todos().list_between(start, end).await?
            }
            None => almanac.todos().list().await?,
        };
        if !self.all {
            todos.retain(|a| !a.is_completed);
        }
        todos.sort_by_key(|a| a.date_time_millis);
        Self::print(almanac, &todos, self.output_format);
        Ok(())
    }

    pub fn print(almanac: &Almanac, todos: &[Todo], output_format: ArgOutputFormat) {
        if todos.is_empty() && output_format == ArgOutputFormat::Table {
            println!("{}", "No todos found".italic());
            return;
        }
        let formatter = TodoFormatter::new(almanac.now()).with_output_format(output_format);
        println!("{}", formatter.format(todos));
    }
}

struct TodoEdit {
    id: i64,
    is_completed: bool,
    output_format: ArgOutputFormat,
}

impl TodoEdit {
    async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        let repo = almanac.todos();
        let mut todo = repo
            .get(self.id)
            .await?
            .ok_or_else(|| format!("Todo not found: {}", self.id))?;
        todo.is_completed = self.is_completed;
        repo.update(&todo).await?;

        let formatter = TodoFormatter::new(almanac.now()).with_output_format(self.output_format);
        println!("{}", formatter.format(&[todo]));
        Ok(())
    }
}

fn arg_ids() -> Arg {
    arg!(id: <ID> "The id of the todo")
        .value_parser(value_parser!(i64))
        .num_args(1..)
}

fn get_ids(matches: &ArgMatches) -> Vec<i64> {
    matches
        .get_many::<i64>("id")
        .map(|ids| ids.copied().collect())
        .unwrap_or_default()
}
