// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use almanac_core::{APP_NAME, Almanac};
use clap::{ArgAction, ArgMatches, Command, ValueHint, arg, builder::styling, crate_version};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_dashboard::CmdDashboard;
use crate::cmd_month::CmdMonth;
use crate::cmd_schedule::{
    CmdScheduleDelete, CmdScheduleEdit, CmdScheduleList, CmdScheduleNew, CmdScheduleShow,
};
use crate::cmd_task::{CmdTaskDelete, CmdTaskDone, CmdTaskEdit, CmdTaskList, CmdTaskNew, CmdTaskUndo};
use crate::cmd_todo::{CmdTodoDelete, CmdTodoDone, CmdTodoList, CmdTodoNew, CmdTodoUndo};
use crate::config::parse_config;

/// Run the almanac command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = result {
        tracing::debug!(%err, "tracing subscriber already set");
    }
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Verbosity, each `-v` raises the log level
    pub verbose: u8,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("A calendar with schedules, tasks and to-dos, in your terminal.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to dashboard
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/almanac/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/almanac/config.toml on Windows.",
                    )
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                arg!(-v --verbose "Increase log verbosity, repeat for more")
                    .action(ArgAction::Count)
                    .global(true),
            )
            .subcommand(CmdDashboard::command())
            .subcommand(CmdMonth::command())
            .subcommand(
                Command::new("schedule")
                    .alias("s")
                    .about("Manage your schedules")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdScheduleNew::command())
                    .subcommand(CmdScheduleEdit::command())
                    .subcommand(CmdScheduleShow::command())
                    .subcommand(CmdScheduleDelete::command())
                    .subcommand(CmdScheduleList::command()),
            )
            .subcommand(
                Command::new("task")
                    .alias("k")
                    .about("Manage your tasks")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTaskNew::command())
                    .subcommand(CmdTaskEdit::command())
                    .subcommand(CmdTaskDone::command())
                    .subcommand(CmdTaskUndo::command())
                    .subcommand(CmdTaskDelete::command())
                    .subcommand(CmdTaskList::command()),
            )
            .subcommand(
                Command::new("todo")
                    .alias("t")
                    .about("Manage your todo list")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTodoNew::command())
                    .subcommand(CmdTodoDone::command())
                    .subcommand(CmdTodoUndo::command())
                    .subcommand(CmdTodoDelete::command())
                    .subcommand(CmdTodoList::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDashboard::NAME, matches)) => Dashboard(CmdDashboard::from(matches)),
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)),
            Some(("schedule", matches)) => match matches.subcommand() {
                Some((CmdScheduleNew::NAME, m)) => ScheduleNew(CmdScheduleNew::from(m)),
                Some((CmdScheduleEdit::NAME, m)) => ScheduleEdit(CmdScheduleEdit::from(m)?),
                Some((CmdScheduleShow::NAME, m)) => ScheduleShow(CmdScheduleShow::from(m)?),
                Some((CmdScheduleDelete::NAME, m)) => ScheduleDelete(CmdScheduleDelete::from(m)),
                Some((CmdScheduleList::NAME, m)) => ScheduleList(CmdScheduleList::from(m)),
                _ => unreachable!(),
            },
            Some(("task", matches)) => match matches.subcommand() {
                Some((CmdTaskNew::NAME, m)) => TaskNew(CmdTaskNew::from(m)),
                Some((CmdTaskEdit::NAME, m)) => TaskEdit(CmdTaskEdit::from(m)?),
                Some((CmdTaskDone::NAME, m)) => TaskDone(CmdTaskDone::from(m)),
                Some((CmdTaskUndo::NAME, m)) => TaskUndo(CmdTaskUndo::from(m)),
                Some((CmdTaskDelete::NAME, m)) => TaskDelete(CmdTaskDelete::from(m)),
                Some((CmdTaskList::NAME, m)) => TaskList(CmdTaskList::from(m)),
                _ => unreachable!(),
            },
            Some(("todo", matches)) => match matches.subcommand() {
                Some((CmdTodoNew::NAME, m)) => TodoNew(CmdTodoNew::from(m)?),
                Some((CmdTodoDone::NAME, m)) => TodoDone(CmdTodoDone::from(m)),
                Some((CmdTodoUndo::NAME, m)) => TodoUndo(CmdTodoUndo::from(m)),
                Some((CmdTodoDelete::NAME, m)) => TodoDelete(CmdTodoDelete::from(m)),
                Some((CmdTodoList::NAME, m)) => TodoList(CmdTodoList::from(m)),
                _ => unreachable!(),
            },
            None => Dashboard(CmdDashboard),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        let verbose = matches.get_count("verbose");
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the dashboard
    Dashboard(CmdDashboard),

    /// Show a month
    Month(CmdMonth),

    /// Add a new schedule
    ScheduleNew(CmdScheduleNew),

    /// Edit a schedule
    ScheduleEdit(CmdScheduleEdit),

    /// Show a schedule
    ScheduleShow(CmdScheduleShow),

    /// Delete schedules
    ScheduleDelete(CmdScheduleDelete),

    /// List schedules
    ScheduleList(CmdScheduleList),

    /// Add a new task
    TaskNew(CmdTaskNew),

    /// Edit a task
    TaskEdit(CmdTaskEdit),

    /// Mark tasks as done
    TaskDone(CmdTaskDone),

    /// Mark tasks as undone
    TaskUndo(CmdTaskUndo),

    /// Delete tasks
    TaskDelete(CmdTaskDelete),

    /// List tasks
    TaskList(CmdTaskList),

    /// Add a new todo
    TodoNew(CmdTodoNew),

    /// Mark todos as done
    TodoDone(CmdTodoDone),

    /// Mark todos as undone
    TodoUndo(CmdTodoUndo),

    /// Delete todos
    TodoDelete(CmdTodoDelete),

    /// List todos
    TodoList(CmdTodoList),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Dashboard(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            Month(a)          => Self::run_with(config, |x| a.run(x).boxed()).await,
            ScheduleNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ScheduleEdit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            ScheduleShow(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            ScheduleDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            ScheduleList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            TaskNew(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            TaskEdit(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            TaskDone(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            TaskUndo(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            TaskDelete(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            TaskList(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoNew(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoDone(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoUndo(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoDelete(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoList(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Almanac) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let almanac = Almanac::new(core_config).await?;

        let result = f(&almanac).await;
        almanac.close().await;
        result
    }
}
