// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::{Almanac, YearMonth};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::cmd_month::print_home;
use crate::cmd_task::CmdTaskList;
use crate::util::ArgOutputFormat;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdDashboard;

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the dashboard: this month, today's items and unscheduled tasks")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdDashboard
    }

    /// Show the current month with today selected.
    pub async fn run(self, almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating dashboard...");

        let home = almanac.home()?;
        home.load_month(YearMonth::of(almanac.now().date())).await?;
        print_home(almanac, &home)?;
        println!();

        Self::list_unscheduled(almanac).await
    }

    async fn list_unscheduled(almanac: &Almanac) -> Result<(), Box<dyn Error>> {
        let tasks: Vec<_> = almanac
            .tasks()
            .list()
            .await?
            .into_iter()
            .filter(|a| !a.is_completed && !a.is_scheduled())
            .collect();

        if !tasks.is_empty() {
            println!("📌 {}", "Unscheduled tasks".bold());
            CmdTaskList::print(almanac, &tasks, ArgOutputFormat::Table);
        }
        Ok(())
    }
}
