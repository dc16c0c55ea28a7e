// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use almanac_core::{Almanac, YearMonth};
use almanac_core::datetime::DATE_FORMAT;
use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Parses `YYYY-MM-DD`, or one of `today` / `tomorrow` / `yesterday`.
pub fn parse_date(s: &str, now: &Zoned) -> Result<Date, Box<dyn Error>> {
    let today = now.date();
    match s.trim() {
        "today" => Ok(today),
        "tomorrow" => Ok(today.tomorrow()?),
        "yesterday" => Ok(today.yesterday()?),
        s => Date::strptime(DATE_FORMAT, s)
            .map_err(|_| format!("Invalid date: {s}, expected YYYY-MM-DD").into()),
    }
}

/// Parses `HH:MM` into an hour and a minute.
pub fn parse_hour_minute(s: &str) -> Result<(i8, i8), Box<dyn Error>> {
    let time = Time::strptime("%H:%M", s.trim())
        .map_err(|_| format!("Invalid time: {s}, expected HH:MM"))?;
    Ok((time.hour(), time.minute()))
}

/// Parses an instant given as `YYYY-MM-DD HH:MM`, `YYYY-MM-DD` (start of the
/// day) or `HH:MM` (today), returning epoch milliseconds.
pub fn parse_datetime_millis(s: &str, now: &Zoned) -> Result<i64, Box<dyn Error>> {
    let s = s.trim();
    let tz = now.time_zone().clone();
    let dt = if let Ok(dt) = DateTime::strptime("%Y-%m-%d %H:%M", s) {
        dt
    } else if let Ok(time) = Time::strptime("%H:%M", s) {
        now.date().to_datetime(time)
    } else if let Ok(date) = parse_date(s, now) {
        date.to_datetime(Time::midnight())
    } else {
        return Err(
            "Invalid date format. Expected format: YYYY-MM-DD, HH:MM and YYYY-MM-DD HH:MM".into(),
        );
    };
    Ok(dt.to_zoned(tz)?.timestamp().as_millisecond())
}

/// Formats epoch milliseconds as `YYYY-MM-DD HH:MM` in `tz`.
pub fn format_datetime_millis(millis: i64, tz: &TimeZone) -> Result<String, Box<dyn Error>> {
    let zoned = Timestamp::from_millisecond(millis)?.to_zoned(tz.clone());
    Ok(zoned.strftime("%Y-%m-%d %H:%M").to_string())
}

/// Parses `YYYY-MM` into a month the calendar can page to.
pub fn parse_month(almanac: &Almanac, s: &str) -> Result<YearMonth, Box<dyn Error>> {
    let month = s.parse::<YearMonth>()?;
    match almanac.month_pager().page_of(month) {
        Some(_) => Ok(month),
        None => Err(format!("Month {month} is outside the calendar range").into()),
    }
}
