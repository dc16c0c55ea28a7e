// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::tz::TimeZone;

use crate::Error;
use crate::datetime::{format_date_millis, format_hour_minute};

/// A calendar event with a start, an end and an all-day flag.
///
/// The start and end dates are the instants their days begin; the time of
/// day is kept separately in the hour and minute fields, which are ignored
/// when `is_all_day` is set. Nothing enforces that the start precedes the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Schedule {
    /// Primary key assigned by the table, `None` until the schedule is stored.
    pub id: Option<i64>,

    pub title: String,

    pub description: String,

    pub start_date_millis: i64,

    pub start_hour: i8,

    pub start_minute: i8,

    pub end_date_millis: i64,

    pub end_hour: i8,

    pub end_minute: i8,

    pub is_all_day: bool,

    pub place: String,

    pub is_completed: bool,
}

impl Schedule {
    /// Whether the schedule starts and ends on the same day.
    pub fn is_single_day(&self) -> bool {
        self.start_date_millis == self.end_date_millis
    }

    /// Human readable time span, e.g. `09:00 - 10:30` for a single day,
    /// `2024-02-01 09:00 - 2024-02-03 18:00` across days.
    pub fn format_span(&self, tz: &TimeZone) -> Result<String, Error> {
        if self.is_single_day() {
            return Ok(match self.is_all_day {
                true => ALL_DAY.to_string(),
                false => format!(
                    "{} - {}",
                    format_hour_minute(self.start_hour, self.start_minute),
                    format_hour_minute(self.end_hour, self.end_minute)
                ),
            });
        }

        let start = format_date_millis(self.start_date_millis, tz)?;
        let end = format_date_millis(self.end_date_millis, tz)?;
        Ok(match self.is_all_day {
            true => format!("{start} - {end}"),
            false => format!(
                "{start} {} - {end} {}",
                format_hour_minute(self.start_hour, self.start_minute),
                format_hour_minute(self.end_hour, self.end_minute)
            ),
        })
    }
}

const ALL_DAY: &str = "All day";
