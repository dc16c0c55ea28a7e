// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Conversions between civil dates and milliseconds since the Unix epoch.
//!
//! Dates are stored as the instant their day starts in a given time zone, so
//! the same zone must be used for writing and reading.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::Error;

/// Date format used for display and command-line input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Milliseconds since the epoch at the start of `date` in `tz`.
pub fn date_to_millis(date: Date, tz: &TimeZone) -> Result<i64, Error> {
    Ok(date.to_zoned(tz.clone())?.timestamp().as_millisecond())
}

/// The civil date in `tz` containing the instant `millis`.
pub fn millis_to_date(millis: i64, tz: &TimeZone) -> Result<Date, Error> {
    Ok(Timestamp::from_millisecond(millis)?.to_zoned(tz.clone()).date())
}

/// Truncates `millis` to the start of its day in `tz`.
pub fn day_start_millis(millis: i64, tz: &TimeZone) -> Result<i64, Error> {
    date_to_millis(millis_to_date(millis, tz)?, tz)
}

/// Milliseconds since the epoch at the start of the day containing `now`.
pub fn today_millis(now: &Zoned) -> Result<i64, Error> {
    date_to_millis(now.date(), now.time_zone())
}

/// The current instant in milliseconds since the epoch.
pub fn now_millis() -> i64 {
    Timestamp::now().as_millisecond()
}

/// Formats the date containing `millis` as `YYYY-MM-DD`.
pub fn format_date_millis(millis: i64, tz: &TimeZone) -> Result<String, Error> {
    Ok(millis_to_date(millis, tz)?.strftime(DATE_FORMAT).to_string())
}

/// Formats an hour and minute as zero-padded `HH:MM`.
pub fn format_hour_minute(hour: i8, minute: i8) -> String {
    format!("{hour:02}:{minute:02}")
}
