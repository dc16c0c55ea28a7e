// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use almanac_core::datetime::date_to_millis;
use almanac_core::{Config, ConfigDuration, Schedule, Todo};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Zoned};

/// Creates a configuration storing its database under `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        default_duration: ConfigDuration::new(SignedDuration::from_hours(1)),
        year_span: 2,
    }
}

/// Start of `date` in UTC, in milliseconds since the epoch.
#[must_use]
pub fn day_millis(date: Date) -> i64 {
    date_to_millis(date, &TimeZone::UTC).expect("date should be representable")
}

/// Noon of `date` in UTC.
#[must_use]
pub fn utc_noon(date: Date) -> Zoned {
    date.at(12, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .expect("noon should be representable")
}

/// A timed schedule from `start` 09:00 to `end` 10:00.
#[must_use]
pub fn test_schedule(title: &str, start: Date, end: Date) -> Schedule {
    Schedule {
        title: title.to_string(),
        start_date_millis: day_millis(start),
        start_hour: 9,
        start_minute: 0,
        end_date_millis: day_millis(end),
        end_hour: 10,
        end_minute: 0,
        ..Default::default()
    }
}

/// An open to-do due at noon of `date`.
#[must_use]
pub fn test_todo(title: &str, date: Date) -> Todo {
    Todo {
        date_time_millis: day_millis(date) + 12 * 3_600_000,
        ..Todo::new(title)
    }
}
