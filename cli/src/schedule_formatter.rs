// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use almanac_core::Schedule;
use colored::Color;
use jiff::tz::TimeZone;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::ArgOutputFormat;

#[derive(Debug)]
pub struct ScheduleFormatter {
    columns: Vec<ScheduleColumn>,
    format: ArgOutputFormat,
}

impl ScheduleFormatter {
    pub fn new(tz: TimeZone) -> Self {
        Self {
            columns: vec![
                ScheduleColumn::Id(ScheduleColumnId),
                ScheduleColumn::Status(ScheduleColumnStatus),
                ScheduleColumn::Span(ScheduleColumnSpan(tz)),
                ScheduleColumn::Title(ScheduleColumnTitle),
                ScheduleColumn::Place(ScheduleColumnPlace),
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, schedules: &'a [Schedule]) -> Display<'a> {
        Display {
            schedules,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    schedules: &'a [Schedule],
    formatter: &'a ScheduleFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.schedules)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.schedules)
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ScheduleColumn {
    Id(ScheduleColumnId),
    Place(ScheduleColumnPlace),
    Span(ScheduleColumnSpan),
    Status(ScheduleColumnStatus),
    Title(ScheduleColumnTitle),
}

impl TableColumn<Schedule> for ScheduleColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ScheduleColumn::Id(_) => "ID",
            ScheduleColumn::Place(_) => "Place",
            ScheduleColumn::Span(_) => "Time",
            ScheduleColumn::Status(_) => "Status",
            ScheduleColumn::Title(_) => "Title",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Schedule) -> Cow<'a, str> {
        match self {
            ScheduleColumn::Id(a) => a.format(data),
            ScheduleColumn::Place(a) => a.format(data),
            ScheduleColumn::Span(a) => a.format(data),
            ScheduleColumn::Status(a) => a.format(data),
            ScheduleColumn::Title(a) => a.format(data),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ScheduleColumn::Id(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &Schedule) -> Option<Color> {
        match self {
            ScheduleColumn::Span(_) if data.is_all_day => Some(Color::Cyan),
            ScheduleColumn::Title(_) if data.is_completed => Some(Color::BrightBlack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleColumnId;

impl ScheduleColumnId {
    fn format<'a>(&self, schedule: &'a Schedule) -> Cow<'a, str> {
        schedule
            .id
            .map_or_else(|| Cow::Borrowed(""), |id| id.to_string().into())
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleColumnPlace;

impl ScheduleColumnPlace {
    fn format<'a>(&self, schedule: &'a Schedule) -> Cow<'a, str> {
        schedule.place.as_str().into()
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleColumnSpan(TimeZone);

impl ScheduleColumnSpan {
    fn format<'a>(&self, schedule: &'a Schedule) -> Cow<'a, str> {
        match schedule.format_span(&self.0) {
            Ok(span) => span.into(),
            Err(err) => {
                tracing::warn!(id = schedule.id, %err, "schedule has an invalid date");
                "".into()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleColumnStatus;

impl ScheduleColumnStatus {
    fn format<'a>(&self, schedule: &'a Schedule) -> Cow<'a, str> {
        match schedule.is_completed {
            true => "[x]",
            false => "[ ]",
        }
        .into()
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleColumnTitle;

impl ScheduleColumnTitle {
    fn format<'a>(&self, schedule: &'a Schedule) -> Cow<'a, str> {
        schedule.title.as_str().into()
    }
}

#[cfg(test)]
mod tests {
    use almanac_core::datetime::date_to_millis;
    use jiff::civil::date;

    use super::*;

    fn standup() -> Schedule {
        let day = date_to_millis(date(2024, 2, 1), &TimeZone::UTC).unwrap();
        Schedule {
            id: Some(7),
            title: "Standup".to_string(),
            start_date_millis: day,
            start_hour: 9,
            end_date_millis: day,
            end_hour: 9,
            end_minute: 15,
            place: "Room 1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn formats_json_rows() {
        let formatter =
            ScheduleFormatter::new(TimeZone::UTC).with_output_format(ArgOutputFormat::Json);
        let out = formatter.format(&[standup()]).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["ID"], "7");
        assert_eq!(value[0]["Time"], "09:00 - 09:15");
        assert_eq!(value[0]["Title"], "Standup");
        assert_eq!(value[0]["Place"], "Room 1");
        assert_eq!(value[0]["Status"], "[ ]");
    }

    #[test]
    fn formats_table_rows() {
        colored::control::set_override(false);
        let formatter = ScheduleFormatter::new(TimeZone::UTC);
        let out = formatter.format(&[standup()]).to_string();
        colored::control::unset_override();
        assert_eq!(out, "7 [ ] 09:00 - 09:15 Standup Room 1");
    }
}
