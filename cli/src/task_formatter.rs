// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use almanac_core::Task;
use colored::Color;
use jiff::tz::TimeZone;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_datetime_millis};

#[derive(Debug)]
pub struct TaskFormatter {
    columns: Vec<TaskColumn>,
    format: ArgOutputFormat,
}

impl TaskFormatter {
    pub fn new(tz: TimeZone) -> Self {
        Self {
            columns: vec![
                TaskColumn::Status(TaskColumnStatus),
                TaskColumn::Id(TaskColumnId),
                TaskColumn::Time(TaskColumnTime(tz)),
                TaskColumn::Title(TaskColumnTitle),
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, tasks: &'a [Task]) -> Display<'a> {
        Display {
            tasks,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    tasks: &'a [Task],
    formatter: &'a TaskFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.tasks)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.tasks)
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum TaskColumn {
    Id(TaskColumnId),
    Status(TaskColumnStatus),
    Time(TaskColumnTime),
    Title(TaskColumnTitle),
}

impl TableColumn<Task> for TaskColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            TaskColumn::Id(_) => "ID",
            TaskColumn::Status(_) => "Status",
            TaskColumn::Time(_) => "Time",
            TaskColumn::Title(_) => "Title",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Task) -> Cow<'a, str> {
        match self {
            TaskColumn::Id(a) => a.format(data),
            TaskColumn::Status(a) => a.format(data),
            TaskColumn::Time(a) => a.format(data),
            TaskColumn::Title(a) => a.format(data),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            TaskColumn::Id(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &Task) -> Option<Color> {
        match self {
            TaskColumn::Title(_) if data.is_completed => Some(Color::BrightBlack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskColumnId;

impl TaskColumnId {
    fn format<'a>(&self, task: &'a Task) -> Cow<'a, str> {
        task.id.to_string().into()
    }
}

#[derive(Debug, Clone)]
pub struct TaskColumnStatus;

impl TaskColumnStatus {
    fn format<'a>(&self, task: &'a Task) -> Cow<'a, str> {
        match task.is_completed {
            true => "[x]",
            false => "[ ]",
        }
        .into()
    }
}

#[derive(Debug, Clone)]
pub struct TaskColumnTime(TimeZone);

impl TaskColumnTime {
    fn format<'a>(&self, task: &'a Task) -> Cow<'a, str> {
        let render = |millis: Option<i64>| -> String {
            millis
                .and_then(|a| format_datetime_millis(a, &self.0).ok())
                .unwrap_or_default()
        };
        match (task.start_time_millis, task.end_time_millis) {
            (None, None) => "".into(),
            (start, None) => render(start).into(),
            (start, end) => format!("{} ~ {}", render(start), render(end)).into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskColumnTitle;

impl TaskColumnTitle {
    fn format<'a>(&self, task: &'a Task) -> Cow<'a, str> {
        task.title.as_str().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(start: Option<i64>, end: Option<i64>) -> Task {
        Task {
            id: 42,
            is_completed: true,
            title: "Flowers".to_string(),
            description: String::new(),
            start_time_millis: start,
            end_time_millis: end,
        }
    }

    #[test]
    fn formats_time_ranges() {
        let column = TaskColumnTime(TimeZone::UTC);
        assert_eq!(column.format(&task(None, None)), "");
        assert_eq!(column.format(&task(Some(0), None)), "1970-01-01 00:00");
        assert_eq!(
            column.format(&task(Some(0), Some(3_600_000))),
            "1970-01-01 00:00 ~ 1970-01-01 01:00"
        );
        assert_eq!(column.format(&task(None, Some(0))), " ~ 1970-01-01 00:00");
    }

    #[test]
    fn formats_json_rows() {
        let formatter = TaskFormatter::new(TimeZone::UTC).with_output_format(ArgOutputFormat::Json);
        let out = formatter.format(&[task(None, None)]).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["ID"], "42");
        assert_eq!(value[0]["Status"], "[x]");
        assert_eq!(value[0]["Title"], "Flowers");
    }
}
