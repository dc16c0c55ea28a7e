// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use almanac_core::Todo;
use colored::Color;
use jiff::Zoned;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_datetime_millis};

#[derive(Debug)]
pub struct TodoFormatter {
    columns: Vec<TodoColumn>,
    format: ArgOutputFormat,
}

impl TodoFormatter {
    pub fn new(now: &Zoned) -> Self {
        Self {
            columns: vec![
                TodoColumn::Status(TodoColumnStatus),
                TodoColumn::Id(TodoColumnId),
                TodoColumn::Due(TodoColumnDue(now.clone())),
                TodoColumn::Title(TodoColumnTitle),
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, todos: &'a [Todo]) -> Display<'a> {
        Display {
            todos,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    todos: &'a [Todo],
    formatter: &'a TodoFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.todos)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.todos)
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum TodoColumn {
    Due(TodoColumnDue),
    Id(TodoColumnId),
    Status(TodoColumnStatus),
    Title(TodoColumnTitle),
}

impl TableColumn<Todo> for TodoColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            TodoColumn::Due(_) => "Due",
            TodoColumn::Id(_) => "ID",
            TodoColumn::Status(_) => "Status",
            TodoColumn::Title(_) => "Title",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Todo) -> Cow<'a, str> {
        match self {
            TodoColumn::Due(a) => a.format(data),
            TodoColumn::Id(a) => a.format(data),
            TodoColumn::Status(a) => a.format(data),
            TodoColumn::Title(a) => a.format(data),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            TodoColumn::Id(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &Todo) -> Option<Color> {
        match self {
            TodoColumn::Due(a) => a.get_color(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TodoColumnDue(Zoned);

impl TodoColumnDue {
    fn format<'a>(&self, todo: &'a Todo) -> Cow<'a, str> {
        format_datetime_millis(todo.date_time_millis, self.0.time_zone())
            .unwrap_or_default()
            .into()
    }

    fn get_color(&self, todo: &Todo) -> Option<Color> {
        const COLOR_OVERDUE: Option<Color> = Some(Color::Red);
        const COLOR_TODAY: Option<Color> = Some(Color::Yellow);

        if todo.is_completed {
            return None;
        }

        let now = &self.0;
        let due = jiff::Timestamp::from_millisecond(todo.date_time_millis)
            .ok()?
            .to_zoned(now.time_zone().clone());
        if due.timestamp() < now.timestamp() {
            COLOR_OVERDUE
        } else if due.date() == now.date() {
            COLOR_TODAY
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct TodoColumnId;

impl TodoColumnId {
    fn format<'a>(&self, todo: &'a Todo) -> Cow<'a, str> {
        todo.id
            .map_or_else(|| Cow::Borrowed(""), |id| id.to_string().into())
    }
}

#[derive(Debug, Clone)]
pub struct TodoColumnStatus;

impl TodoColumnStatus {
    fn format<'a>(&self, todo: &'a Todo) -> Cow<'a, str> {
        match todo.is_completed {
            true => "[x]",
            false => "[ ]",
        }
        .into()
    }
}

#[derive(Debug, Clone)]
pub struct TodoColumnTitle;

impl TodoColumnTitle {
    fn format<'a>(&self, todo: &'a Todo) -> Cow<'a, str> {
        todo.title.as_str().into()
    }
}
