// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A list of rows rendered either as aligned columns or as a JSON array.
pub struct Table<'a, S: TableStyle, C: TableColumn<T>, T> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, C: TableColumn<T>, T> Table<'a, S, C, T> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, C: TableColumn<T>, T> fmt::Display for Table<'_, S, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        self.style.write(f, self.columns, self.data, &rows)
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;
    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }
    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn write<C: TableColumn<T>, T>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
        rows: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result;
}

/// Space separated columns, padded to the widest cell and colorized.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self { separator: " " }
    }
}

impl TableStyle for TableStyleBasic {
    fn write<C: TableColumn<T>, T>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
        rows: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result {
        let widths = get_column_max_width(columns.len(), rows);
        for (i, (cells, row)) in rows.iter().zip(data).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for (j, (col, cell)) in columns.iter().zip(cells).enumerate() {
                let is_last = j == columns.len() - 1;
                let padded = match col.padding_direction() {
                    // last column does not need padding if it's left-aligned
                    PaddingDirection::Left if is_last => cell.to_string(),
                    PaddingDirection::Left => pad(cell, widths[j], false),
                    PaddingDirection::Right => pad(cell, widths[j], true),
                };
                match col.get_color(row) {
                    Some(color) => write!(f, "{}", padded.color(color))?,
                    None => write!(f, "{padded}")?,
                }

                if !is_last {
                    write!(f, "{}", self.separator)?;
                }
            }
        }
        Ok(())
    }
}

/// A JSON array of objects keyed by column name.
#[derive(Debug, Clone)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<C: TableColumn<T>, T>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        _data: &[T],
        rows: &[Vec<Cow<'_, str>>],
    ) -> fmt::Result {
        let objects: Vec<serde_json::Map<String, serde_json::Value>> = rows
            .iter()
            .map(|cells| {
                columns
                    .iter()
                    .zip(cells)
                    .map(|(col, cell)| (col.name().into_owned(), cell.to_string().into()))
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&objects).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

fn pad(cell: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match right_align {
        true => format!("{fill}{cell}"),
        false => format!("{cell}{fill}"),
    }
}

fn get_column_max_width(len: usize, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
    let mut max_width = vec![0; len];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}
