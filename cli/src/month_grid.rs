// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use almanac_core::MonthView;
use almanac_core::grid::{DayCell, WEEKDAY_HEADERS};
use colored::Colorize;

const CELL_WIDTH: usize = 4;

/// Renders a month as a text grid, Sunday first.
///
/// Days with items carry a `*`, today is highlighted and the selected day is
/// underlined.
pub struct MonthGrid<'a> {
    view: &'a MonthView,
}

impl<'a> MonthGrid<'a> {
    pub fn new(view: &'a MonthView) -> Self {
        Self { view }
    }
}

impl fmt::Display for MonthGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = CELL_WIDTH * WEEKDAY_HEADERS.len();
        let title = self.view.month.to_string();
        writeln!(f, "{:^width$}", title.bold())?;

        for header in WEEKDAY_HEADERS {
            write!(f, "{header:>CELL_WIDTH$}")?;
        }

        for week in self.view.weeks() {
            writeln!(f)?;
            for cell in week {
                match cell {
                    Some(day) => write_day(f, day)?,
                    None => write!(f, "{:CELL_WIDTH$}", "")?,
                }
            }
        }
        Ok(())
    }
}

fn write_day(f: &mut fmt::Formatter<'_>, day: &DayCell) -> fmt::Result {
    let number = format!("{:>2}", day.date.day());
    let number = match (day.is_today, day.is_selected) {
        (true, true) => number.reversed().underline(),
        (true, false) => number.reversed(),
        (false, true) => number.underline(),
        (false, false) => number.normal(),
    };
    let marker = match day.has_items {
        true => "*".yellow(),
        false => " ".normal(),
    };
    write!(f, " {number}{marker}")
}

#[cfg(test)]
mod tests {
    use almanac_core::YearMonth;
    use jiff::civil::date;

    use super::*;

    #[test]
    fn renders_february_2024() {
        colored::control::set_override(false);
        let view = MonthView::new(
            YearMonth::new(2024, 2).unwrap(),
            date(2024, 2, 14),
            None,
            |d| d.day() == 3,
        );

        let out = MonthGrid::new(&view).to_string();
        colored::control::unset_override();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0].trim(), "2024-02");
        assert_eq!(lines[1], " SUN MON TUE WED THU FRI SAT");
        assert_eq!(lines[2], format!("{}  1   2   3*", " ".repeat(16)));
        assert_eq!(lines[3], "  4   5   6   7   8   9  10 ");
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[6].starts_with(" 25  26  27  28  29"));
    }
}
