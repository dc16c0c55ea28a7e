// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Month grid layout for a calendar whose weeks start on Sunday.

use std::fmt;
use std::str::FromStr;

use jiff::civil::{Date, date};

use crate::Error;

/// Short weekday names in grid column order.
pub const WEEKDAY_HEADERS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// A calendar month of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i16,
    month: i8,
}

impl YearMonth {
    /// Creates a year-month, failing when the month is not in `1..=12` or the
    /// year is outside the supported range.
    pub fn new(year: i16, month: i8) -> Result<Self, Error> {
        Date::new(year, month, 1)?;
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i16 {
        self.year
    }

    pub fn month(&self) -> i8 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        date(self.year, self.month, 1)
    }

    /// Number of days in the month.
    pub fn length_of_month(&self) -> i8 {
        self.first_day().days_in_month()
    }

    /// Maps a day number to its date, or `None` when the month has no such day.
    pub fn day(&self, day: i8) -> Option<Date> {
        Date::new(self.year, self.month, day).ok()
    }

    /// The following month, if representable.
    pub fn next(&self) -> Option<Self> {
        match self.month {
            12 => Self::new(self.year.checked_add(1)?, 1).ok(),
            m => Self::new(self.year, m + 1).ok(),
        }
    }

    /// The preceding month, if representable.
    pub fn previous(&self) -> Option<Self> {
        match self.month {
            1 => Self::new(self.year.checked_sub(1)?, 12).ok(),
            m => Self::new(self.year, m - 1).ok(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Config(format!("Invalid month: {s}, expected YYYY-MM"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// One slot of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Padding before the first day of the month.
    Empty,

    /// A concrete day of the month.
    Day(Date),
}

impl CalendarCell {
    pub fn date(&self) -> Option<Date> {
        match self {
            CalendarCell::Empty => None,
            CalendarCell::Day(date) => Some(*date),
        }
    }

    pub fn day_of_month(&self) -> Option<i8> {
        self.date().map(|d| d.day())
    }
}

/// Number of empty cells before the first day of the month.
///
/// The weekday of the first day is numbered Monday=1 through Sunday=7 and
/// rotated so that Sunday lands in the first column.
pub fn leading_blanks(month: YearMonth) -> u8 {
    let weekday = month.first_day().weekday().to_monday_one_offset();
    (weekday % 7) as u8
}

/// The cells of a month grid: leading blanks followed by every day of the month.
pub fn month_cells(month: YearMonth) -> Vec<CalendarCell> {
    let blanks = usize::from(leading_blanks(month));
    let days = month.length_of_month();

    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat_n(CalendarCell::Empty, blanks));
    cells.extend((1..=days).filter_map(|d| month.day(d)).map(CalendarCell::Day));
    cells
}

/// The half-open date range `[first day, first day of next month)`.
pub fn month_range(month: YearMonth) -> Result<(Date, Date), Error> {
    let start = month.first_day();
    let end = start.last_of_month().tomorrow()?;
    Ok((start, end))
}

/// Maps page indexes of a horizontally swiped calendar to months.
///
/// The pager covers every month from January of `anchor - span` to December
/// of `anchor + span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPager {
    first_year: i16,
    last_year: i16,
}

impl MonthPager {
    pub fn new(anchor_year: i16, year_span: u16) -> Self {
        let span = i16::try_from(year_span).unwrap_or(i16::MAX);
        let first_year = anchor_year.saturating_sub(span).max(MIN_YEAR);
        let last_year = anchor_year.saturating_add(span).min(MAX_YEAR);
        Self {
            first_year,
            last_year,
        }
    }

    /// Total number of pages.
    pub fn page_count(&self) -> usize {
        (self.last_year - self.first_year + 1) as usize * 12
    }

    /// The page showing `month`, or `None` when it is outside the window.
    pub fn page_of(&self, month: YearMonth) -> Option<usize> {
        if month.year < self.first_year || month.year > self.last_year {
            return None;
        }
        let years = (month.year - self.first_year) as usize;
        Some(years * 12 + (month.month - 1) as usize)
    }

    /// The month shown on `page`.
    pub fn year_month(&self, page: usize) -> Option<YearMonth> {
        if page >= self.page_count() {
            return None;
        }
        let year = self.first_year + (page / 12) as i16;
        let month = (page % 12) as i8 + 1;
        YearMonth::new(year, month).ok()
    }
}

const MIN_YEAR: i16 = -9999;
const MAX_YEAR: i16 = 9999;

/// A day cell annotated for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: Date,
    pub is_today: bool,
    pub is_selected: bool,
    /// Whether any schedule, task or to-do falls on this day.
    pub has_items: bool,
}

/// A month grid ready to be rendered, seven cells per week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month: YearMonth,
    pub cells: Vec<Option<DayCell>>,
}

impl MonthView {
    pub fn new(
        month: YearMonth,
        today: Date,
        selected: Option<Date>,
        has_items: impl Fn(Date) -> bool,
    ) -> Self {
        let cells = month_cells(month)
            .into_iter()
            .map(|cell| {
                cell.date().map(|date| DayCell {
                    date,
                    is_today: date == today,
                    is_selected: Some(date) == selected,
                    has_items: has_items(date),
                })
            })
            .collect();

        Self { month, cells }
    }

    /// Rows of the grid; the last row may be shorter than seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i16, month: i8) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn february_2024_has_four_leading_blanks() {
        let cells = month_cells(ym(2024, 2));
        assert_eq!(leading_blanks(ym(2024, 2)), 4);
        assert_eq!(cells.len(), 33);
        assert!(cells[..4].iter().all(|c| *c == CalendarCell::Empty));
        assert_eq!(cells[4], CalendarCell::Day(date(2024, 2, 1)));
        assert_eq!(cells[32], CalendarCell::Day(date(2024, 2, 29)));
    }

    #[test]
    fn month_starting_on_sunday_has_no_padding() {
        // September 2024 starts on a Sunday
        let month = ym(2024, 9);
        assert_eq!(leading_blanks(month), 0);
        assert_eq!(month_cells(month)[0], CalendarCell::Day(date(2024, 9, 1)));
    }

    #[test]
    fn month_starting_on_saturday_has_six_blanks() {
        // June 2024 starts on a Saturday
        assert_eq!(leading_blanks(ym(2024, 6)), 6);
    }

    #[test]
    fn cell_count_matches_blanks_plus_days_for_every_month() {
        for year in [1900, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let m = ym(year, month);
                let blanks = leading_blanks(m);
                let cells = month_cells(m);
                assert!(blanks <= 6);
                assert_eq!(cells.len(), blanks as usize + m.length_of_month() as usize);
                assert_eq!(blanks == 0, m.first_day().weekday() == jiff::civil::Weekday::Sunday);
            }
        }
    }

    #[test]
    fn days_are_in_order() {
        let days: Vec<_> = month_cells(ym(2023, 4))
            .iter()
            .filter_map(|c| c.day_of_month())
            .collect();
        assert_eq!(days, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn maps_day_numbers_to_dates() {
        let month = ym(2023, 2);
        assert_eq!(month.day(28), Some(date(2023, 2, 28)));
        assert_eq!(month.day(29), None);
        assert_eq!(month.day(0), None);
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(2024, 0).is_err());
    }

    #[test]
    fn parses_and_displays_year_month() {
        let month: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(month, ym(2024, 2));
        assert_eq!(month.to_string(), "2024-02");
        assert!("2024/02".parse::<YearMonth>().is_err());
        assert!("2024-xx".parse::<YearMonth>().is_err());
    }

    #[test]
    fn steps_across_year_boundaries() {
        assert_eq!(ym(2023, 12).next(), Some(ym(2024, 1)));
        assert_eq!(ym(2024, 1).previous(), Some(ym(2023, 12)));
        assert_eq!(ym(9999, 12).next(), None);
    }

    #[test]
    fn month_range_is_half_open() {
        let (start, end) = month_range(ym(2024, 12)).unwrap();
        assert_eq!(start, date(2024, 12, 1));
        assert_eq!(end, date(2025, 1, 1));
    }

    #[test]
    fn pager_round_trips_pages_and_months() {
        let pager = MonthPager::new(2024, 40);
        assert_eq!(pager.page_count(), 81 * 12);

        let page = pager.page_of(ym(2024, 2)).unwrap();
        assert_eq!(page, 40 * 12 + 1);
        assert_eq!(pager.year_month(page), Some(ym(2024, 2)));

        assert_eq!(pager.year_month(0), Some(ym(1984, 1)));
        assert_eq!(pager.year_month(pager.page_count() - 1), Some(ym(2064, 12)));
        assert_eq!(pager.year_month(pager.page_count()), None);
        assert_eq!(pager.page_of(ym(1983, 12)), None);
    }

    #[test]
    fn pager_clamps_to_supported_years() {
        let pager = MonthPager::new(9990, 40);
        assert_eq!(pager.year_month(pager.page_count() - 1), Some(ym(9999, 12)));
    }

    #[test]
    fn month_view_marks_today_selection_and_items() {
        let view = MonthView::new(
            ym(2024, 2),
            date(2024, 2, 14),
            Some(date(2024, 2, 20)),
            |d| d.day() % 10 == 0,
        );
        assert_eq!(view.cells.len(), 33);
        assert!(view.cells[..4].iter().all(Option::is_none));

        let day = |d: i8| view.cells[3 + d as usize].unwrap();
        assert!(day(14).is_today);
        assert!(!day(15).is_today);
        assert!(day(20).is_selected);
        assert!(day(10).has_items);
        assert!(!day(11).has_items);

        let weeks: Vec<_> = view.weeks().collect();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[4].len(), 5);
    }
}
