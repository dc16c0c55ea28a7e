// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar home workflow tests: load a month, select days, page months.

use almanac_core::datetime::date_to_millis;
use almanac_core::{Almanac, Task, YearMonth};
use jiff::civil::date;

use crate::common::{setup_temp_dirs, test_config, test_schedule, test_todo};

#[tokio::test]
async fn calendar_month_load_and_select() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let tz = almanac.now().time_zone().clone();
    let at = |d| date_to_millis(d, &tz).unwrap();

    let mut schedule = test_schedule("Sprint", date(2024, 2, 27), date(2024, 3, 2));
    schedule.start_date_millis = at(date(2024, 2, 27));
    schedule.end_date_millis = at(date(2024, 3, 2));
    almanac.schedules().insert(&schedule).await.unwrap();
    let mut todo = test_todo("Pay rent", date(2024, 2, 1));
    todo.date_time_millis = at(date(2024, 2, 1)) + 3_600_000;
    almanac.todos().insert(&todo).await.unwrap();
    almanac
        .tasks()
        .insert(&Task {
            end_time_millis: Some(at(date(2024, 2, 28)) + 60_000),
            ..Task::new("Report")
        })
        .await
        .unwrap();

    let home = almanac.home().unwrap();

    // Act
    home.load_month(YearMonth::new(2024, 2).unwrap()).await.unwrap();
    home.select_date(at(date(2024, 2, 28)) + 1).unwrap();

    // Assert
    let state = home.state();
    assert_eq!(state.month, Some(YearMonth::new(2024, 2).unwrap()));
    let days: Vec<_> = state.monthly.keys().copied().collect();
    assert_eq!(
        days,
        vec![
            at(date(2024, 2, 1)),
            at(date(2024, 2, 27)),
            at(date(2024, 2, 28)),
            at(date(2024, 2, 29)),
        ]
    );
    assert_eq!(state.daily.schedules.len(), 1);
    assert_eq!(state.daily.tasks.len(), 1);
    assert!(state.daily.todos.is_empty());

    let view = home.month_view(date(2024, 2, 10)).unwrap();
    assert_eq!(view.cells.len(), 33);
    let flagged: Vec<_> = view
        .cells
        .iter()
        .flatten()
        .filter(|c| c.has_items)
        .map(|c| c.date.day())
        .collect();
    assert_eq!(flagged, vec![1, 27, 28, 29]);
}

#[tokio::test]
async fn calendar_month_pager_follows_config_span() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Act
    let pager = almanac.month_pager();

    // Assert
    let this_month = YearMonth::of(almanac.now().date());
    assert_eq!(pager.page_count(), 5 * 12);
    let page = pager.page_of(this_month).unwrap();
    assert_eq!(page, 2 * 12 + (this_month.month() as usize - 1));
    assert_eq!(pager.year_month(page), Some(this_month));
}
