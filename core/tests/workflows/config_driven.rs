// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.

use almanac_core::{Almanac, ConfigDuration};
use jiff::SignedDuration;

use crate::common::{setup_temp_dirs, test_config};

#[tokio::test]
async fn config_default_duration_sets_new_schedule_end() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut config = test_config(&temp_dirs.state_dir);
    config.default_duration = ConfigDuration::new(SignedDuration::from_mins(30));
    let almanac = Almanac::new(config).await.unwrap();

    // Act
    let state = almanac.new_schedule(None).unwrap().state();

    // Assert
    let start = i32::from(state.start_hour) * 60 + i32::from(state.start_minute);
    let end = i32::from(state.end_hour) * 60 + i32::from(state.end_minute);
    assert_eq!((end - start).rem_euclid(24 * 60), 30);
    assert!(state.end_date_millis >= state.start_date_millis);
}

#[tokio::test]
async fn config_creates_missing_state_dir() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let nested = temp_dirs.state_dir.join("nested").join("deeper");
    assert!(!nested.exists());

    // Act
    let almanac = Almanac::new(test_config(&nested)).await.unwrap();

    // Assert
    assert!(nested.join("almanac.db").exists());
    almanac.close().await;
}
