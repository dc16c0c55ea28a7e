// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule lifecycle workflow tests.
//!
//! Create, load, edit and delete a schedule through its editor, and check
//! the table semantics the editor relies on.

use almanac_core::{Almanac, Error, Schedule};
use jiff::civil::date;

use crate::common::{setup_temp_dirs, test_config, test_schedule};

#[tokio::test]
async fn schedule_lifecycle_create_then_edit_then_delete() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Act - create with defaults
    let editor = almanac.new_schedule(None).unwrap();
    editor.update_title("Dentist");
    editor.update_description("bring insurance card");
    editor.save().await.unwrap();

    // Assert - inserted, not in edit mode
    let state = editor.state();
    assert!(state.is_done);
    assert!(!state.is_edit);
    let stored = almanac.schedules().list().await.unwrap();
    assert_eq!(stored.len(), 1);
    let id = stored[0].id.expect("stored schedule should have an id");

    // Act - load and edit
    let editor = almanac.edit_schedule(id).await.unwrap();
    let loaded = editor.state();
    assert!(loaded.is_edit);
    assert_eq!(loaded.title, "Dentist");
    assert_eq!(loaded.description, "bring insurance card");
    editor.update_place("Clinic");
    editor.set_completed(true);
    editor.save().await.unwrap();

    // Assert - updated in place
    let updated = almanac.schedules().get(id).await.unwrap().unwrap();
    assert_eq!(updated.place, "Clinic");
    assert!(updated.is_completed);
    assert_eq!(almanac.schedules().list().await.unwrap().len(), 1);

    // Act - delete
    editor.delete().await.unwrap();

    // Assert
    assert!(almanac.schedules().list().await.unwrap().is_empty());
    almanac.close().await;
}

#[tokio::test]
async fn schedule_lifecycle_delete_requires_id() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let editor = almanac.new_schedule(None).unwrap();

    // Act
    let result = editor.delete().await;

    // Assert
    assert!(matches!(result, Err(Error::MissingId)));
    assert!(!editor.state().is_done);
}

#[tokio::test]
async fn schedule_lifecycle_insert_then_get_round_trips() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let schedule = Schedule {
        place: "Hall B".to_string(),
        is_all_day: true,
        ..test_schedule("Conference", date(2024, 5, 6), date(2024, 5, 8))
    };

    // Act
    let id = almanac.schedules().insert(&schedule).await.unwrap();

    // Assert
    let stored = almanac.schedules().get(id).await.unwrap();
    assert_eq!(
        stored,
        Some(Schedule {
            id: Some(id),
            ..schedule
        })
    );
}

#[tokio::test]
async fn schedule_lifecycle_update_of_missing_id_creates_nothing() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let ghost = Schedule {
        id: Some(12345),
        ..test_schedule("Ghost", date(2024, 5, 6), date(2024, 5, 6))
    };

    // Act
    almanac.schedules().update(&ghost).await.unwrap();

    // Assert
    assert!(almanac.schedules().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn schedule_lifecycle_survives_reopen() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.state_dir);
    let almanac = Almanac::new(config.clone()).await.unwrap();
    let id = almanac
        .schedules()
        .insert(&test_schedule("Kept", date(2024, 7, 1), date(2024, 7, 1)))
        .await
        .unwrap();
    almanac.close().await;

    // Act
    let almanac = Almanac::new(config).await.unwrap();

    // Assert
    let stored = almanac.schedules().get(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Kept");
    almanac.close().await;
}

#[tokio::test]
async fn task_lifecycle_complete_and_undo() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let editor = almanac.task_editor(None).await.unwrap();
    editor.update_title("Renew passport");
    editor.save().await.unwrap();
    let id = almanac.tasks().list().await.unwrap()[0].id;

    // Act
    let editor = almanac.task_editor(Some(id)).await.unwrap();
    editor.set_completed(true);
    editor.save().await.unwrap();
    let completed = almanac.tasks().get(id).await.unwrap().unwrap();
    editor.set_completed(false);
    editor.save().await.unwrap();
    let reopened = almanac.tasks().get(id).await.unwrap().unwrap();

    // Assert
    assert!(completed.is_completed);
    assert!(!reopened.is_completed);
    assert_eq!(reopened.title, "Renew passport");
}
