// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Observed queries re-emit after every committed write.

use std::time::Duration;

use almanac_core::{Almanac, observe, observe_all};
use futures::StreamExt;
use jiff::civil::date;

use crate::common::{setup_temp_dirs, test_config, test_todo};

#[tokio::test]
async fn observed_todos_follow_inserts_and_deletes() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let todos = almanac.todos();
    let mut stream = observe_all(todos.clone());
    assert!(stream.next().await.unwrap().unwrap().is_empty());

    // Act
    let id = todos
        .insert(&test_todo("Water plants", date(2024, 4, 1)))
        .await
        .unwrap();
    let after_insert = next_within(&mut stream).await;
    todos.delete(id).await.unwrap();
    let after_delete = next_within(&mut stream).await;

    // Assert
    assert_eq!(after_insert.len(), 1);
    assert_eq!(after_insert[0].id, Some(id));
    assert!(after_delete.is_empty());
}

#[tokio::test]
async fn observed_single_todo_reports_absence() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let almanac = Almanac::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Act
    let mut stream = observe(almanac.todos(), 404);

    // Assert
    assert_eq!(stream.next().await.unwrap().unwrap(), None);
}

async fn next_within<T>(
    stream: &mut futures::stream::BoxStream<'static, Result<T, almanac_core::Error>>,
) -> T {
    tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("stream should re-emit after a write")
        .expect("stream should not end")
        .expect("query should succeed")
}
