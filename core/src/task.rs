// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::datetime::now_millis;

/// A to-do item that may be bound to a time span.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Task {
    /// Primary key, the creation time in milliseconds unless given explicitly.
    pub id: i64,

    /// Whether the task has been completed.
    pub is_completed: bool,

    pub title: String,

    pub description: String,

    /// Start of the task in milliseconds since the epoch, `None` if unscheduled.
    pub start_time_millis: Option<i64>,

    /// End of the task in milliseconds since the epoch, `None` if unscheduled.
    pub end_time_millis: Option<i64>,
}

impl Task {
    /// Creates an open, unscheduled task identified by the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: now_millis(),
            is_completed: false,
            title: title.into(),
            description: String::new(),
            start_time_millis: None,
            end_time_millis: None,
        }
    }

    /// Whether the task has a start or an end time.
    pub fn is_scheduled(&self) -> bool {
        self.start_time_millis.is_some() || self.end_time_millis.is_some()
    }
}
