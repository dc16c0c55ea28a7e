// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::datetime::now_millis;

/// A to-do pinned to a single point in time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Todo {
    /// Primary key assigned by the table, `None` until the to-do is stored.
    pub id: Option<i64>,

    pub is_completed: bool,

    pub title: String,

    pub description: String,

    /// When the to-do is due, in milliseconds since the epoch.
    pub date_time_millis: i64,
}

impl Todo {
    /// Creates an open to-do due now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            is_completed: false,
            title: title.into(),
            description: String::new(),
            date_time_millis: now_millis(),
        }
    }
}
