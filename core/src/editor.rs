// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! State holders behind the edit screens.
//!
//! An editor owns one state snapshot in a `watch` channel. Field updates are
//! synchronous and unvalidated; `load`, `save` and `delete` each issue a
//! single repository call. When that call fails the error is returned and the
//! state gets no further update, so `is_loading` stays set and `is_done` does
//! not.

mod schedule;
mod task;

pub use crate::editor::schedule::{ScheduleEditor, ScheduleState};
pub use crate::editor::task::{TaskEditor, TaskState};
