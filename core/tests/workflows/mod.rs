// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the almanac-core crate.
//!
//! These tests drive the editors, the home holder and the repositories
//! through an `Almanac` backed by a database file in a temporary directory.

mod calendar_month;
mod config_driven;
mod observed_items;
mod schedule_lifecycle;
