// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Fixtures and scratch directories shared by the integration tests.

mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{day_millis, test_config, test_schedule, test_todo, utc_noon};
pub use temp_dir::setup_temp_dirs;
