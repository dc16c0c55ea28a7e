// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scratch state directories for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;
use tokio::fs;

/// A state directory living inside a temporary root.
///
/// The root, database file included, is removed when this value drops, so
/// keep it alive for as long as the [`almanac_core::Almanac`] using it.
#[derive(Debug)]
pub struct TempDirs {
    pub state_dir: PathBuf,
    root: TempDir,
}

impl TempDirs {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let root = tempfile::tempdir()?;
        let state_dir = root.path().join("state");
        fs::create_dir_all(&state_dir).await?;
        Ok(Self { state_dir, root })
    }

    pub fn root(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}

pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn state_dir_is_created_under_root() {
        let dirs = TempDirs::new().await.unwrap();
        assert!(dirs.state_dir.is_dir());
        assert!(dirs.state_dir.starts_with(dirs.root()));
    }

    #[tokio::test]
    async fn root_is_removed_on_drop() {
        let dirs = TempDirs::new().await.unwrap();
        let root = dirs.root();
        drop(dirs);
        assert!(!root.exists());
    }
}
