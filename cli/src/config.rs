// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use almanac_core::{APP_NAME, Config as CoreConfig, get_config_dir};
use tokio::fs;

const ALMANAC_CONFIG_ENV: &str = "ALMANAC_CONFIG";
const ALMANAC_DEV_ENV: &str = "ALMANAC_DEV";

const ALMANAC_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const ALMANAC_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Loads the core configuration.
///
/// Lookup order is the `--config` flag, then `ALMANAC_CONFIG`, then
/// `config.toml` in the user config directory. Without any file the defaults
/// are used, unless `ALMANAC_DEV` asks for an explicit configuration.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(ALMANAC_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({ALMANAC_DEV_ENV} is set): config must be explicitly specified via --config or {ALMANAC_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(APP_NAME).join("config.toml");
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(CoreConfig::default());
        }
        config
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()?;
    Ok(raw.core)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(ALMANAC_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if ALMANAC_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if ALMANAC_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            ALMANAC_DEV_ENV,
            val,
            ALMANAC_DEV_VALID_TRUE.join(", "),
            ALMANAC_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
