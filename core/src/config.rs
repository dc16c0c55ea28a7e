// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use serde::de;

use crate::Error;

/// The name of the application, used for state and config directories.
pub const APP_NAME: &str = "almanac";

/// Number of years before and after the current one the month pager covers.
pub const DEFAULT_YEAR_SPAN: u16 = 40;

/// Configuration of the almanac core.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing the database, in-memory storage when `None`.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Length of a new schedule, one hour unless configured.
    #[serde(default)]
    pub default_duration: ConfigDuration,

    /// Years shown on each side of the current year when paging months.
    #[serde(default = "default_year_span")]
    pub year_span: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            default_duration: ConfigDuration::default(),
            year_span: DEFAULT_YEAR_SPAN,
        }
    }
}

impl Config {
    /// Expands the state directory, falling back to the user state directory.
    pub fn normalize(&mut self) -> Result<(), Error> {
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(expand_path(a).map_err(|e| {
                    Error::Config(format!("Failed to expand state directory path: {e}"))
                })?)
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        Ok(())
    }
}

fn default_year_span() -> u16 {
    DEFAULT_YEAR_SPAN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDuration(SignedDuration);

impl ConfigDuration {
    pub fn new(duration: SignedDuration) -> Self {
        Self(duration)
    }

    pub fn duration(&self) -> SignedDuration {
        self.0
    }
}

impl Default for ConfigDuration {
    fn default() -> Self {
        Self(SignedDuration::from_hours(1))
    }
}

impl<'de> serde::Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl<'de> de::Visitor<'de> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "24h", "60m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigDuration)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config(format!("Invalid path: {}", path.display())))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Error> {
    dirs::home_dir().ok_or_else(|| Error::Config("User-specific home directory not found".into()))
}

/// The user configuration directory, `$XDG_CONFIG_HOME` on unix.
pub fn get_config_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| Error::Config("User-specific config directory not found".into()))
}

fn get_state_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| Error::Config("User-specific state directory not found".into()))
}

/// Parse a duration string in the format "HH:MM" / "1d" / "24h" / "60m" / "1800s".
pub fn parse_duration(s: &str) -> Result<SignedDuration, Error> {
    let invalid = || Error::Config(format!("Invalid duration format: {s}"));
    let number = |v: &str| v.trim().parse::<i64>().map_err(|_| invalid());

    let seconds = if let Some((h, m)) = s.split_once(':') {
        let (h, m) = (number(h)?, number(m)?);
        h.checked_mul(60)
            .and_then(|mins| mins.checked_add(m))
            .and_then(|mins| mins.checked_mul(60))
    } else if let Some(rest) = s.strip_suffix('d') {
        number(rest)?.checked_mul(86_400)
    } else if let Some(rest) = s.strip_suffix('h') {
        number(rest)?.checked_mul(3_600)
    } else if let Some(rest) = s.strip_suffix('m') {
        number(rest)?.checked_mul(60)
    } else if let Some(rest) = s.strip_suffix('s') {
        Some(number(rest)?)
    } else {
        return Err(invalid());
    };
    Ok(SignedDuration::from_secs(seconds.ok_or_else(invalid)?))
}
