// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file, including the
//! favourites threshold chosen in the preferences dialog.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::filter::Threshold;

const CONFIG_NAME: &str = "ratingfilters";
const LOG_FILE_NAME: &str = "ratingfilters.log";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub media_dirs: Vec<String>,
    pub database_file: String,
    #[serde(deserialize_with = "threshold_or_default")]
    pub favourites_threshold: Threshold,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dirs: vec![],
            database_file: "music.db".to_string(),
            favourites_threshold: Threshold::DEFAULT,
        }
    }
}

/// Reads the favourites threshold, replacing a value out of range with the
/// default so the rest of the configuration still loads.
fn threshold_or_default<'de, D>(deserializer: D) -> std::result::Result<Threshold, D::Error>
where
    D: Deserializer<'de>,
{
    let stars = i64::deserialize(deserializer)?;

    match u8::try_from(stars).ok().map(Threshold::new) {
        Some(Ok(threshold)) => Ok(threshold),
        _ => {
            warn!(
                "Ignoring favourites threshold {}, using {}",
                stars,
                Threshold::DEFAULT.stars()
            );
            Ok(Threshold::DEFAULT)
        }
    }
}

/// Loads the configuration, falling back to defaults if the file cannot be
/// read.
pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    })
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// Location of the log file, alongside the configuration file.
pub fn log_file_path() -> Result<PathBuf> {
    let config_path = confy::get_configuration_file_path(CONFIG_NAME, None)
        .context("Failed to resolve configuration directory")?;

    let dir = config_path
        .parent()
        .context("Configuration file has no parent directory")?;

    Ok(dir.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_threshold_defaults_to_three_stars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = 1\nmedia_dirs = [\"/music\"]\n").unwrap();

        let cfg: AppConfig = confy::load_path(&path).unwrap();

        assert_eq!(cfg.media_dirs, vec!["/music".to_string()]);
        assert_eq!(cfg.database_file, "music.db");
        assert_eq!(cfg.favourites_threshold, Threshold::DEFAULT);
    }

    #[test]
    fn threshold_is_stored_as_a_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = AppConfig {
            favourites_threshold: Threshold::new(5).unwrap(),
            ..AppConfig::default()
        };
        confy::store_path(&path, &cfg).unwrap();

        let stored = fs::read_to_string(&path).unwrap();
        assert!(stored.contains("favourites_threshold = 5"));

        let loaded: AppConfig = confy::load_path(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn out_of_range_threshold_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "media_dirs = [\"/music\"]\ndatabase_file = \"lib.db\"\nfavourites_threshold = 9\n",
        )
        .unwrap();

        let cfg: AppConfig = confy::load_path(&path).unwrap();

        assert_eq!(cfg.media_dirs, vec!["/music".to_string()]);
        assert_eq!(cfg.database_file, "lib.db");
        assert_eq!(cfg.favourites_threshold, Threshold::DEFAULT);

        fs::write(&path, "favourites_threshold = -1\n").unwrap();
        let cfg: AppConfig = confy::load_path(&path).unwrap();
        assert_eq!(cfg.favourites_threshold, Threshold::DEFAULT);
    }
}
