// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::{CategoryOptions, MonthOrder, OrphanPolicy, SplitStrategy};
use crate::dashboard::{DEFAULT_RECENT_LIMIT, DashboardOptions};
use crate::error::ConfigError;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Cashboard", "cashboard"));

pub const BASE_URL_ENV: &str = "CASHBOARD_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub recent_limit: usize,
    pub split: SplitStrategy,
    pub month_order: MonthOrder,
    pub orphans: OrphanPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            split: SplitStrategy::default(),
            month_order: MonthOrder::default(),
            orphans: OrphanPolicy::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(ConfigError::NoConfigDir)?;
    Ok(proj.config_dir().join("config.json"))
}

impl Config {
    /// Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, body).map_err(io_err)
    }

    /// File, then `CASHBOARD_BASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = Config::load_from(&config_path()?)?;
        cfg.apply_env(std::env::var(BASE_URL_ENV).ok());
        Ok(cfg)
    }

    pub fn apply_env(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            categories: CategoryOptions {
                split: self.split,
                orphans: self.orphans,
            },
            month_order: self.month_order,
            recent_limit: self.recent_limit,
        }
    }
}
