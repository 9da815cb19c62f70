// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::filter::DateRange;
use crate::sources::{HttpRepository, MemoryRepository, Repository, Snapshot};
use crate::utils::parse_date;

/// Everything a report command needs: settings, a data source and the active range.
pub struct Session {
    pub config: Config,
    pub repo: Box<dyn Repository>,
    pub range: Option<DateRange>,
}

impl Session {
    pub fn open(m: &clap::ArgMatches) -> Result<Session> {
        let config = Config::load().context("Failed to load config")?;
        Session::open_with(config, m)
    }

    /// Global flags win over `config`.
    pub fn open_with(mut config: Config, m: &clap::ArgMatches) -> Result<Session> {
        if let Some(url) = m.get_one::<String>("base-url") {
            config.base_url = url.clone();
        }

        let repo: Box<dyn Repository> = match m.get_one::<PathBuf>("snapshot") {
            Some(path) => {
                tracing::info!(path = %path.display(), "reading snapshot");
                Box::new(MemoryRepository::new(Snapshot::from_path(path)?))
            }
            None => {
                tracing::info!(base_url = %config.base_url, "reading from API");
                Box::new(HttpRepository::new(&config.base_url)?)
            }
        };

        let from = m
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?;
        let to = m.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
        let range = if from.is_none() && to.is_none() {
            None
        } else {
            Some(DateRange::new(from, to)?)
        };

        Ok(Session {
            config,
            repo,
            range,
        })
    }
}
