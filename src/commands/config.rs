// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::{Config, config_path};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = config_path()?;
    match m.subcommand() {
        Some(("show", _)) => {
            let cfg = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        Some(("path", _)) => println!("{}", path.display()),
        Some(("set-base-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            reqwest::Url::parse(url).with_context(|| format!("Invalid URL '{}'", url))?;
            let mut cfg = Config::load_from(&path)?;
            cfg.base_url = url.trim_end_matches('/').to_string();
            cfg.save_to(&path)?;
            tracing::info!(path = %path.display(), "config saved");
            println!("Base URL set to {}", cfg.base_url);
        }
        _ => {}
    }
    Ok(())
}
