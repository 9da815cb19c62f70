// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use cashboard::commands::session::Session;
use cashboard::{cli, commands, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("slug", sub)) => commands::slug::handle(sub)?,
        Some(("config", sub)) => commands::config::handle(sub)?,
        Some((name, sub)) => {
            let session = Session::open(sub)?;
            commands::reports::handle(&session, name, sub)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
