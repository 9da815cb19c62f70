// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("cashboard")
        .version(clap::crate_version!())
        .about("Revenue and expense dashboards over a finance tracker API")
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .help("API root, e.g. http://localhost:3000/api"),
        )
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Read all lists from a JSON snapshot instead of the API"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .global(true)
                .help("First day to include (YYYY-MM-DD)"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .global(true)
                .help("Last day to include (YYYY-MM-DD)"),
        )
        .subcommand(
            Command::new("summary")
                .about("Totals, pending amounts and balance")
                .args(json_args()),
        )
        .subcommand(
            Command::new("monthly")
                .about("Revenues and expenses per month")
                .arg(
                    Arg::new("order")
                        .long("order")
                        .value_parser(["chronological", "month-of-year"]),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("categories")
                .about("Distribution of values per category")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(["revenue", "expense"]),
                )
                .arg(
                    Arg::new("split")
                        .long("split")
                        .value_parser(["even", "first", "full"]),
                )
                .arg(
                    Arg::new("drop-orphans")
                        .long("drop-orphans")
                        .action(ArgAction::SetTrue)
                        .help("Leave unknown-category value out of the buckets"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("recent")
                .about("Latest revenues and expenses")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Everything at once")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("slug")
                .about("Show the slug a category name gets")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or change settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("path"))
                .subcommand(
                    Command::new("set-base-url").arg(Arg::new("url").required(true)),
                ),
        )
}
