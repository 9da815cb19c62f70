// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::session::Session;
use crate::aggregate::{CategoryDistribution, MonthOrder, OrphanPolicy, SplitStrategy};
use crate::dashboard::{DashboardData, DashboardOptions};
use crate::models::{CategoryBucket, TransactionKind};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};

pub fn handle(session: &Session, name: &str, m: &clap::ArgMatches) -> Result<()> {
    let data = load(session, m)?;
    let json_flag = m.try_get_one::<bool>("json").ok().flatten() == Some(&true);
    let jsonl_flag = m.try_get_one::<bool>("jsonl").ok().flatten() == Some(&true);
    match name {
        "summary" => summary(&data, json_flag, jsonl_flag)?,
        "monthly" => monthly(&data, json_flag, jsonl_flag)?,
        "categories" => {
            let dist = match kind_arg(m) {
                TransactionKind::Revenue => &data.revenue_categories,
                TransactionKind::Expense => &data.expense_categories,
            };
            categories(dist, json_flag, jsonl_flag)?
        }
        "recent" => recent(&data, json_flag, jsonl_flag)?,
        "dashboard" => dashboard(&data, json_flag)?,
        _ => {}
    }
    Ok(())
}

fn kind_arg(m: &clap::ArgMatches) -> TransactionKind {
    match m.get_one::<String>("kind").map(String::as_str) {
        Some("revenue") => TransactionKind::Revenue,
        _ => TransactionKind::Expense,
    }
}

/// Options from config, overridden by the subcommand's own flags.
pub fn options_for(session: &Session, m: &clap::ArgMatches) -> DashboardOptions {
    let mut opts = session.config.dashboard_options();
    if let Ok(Some(order)) = m.try_get_one::<String>("order") {
        opts.month_order = match order.as_str() {
            "month-of-year" => MonthOrder::MonthOfYear,
            _ => MonthOrder::Chronological,
        };
    }
    if let Ok(Some(split)) = m.try_get_one::<String>("split") {
        opts.categories.split = match split.as_str() {
            "first" => SplitStrategy::FirstCategory,
            "full" => SplitStrategy::FullValueEach,
            _ => SplitStrategy::EvenSplit,
        };
    }
    if let Ok(Some(true)) = m.try_get_one::<bool>("drop-orphans") {
        opts.categories.orphans = OrphanPolicy::Drop;
    }
    if let Ok(Some(limit)) = m.try_get_one::<usize>("limit") {
        opts.recent_limit = *limit;
    }
    opts
}

/// Loads the dashboard and refuses to render a partial one.
pub fn load(session: &Session, m: &clap::ArgMatches) -> Result<DashboardData> {
    let opts = options_for(session, m);
    let data = DashboardData::load(session.repo.as_ref(), session.range, &opts);
    if data.is_error {
        for e in &data.errors {
            eprintln!("error: {}", e);
        }
        bail!(
            "{} source(s) failed; nothing is shown until every source loads. Reload to try again.",
            data.errors.len()
        );
    }
    Ok(data)
}

fn summary(data: &DashboardData, json_flag: bool, jsonl_flag: bool) -> Result<()> {
    if maybe_print_json(json_flag, jsonl_flag, &data.summary)? {
        return Ok(());
    }
    let s = &data.summary;
    let rows = vec![
        vec!["Revenues".into(), fmt_money(&s.total_revenues)],
        vec!["Expenses".into(), fmt_money(&s.total_expenses)],
        vec!["Balance".into(), fmt_money(&s.balance)],
        vec!["Pending revenues".into(), fmt_money(&s.pending_revenues)],
        vec!["Pending expenses".into(), fmt_money(&s.pending_expenses)],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}

fn monthly(data: &DashboardData, json_flag: bool, jsonl_flag: bool) -> Result<()> {
    if maybe_print_json(json_flag, jsonl_flag, &data.monthly)? {
        return Ok(());
    }
    let rows = data
        .monthly
        .iter()
        .map(|m| {
            vec![
                m.key.clone(),
                m.month.clone(),
                fmt_money(&m.revenues),
                fmt_money(&m.expenses),
                fmt_money(&m.balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "", "Revenues", "Expenses", "Balance"], rows)
    );
    Ok(())
}

fn bucket_rows(buckets: &[CategoryBucket]) -> Vec<Vec<String>> {
    buckets
        .iter()
        .map(|b| {
            vec![
                b.name.clone(),
                fmt_money(&b.value),
                fmt_percent(&b.percentage),
                b.color.clone(),
            ]
        })
        .collect()
}

fn categories(dist: &CategoryDistribution, json_flag: bool, jsonl_flag: bool) -> Result<()> {
    if jsonl_flag {
        maybe_print_json(false, true, &dist.buckets)?;
        return Ok(());
    }
    if maybe_print_json(json_flag, false, dist)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Category", "Value", "Share", "Color"], bucket_rows(&dist.buckets))
    );
    if !dist.orphans.is_empty() {
        let rows = dist
            .orphans
            .iter()
            .map(|o| {
                vec![
                    o.transaction_id.clone(),
                    o.category_id.clone().unwrap_or_else(|| "(none)".into()),
                    fmt_money(&o.value),
                ]
            })
            .collect();
        println!("Unmatched category references:");
        println!(
            "{}",
            pretty_table(&["Transaction", "Category id", "Value"], rows)
        );
    }
    Ok(())
}

fn recent(data: &DashboardData, json_flag: bool, jsonl_flag: bool) -> Result<()> {
    if maybe_print_json(json_flag, jsonl_flag, &data.recent)? {
        return Ok(());
    }
    let rows = data
        .recent
        .iter()
        .map(|r| {
            vec![
                r.date.format("%Y-%m-%d").to_string(),
                match r.kind {
                    TransactionKind::Revenue => "revenue".into(),
                    TransactionKind::Expense => "expense".into(),
                },
                r.name.clone(),
                r.category.clone(),
                fmt_money(&r.value),
                r.status.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Type", "Name", "Category", "Value", "Status"],
            rows
        )
    );
    Ok(())
}

fn dashboard(data: &DashboardData, json_flag: bool) -> Result<()> {
    if maybe_print_json(json_flag, false, data)? {
        return Ok(());
    }
    summary(data, false, false)?;
    monthly(data, false, false)?;
    println!("Revenues by category");
    categories(&data.revenue_categories, false, false)?;
    println!("Expenses by category");
    categories(&data.expense_categories, false, false)?;
    recent(data, false, false)
}
