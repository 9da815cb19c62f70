// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashboard::aggregate::{
    CategoryOptions, OrphanPolicy, SplitStrategy, category_distribution,
};
use cashboard::filter::{DateRange, filter_by_range};
use cashboard::models::{
    Category, Settlement, Transaction, TransactionKind, UNCATEGORIZED_ID, UNCATEGORIZED_NAME,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn tx(id: &str, day: u32, value: i64, cats: &[&str]) -> Transaction {
    Transaction {
        id: id.into(),
        name: id.into(),
        date: NaiveDate::from_ymd_opt(2023, 6, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
        value: Decimal::new(value, 0),
        kind: TransactionKind::Expense,
        status: Settlement::Settled,
        categories: cats.iter().map(|c| Category::new(*c, c.to_uppercase())).collect(),
    }
}

fn setup() -> (Vec<Transaction>, Vec<Category>) {
    let universe = vec![
        Category::new("a", "A"),
        Category::new("b", "B"),
        Category::new("c", "C"),
        Category::new("unused", "Unused"),
    ];
    let txs = vec![
        tx("t1", 1, 900, &["a", "b"]),
        tx("t2", 5, 100, &["a", "b", "c"]),
        tx("t3", 12, 250, &["c"]),
        tx("t4", 20, 77, &["b"]),
        tx("t5", 28, 13, &["a", "c"]),
    ];
    (txs, universe)
}

fn close(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < Decimal::new(1, 6)
}

#[test]
fn even_split_halves_shared_value() {
    let universe = vec![Category::new("a", "A"), Category::new("b", "B")];
    let txs = vec![tx("t", 5, 900, &["a", "b"])];
    let dist = category_distribution(&txs, &universe, &CategoryOptions::default());
    assert_eq!(dist.buckets.len(), 2);
    for b in &dist.buckets {
        assert_eq!(b.value, Decimal::new(450, 0));
        assert_eq!(b.percentage, Decimal::new(50, 0));
    }
    // equal values keep universe order
    assert_eq!(dist.buckets[0].id, "a");
}

#[test]
fn even_split_conserves_total() {
    let (txs, universe) = setup();
    let dist = category_distribution(&txs, &universe, &CategoryOptions::default());
    let expected: Decimal = txs.iter().map(|t| t.value).sum();
    assert!(close(dist.total(), expected));
    assert!(dist.orphans.is_empty());
    assert!(dist.buckets.iter().all(|b| b.id != "unused"));
}

#[test]
fn percentages_add_up_to_hundred() {
    let (txs, universe) = setup();
    for split in [
        SplitStrategy::EvenSplit,
        SplitStrategy::FirstCategory,
        SplitStrategy::FullValueEach,
    ] {
        let opts = CategoryOptions {
            split,
            ..Default::default()
        };
        let dist = category_distribution(&txs, &universe, &opts);
        let pct: Decimal = dist.buckets.iter().map(|b| b.percentage).sum();
        assert!(close(pct, Decimal::ONE_HUNDRED), "{:?} gave {}", split, pct);
        assert!(dist.buckets.windows(2).all(|w| w[0].value >= w[1].value));
    }
}

#[test]
fn full_value_each_duplicates_value() {
    let (txs, universe) = setup();
    let opts = CategoryOptions {
        split: SplitStrategy::FullValueEach,
        ..Default::default()
    };
    let dist = category_distribution(&txs, &universe, &opts);
    let a = dist.buckets.iter().find(|b| b.id == "a").unwrap();
    assert_eq!(a.value, Decimal::new(900 + 100 + 13, 0));
}

#[test]
fn empty_input_gives_no_buckets() {
    let (_, universe) = setup();
    let dist = category_distribution(&[], &universe, &CategoryOptions::default());
    assert!(dist.buckets.is_empty());
    assert!(dist.orphans.is_empty());
    assert_eq!(dist.total(), Decimal::ZERO);
}

#[test]
fn zero_valued_transactions_leave_no_buckets() {
    let (_, universe) = setup();
    let txs = vec![tx("z", 3, 0, &["a"])];
    let dist = category_distribution(&txs, &universe, &CategoryOptions::default());
    assert!(dist.buckets.iter().all(|b| b.percentage.is_zero()));
    assert!(dist.buckets.is_empty());
}

#[test]
fn unknown_category_lands_in_uncategorized() {
    let (mut txs, universe) = setup();
    txs.push(tx("ghost", 15, 60, &["a", "deleted"]));
    txs.push(tx("bare", 16, 40, &[]));
    let dist = category_distribution(&txs, &universe, &CategoryOptions::default());

    assert_eq!(dist.orphans.len(), 2);
    assert_eq!(dist.orphans[0].category_id.as_deref(), Some("deleted"));
    assert_eq!(dist.orphans[0].value, Decimal::new(30, 0));
    assert_eq!(dist.orphans[1].category_id, None);

    let unc = dist
        .buckets
        .iter()
        .find(|b| b.id == UNCATEGORIZED_ID)
        .unwrap();
    assert_eq!(unc.value, Decimal::new(70, 0));
    let expected: Decimal = txs.iter().map(|t| t.value).sum();
    assert!(close(dist.total(), expected));
}

#[test]
fn fallback_bucket_never_reuses_a_universe_id() {
    let universe = vec![Category::new(UNCATEGORIZED_ID, "Outros")];
    let txs = vec![tx("known", 2, 10, &[UNCATEGORIZED_ID]), tx("bare", 3, 10, &[])];
    let dist = category_distribution(&txs, &universe, &CategoryOptions::default());

    assert_eq!(dist.buckets.len(), 2);
    assert_ne!(dist.buckets[0].id, dist.buckets[1].id);
    let outros = dist.buckets.iter().find(|b| b.name == "Outros").unwrap();
    assert_eq!(outros.id, UNCATEGORIZED_ID);
    assert_eq!(outros.value, Decimal::new(10, 0));
    let fallback = dist
        .buckets
        .iter()
        .find(|b| b.name == UNCATEGORIZED_NAME)
        .unwrap();
    assert_eq!(fallback.id, format!("{}-2", UNCATEGORIZED_ID));
    assert_eq!(fallback.value, Decimal::new(10, 0));
}

#[test]
fn drop_policy_reports_but_excludes_orphans() {
    let (mut txs, universe) = setup();
    txs.push(tx("ghost", 15, 60, &["deleted"]));
    let opts = CategoryOptions {
        orphans: OrphanPolicy::Drop,
        ..Default::default()
    };
    let dist = category_distribution(&txs, &universe, &opts);
    assert_eq!(dist.orphans.len(), 1);
    assert!(dist.buckets.iter().all(|b| b.id != UNCATEGORIZED_ID));
    let pct: Decimal = dist.buckets.iter().map(|b| b.percentage).sum();
    assert!(close(pct, Decimal::ONE_HUNDRED));
}

#[test]
fn filter_is_idempotent() {
    let (txs, _) = setup();
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2023, 6, 5),
        NaiveDate::from_ymd_opt(2023, 6, 20),
    )
    .unwrap();
    let once = filter_by_range(&txs, Some(&range));
    let twice = filter_by_range(&once, Some(&range));
    assert_eq!(once, twice);
    let ids: Vec<&str> = once.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t2", "t3", "t4"]);
}

#[test]
fn filter_without_range_is_identity() {
    let (txs, _) = setup();
    assert_eq!(filter_by_range(&txs, None), txs);
}

#[test]
fn same_day_end_bound_includes_late_transaction() {
    let late = Transaction {
        date: NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap(),
        ..tx("late", 15, 10, &[])
    };
    let range = DateRange::new(None, NaiveDate::from_ymd_opt(2023, 6, 15)).unwrap();
    assert_eq!(filter_by_range(&[late], Some(&range)).len(), 1);
}
