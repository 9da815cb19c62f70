// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    Category, CategoryBucket, MonthBucket, Transaction, UNCATEGORIZED_ID, UNCATEGORIZED_NAME,
};
use crate::utils::month_label;

/// Display colors handed out by final bucket position.
pub const PALETTE: [&str; 12] = [
    "#3cdaa1", "#22c55e", "#8b5cf6", "#f59e0b", "#ef4444", "#06b6d4", "#ec4899", "#64748b",
    "#0ea5e9", "#84cc16", "#d946ef", "#f97316",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthOrder {
    /// Year, then month.
    #[default]
    Chronological,
    /// Month of year only; years interleave.
    MonthOfYear,
}

pub fn monthly_breakdown(
    revenues: &[Transaction],
    expenses: &[Transaction],
    order: MonthOrder,
) -> Vec<MonthBucket> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for r in revenues {
        let entry = months
            .entry((r.date.year(), r.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += r.value;
    }
    for e in expenses {
        let entry = months
            .entry((e.date.year(), e.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.1 += e.value;
    }

    let mut keyed: Vec<((i32, u32), (Decimal, Decimal))> = months.into_iter().collect();
    if order == MonthOrder::MonthOfYear {
        // stable: same month from different years stays chronological
        keyed.sort_by_key(|((_, month), _)| *month);
    }

    keyed
        .into_iter()
        .map(|((year, month), (rev, exp))| MonthBucket {
            key: format!("{}-{:02}", year, month),
            month: month_label(month).to_string(),
            revenues: rev,
            expenses: exp,
            balance: rev - exp,
        })
        .collect()
}

/// How a transaction's value is attributed to its categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitStrategy {
    /// `value / n` to each of the `n` categories.
    #[default]
    EvenSplit,
    /// Whole value to the first listed category.
    FirstCategory,
    /// Whole value to every category. Bucket totals exceed the transaction total.
    FullValueEach,
}

impl SplitStrategy {
    pub fn shares<'a>(&self, tx: &'a Transaction) -> Vec<(&'a Category, Decimal)> {
        if tx.categories.is_empty() {
            return Vec::new();
        }
        match self {
            SplitStrategy::EvenSplit => {
                let share = tx.value / Decimal::from(tx.categories.len());
                tx.categories.iter().map(|c| (c, share)).collect()
            }
            SplitStrategy::FirstCategory => vec![(&tx.categories[0], tx.value)],
            SplitStrategy::FullValueEach => tx.categories.iter().map(|c| (c, tx.value)).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrphanPolicy {
    /// Collect orphaned value in a "Sem categoria" bucket.
    #[default]
    Uncategorized,
    /// Leave orphaned value out of the buckets. It is still reported.
    Drop,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOptions {
    pub split: SplitStrategy,
    pub orphans: OrphanPolicy,
}

/// Value that could not be matched to a known category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanShare {
    pub transaction_id: String,
    /// `None` when the transaction lists no category at all.
    pub category_id: Option<String>,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub buckets: Vec<CategoryBucket>,
    pub orphans: Vec<OrphanShare>,
}

impl CategoryDistribution {
    pub fn total(&self) -> Decimal {
        self.buckets.iter().map(|b| b.value).sum()
    }
}

/// Id for the fallback bucket that no universe category already uses.
fn uncategorized_id(taken: &HashMap<String, Decimal>) -> String {
    let mut id = UNCATEGORIZED_ID.to_string();
    let mut n = 2;
    while taken.contains_key(&id) {
        id = format!("{}-{}", UNCATEGORIZED_ID, n);
        n += 1;
    }
    id
}

pub fn category_distribution(
    transactions: &[Transaction],
    universe: &[Category],
    opts: &CategoryOptions,
) -> CategoryDistribution {
    // Seeded from the universe so bucket order follows it on ties.
    let mut order: Vec<(String, String)> = Vec::with_capacity(universe.len() + 1);
    let mut sums: HashMap<String, Decimal> = HashMap::new();
    for c in universe {
        if sums.insert(c.id.clone(), Decimal::ZERO).is_none() {
            order.push((c.id.clone(), c.name.clone()));
        }
    }

    let mut orphans = Vec::new();
    for tx in transactions {
        if tx.categories.is_empty() {
            orphans.push(OrphanShare {
                transaction_id: tx.id.clone(),
                category_id: None,
                value: tx.value,
            });
            continue;
        }
        for (cat, share) in opts.split.shares(tx) {
            match sums.get_mut(&cat.id) {
                Some(sum) => *sum += share,
                None => orphans.push(OrphanShare {
                    transaction_id: tx.id.clone(),
                    category_id: Some(cat.id.clone()),
                    value: share,
                }),
            }
        }
    }

    for o in &orphans {
        tracing::warn!(
            transaction = %o.transaction_id,
            category = o.category_id.as_deref().unwrap_or("<none>"),
            value = %o.value,
            "value without a known category"
        );
    }

    let mut raw: Vec<(String, String, Decimal)> = order
        .into_iter()
        .map(|(id, name)| {
            let value = sums.get(&id).copied().unwrap_or(Decimal::ZERO);
            (id, name, value)
        })
        .collect();
    if opts.orphans == OrphanPolicy::Uncategorized && !orphans.is_empty() {
        let value: Decimal = orphans.iter().map(|o| o.value).sum();
        raw.push((uncategorized_id(&sums), UNCATEGORIZED_NAME.into(), value));
    }
    raw.retain(|(_, _, v)| !v.is_zero());
    raw.sort_by(|a, b| b.2.cmp(&a.2));

    let total: Decimal = raw.iter().map(|(_, _, v)| *v).sum();
    let hundred = Decimal::ONE_HUNDRED;
    let buckets = raw
        .into_iter()
        .enumerate()
        .map(|(i, (id, name, value))| CategoryBucket {
            id,
            name,
            percentage: if total.is_zero() {
                Decimal::ZERO
            } else {
                value / total * hundred
            },
            color: PALETTE[i % PALETTE.len()].to_string(),
            value,
        })
        .collect();

    CategoryDistribution { buckets, orphans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Settlement, TransactionKind};
    use chrono::NaiveDate;

    fn tx(id: &str, y: i32, m: u32, value: i64, cats: &[&str]) -> Transaction {
        Transaction {
            id: id.into(),
            name: id.into(),
            date: NaiveDate::from_ymd_opt(y, m, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            value: Decimal::new(value, 0),
            kind: TransactionKind::Expense,
            status: Settlement::Settled,
            categories: cats.iter().map(|c| Category::new(*c, *c)).collect(),
        }
    }

    #[test]
    fn month_with_only_expenses_still_appears() {
        let exp = vec![tx("e", 2023, 7, 80, &[])];
        let rev = vec![tx("r", 2023, 6, 100, &[])];
        let months = monthly_breakdown(&rev, &exp, MonthOrder::Chronological);
        assert_eq!(months.len(), 2);
        assert_eq!(months[1].key, "2023-07");
        assert_eq!(months[1].month, "jul");
        assert_eq!(months[1].balance, Decimal::new(-80, 0));
    }

    #[test]
    fn chronological_order_crosses_year_boundary() {
        let rev = vec![tx("a", 2024, 1, 1, &[]), tx("b", 2023, 12, 1, &[])];
        let keys: Vec<String> = monthly_breakdown(&rev, &[], MonthOrder::Chronological)
            .into_iter()
            .map(|m| m.key)
            .collect();
        assert_eq!(keys, vec!["2023-12", "2024-01"]);
    }

    #[test]
    fn month_of_year_order_ignores_year() {
        let rev = vec![
            tx("a", 2024, 1, 1, &[]),
            tx("b", 2023, 12, 1, &[]),
            tx("c", 2023, 1, 1, &[]),
        ];
        let keys: Vec<String> = monthly_breakdown(&rev, &[], MonthOrder::MonthOfYear)
            .into_iter()
            .map(|m| m.key)
            .collect();
        assert_eq!(keys, vec!["2023-01", "2024-01", "2023-12"]);
    }

    #[test]
    fn first_category_strategy_takes_whole_value() {
        let t = tx("t", 2023, 6, 900, &["a", "b"]);
        let shares = SplitStrategy::FirstCategory.shares(&t);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].0.id, "a");
        assert_eq!(shares[0].1, Decimal::new(900, 0));
    }

    #[test]
    fn colors_follow_sorted_position() {
        let universe = vec![Category::new("a", "A"), Category::new("b", "B")];
        let txs = vec![tx("1", 2023, 6, 10, &["a"]), tx("2", 2023, 6, 90, &["b"])];
        let dist = category_distribution(&txs, &universe, &CategoryOptions::default());
        assert_eq!(dist.buckets[0].id, "b");
        assert_eq!(dist.buckets[0].color, PALETTE[0]);
        assert_eq!(dist.buckets[1].color, PALETTE[1]);
    }
}
