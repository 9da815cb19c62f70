// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::aggregate::{
    CategoryDistribution, CategoryOptions, MonthOrder, category_distribution, monthly_breakdown,
};
use crate::error::FetchError;
use crate::filter::{DateRange, filter_by_range};
use crate::models::{
    Category, FinancialSummary, MonthBucket, RecentTransaction, Transaction, TransactionKind,
};
use crate::sources::{Combined, Repository, load_categories, load_expenses, load_revenues};
use crate::summary::financial_summary;

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub categories: CategoryOptions,
    pub month_order: MonthOrder,
    pub recent_limit: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        DashboardOptions {
            categories: CategoryOptions::default(),
            month_order: MonthOrder::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// The four source groups a dashboard needs.
pub struct DashboardSources {
    pub revenues: Combined<Transaction>,
    pub expenses: Combined<Transaction>,
    pub revenue_categories: Combined<Category>,
    pub expense_categories: Combined<Category>,
}

impl DashboardSources {
    pub fn load(repo: &dyn Repository) -> Self {
        DashboardSources {
            revenues: load_revenues(repo),
            expenses: load_expenses(repo),
            revenue_categories: load_categories(repo, TransactionKind::Revenue),
            expense_categories: load_categories(repo, TransactionKind::Expense),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DashboardData {
    pub is_loading: bool,
    pub is_error: bool,
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<FetchError>,
    pub range: Option<DateRange>,
    pub summary: FinancialSummary,
    pub monthly: Vec<MonthBucket>,
    pub expense_categories: CategoryDistribution,
    pub revenue_categories: CategoryDistribution,
    pub recent: Vec<RecentTransaction>,
}

fn serialize_errors<S: serde::Serializer>(errors: &[FetchError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(errors.iter().map(|e| e.to_string()))
}

impl DashboardData {
    pub fn load(repo: &dyn Repository, range: Option<DateRange>, opts: &DashboardOptions) -> Self {
        Self::from_sources(DashboardSources::load(repo), range, opts)
    }

    /// Builds every view-model, or none of them if any source is loading or failed.
    pub fn from_sources(
        sources: DashboardSources,
        range: Option<DateRange>,
        opts: &DashboardOptions,
    ) -> Self {
        let DashboardSources {
            revenues,
            expenses,
            revenue_categories,
            expense_categories,
        } = sources;

        let is_loading = revenues.is_loading
            || expenses.is_loading
            || revenue_categories.is_loading
            || expense_categories.is_loading;
        let is_error = revenues.is_error
            || expenses.is_error
            || revenue_categories.is_error
            || expense_categories.is_error;
        let mut errors = Vec::new();
        errors.extend(revenues.errors);
        errors.extend(expenses.errors);
        errors.extend(revenue_categories.errors);
        errors.extend(expense_categories.errors);

        if is_loading || is_error {
            return DashboardData {
                is_loading,
                is_error,
                errors,
                range,
                ..Default::default()
            };
        }

        let rev = filter_by_range(&revenues.items, range.as_ref());
        let exp = filter_by_range(&expenses.items, range.as_ref());
        tracing::debug!(revenues = rev.len(), expenses = exp.len(), "filtered");

        DashboardData {
            is_loading,
            is_error,
            errors,
            range,
            summary: financial_summary(&rev, &exp),
            monthly: monthly_breakdown(&rev, &exp, opts.month_order),
            expense_categories: category_distribution(
                &exp,
                &expense_categories.items,
                &opts.categories,
            ),
            revenue_categories: category_distribution(
                &rev,
                &revenue_categories.items,
                &opts.categories,
            ),
            recent: recent_transactions(&rev, &exp, opts.recent_limit),
        }
    }
}

/// Newest first across both kinds, at most `limit` rows.
pub fn recent_transactions(
    revenues: &[Transaction],
    expenses: &[Transaction],
    limit: usize,
) -> Vec<RecentTransaction> {
    let mut all: Vec<&Transaction> = revenues.iter().chain(expenses.iter()).collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all.into_iter()
        .take(limit)
        .map(RecentTransaction::from)
        .collect()
}
