// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::{FetchError, ValidationError};
use crate::models::{Category, RevenueRecord, SpentRecord, Transaction, TransactionKind};
use crate::utils::http_client;

/// Read endpoints of the tracker API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Revenue,
    MonthlyRevenue,
    RevenueCategory,
    Spent,
    MonthlySpent,
    AnnualSpent,
    SpentCategory,
}

impl Endpoint {
    pub const REVENUE_SOURCES: [Endpoint; 2] = [Endpoint::Revenue, Endpoint::MonthlyRevenue];
    pub const EXPENSE_SOURCES: [Endpoint; 3] = [
        Endpoint::Spent,
        Endpoint::MonthlySpent,
        Endpoint::AnnualSpent,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Revenue => "revenues/revenue",
            Endpoint::MonthlyRevenue => "revenues/monthlyRevenue",
            Endpoint::RevenueCategory => "revenues/category",
            Endpoint::Spent => "spents/spent",
            Endpoint::MonthlySpent => "spents/monthlySpent",
            Endpoint::AnnualSpent => "spents/annualSpent",
            Endpoint::SpentCategory => "spents/category",
        }
    }

    pub fn category_for(kind: TransactionKind) -> Endpoint {
        match kind {
            TransactionKind::Revenue => Endpoint::RevenueCategory,
            TransactionKind::Expense => Endpoint::SpentCategory,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET /{}", self.path())
    }
}

/// Where transaction and category lists come from.
pub trait Repository {
    fn revenues(&self, endpoint: Endpoint) -> Result<Vec<RevenueRecord>, FetchError>;
    fn spents(&self, endpoint: Endpoint) -> Result<Vec<SpentRecord>, FetchError>;
    fn categories(&self, endpoint: Endpoint) -> Result<Vec<Category>, FetchError>;
}

pub struct HttpRepository {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRepository {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = http_client().context("Failed to build HTTP client")?;
        Ok(HttpRepository {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, FetchError> {
        let url = self.url_for(endpoint);
        tracing::debug!(%url, "fetching");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Http { endpoint, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        resp.json::<T>()
            .map_err(|source| FetchError::Http { endpoint, source })
    }
}

impl Repository for HttpRepository {
    fn revenues(&self, endpoint: Endpoint) -> Result<Vec<RevenueRecord>, FetchError> {
        self.get_json(endpoint)
    }

    fn spents(&self, endpoint: Endpoint) -> Result<Vec<SpentRecord>, FetchError> {
        self.get_json(endpoint)
    }

    fn categories(&self, endpoint: Endpoint) -> Result<Vec<Category>, FetchError> {
        self.get_json(endpoint)
    }
}

/// Every list the dashboard reads, as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub revenue: Vec<RevenueRecord>,
    pub monthly_revenue: Vec<RevenueRecord>,
    pub revenue_categories: Vec<Category>,
    pub spent: Vec<SpentRecord>,
    pub monthly_spent: Vec<SpentRecord>,
    pub annual_spent: Vec<SpentRecord>,
    pub spent_categories: Vec<Category>,
}

impl Snapshot {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read snapshot {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Parse snapshot {}", path.display()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    snapshot: Snapshot,
    failing: HashSet<Endpoint>,
}

impl MemoryRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        MemoryRepository {
            snapshot,
            failing: HashSet::new(),
        }
    }

    /// Make every read of `endpoint` fail.
    pub fn fail(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }

    fn check(&self, endpoint: Endpoint) -> Result<(), FetchError> {
        if self.failing.contains(&endpoint) {
            return Err(FetchError::Unavailable {
                endpoint,
                reason: "marked as failing".into(),
            });
        }
        Ok(())
    }

    fn mismatch(endpoint: Endpoint) -> FetchError {
        FetchError::Unavailable {
            endpoint,
            reason: "endpoint does not serve this record type".into(),
        }
    }
}

impl Repository for MemoryRepository {
    fn revenues(&self, endpoint: Endpoint) -> Result<Vec<RevenueRecord>, FetchError> {
        self.check(endpoint)?;
        match endpoint {
            Endpoint::Revenue => Ok(self.snapshot.revenue.clone()),
            Endpoint::MonthlyRevenue => Ok(self.snapshot.monthly_revenue.clone()),
            other => Err(Self::mismatch(other)),
        }
    }

    fn spents(&self, endpoint: Endpoint) -> Result<Vec<SpentRecord>, FetchError> {
        self.check(endpoint)?;
        match endpoint {
            Endpoint::Spent => Ok(self.snapshot.spent.clone()),
            Endpoint::MonthlySpent => Ok(self.snapshot.monthly_spent.clone()),
            Endpoint::AnnualSpent => Ok(self.snapshot.annual_spent.clone()),
            other => Err(Self::mismatch(other)),
        }
    }

    fn categories(&self, endpoint: Endpoint) -> Result<Vec<Category>, FetchError> {
        self.check(endpoint)?;
        match endpoint {
            Endpoint::RevenueCategory => Ok(self.snapshot.revenue_categories.clone()),
            Endpoint::SpentCategory => Ok(self.snapshot.spent_categories.clone()),
            other => Err(Self::mismatch(other)),
        }
    }
}

/// Outcome of one source request.
#[derive(Debug)]
pub enum SourceState<T> {
    Pending,
    Ready(Vec<T>),
    Failed(FetchError),
}

impl<T> From<Result<Vec<T>, FetchError>> for SourceState<T> {
    fn from(r: Result<Vec<T>, FetchError>) -> Self {
        match r {
            Ok(items) => SourceState::Ready(items),
            Err(e) => SourceState::Failed(e),
        }
    }
}

/// Several sources folded into one view. `items` is empty unless every source is ready.
#[derive(Debug)]
pub struct Combined<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub is_error: bool,
    pub errors: Vec<FetchError>,
}

impl<T> Combined<T> {
    pub fn is_ready(&self) -> bool {
        !self.is_loading && !self.is_error
    }
}

pub fn combine<T>(states: impl IntoIterator<Item = SourceState<T>>) -> Combined<T> {
    let mut items = Vec::new();
    let mut is_loading = false;
    let mut errors = Vec::new();
    for state in states {
        match state {
            SourceState::Pending => is_loading = true,
            SourceState::Ready(mut batch) => items.append(&mut batch),
            SourceState::Failed(e) => errors.push(e),
        }
    }
    let is_error = !errors.is_empty();
    if is_loading || is_error {
        items.clear();
    }
    Combined {
        items,
        is_loading,
        is_error,
        errors,
    }
}

fn normalize<R: Into<Transaction>>(
    endpoint: Endpoint,
    fetched: Result<Vec<R>, FetchError>,
    validate: fn(&R) -> Result<(), ValidationError>,
) -> SourceState<Transaction> {
    let state = fetched.and_then(|rows| {
        rows.into_iter()
            .map(|record| match validate(&record) {
                Ok(()) => Ok(record.into()),
                Err(source) => Err(FetchError::InvalidRecord { endpoint, source }),
            })
            .collect::<Result<Vec<Transaction>, FetchError>>()
    });
    if let Err(e) = &state {
        tracing::warn!(%endpoint, error = %e, "source failed");
    }
    state.into()
}

/// One-off and monthly revenues, all or nothing.
pub fn load_revenues(repo: &dyn Repository) -> Combined<Transaction> {
    combine(Endpoint::REVENUE_SOURCES.into_iter().map(|endpoint| {
        normalize(endpoint, repo.revenues(endpoint), RevenueRecord::validate)
    }))
}

/// One-off, monthly and annual expenses, all or nothing.
pub fn load_expenses(repo: &dyn Repository) -> Combined<Transaction> {
    combine(Endpoint::EXPENSE_SOURCES.into_iter().map(|endpoint| {
        normalize(endpoint, repo.spents(endpoint), SpentRecord::validate)
    }))
}

pub fn load_categories(repo: &dyn Repository, kind: TransactionKind) -> Combined<Category> {
    let endpoint = Endpoint::category_for(kind);
    let state = repo.categories(endpoint).and_then(|cats| {
        for c in &cats {
            c.validate()
                .map_err(|source| FetchError::InvalidRecord { endpoint, source })?;
        }
        Ok(cats)
    });
    if let Err(e) = &state {
        tracing::warn!(%endpoint, error = %e, "category source failed");
    }
    combine([SourceState::from(state)])
}
