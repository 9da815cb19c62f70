// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::slug::slugify;

/// Label used wherever a transaction has no usable category.
pub const UNCATEGORIZED_NAME: &str = "Sem categoria";
pub const UNCATEGORIZED_ID: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Category {
            id: id.into(),
            slug: slugify(&name),
            name,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName(self.id.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueStatus {
    #[serde(rename = "pago")]
    Paid,
    #[serde(rename = "pendente")]
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub id: String,
    pub name: String,
    #[serde(with = "crate::utils::flexible_datetime")]
    pub date: NaiveDateTime,
    pub value: Decimal,
    pub status: RevenueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpentRecord {
    pub id: String,
    pub name: String,
    #[serde(with = "crate::utils::flexible_datetime")]
    pub date: NaiveDateTime,
    pub value: Decimal,
    /// `true` once the expense has been paid.
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

fn validate_record(id: &str, name: &str, value: Decimal) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName(id.to_string()));
    }
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeValue {
            id: id.to_string(),
            value,
        });
    }
    Ok(())
}

impl RevenueRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_record(&self.id, &self.name, self.value)
    }
}

impl SpentRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_record(&self.id, &self.name, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Revenue,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Settlement {
    Settled,
    Pending,
}

impl Settlement {
    pub fn is_pending(self) -> bool {
        matches!(self, Settlement::Pending)
    }

    /// Status label as the tracker shows it for both kinds.
    pub fn label(self) -> &'static str {
        match self {
            Settlement::Settled => "pago",
            Settlement::Pending => "pendente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub date: NaiveDateTime,
    pub value: Decimal,
    pub kind: TransactionKind,
    pub status: Settlement,
    pub categories: Vec<Category>,
}

impl From<RevenueRecord> for Transaction {
    fn from(r: RevenueRecord) -> Self {
        Transaction {
            id: r.id,
            name: r.name,
            date: r.date,
            value: r.value,
            kind: TransactionKind::Revenue,
            status: match r.status {
                RevenueStatus::Paid => Settlement::Settled,
                RevenueStatus::Pending => Settlement::Pending,
            },
            categories: r.categories,
        }
    }
}

impl From<SpentRecord> for Transaction {
    fn from(s: SpentRecord) -> Self {
        Transaction {
            id: s.id,
            name: s.name,
            date: s.date,
            value: s.value,
            kind: TransactionKind::Expense,
            status: if s.status {
                Settlement::Settled
            } else {
                Settlement::Pending
            },
            categories: s.categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub key: String, // YYYY-MM
    pub month: String,
    pub revenues: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub id: String,
    pub name: String,
    pub value: Decimal,
    pub percentage: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenues: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub pending_revenues: Decimal,
    pub pending_expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub id: String,
    pub name: String,
    pub date: NaiveDateTime,
    pub value: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub status: String,
}

impl From<&Transaction> for RecentTransaction {
    fn from(t: &Transaction) -> Self {
        RecentTransaction {
            id: t.id.clone(),
            name: t.name.clone(),
            date: t.date,
            value: t.value,
            kind: t.kind,
            category: t
                .categories
                .first()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNCATEGORIZED_NAME.to_string()),
            status: t.status.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn spent_status_false_is_pending() {
        let s = SpentRecord {
            id: "s1".into(),
            name: "Aluguel".into(),
            date: at(2023, 6, 5),
            value: Decimal::new(1200, 0),
            status: false,
            description: None,
            categories: vec![],
        };
        let t = Transaction::from(s);
        assert_eq!(t.kind, TransactionKind::Expense);
        assert_eq!(t.status, Settlement::Pending);
        assert_eq!(t.status.label(), "pendente");
    }

    #[test]
    fn negative_value_fails_validation() {
        let r = RevenueRecord {
            id: "r1".into(),
            name: "Salário".into(),
            date: at(2023, 6, 5),
            value: Decimal::new(-1, 0),
            status: RevenueStatus::Paid,
            description: None,
            categories: vec![],
        };
        assert!(matches!(
            r.validate(),
            Err(ValidationError::NegativeValue { .. })
        ));
    }

    #[test]
    fn recent_row_falls_back_to_uncategorized() {
        let t = Transaction {
            id: "x".into(),
            name: "Venda".into(),
            date: at(2024, 1, 2),
            value: Decimal::ONE,
            kind: TransactionKind::Revenue,
            status: Settlement::Settled,
            categories: vec![],
        };
        let row = RecentTransaction::from(&t);
        assert_eq!(row.category, UNCATEGORIZED_NAME);
        assert_eq!(row.status, "pago");
    }
}
