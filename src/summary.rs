// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{FinancialSummary, Transaction};

fn total(txs: &[Transaction]) -> Decimal {
    txs.iter().map(|t| t.value).sum()
}

fn pending(txs: &[Transaction]) -> Decimal {
    txs.iter()
        .filter(|t| t.status.is_pending())
        .map(|t| t.value)
        .sum()
}

/// Totals over already-filtered revenues and expenses. No rounding is applied.
pub fn financial_summary(revenues: &[Transaction], expenses: &[Transaction]) -> FinancialSummary {
    let total_revenues = total(revenues);
    let total_expenses = total(expenses);
    FinancialSummary {
        total_revenues,
        total_expenses,
        balance: total_revenues - total_expenses,
        pending_revenues: pending(revenues),
        pending_expenses: pending(expenses),
    }
}
