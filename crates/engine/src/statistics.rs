//! Aggregate views over a user's ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transactions::{Transaction, TransactionKind};

/// Headline figures for the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_income_minor: i64,
    pub total_expense_minor: i64,
    pub balance_minor: i64,
    /// Rows dated in the current calendar month.
    pub transactions_this_month: u64,
}

/// Sum of one kind within one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub kind: TransactionKind,
    pub total_minor: i64,
}

/// Everything the report renderer needs for one date range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_income_minor: i64,
    pub total_expense_minor: i64,
    pub net_minor: i64,
    pub category_totals: Vec<CategoryTotal>,
    /// Rows in range, newest date first.
    pub rows: Vec<Transaction>,
}
