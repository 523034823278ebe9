use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use sea_orm::{QueryFilter, QueryOrder, Statement, TransactionTrait, prelude::*};

use crate::{
    CategoryTotal, DashboardSummary, EngineError, FinancialReport, ResultEngine, Transaction,
    TransactionKind, transactions,
};

use super::{Engine, with_tx};

/// First day of `today`'s month and the first day of the next month.
fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let end = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
    .unwrap_or(start);
    (start, end)
}

impl Engine {
    /// Returns all-time totals plus the row count for `today`'s month.
    pub async fn dashboard_summary(
        &self,
        user_id: i32,
        today: NaiveDate,
    ) -> ResultEngine<DashboardSummary> {
        with_tx!(self, |db_tx| {
            let backend = self.database.get_database_backend();

            let total_income_minor: i64 = {
                let stmt = Statement::from_sql_and_values(
                    backend,
                    "SELECT COALESCE(SUM(amount_minor), 0) AS sum \
                     FROM transactions \
                     WHERE user_id = ? AND kind = ?",
                    vec![user_id.into(), TransactionKind::Income.as_str().into()],
                );
                let row = db_tx.query_one(stmt).await?;
                row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0)
            };

            let total_expense_minor: i64 = {
                let stmt = Statement::from_sql_and_values(
                    backend,
                    "SELECT COALESCE(SUM(amount_minor), 0) AS sum \
                     FROM transactions \
                     WHERE user_id = ? AND kind = ?",
                    vec![user_id.into(), TransactionKind::Expense.as_str().into()],
                );
                let row = db_tx.query_one(stmt).await?;
                row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0)
            };

            let transactions_this_month: i64 = {
                let (month_start, month_end) = month_bounds(today);
                let stmt = Statement::from_sql_and_values(
                    backend,
                    "SELECT COUNT(*) AS cnt \
                     FROM transactions \
                     WHERE user_id = ? AND date >= ? AND date < ?",
                    vec![user_id.into(), month_start.into(), month_end.into()],
                );
                let row = db_tx.query_one(stmt).await?;
                row.and_then(|r| r.try_get("", "cnt").ok()).unwrap_or(0)
            };

            Ok(DashboardSummary {
                total_income_minor,
                total_expense_minor,
                balance_minor: total_income_minor - total_expense_minor,
                transactions_this_month: u64::try_from(transactions_this_month).unwrap_or(0),
            })
        })
    }

    /// Rows, totals and per-category sums for a date range, both ends
    /// inclusive.
    pub async fn financial_report(
        &self,
        user_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<FinancialReport> {
        if from > to {
            return Err(EngineError::InvalidInput(
                "invalid range: from must not be after to".to_string(),
            ));
        }

        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::Date.gte(from))
            .filter(transactions::Column::Date.lte(to))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?;

        let rows = models
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        let mut total_income_minor = 0;
        let mut total_expense_minor = 0;
        let mut by_category: BTreeMap<(String, &'static str), (TransactionKind, i64)> =
            BTreeMap::new();
        for row in &rows {
            match row.kind {
                TransactionKind::Income => total_income_minor += row.amount_minor,
                TransactionKind::Expense => total_expense_minor += row.amount_minor,
            }
            let entry = by_category
                .entry((row.category.clone(), row.kind.as_str()))
                .or_insert((row.kind, 0));
            entry.1 += row.amount_minor;
        }

        let category_totals = by_category
            .into_iter()
            .map(|((category, _), (kind, total_minor))| CategoryTotal {
                category,
                kind,
                total_minor,
            })
            .collect();

        Ok(FinancialReport {
            from,
            to,
            total_income_minor,
            total_expense_minor,
            net_minor: total_income_minor - total_expense_minor,
            category_totals,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds_cover_the_whole_month() {
        let (start, end) = month_bounds(date(2026, 8, 26));

        assert_eq!(start, date(2026, 8, 1));
        assert_eq!(end, date(2026, 9, 1));
    }

    #[test]
    fn month_bounds_wrap_december() {
        let (start, end) = month_bounds(date(2025, 12, 31));

        assert_eq!(start, date(2025, 12, 1));
        assert_eq!(end, date(2026, 1, 1));
    }
}
