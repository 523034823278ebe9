use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::{ActiveValue, QueryFilter, prelude::*};

use crate::{
    CashFlowPrediction, EngineError, MoneyMinor, ResultEngine, Transaction, TransactionKind,
    predictions, transactions,
};

use super::Engine;

/// Trailing window the projection averages over (3 x 30 days).
const TRAILING_WINDOW_DAYS: i64 = 90;
/// Day the projection targets, counted from the run.
const PREDICTION_HORIZON_DAYS: i64 = 30;
/// Uniform drift applied to mean income. The upside is wider than the
/// downside so the projection leans optimistic on revenue.
const INCOME_DRIFT: std::ops::Range<f64> = -0.10..0.20;
/// Uniform drift applied to mean expense, symmetric.
const EXPENSE_DRIFT: std::ops::Range<f64> = -0.10..0.10;

fn mean_minor(amounts: &[i64]) -> f64 {
    if amounts.is_empty() {
        return 0.0;
    }
    amounts.iter().sum::<i64>() as f64 / amounts.len() as f64
}

fn project(mean: f64, drift: f64) -> i64 {
    (mean * (1.0 + drift)).round() as i64
}

fn prediction_prompt(predicted_income_minor: i64, predicted_expense_minor: i64) -> String {
    let income = MoneyMinor::new(predicted_income_minor);
    let expense = MoneyMinor::new(predicted_expense_minor);
    let net = MoneyMinor::new(predicted_income_minor - predicted_expense_minor);

    format!(
        "You are a financial advisor for small businesses. \
         Next month's projection for this business:\n\
         - Predicted income: {income}\n\
         - Predicted expense: {expense}\n\
         - Net cash flow: {net}\n\n\
         Give one short, practical insight (at most 3 sentences) to \
         prepare for next month."
    )
}

impl Engine {
    /// Projects next month's cash flow from the trailing window, asks the
    /// advisor to comment and stores the run.
    ///
    /// The projection needs history: a user with no rows in the window is
    /// rejected with [`EngineError::InsufficientData`].
    pub async fn predict_cash_flow(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> ResultEngine<CashFlowPrediction> {
        let window_start = now - Duration::days(TRAILING_WINDOW_DAYS);
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::CreatedAt.gte(window_start))
            .all(&self.database)
            .await?;

        if models.is_empty() {
            return Err(EngineError::InsufficientData(
                "no transactions recorded in the last 90 days".to_string(),
            ));
        }

        let mut income = Vec::new();
        let mut expense = Vec::new();
        for model in models {
            let tx = Transaction::try_from(model)?;
            match tx.kind {
                TransactionKind::Income => income.push(tx.amount_minor),
                TransactionKind::Expense => expense.push(tx.amount_minor),
            }
        }

        let (income_drift, expense_drift) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(INCOME_DRIFT),
                rng.gen_range(EXPENSE_DRIFT),
            )
        };
        let predicted_income_minor = project(mean_minor(&income), income_drift);
        let predicted_expense_minor = project(mean_minor(&expense), expense_drift);

        let prompt = prediction_prompt(predicted_income_minor, predicted_expense_minor);
        let insight = self.advisor.complete(&prompt, false).await?;

        let model = predictions::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            predicted_income_minor: ActiveValue::Set(predicted_income_minor),
            predicted_expense_minor: ActiveValue::Set(predicted_expense_minor),
            insight: ActiveValue::Set(insight),
            prediction_date: ActiveValue::Set(
                now.date_naive() + Duration::days(PREDICTION_HORIZON_DAYS),
            ),
            created_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;

        Ok(model.into())
    }
}
