//! Stored cash-flow predictions.
//!
//! Each row is one projection run: the perturbed monthly figures, the
//! advisor's narrative and the date the projection is for.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowPrediction {
    pub id: i32,
    pub user_id: i32,
    pub predicted_income_minor: i64,
    pub predicted_expense_minor: i64,
    pub insight: String,
    /// Day the projection targets, one month after the run.
    pub prediction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cash_flow_predictions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub predicted_income_minor: i64,
    pub predicted_expense_minor: i64,
    pub insight: String,
    pub prediction_date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CashFlowPrediction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            predicted_income_minor: model.predicted_income_minor,
            predicted_expense_minor: model.predicted_expense_minor,
            insight: model.insight,
            prediction_date: model.prediction_date,
            created_at: model.created_at,
        }
    }
}
