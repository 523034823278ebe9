//! Dashboard API endpoints

use api_types::dashboard::DashboardSummary;
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};

pub async fn summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<DashboardSummary>, ServerError> {
    let summary = state
        .engine
        .dashboard_summary(user.id, Utc::now().date_naive())
        .await?;

    Ok(Json(DashboardSummary {
        total_income_minor: summary.total_income_minor,
        total_expense_minor: summary.total_expense_minor,
        balance_minor: summary.balance_minor,
        transactions_this_month: summary.transactions_this_month,
    }))
}
