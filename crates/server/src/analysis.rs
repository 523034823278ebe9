//! Feasibility analysis API endpoints

use api_types::analysis::{FeasibilityNew, FeasibilityReport, FeasibilityStatus as ApiStatus};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

fn map_status(status: engine::FeasibilityStatus) -> ApiStatus {
    match status {
        engine::FeasibilityStatus::Feasible => ApiStatus::Feasible,
        engine::FeasibilityStatus::LessFeasible => ApiStatus::LessFeasible,
        engine::FeasibilityStatus::NotFeasible => ApiStatus::NotFeasible,
    }
}

pub async fn feasibility(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<FeasibilityNew>,
) -> Result<Json<FeasibilityReport>, ServerError> {
    let report = state
        .engine
        .feasibility_report(payload.capital, payload.monthly_cost, payload.monthly_revenue)
        .await?;

    Ok(Json(FeasibilityReport {
        profit: report.feasibility.profit,
        roi: report.feasibility.roi,
        break_even_months: report.feasibility.break_even_months,
        status: map_status(report.feasibility.status),
        ai_insight: report.ai_insight,
    }))
}
