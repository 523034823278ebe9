//! Cash-flow prediction API endpoints

use api_types::prediction::CashFlowPredictionView;
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};

pub async fn cash_flow(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CashFlowPredictionView>, ServerError> {
    let prediction = state.engine.predict_cash_flow(user.id, Utc::now()).await?;

    Ok(Json(CashFlowPredictionView {
        predicted_income_minor: prediction.predicted_income_minor,
        predicted_expense_minor: prediction.predicted_expense_minor,
        insight: prediction.insight,
    }))
}
