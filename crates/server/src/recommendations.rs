//! Business recommendation API endpoints

use api_types::recommendation::{
    BusinessRecommendationNew, RecommendationItem, RecommendationsResponse,
};
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};

fn map_item(item: engine::RecommendationItem) -> RecommendationItem {
    RecommendationItem {
        name: item.name,
        description: item.description,
        required_capital: item.required_capital,
        expected_profit_range: item.expected_profit_range,
        risk_level: item.risk_level,
    }
}

pub async fn business(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BusinessRecommendationNew>,
) -> Result<Json<RecommendationsResponse>, ServerError> {
    let items = state
        .engine
        .recommend_businesses(
            user.id,
            payload.capital_minor,
            payload.interest.as_deref(),
            payload.location.as_deref(),
            Utc::now(),
        )
        .await?;

    Ok(Json(RecommendationsResponse {
        recommendations: items.into_iter().map(map_item).collect(),
    }))
}
