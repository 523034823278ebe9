//! Stored business recommendations and the shaping of the advisor's
//! JSON payload into typed items.
//!
//! The advisor is asked for `{"recommendations": [...]}` but real models
//! drift: some wrap the list under another key, some return a bare
//! array. Shaping accepts those layouts and reports anything else as
//! [`ShapedRecommendations::UnexpectedShape`] so the caller can degrade
//! gracefully instead of failing the request.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::advisor::AdvisorError;

/// Key the prompt asks for.
const ITEMS_KEY: &str = "recommendations";
/// Key some models use instead.
const ALTERNATE_ITEMS_KEY: &str = "businesses";

/// One suggested venture as returned by the advisor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub name: String,
    pub description: String,
    pub required_capital: i64,
    pub expected_profit_range: String,
    pub risk_level: String,
}

/// Outcome of shaping a syntactically valid payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapedRecommendations {
    Items(Vec<RecommendationItem>),
    /// Valid JSON that holds no recognizable list of ventures.
    UnexpectedShape,
}

/// Placeholder item served when the payload shape is unrecognizable.
pub fn fallback_item() -> RecommendationItem {
    RecommendationItem {
        name: "Could not process AI recommendations".to_string(),
        description: "The AI response had an unexpected format. Please try again.".to_string(),
        required_capital: 0,
        expected_profit_range: "-".to_string(),
        risk_level: "-".to_string(),
    }
}

/// Extracts the list of ventures from the advisor's raw payload.
///
/// Accepted layouts, in order: an object with an array under
/// [`ITEMS_KEY`], an object with an array under [`ALTERNATE_ITEMS_KEY`],
/// or a bare array. A payload that is not valid JSON at all is a hard
/// failure.
pub fn shape_payload(raw: &str) -> Result<ShapedRecommendations, AdvisorError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| {
        AdvisorError::Malformed("recommendation payload is not valid JSON".to_string())
    })?;

    let items = match &value {
        Value::Object(map) => map
            .get(ITEMS_KEY)
            .filter(|entry| entry.is_array())
            .or_else(|| map.get(ALTERNATE_ITEMS_KEY).filter(|entry| entry.is_array()))
            .cloned(),
        Value::Array(_) => Some(value),
        _ => None,
    };

    let Some(items) = items else {
        return Ok(ShapedRecommendations::UnexpectedShape);
    };

    match serde_json::from_value::<Vec<RecommendationItem>>(items) {
        Ok(items) => Ok(ShapedRecommendations::Items(items)),
        Err(_) => Ok(ShapedRecommendations::UnexpectedShape),
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "business_recommendations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub capital_minor: i64,
    pub interest: Option<String>,
    pub location: Option<String>,
    /// JSON array of the served [`RecommendationItem`]s.
    pub items: String,
    pub generated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
