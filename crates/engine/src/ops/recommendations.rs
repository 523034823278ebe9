use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, prelude::*};

use crate::advisor::AdvisorError;
use crate::recommendations::{ShapedRecommendations, fallback_item, shape_payload};
use crate::util::validate_amount_minor;
use crate::{MoneyMinor, RecommendationItem, ResultEngine, recommendations};

use super::{Engine, normalize_optional_text};

fn recommendation_prompt(
    capital_minor: i64,
    interest: Option<&str>,
    location: Option<&str>,
) -> String {
    let capital = MoneyMinor::new(capital_minor);
    let interest = interest.unwrap_or("-");
    let location = location.unwrap_or("-");

    format!(
        "You are a business consultant. Suggest 3 concrete business \
         ventures for someone with:\n\
         - Capital: {capital}\n\
         - Interest: {interest}\n\
         - Location: {location}\n\n\
         Reply with a JSON object holding a \"recommendations\" key, \
         for example:\n\
         {{\"recommendations\": [{{\"name\": \"Coffee cart\", \
         \"description\": \"Mobile espresso cart near the station.\", \
         \"required_capital\": 2500, \
         \"expected_profit_range\": \"300-600 per month\", \
         \"risk_level\": \"Medium\"}}]}}\n\
         Every required_capital must be an integer and every risk_level \
         one of Low, Medium or High."
    )
}

impl Engine {
    /// Asks the advisor for ventures matching the user's capital and
    /// preferences, shapes the reply and stores the outcome.
    ///
    /// An unrecognizable but well-formed reply degrades to a single
    /// placeholder item; reply text that is not JSON at all fails the
    /// request.
    pub async fn recommend_businesses(
        &self,
        user_id: i32,
        capital_minor: i64,
        interest: Option<&str>,
        location: Option<&str>,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<RecommendationItem>> {
        validate_amount_minor(capital_minor)?;
        let interest = normalize_optional_text(interest);
        let location = normalize_optional_text(location);

        let prompt = recommendation_prompt(capital_minor, interest.as_deref(), location.as_deref());
        let raw = self.advisor.complete(&prompt, true).await?;

        let items = match shape_payload(&raw)? {
            ShapedRecommendations::Items(items) => items,
            ShapedRecommendations::UnexpectedShape => vec![fallback_item()],
        };

        let payload = serde_json::to_string(&items)
            .map_err(|err| AdvisorError::Malformed(err.to_string()))?;
        recommendations::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            capital_minor: ActiveValue::Set(capital_minor),
            interest: ActiveValue::Set(interest),
            location: ActiveValue::Set(location),
            items: ActiveValue::Set(payload),
            generated_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;

        Ok(items)
    }
}
