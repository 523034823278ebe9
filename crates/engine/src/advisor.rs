//! Client for the chat-completion service that writes the narrative
//! parts of analyses and the business recommendations.
//!
//! The engine computes every number itself; the advisor only turns those
//! numbers into prose, or proposes ventures as a JSON document. A missing
//! API key fails before any request goes out.
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Upper bound on a single completion round trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures of the completion client.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("advisor API key is not configured")]
    NotConfigured,
    #[error("advisor returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("advisor unreachable: {0}")]
    Unreachable(String),
    #[error("malformed advisor response: {0}")]
    Malformed(String),
}

/// Connection details for the completion endpoint.
#[derive(Clone, Debug, Default)]
pub struct AdvisorConfig {
    /// Full URL of the chat-completions endpoint.
    pub api_url: String,
    /// Bearer token. `None` means the advisor is not configured.
    pub api_key: Option<String>,
    /// Model name sent with every request.
    pub model: String,
}

/// Thin wrapper around the HTTP client, cheap to clone.
#[derive(Clone, Debug)]
pub struct Advisor {
    config: AdvisorConfig,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl Advisor {
    pub fn new(config: AdvisorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// Sends `prompt` as a single user message and returns the first
    /// choice's content. With `expect_json` the request asks the model
    /// for a JSON object instead of free text.
    pub async fn complete(&self, prompt: &str, expect_json: bool) -> Result<String, AdvisorError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(AdvisorError::NotConfigured);
        };

        let mut body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
        });
        if expect_json {
            body["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| AdvisorError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|err| AdvisorError::Malformed(err.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AdvisorError::Malformed("no choices in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor_for(url: String) -> Advisor {
        Advisor::new(AdvisorConfig {
            api_url: url,
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
        })
    }

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"Keep three months of costs in reserve."}}]}"#)
            .create_async()
            .await;

        let advisor = advisor_for(format!("{}/chat/completions", server.url()));
        let content = advisor.complete("How much cash should I keep?", false).await.unwrap();

        assert_eq!(content, "Keep three months of costs in reserve.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let advisor = Advisor::new(AdvisorConfig {
            api_url: "http://127.0.0.1:9/chat/completions".to_string(),
            api_key: None,
            model: "test-model".to_string(),
        });

        let result = advisor.complete("anything", false).await;

        assert_eq!(result, Err(AdvisorError::NotConfigured));
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let advisor = advisor_for(format!("{}/chat/completions", server.url()));
        let result = advisor.complete("anything", false).await;

        assert_eq!(
            result,
            Err(AdvisorError::Status {
                status: 429,
                body: "rate limited".to_string()
            })
        );
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let advisor = advisor_for(format!("{}/chat/completions", server.url()));
        let result = advisor.complete("anything", false).await;

        assert_eq!(
            result,
            Err(AdvisorError::Malformed("no choices in response".to_string()))
        );
    }

    #[tokio::test]
    async fn connection_failure_is_unreachable() {
        let advisor = advisor_for("http://127.0.0.1:9/chat/completions".to_string());

        let result = advisor.complete("anything", false).await;

        assert!(matches!(result, Err(AdvisorError::Unreachable(_))));
    }

    #[tokio::test]
    async fn json_mode_sets_response_format() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(json!({
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"{\"recommendations\":[]}"}}]}"#)
            .create_async()
            .await;

        let advisor = advisor_for(format!("{}/chat/completions", server.url()));
        advisor.complete("suggest ventures", true).await.unwrap();

        mock.assert_async().await;
    }
}
