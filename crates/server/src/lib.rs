use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{AdvisorError, EngineError};

use serde::Serialize;
pub use server::{ServerConfig, app, run, run_with_listener, spawn_with_listener};

mod analysis;
mod auth;
mod community;
mod dashboard;
mod predictions;
mod recommendations;
mod reports;
mod server;
mod transactions;
mod user;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{
            LoginRequest, PasswordChange, ProfileResponse, ProfileUpdate, RegisterNew,
            TokenResponse,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionKind, TransactionNew, TransactionView};
    }

    pub mod dashboard {
        pub use api_types::dashboard::DashboardSummary;
    }

    pub mod analysis {
        pub use api_types::analysis::{FeasibilityNew, FeasibilityReport, FeasibilityStatus};
    }

    pub mod prediction {
        pub use api_types::prediction::CashFlowPredictionView;
    }

    pub mod recommendation {
        pub use api_types::recommendation::{
            BusinessRecommendationNew, RecommendationItem, RecommendationsResponse,
        };
    }

    pub mod community {
        pub use api_types::community::{
            CommentNew, CommentView, LikeResponse, PostAuthor, PostListQuery, PostNew, PostView,
        };
    }

    pub mod report {
        pub use api_types::report::ReportQuery;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    Unauthorized(String),
    Conflict(String),
    Unprocessable(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::InsufficientData(_) => StatusCode::BAD_REQUEST,
        EngineError::Advisor(advisor) => status_for_advisor_error(advisor),
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn status_for_advisor_error(err: &AdvisorError) -> StatusCode {
    match err {
        AdvisorError::Status { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        AdvisorError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AdvisorError::NotConfigured | AdvisorError::Malformed(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Unauthorized(err) => (StatusCode::UNAUTHORIZED, err),
            ServerError::Conflict(err) => (StatusCode::CONFLICT, err),
            ServerError::Unprocessable(err) => (StatusCode::UNPROCESSABLE_ENTITY, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res =
            ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_insufficient_data_maps_to_400() {
        let res =
            ServerError::from(EngineError::InsufficientData("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn advisor_not_configured_maps_to_500() {
        let res = ServerError::from(EngineError::Advisor(AdvisorError::NotConfigured))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn advisor_status_maps_to_the_upstream_status() {
        let res = ServerError::from(EngineError::Advisor(AdvisorError::Status {
            status: 429,
            body: "rate limited".to_string(),
        }))
        .into_response();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn advisor_unreachable_maps_to_503() {
        let res = ServerError::from(EngineError::Advisor(AdvisorError::Unreachable(
            "timed out".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ServerError::Unauthorized("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn conflict_maps_to_409() {
        let res = ServerError::Conflict("taken".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unprocessable_maps_to_422() {
        let res = ServerError::Unprocessable("wrong".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
