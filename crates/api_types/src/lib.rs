use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    /// Bearer token issued on register/login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenResponse {
        pub access_token: String,
        pub token_type: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileResponse {
        pub id: i32,
        pub name: String,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PasswordChange {
        pub current_password: String,
        pub new_password: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// Calendar date the money moved (user-entered, may differ from
        /// the day the row was recorded).
        pub date: NaiveDate,
        pub kind: TransactionKind,
        /// Must be > 0. The kind defines the sign.
        pub amount_minor: i64,
        pub category: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i32,
        pub date: NaiveDate,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub category: String,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardSummary {
        pub total_income_minor: i64,
        pub total_expense_minor: i64,
        pub balance_minor: i64,
        /// Rows dated in the current calendar month.
        pub transactions_this_month: u64,
    }
}

pub mod analysis {
    use super::*;

    /// Inputs are plain currency amounts, not minor units: the analysis
    /// works on ratios and is never written to the ledger.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeasibilityNew {
        pub capital: f64,
        pub monthly_cost: f64,
        pub monthly_revenue: f64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum FeasibilityStatus {
        Feasible,
        LessFeasible,
        NotFeasible,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeasibilityReport {
        pub profit: f64,
        pub roi: f64,
        /// `None` when the venture never repays its capital.
        pub break_even_months: Option<f64>,
        pub status: FeasibilityStatus,
        pub ai_insight: String,
    }
}

pub mod prediction {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashFlowPredictionView {
        pub predicted_income_minor: i64,
        pub predicted_expense_minor: i64,
        pub insight: String,
    }
}

pub mod recommendation {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BusinessRecommendationNew {
        pub capital_minor: i64,
        pub interest: Option<String>,
        pub location: Option<String>,
    }

    /// One suggested venture. `risk_level` is prompted as Low/Medium/High
    /// but kept free-form since it comes back from the model.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RecommendationItem {
        pub name: String,
        pub description: String,
        pub required_capital: i64,
        pub expected_profit_range: String,
        pub risk_level: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecommendationsResponse {
        pub recommendations: Vec<RecommendationItem>,
    }
}

pub mod community {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PostNew {
        pub title: String,
        pub content: String,
        pub category: String,
        pub image_url: Option<String>,
    }

    /// Minimal public identity attached to posts and comments.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct PostAuthor {
        pub id: i32,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PostView {
        pub id: i32,
        pub title: String,
        pub content: String,
        pub image_url: Option<String>,
        pub category: String,
        pub likes_count: i32,
        pub comments_count: i32,
        pub created_at: DateTime<Utc>,
        pub owner: PostAuthor,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PostListQuery {
        pub skip: Option<u64>,
        pub limit: Option<u64>,
        pub category: Option<String>,
    }

    /// Outcome of toggling a like: `liked` reports the state after.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LikeResponse {
        pub post_id: i32,
        pub liked: bool,
        pub likes_count: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentNew {
        pub content: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentView {
        pub id: i32,
        pub content: String,
        pub created_at: DateTime<Utc>,
        pub author: PostAuthor,
    }
}

pub mod report {
    use super::*;

    /// Date range for the financial report, both ends inclusive.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReportQuery {
        pub from: NaiveDate,
        pub to: NaiveDate,
    }
}
