pub use advisor::{Advisor, AdvisorConfig, AdvisorError};
pub use comments::Comment;
pub use error::EngineError;
pub use feasibility::{Feasibility, FeasibilityReport, FeasibilityStatus};
pub use money::MoneyMinor;
pub use ops::{Engine, EngineBuilder, NewPost, NewTransaction, PostListFilter};
pub use posts::{Author, LikeOutcome, Post};
pub use predictions::CashFlowPrediction;
pub use recommendations::RecommendationItem;
pub use statistics::{CategoryTotal, DashboardSummary, FinancialReport};
pub use transactions::{Transaction, TransactionKind};

mod advisor;
mod comments;
mod error;
mod feasibility;
mod likes;
mod money;
mod ops;
mod posts;
mod predictions;
mod recommendations;
mod statistics;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
