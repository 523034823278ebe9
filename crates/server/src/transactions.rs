//! Transactions API endpoints

use api_types::transaction::{TransactionKind as ApiKind, TransactionNew, TransactionView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn unmap_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
    }
}

fn view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        date: tx.date,
        kind: map_kind(tx.kind),
        amount_minor: tx.amount_minor,
        category: tx.category,
        description: tx.description,
        created_at: tx.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.list_transactions(user.id).await?;

    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let recorded = state
        .engine
        .record_transaction(
            user.id,
            engine::NewTransaction {
                date: payload.date,
                kind: unmap_kind(payload.kind),
                amount_minor: payload.amount_minor,
                category: payload.category,
                description: payload.description,
            },
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(recorded))))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
