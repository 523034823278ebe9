use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::util::{normalize_category, validate_amount_minor};
use crate::{EngineError, ResultEngine, Transaction, TransactionKind, transactions};

use super::{Engine, normalize_optional_text};

/// Payload for recording one ledger row.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    /// Calendar date the money moved.
    pub date: NaiveDate,
    pub kind: TransactionKind,
    /// Strictly positive; the kind carries the sign.
    pub amount_minor: i64,
    pub category: String,
    pub description: Option<String>,
}

impl Engine {
    /// Record a ledger row for a user.
    pub async fn record_transaction(
        &self,
        user_id: i32,
        new: NewTransaction,
        now: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        validate_amount_minor(new.amount_minor)?;
        let category = normalize_category(&new.category)?;
        let description = normalize_optional_text(new.description.as_deref());

        let model = transactions::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            date: ActiveValue::Set(new.date),
            kind: ActiveValue::Set(new.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(new.amount_minor),
            category: ActiveValue::Set(category),
            description: ActiveValue::Set(description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;

        Transaction::try_from(model)
    }

    /// All rows for a user, newest date first.
    pub async fn list_transactions(&self, user_id: i32) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    /// Delete a row the user owns.
    pub async fn delete_transaction(&self, user_id: i32, transaction_id: i32) -> ResultEngine<()> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(transaction_id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(())
    }
}
