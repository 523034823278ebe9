use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseTransaction, QueryFilter, prelude::*};

use crate::{Author, EngineError, ResultEngine, posts, users};

use super::Engine;

impl Engine {
    pub(super) async fn require_active_post(
        &self,
        db: &DatabaseTransaction,
        post_id: i32,
    ) -> ResultEngine<posts::Model> {
        posts::Entity::find_by_id(post_id)
            .filter(posts::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("post not exists".to_string()))
    }

    pub(super) async fn require_author(
        &self,
        db: &DatabaseTransaction,
        user_id: i32,
    ) -> ResultEngine<Author> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .map(|user| Author {
                id: user.id,
                name: user.name,
            })
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    pub(super) async fn load_authors<C>(
        &self,
        db: &C,
        user_ids: &[i32],
    ) -> ResultEngine<HashMap<i32, Author>>
    where
        C: ConnectionTrait,
    {
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids.iter().copied()))
            .all(db)
            .await?;
        Ok(models
            .into_iter()
            .map(|user| {
                (
                    user.id,
                    Author {
                        id: user.id,
                        name: user.name,
                    },
                )
            })
            .collect())
    }
}
