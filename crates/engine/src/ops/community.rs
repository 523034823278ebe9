use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};

use crate::util::normalize_category;
use crate::{
    Author, Comment, EngineError, LikeOutcome, Post, ResultEngine, comments, likes, posts,
};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

/// Posts returned per page when the caller does not say otherwise.
const DEFAULT_PAGE_SIZE: u64 = 20;

/// A community post to publish.
#[derive(Clone, Debug, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub image_url: Option<String>,
}

/// Pagination and filtering for the community feed.
#[derive(Clone, Debug, Default)]
pub struct PostListFilter {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub category: Option<String>,
}

fn unknown_author() -> Author {
    Author {
        id: 0,
        name: "Unknown".to_string(),
    }
}

impl Engine {
    /// Publish a post on the community feed.
    pub async fn create_post(
        &self,
        user_id: i32,
        new: NewPost,
        now: DateTime<Utc>,
    ) -> ResultEngine<Post> {
        let title = normalize_required_text(&new.title, "post title")?;
        let content = normalize_required_text(&new.content, "post content")?;
        let category = normalize_category(&new.category)?;
        let image_url = normalize_optional_text(new.image_url.as_deref());

        with_tx!(self, |db_tx| {
            let author = self.require_author(&db_tx, user_id).await?;
            let model = posts::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id),
                title: ActiveValue::Set(title),
                content: ActiveValue::Set(content),
                image_url: ActiveValue::Set(image_url),
                category: ActiveValue::Set(category),
                likes_count: ActiveValue::Set(0),
                comments_count: ActiveValue::Set(0),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;
            Ok(Post::from_model(model, author))
        })
    }

    /// List active posts, newest first. Authors that no longer exist are
    /// replaced with a placeholder instead of dropping the post.
    pub async fn list_posts(&self, filter: PostListFilter) -> ResultEngine<Vec<Post>> {
        let mut query = posts::Entity::find().filter(posts::Column::IsActive.eq(true));
        if let Some(category) = normalize_optional_text(filter.category.as_deref()) {
            query = query.filter(posts::Column::Category.eq(normalize_category(&category)?));
        }

        let models = query
            .order_by_desc(posts::Column::CreatedAt)
            .order_by_desc(posts::Column::Id)
            .offset(filter.skip.unwrap_or(0))
            .limit(filter.limit.unwrap_or(DEFAULT_PAGE_SIZE))
            .all(&self.database)
            .await?;

        let user_ids: Vec<i32> = models.iter().map(|post| post.user_id).collect();
        let authors = self.load_authors(&self.database, &user_ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let author = authors
                    .get(&model.user_id)
                    .cloned()
                    .unwrap_or_else(unknown_author);
                Post::from_model(model, author)
            })
            .collect())
    }

    /// Like a post, or withdraw the like if one is already there. The
    /// post's counter moves in the same transaction and never goes
    /// below zero.
    pub async fn toggle_like(
        &self,
        user_id: i32,
        post_id: i32,
        now: DateTime<Utc>,
    ) -> ResultEngine<LikeOutcome> {
        with_tx!(self, |db_tx| {
            let post = self.require_active_post(&db_tx, post_id).await?;
            let existing = likes::Entity::find()
                .filter(likes::Column::PostId.eq(post_id))
                .filter(likes::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;

            let (liked, likes_count) = match existing {
                Some(like) => {
                    like.delete(&db_tx).await?;
                    (false, (post.likes_count - 1).max(0))
                }
                None => {
                    likes::ActiveModel {
                        id: ActiveValue::NotSet,
                        post_id: ActiveValue::Set(post_id),
                        user_id: ActiveValue::Set(user_id),
                        created_at: ActiveValue::Set(now),
                    }
                    .insert(&db_tx)
                    .await?;
                    (true, post.likes_count + 1)
                }
            };

            let mut update = posts::ActiveModel::from(post);
            update.likes_count = ActiveValue::Set(likes_count);
            update.updated_at = ActiveValue::Set(now);
            update.update(&db_tx).await?;

            Ok(LikeOutcome {
                post_id,
                liked,
                likes_count,
            })
        })
    }

    /// Comment on a post, bumping its comment counter in the same
    /// transaction.
    pub async fn add_comment(
        &self,
        user_id: i32,
        post_id: i32,
        content: &str,
        now: DateTime<Utc>,
    ) -> ResultEngine<Comment> {
        let content = normalize_required_text(content, "comment")?;

        with_tx!(self, |db_tx| {
            let post = self.require_active_post(&db_tx, post_id).await?;
            let author = self.require_author(&db_tx, user_id).await?;

            let model = comments::ActiveModel {
                id: ActiveValue::NotSet,
                post_id: ActiveValue::Set(post_id),
                user_id: ActiveValue::Set(user_id),
                content: ActiveValue::Set(content),
                created_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            let comments_count = post.comments_count + 1;
            let mut update = posts::ActiveModel::from(post);
            update.comments_count = ActiveValue::Set(comments_count);
            update.updated_at = ActiveValue::Set(now);
            update.update(&db_tx).await?;

            Ok(Comment::from_model(model, author))
        })
    }

    /// List a post's comments, oldest first.
    pub async fn list_comments(&self, post_id: i32) -> ResultEngine<Vec<Comment>> {
        let models = comments::Entity::find()
            .filter(comments::Column::PostId.eq(post_id))
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(&self.database)
            .await?;

        let user_ids: Vec<i32> = models.iter().map(|comment| comment.user_id).collect();
        let authors = self.load_authors(&self.database, &user_ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let author = authors
                    .get(&model.user_id)
                    .cloned()
                    .unwrap_or_else(unknown_author);
                Comment::from_model(model, author)
            })
            .collect())
    }

    /// Delete a post together with its comments and likes. Only the
    /// owner may do it.
    pub async fn delete_post(&self, user_id: i32, post_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let post = self.require_active_post(&db_tx, post_id).await?;
            if post.user_id != user_id {
                return Err(EngineError::Forbidden(
                    "only the owner can delete a post".to_string(),
                ));
            }

            comments::Entity::delete_many()
                .filter(comments::Column::PostId.eq(post_id))
                .exec(&db_tx)
                .await?;
            likes::Entity::delete_many()
                .filter(likes::Column::PostId.eq(post_id))
                .exec(&db_tx)
                .await?;
            post.delete(&db_tx).await?;
            Ok(())
        })
    }
}
