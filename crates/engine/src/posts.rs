//! Community posts.
//!
//! Posts keep denormalized `likes_count` and `comments_count` columns so
//! the feed never has to aggregate; both are maintained inside the same
//! transaction as the like or comment that changes them. Deleted posts
//! are dropped outright, `is_active` exists for moderation.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Public identity attached to posts and comments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

impl Post {
    pub(crate) fn from_model(model: Model, author: Author) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            image_url: model.image_url,
            category: model.category,
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            created_at: model.created_at,
            author,
        }
    }
}

/// State of a post after a like toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeOutcome {
    pub post_id: i32,
    pub liked: bool,
    pub likes_count: i32,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "community_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub likes_count: i32,
    pub comments_count: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
