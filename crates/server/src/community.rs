//! Community feed API endpoints

use api_types::community::{
    CommentNew, CommentView, LikeResponse, PostAuthor, PostListQuery, PostNew, PostView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};

fn author_view(author: engine::Author) -> PostAuthor {
    PostAuthor {
        id: author.id,
        name: author.name,
    }
}

fn post_view(post: engine::Post) -> PostView {
    PostView {
        id: post.id,
        title: post.title,
        content: post.content,
        image_url: post.image_url,
        category: post.category,
        likes_count: post.likes_count,
        comments_count: post.comments_count,
        created_at: post.created_at,
        owner: author_view(post.author),
    }
}

fn comment_view(comment: engine::Comment) -> CommentView {
    CommentView {
        id: comment.id,
        content: comment.content,
        created_at: comment.created_at,
        author: author_view(comment.author),
    }
}

pub async fn list_posts(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Vec<PostView>>, ServerError> {
    let posts = state
        .engine
        .list_posts(engine::PostListFilter {
            skip: query.skip,
            limit: query.limit,
            category: query.category,
        })
        .await?;

    Ok(Json(posts.into_iter().map(post_view).collect()))
}

pub async fn create_post(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PostNew>,
) -> Result<(StatusCode, Json<PostView>), ServerError> {
    let post = state
        .engine
        .create_post(
            user.id,
            engine::NewPost {
                title: payload.title,
                content: payload.content,
                category: payload.category,
                image_url: payload.image_url,
            },
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(post_view(post))))
}

pub async fn delete_post(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_post(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_like(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<LikeResponse>, ServerError> {
    let outcome = state.engine.toggle_like(user.id, id, Utc::now()).await?;

    Ok(Json(LikeResponse {
        post_id: outcome.post_id,
        liked: outcome.liked,
        likes_count: outcome.likes_count,
    }))
}

pub async fn list_comments(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CommentView>>, ServerError> {
    let comments = state.engine.list_comments(id).await?;

    Ok(Json(comments.into_iter().map(comment_view).collect()))
}

pub async fn add_comment(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<CommentNew>,
) -> Result<(StatusCode, Json<CommentView>), ServerError> {
    let comment = state
        .engine
        .add_comment(user.id, id, &payload.content, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(comment_view(comment))))
}
