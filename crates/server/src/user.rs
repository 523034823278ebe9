//! Account registration, login, and profile management. The `users`
//! entity lives in the server crate: credentials are a transport concern
//! the engine never sees.

use api_types::auth::{
    LoginRequest, PasswordChange, ProfileResponse, ProfileUpdate, RegisterNew, TokenResponse,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{
    ServerError,
    auth::{hash_password, verify_password},
    server::ServerState,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn profile(user: &Model) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

fn token_response(state: &ServerState, email: &str) -> Result<TokenResponse, ServerError> {
    Ok(TokenResponse {
        access_token: state.keys.issue(email)?,
        token_type: "bearer".to_string(),
    })
}

/// Function to create an account and hand back a bearer token
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterNew>,
) -> Result<(StatusCode, Json<TokenResponse>), ServerError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ServerError::Unprocessable(
            "name must not be empty".to_string(),
        ));
    }

    let email = normalize_email(&payload.email);
    if email.is_empty() {
        return Err(ServerError::Unprocessable(
            "email must not be empty".to_string(),
        ));
    }

    if payload.password.is_empty() {
        return Err(ServerError::Unprocessable(
            "password must not be empty".to_string(),
        ));
    }

    if Entity::find()
        .filter(Column::Email.eq(email.clone()))
        .one(&state.db)
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?
        .is_some()
    {
        return Err(ServerError::Conflict(
            "email already registered".to_string(),
        ));
    }

    let now = chrono::Utc::now();
    let user = ActiveModel {
        name: ActiveValue::Set(name),
        email: ActiveValue::Set(email.clone()),
        password_hash: ActiveValue::Set(hash_password(&payload.password)?),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };
    user.insert(&state.db)
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    Ok((StatusCode::CREATED, Json(token_response(&state, &email)?)))
}

/// Function to exchange credentials for a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ServerError> {
    let user = Entity::find()
        .filter(Column::Email.eq(normalize_email(&payload.email)))
        .one(&state.db)
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    let Some(user) = user else {
        return Err(ServerError::Unauthorized(
            "invalid credentials".to_string(),
        ));
    };

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ServerError::Unauthorized(
            "invalid credentials".to_string(),
        ));
    }

    Ok(Json(token_response(&state, &user.email)?))
}

/// Function to return the authenticated user's profile
pub async fn me(Extension(user): Extension<Model>) -> Json<ProfileResponse> {
    Json(profile(&user))
}

/// Function to rename the authenticated user
pub async fn update_profile(
    Extension(user): Extension<Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, ServerError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ServerError::Unprocessable(
            "name must not be empty".to_string(),
        ));
    }

    let mut update: ActiveModel = user.into();
    update.name = ActiveValue::Set(name);
    update.updated_at = ActiveValue::Set(chrono::Utc::now());

    let user = update
        .update(&state.db)
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    Ok(Json(profile(&user)))
}

/// Function to replace the password after checking the current one
pub async fn change_password(
    Extension(user): Extension<Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PasswordChange>,
) -> Result<StatusCode, ServerError> {
    if !verify_password(&payload.current_password, &user.password_hash) {
        return Err(ServerError::Unprocessable(
            "current password is incorrect".to_string(),
        ));
    }

    if payload.new_password.is_empty() {
        return Err(ServerError::Unprocessable(
            "new password must not be empty".to_string(),
        ));
    }

    let mut update: ActiveModel = user.into();
    update.password_hash = ActiveValue::Set(hash_password(&payload.new_password)?);
    update.updated_at = ActiveValue::Set(chrono::Utc::now());

    update
        .update(&state.db)
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}
