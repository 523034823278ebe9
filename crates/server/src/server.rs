use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{
    analysis, auth::TokenKeys, community, dashboard, predictions, recommendations, reports,
    transactions, user,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
    pub keys: TokenKeys,
}

/// Server-side configuration the app binary passes in.
#[derive(Clone)]
pub struct ServerConfig {
    pub jwt_secret: String,
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(auth_header)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let Some(email) = state.keys.verify(auth_header.token()) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(user::me))
        .route("/auth/profile", put(user::update_profile))
        .route("/auth/password", put(user::change_password))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/{id}", delete(transactions::remove))
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/reports/financial", get(reports::financial))
        .route("/analysis/feasibility", post(analysis::feasibility))
        .route("/predictions/cashflow", post(predictions::cash_flow))
        .route("/recommendations/business", post(recommendations::business))
        .route(
            "/community/posts",
            get(community::list_posts).post(community::create_post),
        )
        .route("/community/posts/{id}", delete(community::delete_post))
        .route("/community/posts/{id}/like", post(community::toggle_like))
        .route(
            "/community/posts/{id}/comments",
            get(community::list_comments).post(community::add_comment),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/auth/register", post(user::register))
        .route("/auth/login", post(user::login))
        .merge(protected)
        .with_state(state)
}

/// Build the full application router. Tests drive it with
/// `tower::ServiceExt::oneshot`.
pub fn app(engine: Engine, db: DatabaseConnection, config: ServerConfig) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        db,
        keys: TokenKeys::from_secret(config.jwt_secret.as_bytes()),
    };

    router(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection, config: ServerConfig) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, config, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, db, config)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, config, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
