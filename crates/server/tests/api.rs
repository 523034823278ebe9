use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::Utc;
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use server::ServerConfig;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db.clone())
        .advisor(engine::AdvisorConfig::default())
        .build()
        .await
        .unwrap();

    server::app(
        engine,
        db,
        ServerConfig {
            jwt_secret: "test-secret".to_string(),
        },
    )
}

fn request(method: &str, path: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(&json!({"name": name, "email": email, "password": "hunter2secret"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_issues_a_bearer_token() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(&json!({"name": "Ana", "email": "Ana@Example.COM", "password": "hunter2secret"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap().to_string();
    let (status, body) = send(&app, request("GET", "/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["email"], "ana@example.com");
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let app = test_app().await;
    register(&app, "Ana", "ana@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(&json!({"name": "Other", "email": "ana@example.com", "password": "different"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email already registered");
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = test_app().await;
    register(&app, "Ana", "ana@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(&json!({"email": "ana@example.com", "password": "hunter2secret"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(&json!({"email": "ana@example.com", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = test_app().await;

    let (status, _) = send(&app, request("GET", "/transactions", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request("GET", "/transactions", Some("not-a-real-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_update_and_password_change() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/auth/profile",
            Some(&token),
            Some(&json!({"name": "  Ana Maria  "})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana Maria");

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/auth/password",
            Some(&token),
            Some(&json!({"current_password": "wrong", "new_password": "newsecret"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "current password is incorrect");

    let (status, _) = send(
        &app,
        request(
            "PUT",
            "/auth/password",
            Some(&token),
            Some(&json!({"current_password": "hunter2secret", "new_password": "newsecret"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(&json!({"email": "ana@example.com", "password": "hunter2secret"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(&json!({"email": "ana@example.com", "password": "newsecret"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn transactions_round_trip_over_http() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(&token),
            Some(&json!({
                "date": "2026-08-10",
                "kind": "expense",
                "amount_minor": 150_00,
                "category": "food",
                "description": "groceries"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "expense");
    assert_eq!(body["category"], "food");
    let first_id = body["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(&token),
            Some(&json!({
                "date": "2026-08-12",
                "kind": "income",
                "amount_minor": 3000_00,
                "category": "salary",
                "description": null
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, request("GET", "/transactions", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "2026-08-12");
    assert_eq!(rows[0]["kind"], "income");
    assert_eq!(rows[1]["date"], "2026-08-10");
    assert_eq!(rows[1]["description"], "groceries");

    let (status, _) = send(
        &app,
        request(
            "DELETE",
            &format!("/transactions/{first_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/transactions/{first_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "\"transaction not exists\" key not found!");
}

#[tokio::test]
async fn invalid_transaction_payload_is_unprocessable() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(&token),
            Some(&json!({
                "date": "2026-08-10",
                "kind": "expense",
                "amount_minor": 0,
                "category": "food",
                "description": null
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid input: amount_minor must be > 0");
}

#[tokio::test]
async fn dashboard_summary_reflects_the_ledger() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com").await;
    let today = Utc::now().date_naive();

    for (kind, amount) in [("income", 5000_00), ("expense", 1000_00)] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/transactions",
                Some(&token),
                Some(&json!({
                    "date": today.to_string(),
                    "kind": kind,
                    "amount_minor": amount,
                    "category": "misc",
                    "description": null
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        request("GET", "/dashboard/summary", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_income_minor"], 5000_00);
    assert_eq!(body["total_expense_minor"], 1000_00);
    assert_eq!(body["balance_minor"], 4000_00);
    assert_eq!(body["transactions_this_month"], 2);
}

#[tokio::test]
async fn financial_report_downloads_as_csv() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(&token),
            Some(&json!({
                "date": "2026-08-12",
                "kind": "income",
                "amount_minor": 3000_00,
                "category": "salary",
                "description": "August pay"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, headers, body) = send_raw(
        &app,
        request(
            "GET",
            "/reports/financial?from=2026-08-01&to=2026-08-31",
            Some(&token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"financial_report_2026-08-01_2026-08-31.csv\""
    );

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "Period,2026-08-01,2026-08-31");
    assert_eq!(lines[1], "Total income,3000.00");
    assert!(lines.contains(&"2026-08-12,income,3000.00,salary,August pay"));
}

#[tokio::test]
async fn inverted_report_range_is_unprocessable() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "GET",
            "/reports/financial?from=2026-09-01&to=2026-08-01",
            Some(&token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Invalid input: invalid range: from must not be after to"
    );
}

#[tokio::test]
async fn community_feed_over_http() {
    let app = test_app().await;
    let ana = register(&app, "Ana", "ana@example.com").await;
    let bob = register(&app, "Bob", "bob@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/community/posts",
            Some(&ana),
            Some(&json!({
                "title": "Opened my coffee cart",
                "content": "First week went well.",
                "category": "retail",
                "image_url": null
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner"]["name"], "Ana");
    let post_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/community/posts/{post_id}/like"),
            Some(&bob),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["liked"], true);
    assert_eq!(body["likes_count"], 1);

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/community/posts/{post_id}/comments"),
            Some(&bob),
            Some(&json!({"content": "Congrats!"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"]["name"], "Bob");

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/community/posts/{post_id}/comments"),
            Some(&ana),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, request("GET", "/community/posts", Some(&bob), None)).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["comments_count"], 1);

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/community/posts/{post_id}"),
            Some(&bob),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden: only the owner can delete a post");

    let (status, _) = send(
        &app,
        request(
            "DELETE",
            &format!("/community/posts/{post_id}"),
            Some(&ana),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, request("GET", "/community/posts", Some(&ana), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
