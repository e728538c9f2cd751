mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_username};
use http_body_util::BodyExt;
use menagerie::config::cors::CorsConfig;
use menagerie::config::jwt::JwtConfig;
use menagerie::config::server::ServerConfig;
use menagerie::router::init_router;
use menagerie::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
    };
    init_router(state)
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_returns_tokens_and_user(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let username = generate_unique_username();

    let (status, body) = post_json(
        app,
        "/api/auth/register",
        json!({
            "username": username,
            "email": format!("{}@zoo.com", username),
            "password": "password123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());
    assert_eq!(body["user"]["username"], username.as_str());
    assert_eq!(body["user"]["is_staff"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_creates_profile(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let username = generate_unique_username();

    let (status, body) = post_json(
        app,
        "/api/auth/register",
        json!({
            "username": username,
            "password": "password123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);

    let user_id = uuid::Uuid::parse_str(body["user"]["id"].as_str().unwrap()).unwrap();
    let profile_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(profile_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", false).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(
        app,
        "/api/auth/register",
        json!({
            "username": username,
            "password": "password123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_short_password_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _body) = post_json(
        app,
        "/api/auth/register",
        json!({
            "username": generate_unique_username(),
            "password": "short"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", false).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(
        app,
        "/api/auth/login",
        json!({
            "username": username,
            "password": "password123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());
    assert_eq!(body["user"]["username"], username.as_str());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", false).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, _body) = post_json(
        app,
        "/api/auth/login",
        json!({
            "username": username,
            "password": "wrongpassword"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _body) = post_json(
        app,
        "/api/auth/login",
        json!({
            "username": "nobody",
            "password": "password123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_issues_new_access_token(pool: PgPool) {
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", false).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (_, login_body) = post_json(
        app,
        "/api/auth/login",
        json!({ "username": username, "password": "password123" }),
    )
    .await;
    let refresh = login_body["refresh"].as_str().unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(app, "/api/auth/refresh", json!({ "refresh": refresh })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_rejects_access_token(pool: PgPool) {
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", false).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (_, login_body) = post_json(
        app,
        "/api/auth/login",
        json!({ "username": username, "password": "password123" }),
    )
    .await;
    let access = login_body["access"].as_str().unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, _body) = post_json(app, "/api/auth/refresh", json!({ "refresh": access })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_always_succeeds(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let (status, body) = post_json(app, "/api/auth/logout", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully logged out");

    let app = setup_test_app(pool.clone()).await;
    let (status, _body) =
        post_json(app, "/api/auth/logout", json!({ "refresh": "garbage" })).await;

    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_auth_index_anonymous(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["login"], "/api/auth/login");
    assert!(body["user"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_auth_index_with_token(pool: PgPool) {
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", false).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (_, login_body) = post_json(
        app,
        "/api/auth/login",
        json!({ "username": username, "password": "password123" }),
    )
    .await;
    let access = login_body["access"].as_str().unwrap();

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/auth")
        .header("authorization", format!("Bearer {}", access))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["user"]["username"], username.as_str());
}
