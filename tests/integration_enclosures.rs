mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_enclosure, create_test_habitat, create_test_user, generate_unique_username,
};
use http_body_util::BodyExt;
use menagerie::config::cors::CorsConfig;
use menagerie::config::jwt::JwtConfig;
use menagerie::config::server::ServerConfig;
use menagerie::router::init_router;
use menagerie::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

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

async fn get_auth_token(pool: &PgPool, username: &str, password: &str) -> String {
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "username": username, "password": password }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access"].as_str().unwrap().to_string()
}

async fn send_json(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn seed_habitat(pool: &PgPool) -> Uuid {
    let mut tx = pool.begin().await.unwrap();
    let habitat_id = create_test_habitat(&mut tx, "African Savanna", "North Wing").await;
    tx.commit().await.unwrap();
    habitat_id
}

async fn seed_admin(pool: &PgPool) -> String {
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", true).await;
    tx.commit().await.unwrap();
    get_auth_token(pool, &username, "password123").await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_enclosures_hides_inactive(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    create_test_enclosure(&mut tx, "Lion Den", 4, true, habitat_id).await;
    create_test_enclosure(&mut tx, "Closed Pen", 2, false, habitat_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(app, "GET", "/api/enclosures", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Lion Den");
    assert_eq!(data[0]["habitat"]["name"], "African Savanna");
    assert_eq!(data[0]["feeding_count"], 0);
    assert_eq!(data[0]["is_available_now"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_enclosures_is_active_filter(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    create_test_enclosure(&mut tx, "Lion Den", 4, true, habitat_id).await;
    create_test_enclosure(&mut tx, "Closed Pen", 2, false, habitat_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(app, "GET", "/api/enclosures?is_active=false", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Closed Pen");
    assert_eq!(data[0]["is_active"], false);

    let app = setup_test_app(pool.clone()).await;
    let (_, body) = send_json(app, "GET", "/api/enclosures?is_active=true", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Lion Den");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_enclosures_capacity_filters(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    create_test_enclosure(&mut tx, "Small Pen", 2, true, habitat_id).await;
    create_test_enclosure(&mut tx, "Large Pen", 20, true, habitat_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) =
        send_json(app, "GET", "/api/enclosures?min_capacity=10", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Large Pen");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_enclosures_search(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    create_test_enclosure(&mut tx, "Penguin Pool", 12, true, habitat_id).await;
    create_test_enclosure(&mut tx, "Lion Den", 4, true, habitat_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(app, "GET", "/api/enclosures?search=penguin", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Penguin Pool");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_enclosures_ordering(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    create_test_enclosure(&mut tx, "A Pen", 5, true, habitat_id).await;
    create_test_enclosure(&mut tx, "B Pen", 2, true, habitat_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) =
        send_json(app, "GET", "/api/enclosures?ordering=-capacity", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["capacity"], 5);
    assert_eq!(data[1]["capacity"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_enclosure_by_id(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    let enclosure_id = create_test_enclosure(&mut tx, "Lion Den", 4, true, habitat_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(
        app,
        "GET",
        &format!("/api/enclosures/{}", enclosure_id),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lion Den");
    assert_eq!(body["capacity"], 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_enclosure_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let (status, _body) = send_json(
        app,
        "GET",
        &format!("/api/enclosures/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_enclosure_requires_auth(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _body) = send_json(
        app,
        "POST",
        "/api/enclosures",
        None,
        Some(json!({ "name": "New Pen", "capacity": 3, "habitat_id": habitat_id })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_enclosure_forbidden_for_non_staff(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let username = generate_unique_username();
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &username, "password123", false).await;
    tx.commit().await.unwrap();
    let token = get_auth_token(&pool, &username, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _body) = send_json(
        app,
        "POST",
        "/api/enclosures",
        Some(&token),
        Some(json!({ "name": "New Pen", "capacity": 3, "habitat_id": habitat_id })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_enclosure_as_admin(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let token = seed_admin(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(
        app,
        "POST",
        "/api/enclosures",
        Some(&token),
        Some(json!({ "name": "New Pen", "capacity": 3, "habitat_id": habitat_id })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "New Pen");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["habitat"]["id"], habitat_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_enclosure_unknown_habitat(pool: PgPool) {
    let token = seed_admin(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _body) = send_json(
        app,
        "POST",
        "/api/enclosures",
        Some(&token),
        Some(json!({ "name": "New Pen", "capacity": 3, "habitat_id": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_enclosure_as_admin(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    let enclosure_id = create_test_enclosure(&mut tx, "Old Name", 4, true, habitat_id).await;
    tx.commit().await.unwrap();
    let token = seed_admin(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(
        app,
        "PUT",
        &format!("/api/enclosures/{}", enclosure_id),
        Some(&token),
        Some(json!({
            "name": "New Name",
            "capacity": 8,
            "habitat_id": habitat_id,
            "is_active": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "New Name");
    assert_eq!(body["capacity"], 8);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_enclosure_as_admin(pool: PgPool) {
    let habitat_id = seed_habitat(&pool).await;
    let mut tx = pool.begin().await.unwrap();
    let enclosure_id = create_test_enclosure(&mut tx, "Doomed Pen", 4, true, habitat_id).await;
    tx.commit().await.unwrap();
    let token = seed_admin(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _body) = send_json(
        app,
        "DELETE",
        &format!("/api/enclosures/{}", enclosure_id),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enclosures WHERE id = $1")
        .bind(enclosure_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
