use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
    routing::get,
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{Claims, ServerConfig};

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let engine = Engine::new(db);
    engine.seed_default_admin().await.unwrap();

    server::app(
        engine,
        ServerConfig {
            jwt_secret: "test-secret".to_string(),
            cors_origin: "*".to_string(),
        },
    )
}

async fn read_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, read_body(response).await)
}

async fn get_json(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, read_body(response).await)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;

    let (status, body) = get_json(&app, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Server is running");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn register_issues_token_accepted_by_verify() {
    let app = test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "a@x.com", "password": "secret1"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["isAdmin"], false);
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().unwrap();
    let (status, body) = get_json(&app, "/api/auth/verify", Some(token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["isAdmin"], false);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app().await;

    let (status, _) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "a@x.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "other@x.com", "password": "secret1"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username or email already exists");

    // The first account still logs in.
    let (status, _) = post_json(
        &app,
        "/api/auth/login",
        json!({"username": "alice", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "a@x.com", "password": "short"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 6 characters long");
}

#[tokio::test]
async fn missing_auth_fields_get_the_400_envelope() {
    let app = test_app().await;

    // No email field at all, not just an empty one.
    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "password": "secret1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username, email and password are required");

    let (status, body) = post_json(&app, "/api/auth/login", json!({"username": "alice"})).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn login_failures_do_not_leak_which_check_failed() {
    let app = test_app().await;

    post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "a@x.com", "password": "secret1"}),
    )
    .await;

    let (wrong_status, wrong_body) = post_json(
        &app,
        "/api/auth/login",
        json!({"username": "alice", "password": "wrong-password"}),
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        &app,
        "/api/auth/login",
        json!({"username": "nobody", "password": "secret1"}),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
    assert_eq!(wrong_body["message"], "Invalid username or password");
}

#[tokio::test]
async fn seeded_admin_logs_in_with_admin_flag() {
    let app = test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({"username": "admin", "password": "admin123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["isAdmin"], true);
}

#[tokio::test]
async fn verify_without_token_is_401_with_garbage_403() {
    let app = test_app().await;

    let (status, body) = get_json(&app, "/api/auth/verify", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token required");

    let (status, body) = get_json(&app, "/api/auth/verify", Some("garbage")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn submitted_feedback_is_listed_most_recent_first() {
    let app = test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/feedback",
        json!({"rating": 3, "comments": "fine"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = post_json(
        &app,
        "/api/feedback",
        json!({"rating": 5, "comments": "great"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["feedbackId"].is_i64());

    let (status, body) = get_json(&app, "/api/feedback", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let feedback = body["feedback"].as_array().unwrap();
    assert_eq!(feedback.len(), 2);
    assert_eq!(feedback[0]["rating"], 5);
    assert_eq!(feedback[0]["comments"], "great");
    assert_eq!(feedback[1]["rating"], 3);
}

#[tokio::test]
async fn invalid_rating_is_rejected_and_not_persisted() {
    let app = test_app().await;

    for body in [json!({"rating": 0}), json!({"rating": 6}), json!({})] {
        let (status, body) = post_json(&app, "/api/feedback", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid rating. Rating must be between 1 and 5.");
    }

    let (_, body) = get_json(&app, "/api/feedback", None).await;
    assert!(body["feedback"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn stats_aggregate_all_ratings() {
    let app = test_app().await;

    let (status, body) = get_json(&app, "/api/feedback/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_feedback"], 0);
    assert!(body["stats"]["average_rating"].is_null());

    for rating in [5, 3] {
        post_json(&app, "/api/feedback", json!({"rating": rating})).await;
    }

    let (status, body) = get_json(&app, "/api/feedback/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["stats"]["total_feedback"], 2);
    assert_eq!(body["stats"]["average_rating"], 4.0);
    assert_eq!(body["stats"]["highest_rating"], 5);
    assert_eq!(body["stats"]["lowest_rating"], 3);
}

#[tokio::test]
async fn require_admin_gates_on_the_admin_claim() {
    let gated = Router::new()
        .route("/admin-only", get(|| async { "ok" }))
        .route_layer(middleware::from_fn(server::require_admin));

    let claims = |is_admin| Claims {
        id: 1,
        username: "alice".to_string(),
        is_admin,
        iat: 0,
        exp: i64::MAX,
    };

    let request = Request::builder()
        .uri("/admin-only")
        .extension(claims(false))
        .body(Body::empty())
        .unwrap();
    let response = gated.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = Request::builder()
        .uri("/admin-only")
        .extension(claims(true))
        .body(Body::empty())
        .unwrap();
    let response = gated.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
