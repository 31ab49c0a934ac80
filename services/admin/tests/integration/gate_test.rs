use sea_orm::DatabaseConnection;
use serde_json::json;

use lyceum_admin::config::{AdminConfig, SchoolDefaults};
use lyceum_admin::router::build_router;
use lyceum_admin::state::AppState;
use lyceum_testing::app::TestApp;
use lyceum_testing::auth::{TEST_JWT_ISSUER, TEST_JWT_SECRET, TokenMint};

/// Router wired against a disconnected database. Every test here exercises
/// only paths that resolve before a query is issued (health, token
/// validation, the permission gate, verify/refresh/logout).
fn test_app() -> TestApp {
    let config = AdminConfig {
        app_env: "test".to_owned(),
        server_port: 0,
        read_timeout_secs: 5,
        write_timeout_secs: 5,
        db_host: "localhost".to_owned(),
        db_port: 5432,
        db_database: "lyceum".to_owned(),
        db_user: "lyceum".to_owned(),
        db_password: String::new(),
        db_max_open: 1,
        db_max_idle: 1,
        db_ssl_mode: "disable".to_owned(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        jwt_issuer: TEST_JWT_ISSUER.to_owned(),
        school_defaults: SchoolDefaults {
            country: "US".to_owned(),
            subscription_tier: "basic".to_owned(),
            max_teachers: 50,
            max_students: 1000,
        },
        cors_allowed_origins: vec!["*".to_owned()],
    };
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: config.jwt_secret.clone(),
        jwt_issuer: config.jwt_issuer.clone(),
        school_defaults: config.school_defaults.clone(),
    };
    TestApp::new(build_router(state, &config))
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_healthz_without_auth() {
    let app = test_app();
    let resp = app.get("/healthz", None).await;
    assert_eq!(resp.status, 200);
}

// ── Authentication gate ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_protected_route_without_token() {
    let app = test_app();
    let resp = app.get("/api/v1/schools", None).await;
    assert_eq!(resp.status, 401);
    assert_eq!(resp.body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let app = test_app();
    let resp = app.get("/api/v1/schools", Some("not.a.jwt")).await;
    assert_eq!(resp.status, 401);
    assert_eq!(resp.body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_expired_token() {
    let app = test_app();
    let token = TokenMint::new(&["schools:read"]).sign_with_lifetime(-300);
    let resp = app.get("/api/v1/schools", Some(&token)).await;
    assert_eq!(resp.status, 401);
}

// ── Permission gate ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_token_missing_permission() {
    let app = test_app();
    let token = TokenMint::new(&["users:read"]).sign();
    let resp = app
        .post("/api/v1/schools", Some(&token), json!({"name": "X", "code": "Y"}))
        .await;
    assert_eq!(resp.status, 403);
    assert_eq!(resp.body["kind"], "FORBIDDEN");
    assert_eq!(resp.body["details"]["permission"], "schools:create");
}

#[tokio::test]
async fn should_gate_each_method_separately() {
    let app = test_app();
    // schools:read authorizes GET on the collection but not POST.
    let token = TokenMint::new(&["schools:read"]).sign();
    let resp = app
        .post("/api/v1/schools", Some(&token), json!({"name": "X", "code": "Y"}))
        .await;
    assert_eq!(resp.status, 403);
    assert_eq!(resp.body["details"]["permission"], "schools:create");
}

#[tokio::test]
async fn should_require_exact_permission_string() {
    let app = test_app();
    // No wildcard expansion: "schools:*" does not grant schools:read.
    let token = TokenMint::new(&["schools:*"]).sign();
    let resp = app.get("/api/v1/schools", Some(&token)).await;
    assert_eq!(resp.status, 403);
    assert_eq!(resp.body["details"]["permission"], "schools:read");
}

// ── Auth endpoints ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_never_honor_refresh_tokens() {
    let app = test_app();
    let resp = app
        .post(
            "/api/v1/auth/refresh",
            None,
            json!({"refresh_token": "anything-at-all"}),
        )
        .await;
    assert_eq!(resp.status, 401);
    assert_eq!(resp.body["kind"], "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn should_verify_valid_token_with_context() {
    let app = test_app();
    let mint = TokenMint::new(&["schools:read"]);
    let token = mint.sign();
    let resp = app
        .post("/api/v1/auth/verify", None, json!({"token": token}))
        .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["valid"], true);
    assert_eq!(resp.body["user_id"], mint.user_id.to_string());
    assert_eq!(resp.body["email"], "tester@example.com");
    assert_eq!(
        resp.body["active_context"]["permissions"],
        json!(["schools:read"])
    );
}

#[tokio::test]
async fn should_verify_expired_token_as_invalid_with_tag() {
    let app = test_app();
    let token = TokenMint::new(&[]).sign_with_lifetime(-300);
    let resp = app
        .post("/api/v1/auth/verify", None, json!({"token": token}))
        .await;
    // Introspection always answers 200; validity lives in the body.
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["valid"], false);
    assert_eq!(resp.body["error"], "expired");
    assert!(resp.body.get("user_id").is_none());
}

#[tokio::test]
async fn should_verify_garbage_token_as_invalid() {
    let app = test_app();
    let resp = app
        .post("/api/v1/auth/verify", None, json!({"token": "garbage"}))
        .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["valid"], false);
    assert_eq!(resp.body["error"], "malformed");
}

#[tokio::test]
async fn should_acknowledge_logout_for_authenticated_user() {
    let app = test_app();
    let token = TokenMint::new(&[]).sign();
    let resp = app.request("POST", "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn should_reject_logout_without_token() {
    let app = test_app();
    let resp = app.request("POST", "/api/v1/auth/logout", None, None).await;
    assert_eq!(resp.status, 401);
}
