//! Integration tests for the startup admin seed.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user_with_token, get_auth, post_json};
use hostdesk_api::bootstrap::seed_admin;
use sqlx::PgPool;

/// On a fresh database the seed creates a working admin account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_seed_creates_admin(pool: PgPool) {
    let admin = seed_admin(&pool, "root@hostdesk.test", "bootstrap-pass")
        .await
        .expect("seed should succeed");
    assert_eq!(admin.role, "ADMIN");

    // The seeded credentials log in and reach an admin-only endpoint.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "root@hostdesk.test",
        "password": "bootstrap-pass",
    });
    let response = post_json(app.clone(), "/api/user/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"].as_str().unwrap().to_string();

    let response = get_auth(app, "/api/user/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Seeding an email that already exists promotes the account instead of
/// creating a duplicate, and leaves its password alone.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_seed_promotes_existing_user(pool: PgPool) {
    let (user, _, password) = create_user_with_token(&pool, "ops@hostdesk.test", "USER").await;

    let promoted = seed_admin(&pool, "ops@hostdesk.test", "ignored-new-pass")
        .await
        .expect("seed should succeed");
    assert_eq!(promoted.id, user.id);
    assert_eq!(promoted.role, "ADMIN");

    // The original password still works; the seed one was never applied.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "ops@hostdesk.test",
        "password": password,
    });
    let response = post_json(app.clone(), "/api/user/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({
        "email": "ops@hostdesk.test",
        "password": "ignored-new-pass",
    });
    let response = post_json(app, "/api/user/login", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Running the seed again is a no-op.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_seed_is_idempotent(pool: PgPool) {
    let first = seed_admin(&pool, "root@hostdesk.test", "bootstrap-pass")
        .await
        .expect("seed should succeed");
    let second = seed_admin(&pool, "root@hostdesk.test", "bootstrap-pass")
        .await
        .expect("repeat seed should succeed");
    assert_eq!(first.id, second.id);

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
        .fetch_one(&pool)
        .await
        .expect("count query");
    assert_eq!(count, 1);
}
