//! HTTP-level integration tests for profile, role management and dashboards.

mod common;

use atelier_core::roles::Role;
use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_profile_without_external_id(pool: PgPool) {
    common::create_user(&pool, "client-1", Role::Client).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/me", &common::token_for("client-1")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["email"], "client-1@test.com");
    assert_eq!(json["role"], "client");
    assert!(json.get("external_id").is_none(), "provider subject must not leak");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_authenticated_call_creates_the_user(pool: PgPool) {
    // No row exists for this subject yet.
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/me", &common::token_for("fresh-subject")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // New accounts start as clients.
    assert_eq!(json["role"], "client");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_updates_apply_only_provided_fields(pool: PgPool) {
    common::create_user(&pool, "client-1", Role::Client).await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/me",
        &common::token_for("client-1"),
        json!({ "display_name": "Ada Lovelace" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["display_name"], "Ada Lovelace");
    assert_eq!(json["email"], "client-1@test.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn role_changes_are_admin_only(pool: PgPool) {
    let client_id = common::create_user(&pool, "client-1", Role::Client).await;
    common::create_user(&pool, "admin-1", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app.clone(),
        &format!("/api/v1/users/{client_id}/role"),
        &common::token_for("client-1"),
        json!({ "role": "developer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json(
        app.clone(),
        &format!("/api/v1/users/{client_id}/role"),
        &common::token_for("admin-1"),
        json!({ "role": "developer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "developer");

    // The promotion is effective on the next request.
    let response = get(app, "/api/v1/projects/available", &common::token_for("client-1")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admins_cannot_demote_themselves(pool: PgPool) {
    let admin_id = common::create_user(&pool, "admin-1", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        &format!("/api/v1/users/{admin_id}/role"),
        &common::token_for("admin-1"),
        json!({ "role": "client" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_is_strictly_self_service(pool: PgPool) {
    let client_id = common::create_user(&pool, "client-1", Role::Client).await;
    common::create_user(&pool, "admin-1", Role::Admin).await;
    let app = common::build_test_app(pool);

    // Even an admin is refused another user's dashboard.
    let response = get(
        app.clone(),
        &format!("/api/v1/users/{client_id}/dashboard"),
        &common::token_for("admin-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(
        app,
        &format!("/api/v1/users/{client_id}/dashboard"),
        &common::token_for("client-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_dashboard_aggregates_requests_and_projects(pool: PgPool) {
    let client_id = common::create_user(&pool, "client-1", Role::Client).await;
    common::create_user(&pool, "admin-1", Role::Admin).await;
    let app = common::build_test_app(pool);
    let client = common::token_for("client-1");
    let admin = common::token_for("admin-1");

    // One request in intake.
    post_json(
        app.clone(),
        "/api/v1/requests",
        &client,
        json!({
            "title": "Bakery site",
            "description": "desc",
            "project_type": "website"
        }),
    )
    .await;

    // One project owned directly.
    post_json(
        app.clone(),
        "/api/v1/projects",
        &admin,
        json!({
            "client_id": client_id,
            "title": "Portfolio",
            "description": "desc",
            "project_type": "website",
            "internal_notes": "vip"
        }),
    )
    .await;

    let response = get(
        app,
        &format!("/api/v1/users/{client_id}/dashboard"),
        &client,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["user_id"], client_id);
    assert_eq!(json["requests"].as_array().unwrap().len(), 1);
    assert_eq!(json["projects"].as_array().unwrap().len(), 1);
    assert_eq!(json["projects"][0]["relationship"], "client");
    assert!(json["projects"][0]["internal_notes"].is_null());
    assert_eq!(json["summary"]["total_projects"], 1);
    assert_eq!(json["summary"]["total_requests"], 1);
    assert_eq!(json["summary"]["pending_requests"], 1);
    // Clients never get the developer sections.
    assert_eq!(json["available_projects"].as_array().unwrap().len(), 0);
    assert_eq!(json["assigned_projects"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn developer_dashboard_includes_pool_and_assignments(pool: PgPool) {
    let client_id = common::create_user(&pool, "client-1", Role::Client).await;
    let dev_id = common::create_user(&pool, "dev-1", Role::Developer).await;
    common::create_user(&pool, "admin-1", Role::Admin).await;
    let app = common::build_test_app(pool);
    let dev = common::token_for("dev-1");
    let admin = common::token_for("admin-1");

    for title in ["First", "Second"] {
        post_json(
            app.clone(),
            "/api/v1/projects",
            &admin,
            json!({
                "client_id": client_id,
                "title": title,
                "description": "desc",
                "project_type": "website"
            }),
        )
        .await;
    }

    // Claim one of the two.
    let response = get(app.clone(), "/api/v1/projects/available", &dev).await;
    let available = body_json(response).await;
    let first_id = available[0]["id"].as_i64().unwrap();
    post_json(
        app.clone(),
        &format!("/api/v1/projects/{first_id}/assign"),
        &dev,
        json!({}),
    )
    .await;

    let response = get(app, &format!("/api/v1/users/{dev_id}/dashboard"), &dev).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["available_projects"].as_array().unwrap().len(), 1);
    assert_eq!(json["assigned_projects"].as_array().unwrap().len(), 1);
    assert_eq!(json["assigned_projects"][0]["id"], first_id);
    // The developer owns no projects as a client.
    assert_eq!(json["projects"].as_array().unwrap().len(), 0);
}
