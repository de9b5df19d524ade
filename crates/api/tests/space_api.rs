//! HTTP-level integration tests for the `/spaces` endpoints.
//!
//! Covers create (including duplicate slugs and validation errors), the
//! per-section save used by the edit wizard, owner scoping, and wall embeds.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_space, delete_auth, draft_json, get, get_auth,
    post_json_auth, put_json_auth, token_for, PUBLIC_BASE_URL,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_spaces_require_token(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/v1/spaces").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(build_test_app(pool), "/api/v1/spaces", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_space_returns_identity(pool: PgPool) {
    let token = token_for(1);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/spaces",
        draft_json("acme"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "acme");
    let id = json["data"]["id"].as_i64().unwrap();

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/spaces/{id}/draft"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], draft_json("acme"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_slug_conflicts(pool: PgPool) {
    create_space(&pool, "acme", &token_for(1)).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/spaces",
        draft_json("acme"),
        &token_for(2),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_SLUG");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_invalid_draft_lists_fields(pool: PgPool) {
    let mut draft = draft_json("Bad Slug");
    draft["design"]["btn_color"] = json!("teal");

    let response =
        post_json_auth(build_test_app(pool), "/api/v1/spaces", draft, &token_for(1)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["project_details.project_slug", "design.btn_color"]);
}

// ---------------------------------------------------------------------------
// Read / list / slug availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_slug_and_list(pool: PgPool) {
    let token = token_for(1);
    create_space(&pool, "acme", &token).await;
    create_space(&pool, "globex", &token).await;
    create_space(&pool, "initech", &token_for(2)).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/spaces/by-slug/acme",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Acme");
    assert_eq!(json["data"]["details"]["theme"], 2);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/spaces?limit=10",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_slug_availability(pool: PgPool) {
    let token = token_for(1);
    create_space(&pool, "acme", &token).await;

    let check = |slug: &'static str| {
        let pool = pool.clone();
        let token = token.clone();
        async move {
            let uri = format!("/api/v1/spaces/slug-availability?slug={slug}");
            body_json(get_auth(build_test_app(pool), &uri, &token).await).await["data"].clone()
        }
    };

    let taken = check("acme").await;
    assert_eq!(taken["valid"], true);
    assert_eq!(taken["available"], false);

    let free = check("globex").await;
    assert_eq!(free["available"], true);

    let malformed = check("Not%20Valid").await;
    assert_eq!(malformed["valid"], false);
    assert_eq!(malformed["available"], false);
}

// ---------------------------------------------------------------------------
// Section saves
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_section_changes_only_that_section(pool: PgPool) {
    let token = token_for(1);
    let id = create_space(&pool, "acme", &token).await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{id}/sections"),
        json!({
            "section": "design",
            "value": { "gradient_type": 2, "btn_color": "#000000" }
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["section"], "design");
    assert_eq!(json["data"]["value"]["btn_color"], "#000000");

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/spaces/{id}/draft"),
        &token,
    )
    .await;
    let draft = body_json(response).await["data"].clone();
    let mut expected = draft_json("acme");
    expected["design"]["btn_color"] = json!("#000000");
    assert_eq!(draft, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_identity_section_is_rejected(pool: PgPool) {
    let token = token_for(1);
    let id = create_space(&pool, "acme", &token).await;

    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/spaces/{id}/sections"),
        json!({
            "section": "project_details",
            "value": { "project_name": "Renamed", "project_slug": "renamed" }
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"][0]["code"], "read_only");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_invalid_section(pool: PgPool) {
    let token = token_for(1);
    let id = create_space(&pool, "acme", &token).await;

    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/spaces/{id}/sections"),
        json!({ "section": "thank_you", "value": { "title": "", "description": "" } }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "title");
}

// ---------------------------------------------------------------------------
// Owner scoping / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_space_is_not_found(pool: PgPool) {
    let id = create_space(&pool, "acme", &token_for(1)).await;
    let stranger = token_for(2);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{id}"),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{id}/sections"),
        json!({ "section": "design", "value": { "gradient_type": 1, "btn_color": "#FFFFFF" } }),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/spaces/by-slug/acme",
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_space(pool: PgPool) {
    let token = token_for(1);
    let id = create_space(&pool, "acme", &token).await;
    let uri = format!("/api/v1/spaces/{id}");

    let response = delete_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Wall embed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wall_embed_urls(pool: PgPool) {
    let token = token_for(1);
    let id = create_space(&pool, "acme", &token).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{id}/wall-embed"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["url"],
        format!("{PUBLIC_BASE_URL}/wall/acme?layout=grid&columns=3")
    );

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/spaces/{id}/wall-embed?layout=carousel&height=fit"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["url"],
        format!("{PUBLIC_BASE_URL}/wall/acme?layout=carousel&height=fit")
    );
    assert_eq!(json["data"]["layout"]["layout"], "carousel");
}
