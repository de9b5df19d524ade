//! Handlers for spaces and the configuration wizard's persistence.
//!
//! Create submits a whole draft; edit saves one section at a time. Both go
//! through [`PgSpaceGateway`] so validation, slug uniqueness, and owner
//! scoping behave the same as for any other gateway caller.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use viewus_core::error::CoreError;
use viewus_core::gateway::PersistenceGateway;
use viewus_core::reconcile::hydrate_draft;
use viewus_core::search::{clamp_limit, clamp_offset};
use viewus_core::space_draft::{SectionValue, SpaceDraft};
use viewus_core::space_record::SpaceRecord;
use viewus_core::space_validation::is_valid_slug;
use viewus_core::types::DbId;
use viewus_core::wall_of_love::{WallEmbed, WallLayout};
use viewus_db::gateway::PgSpaceGateway;
use viewus_db::models::space::Space;
use viewus_db::repositories::SpaceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 25;
const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Pagination parameters for listing spaces.
#[derive(Debug, Deserialize)]
pub struct ListSpacesParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SlugParams {
    pub slug: String,
}

/// Layout options of a wall embed; unknown values fall back to defaults.
#[derive(Debug, Deserialize)]
pub struct WallEmbedParams {
    pub layout: Option<String>,
    pub columns: Option<u8>,
    pub height: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlugAvailability {
    pub slug: String,
    /// Whether the slug is well-formed.
    pub valid: bool,
    /// Whether the slug is well-formed and unused.
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gateway(state: &AppState, auth: &AuthUser) -> PgSpaceGateway {
    PgSpaceGateway::new(state.pool.clone(), auth.user_id)
}

/// Load a space owned by the caller. Other owners' spaces are reported as
/// missing.
async fn ensure_owned_space(
    pool: &sqlx::PgPool,
    id: DbId,
    auth: &AuthUser,
) -> AppResult<SpaceRecord> {
    SpaceRepo::find_record_by_id(pool, id)
        .await?
        .filter(|r| r.owner_id == auth.user_id)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Space",
                key: id.to_string(),
            })
        })
}

// ---------------------------------------------------------------------------
// POST /spaces
// ---------------------------------------------------------------------------

/// Create a space from a complete wizard draft.
pub async fn create_space(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<SpaceDraft>,
) -> AppResult<impl IntoResponse> {
    let created = gateway(&state, &auth).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /spaces
// ---------------------------------------------------------------------------

/// List the caller's spaces, newest first.
pub async fn list_spaces(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListSpacesParams>,
) -> AppResult<Json<DataResponse<Vec<Space>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let spaces = SpaceRepo::list_by_owner(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: spaces }))
}

// ---------------------------------------------------------------------------
// GET /spaces/slug-availability
// ---------------------------------------------------------------------------

/// Inline check for the identity step.
pub async fn slug_availability(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SlugParams>,
) -> AppResult<Json<DataResponse<SlugAvailability>>> {
    let slug = params.slug.trim().to_string();
    let valid = is_valid_slug(&slug);
    let available = valid && !SpaceRepo::slug_exists(&state.pool, &slug).await?;

    tracing::debug!(slug = %slug, valid, available, "Slug availability checked");
    Ok(Json(DataResponse {
        data: SlugAvailability {
            slug,
            valid,
            available,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /spaces/by-slug/{slug}
// ---------------------------------------------------------------------------

/// Fetch the record an edit wizard reconciles from.
pub async fn get_space_by_slug(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<SpaceRecord>>> {
    let record = gateway(&state, &auth).fetch(&slug).await?;
    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// GET /spaces/{id}
// ---------------------------------------------------------------------------

pub async fn get_space(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SpaceRecord>>> {
    let record = ensure_owned_space(&state.pool, id, &auth).await?;
    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// GET /spaces/{id}/draft
// ---------------------------------------------------------------------------

/// The stored space in wizard shape, with persisted gaps filled by defaults.
pub async fn get_draft(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SpaceDraft>>> {
    let record = ensure_owned_space(&state.pool, id, &auth).await?;
    Ok(Json(DataResponse {
        data: hydrate_draft(&record),
    }))
}

// ---------------------------------------------------------------------------
// PUT /spaces/{id}/sections
// ---------------------------------------------------------------------------

/// Save one section. Returns the section as stored.
pub async fn update_section(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(value): Json<SectionValue>,
) -> AppResult<Json<DataResponse<SectionValue>>> {
    let stored = gateway(&state, &auth).update(id, &value).await?;
    Ok(Json(DataResponse { data: stored }))
}

// ---------------------------------------------------------------------------
// DELETE /spaces/{id}
// ---------------------------------------------------------------------------

pub async fn delete_space(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owned_space(&state.pool, id, &auth).await?;
    SpaceRepo::delete(&state.pool, id).await?;

    tracing::info!(space_id = id, user_id = auth.user_id, "Space deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /spaces/{id}/wall-embed
// ---------------------------------------------------------------------------

/// Embed URL of the space's Wall of Love for the requested layout.
pub async fn wall_embed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<WallEmbedParams>,
) -> AppResult<Json<DataResponse<WallEmbed>>> {
    let record = ensure_owned_space(&state.pool, id, &auth).await?;
    let layout = WallLayout::from_params(
        params.layout.as_deref(),
        params.columns,
        params.height.as_deref(),
    );
    Ok(Json(DataResponse {
        data: WallEmbed::new(&state.config.public_base_url, &record.slug, layout),
    }))
}
