//! Public handlers for a space's customer-facing review form.
//!
//! No authentication: anyone with the slug can open the form.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use viewus_core::error::CoreError;
use viewus_core::reconcile::hydrate_draft;
use viewus_core::space_draft::SpaceDraft;
use viewus_core::submission::{self, CustomerDetails, ReviewForm, ReviewKind};
use viewus_db::repositories::SpaceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted customer details and the review format to continue with.
#[derive(Debug, Serialize)]
pub struct AcceptedDetails {
    pub details: CustomerDetails,
    pub review_kind: ReviewKind,
}

async fn load_form_draft(pool: &sqlx::PgPool, slug: &str) -> AppResult<SpaceDraft> {
    let record = SpaceRepo::find_record_by_slug(pool, slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Space",
                key: slug.to_string(),
            })
        })?;
    Ok(hydrate_draft(&record))
}

// ---------------------------------------------------------------------------
// GET /forms/{slug}
// ---------------------------------------------------------------------------

pub async fn get_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ReviewForm>>> {
    let draft = load_form_draft(&state.pool, &slug).await?;
    Ok(Json(DataResponse {
        data: ReviewForm::from_draft(draft),
    }))
}

// ---------------------------------------------------------------------------
// POST /forms/{slug}/customer-details
// ---------------------------------------------------------------------------

/// Check a customer's details against the space's requirement flags.
pub async fn check_customer_details(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CustomerDetails>,
) -> AppResult<Json<DataResponse<AcceptedDetails>>> {
    let draft = load_form_draft(&state.pool, &slug).await?;
    let details = submission::check_customer_details(&draft.user_information, body)
        .map_err(|fields| AppError::Core(CoreError::InvalidFields(fields)))?;

    tracing::debug!(slug = %slug, "Customer details accepted");
    Ok(Json(DataResponse {
        data: AcceptedDetails {
            details,
            review_kind: submission::review_kind(&draft.testimonial_type),
        },
    }))
}
