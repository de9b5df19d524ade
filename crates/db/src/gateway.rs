//! [`PersistenceGateway`] backed directly by PostgreSQL.
//!
//! Used by server-side callers (the API's create handler, tests) that hold
//! a pool. All access is scoped to one owner: spaces of other owners behave
//! as if they did not exist.

use async_trait::async_trait;
use viewus_core::gateway::{GatewayError, PersistenceGateway};
use viewus_core::reconcile::{self, section_from_details};
use viewus_core::space_draft::{Section, SectionValue, SpaceDraft};
use viewus_core::space_record::{CreatedSpace, SpaceDetails, SpaceRecord};
use viewus_core::space_validation::{self, FieldError};
use viewus_core::types::DbId;

use crate::repositories::SpaceRepo;
use crate::{is_unique_violation, DbPool, SPACES_SLUG_CONSTRAINT};

/// Map a database failure onto the gateway taxonomy.
fn db_error(err: sqlx::Error, slug: &str) -> GatewayError {
    if is_unique_violation(&err, SPACES_SLUG_CONSTRAINT) {
        return GatewayError::DuplicateSlug(slug.to_string());
    }
    tracing::error!(error = %err, "Space persistence failed");
    GatewayError::Network(err.to_string())
}

/// Error returned when an update targets the identity section.
pub fn identity_read_only() -> GatewayError {
    GatewayError::Validation(vec![FieldError {
        field: "section".to_string(),
        code: "read_only".to_string(),
        message: "Project name and slug cannot be changed after creation".to_string(),
    }])
}

pub struct PgSpaceGateway {
    pool: DbPool,
    owner_id: DbId,
}

impl PgSpaceGateway {
    pub fn new(pool: DbPool, owner_id: DbId) -> Self {
        Self { pool, owner_id }
    }

    async fn owned_record(&self, id: DbId) -> Result<SpaceRecord, GatewayError> {
        SpaceRepo::find_record_by_id(&self.pool, id)
            .await
            .map_err(|e| db_error(e, ""))?
            .filter(|r| r.owner_id == self.owner_id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl PersistenceGateway for PgSpaceGateway {
    async fn create(&self, draft: &SpaceDraft) -> Result<CreatedSpace, GatewayError> {
        let draft =
            space_validation::validate_draft(draft.clone()).map_err(GatewayError::Validation)?;
        let identity = &draft.project_details;
        let details = reconcile::details_from_draft(&draft);

        let space = SpaceRepo::create(
            &self.pool,
            self.owner_id,
            &identity.project_name,
            &identity.project_slug,
            &details,
        )
        .await
        .map_err(|e| db_error(e, &identity.project_slug))?;

        tracing::info!(
            space_id = space.id,
            owner_id = self.owner_id,
            slug = %space.slug,
            "Space created"
        );
        Ok(CreatedSpace {
            id: space.id,
            slug: space.slug,
        })
    }

    async fn update(&self, id: DbId, value: &SectionValue) -> Result<SectionValue, GatewayError> {
        let section = value.section();
        if section == Section::ProjectDetails {
            return Err(identity_read_only());
        }
        let value =
            space_validation::validate_section(value.clone()).map_err(GatewayError::Validation)?;
        let record = self.owned_record(id).await?;

        let row = SpaceRepo::upsert_section(&self.pool, record.id, &value)
            .await
            .map_err(|e| db_error(e, &record.slug))?
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;

        tracing::info!(space_id = id, section = %section, "Space section saved");
        Ok(section_from_details(&SpaceDetails::from(row), section))
    }

    async fn fetch(&self, slug: &str) -> Result<SpaceRecord, GatewayError> {
        SpaceRepo::find_record_by_slug(&self.pool, slug)
            .await
            .map_err(|e| db_error(e, slug))?
            .filter(|r| r.owner_id == self.owner_id)
            .ok_or_else(|| GatewayError::NotFound(slug.to_string()))
    }
}
