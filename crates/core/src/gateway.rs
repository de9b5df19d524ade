//! Persistence gateway consumed by the space wizard.
//!
//! The wizard never talks to storage directly. It hands whole drafts (create
//! flow) or single sections (edit flow) to a [`PersistenceGateway`], which
//! owns slug uniqueness and durable storage. Implementations live in the
//! database crate (direct PostgreSQL) and the client crate (HTTP).

use async_trait::async_trait;

use crate::error::CoreError;
use crate::space_draft::{SectionValue, SpaceDraft};
use crate::space_record::{CreatedSpace, SpaceRecord};
use crate::space_validation::FieldErrors;
use crate::types::DbId;

/// Failures a gateway call can report. None of them is fatal; all leave the
/// caller's draft untouched so the step can be retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The gateway rejected the payload's shape or identity fields.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The requested slug belongs to another space.
    #[error("Slug '{0}' is already taken")]
    DuplicateSlug(String),

    /// The space no longer exists (or is not visible to the caller).
    #[error("Space not found: {0}")]
    NotFound(String),

    /// The gateway refused the request for a reason a retry cannot fix,
    /// such as missing credentials or a conflicting state.
    #[error("Request rejected ({status} {code})")]
    Rejected { status: u16, code: String },

    /// The gateway was unreachable or answered with an unexpected status.
    #[error("Network error: {0}")]
    Network(String),
}

impl GatewayError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidFields(fields) => Self::Validation(fields),
            CoreError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            CoreError::NotFound { key, .. } => Self::NotFound(key),
            CoreError::Unauthorized(_) => Self::Rejected {
                status: 401,
                code: "UNAUTHORIZED".to_string(),
            },
        }
    }
}

/// Creates and updates space records on behalf of the wizard.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Persist a complete draft as a new space.
    async fn create(&self, draft: &SpaceDraft) -> Result<CreatedSpace, GatewayError>;

    /// Upsert a single section of an existing space, returning the section
    /// as stored. Sections not carried by `value` are never modified.
    async fn update(&self, id: DbId, value: &SectionValue) -> Result<SectionValue, GatewayError>;

    /// Load the record an edit session reconciles from.
    async fn fetch(&self, slug: &str) -> Result<SpaceRecord, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space_validation::FieldError;

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(GatewayError::Network("timeout".into()).is_retryable());
        assert!(!GatewayError::DuplicateSlug("acme".into()).is_retryable());
        assert!(!GatewayError::NotFound("7".into()).is_retryable());
        assert!(!GatewayError::Validation(vec![]).is_retryable());
        assert!(!GatewayError::Rejected {
            status: 401,
            code: "UNAUTHORIZED".into()
        }
        .is_retryable());
    }

    #[test]
    fn core_errors_convert_to_gateway_taxonomy() {
        let field = FieldError {
            field: "project_slug".into(),
            code: "slug".into(),
            message: "bad".into(),
        };
        assert_eq!(
            GatewayError::from(CoreError::InvalidFields(vec![field.clone()])),
            GatewayError::Validation(vec![field])
        );
        assert_eq!(
            GatewayError::from(CoreError::DuplicateSlug("acme".into())),
            GatewayError::DuplicateSlug("acme".into())
        );
        assert_eq!(
            GatewayError::from(CoreError::NotFound {
                entity: "Space",
                key: "7".into()
            }),
            GatewayError::NotFound("7".into())
        );
        assert_eq!(
            GatewayError::from(CoreError::Unauthorized("expired".into())),
            GatewayError::Rejected {
                status: 401,
                code: "UNAUTHORIZED".into()
            }
        );
    }
}
