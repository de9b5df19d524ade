use crate::space_validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    /// Field-level validation failures for a section or request body.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Slug '{0}' is already taken")]
    DuplicateSlug(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
