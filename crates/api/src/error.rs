use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use viewus_core::error::CoreError;
use viewus_core::gateway::GatewayError;
use viewus_core::space_validation::FieldErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `viewus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(fields) => AppError::Core(CoreError::InvalidFields(fields)),
            GatewayError::DuplicateSlug(slug) => AppError::Core(CoreError::DuplicateSlug(slug)),
            GatewayError::NotFound(key) => AppError::Core(CoreError::NotFound {
                entity: "Space",
                key,
            }),
            GatewayError::Rejected { status, code } => {
                AppError::InternalError(format!("Gateway rejected request ({status} {code})"))
            }
            GatewayError::Network(msg) => AppError::InternalError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Option<&FieldErrors> = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::InvalidFields(fields) => {
                    details = Some(fields);
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                }
                CoreError::DuplicateSlug(_) => {
                    (StatusCode::CONFLICT, "DUPLICATE_SLUG", core.to_string())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = match details {
            Some(fields) => json!({
                "error": message,
                "code": code,
                "details": fields,
            }),
            None => json!({
                "error": message,
                "code": code,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - A unique violation on the slug constraint maps to 409 `DUPLICATE_SLUG`.
/// - Other unique violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == viewus_db::SPACES_SLUG_CONSTRAINT {
                    return (
                        StatusCode::CONFLICT,
                        "DUPLICATE_SLUG",
                        "Slug is already taken".to_string(),
                    );
                }
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn core_errors_map_to_statuses() {
        assert_eq!(
            status_of(CoreError::NotFound {
                entity: "Space",
                key: "7".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(CoreError::InvalidFields(vec![])), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CoreError::DuplicateSlug("acme".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_of(CoreError::Unauthorized("expired".into())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn gateway_errors_map_to_statuses() {
        assert_eq!(status_of(GatewayError::Validation(vec![])), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(GatewayError::DuplicateSlug("acme".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(GatewayError::NotFound("acme".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(GatewayError::Rejected {
                status: 401,
                code: "UNAUTHORIZED".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(GatewayError::Network("reset".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
