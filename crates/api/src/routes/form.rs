//! Route definitions for public review forms.
//!
//! Mounted at `/forms` by `api_routes()`.
//!
//! ```text
//! GET    /{slug}                     get_form
//! POST   /{slug}/customer-details    check_customer_details
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Review form routes, mounted at `/forms`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(form::get_form))
        .route("/{slug}/customer-details", post(form::check_customer_details))
}
