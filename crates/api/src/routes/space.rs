//! Route definitions for spaces.
//!
//! Mounted at `/spaces` by `api_routes()`.
//!
//! ```text
//! POST   /                      create_space
//! GET    /                      list_spaces (?limit, offset)
//! GET    /slug-availability     slug_availability (?slug)
//! GET    /by-slug/{slug}        get_space_by_slug
//! GET    /{id}                  get_space
//! DELETE /{id}                  delete_space
//! GET    /{id}/draft            get_draft
//! PUT    /{id}/sections         update_section
//! GET    /{id}/wall-embed       wall_embed (?layout, columns, height)
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::space;
use crate::state::AppState;

/// Space routes, mounted at `/spaces`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(space::list_spaces).post(space::create_space))
        .route("/slug-availability", get(space::slug_availability))
        .route("/by-slug/{slug}", get(space::get_space_by_slug))
        .route("/{id}", get(space::get_space).delete(space::delete_space))
        .route("/{id}/draft", get(space::get_draft))
        .route("/{id}/sections", put(space::update_section))
        .route("/{id}/wall-embed", get(space::wall_embed))
}
