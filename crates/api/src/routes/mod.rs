pub mod form;
pub mod health;
pub mod space;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /palette                                  design palette (public)
///
/// /spaces                                   list, create
/// /spaces/slug-availability                 slug check (?slug)
/// /spaces/by-slug/{slug}                    get by slug
/// /spaces/{id}                              get, delete
/// /spaces/{id}/draft                        hydrated wizard draft
/// /spaces/{id}/sections                     save one section (PUT)
/// /spaces/{id}/wall-embed                   wall embed URL
///
/// /forms/{slug}                             review form (public)
/// /forms/{slug}/customer-details            requirement check (public, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/palette", get(handlers::palette::get_palette))
        .nest("/spaces", space::router())
        .nest("/forms", form::router())
}
