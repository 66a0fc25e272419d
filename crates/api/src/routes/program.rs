//! Route definitions for the `/programs` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::program;
use crate::state::AppState;

/// Routes mounted at `/programs`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> enroll
/// GET    /{id}             -> get_by_id
/// GET    /{id}/date        -> available_date
/// GET    /{id}/chat-link   -> chat_link
/// POST   /{id}/images      -> add_images
/// PUT    /{id}/details     -> update_details
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(program::list).post(program::enroll))
        .route("/{id}", get(program::get_by_id))
        .route("/{id}/date", get(program::available_date))
        .route("/{id}/chat-link", get(program::chat_link))
        .route("/{id}/images", post(program::add_images))
        .route("/{id}/details", put(program::update_details))
}
