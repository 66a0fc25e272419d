pub mod program;
pub mod system;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /test                                  ping
/// /test/init                             seed demo data (POST)
///
/// /programs                              list, enroll (multipart)
/// /programs/{id}                         detail
/// /programs/{id}/date                    available date
/// /programs/{id}/chat-link               chat invite link
/// /programs/{id}/images                  add images (multipart POST)
/// /programs/{id}/details                 update details (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/test", system::router())
        .nest("/programs", program::router())
}
