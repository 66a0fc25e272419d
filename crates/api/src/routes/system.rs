//! Health and test routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::system;
use crate::state::AppState;

/// Routes mounted at `/api/v1/test`.
///
/// ```text
/// GET    /        -> ping
/// POST   /init    -> init_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(system::ping))
        .route("/init", post(system::init_data))
}

/// Routes mounted at the root, outside `/api/v1`.
///
/// ```text
/// GET    /health  -> health
/// ```
pub fn root_router() -> Router<AppState> {
    Router::new().route("/health", get(system::health))
}
