//! Application router: API routes, health, local storage files and the
//! shared middleware stack.
//!
//! `main.rs` and the integration tests both build the app through
//! [`build_app_router`].

use std::path::Path;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Path under which the local storage backend's files are served.
pub const LOCAL_STORAGE_PATH: &str = "/storage";

/// Build the complete application.
///
/// ```text
/// /health           service and database health
/// /api/v1/...       program and system routes, multipart body limit
/// /storage/...      uploaded files (local storage backend only)
/// ```
///
/// `local_storage_root` is the local backend's root directory, or `None`
/// when uploads go to a remote provider. Served files pass through the same
/// layers as API routes.
pub fn build_app_router(
    state: AppState,
    config: &ServerConfig,
    local_storage_root: Option<&Path>,
) -> Router {
    let mut app = Router::new()
        .merge(routes::system::root_router())
        .nest(
            "/api/v1",
            routes::api_routes().layer(DefaultBodyLimit::max(config.max_body_bytes())),
        );

    if let Some(root) = local_storage_root {
        app = app.nest_service(LOCAL_STORAGE_PATH, local_files(root));
    }

    with_middleware(app, config).with_state(state)
}

/// Static file service for the local storage root.
fn local_files(root: &Path) -> ServeDir {
    tracing::info!(root = %root.display(), path = LOCAL_STORAGE_PATH, "Serving local storage");
    ServeDir::new(root)
}

/// Wrap `app` in the request-handling layers, outermost last.
fn with_middleware(app: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    app.layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// CORS for the configured front-end origins.
///
/// The API is anonymous, so only `Content-Type` is allowed as a request
/// header and credentials are not forwarded. Panics on an unparsable origin.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
