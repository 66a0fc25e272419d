use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::ProgramService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: programs_db::DbPool,
    /// Server configuration (upload limits are read by handlers).
    pub config: Arc<ServerConfig>,
    /// Program enrollment, listing and gallery operations.
    pub programs: Arc<ProgramService>,
}
