use programs_core::image::DEFAULT_MAX_IMAGE_BYTES;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Per-image upload limit in bytes (default: 10 MiB).
    pub max_image_bytes: usize,
    /// Maximum number of images accepted in one request (default: `10`).
    pub max_images_per_request: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                       |
    /// | `MAX_IMAGE_BYTES`        | `10485760`                 |
    /// | `MAX_IMAGES_PER_REQUEST` | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_image_bytes: usize = std::env::var("MAX_IMAGE_BYTES")
            .map(|v| v.parse().expect("MAX_IMAGE_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_IMAGE_BYTES);

        let max_images_per_request: usize = std::env::var("MAX_IMAGES_PER_REQUEST")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("MAX_IMAGES_PER_REQUEST must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_image_bytes,
            max_images_per_request,
        }
    }

    /// Request body limit for multipart uploads: every image at its maximum
    /// size plus 1 MiB for the text fields and multipart framing.
    pub fn max_body_bytes(&self) -> usize {
        self.max_image_bytes
            .saturating_mul(self.max_images_per_request)
            .saturating_add(1024 * 1024)
    }
}
