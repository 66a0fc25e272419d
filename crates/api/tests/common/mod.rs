#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use programs_api::config::ServerConfig;
use programs_api::router::build_app_router;
use programs_api::services::ProgramService;
use programs_api::state::AppState;
use programs_cloud::{ObjectStorage, StorageError, UploadFile};
use sqlx::PgPool;
use tower::ServiceExt;

/// Minimal PNG signature; enough for format sniffing.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Minimal JPEG signature.
pub const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";

/// Minimal GIF header.
pub const GIF: &[u8] = b"GIF89a\x01\0\x01\0\0\0\0;";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_image_bytes: 1024 * 1024,
        max_images_per_request: 5,
    }
}

// ---------------------------------------------------------------------------
// Object storage fakes
// ---------------------------------------------------------------------------

/// Records uploads in memory and returns sequential URLs.
#[derive(Default)]
pub struct MemoryStorage {
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
    /// Zero-based upload index that fails, if any.
    fail_at: Option<usize>,
}

impl MemoryStorage {
    pub fn failing_at(index: usize) -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_at: Some(index),
        }
    }

    /// URLs handed out so far, in upload order.
    pub fn urls(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, file: UploadFile, category: &str) -> Result<String, StorageError> {
        let mut uploads = self.uploads.lock().unwrap();
        if self.fail_at == Some(uploads.len()) {
            return Err(StorageError::Upload("simulated outage".into()));
        }
        let url = format!(
            "https://cdn.test/{category}/{}.{}",
            uploads.len(),
            file.extension
        );
        uploads.push((url.clone(), file.bytes));
        Ok(url)
    }

    fn provider(&self) -> &'static str {
        "memory"
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router backed by a fresh in-memory storage.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_storage(pool, Arc::new(MemoryStorage::default()))
}

/// Build the full application router with all middleware layers, using the
/// given database pool and object storage.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app_with_storage(pool: PgPool, storage: Arc<dyn ObjectStorage>) -> Router {
    let config = test_config();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        programs: Arc::new(ProgramService::new(pool, storage)),
    };
    build_app_router(state, &config, None)
}

/// Like [`build_test_app`], additionally serving `root` as local storage.
pub fn build_test_app_with_local_files(pool: PgPool, root: &Path) -> Router {
    let config = test_config();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        programs: Arc::new(ProgramService::new(pool, Arc::new(MemoryStorage::default()))),
    };
    build_app_router(state, &config, Some(root))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.finish()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart builder
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "programs-test-boundary";

/// Hand-rolled `multipart/form-data` body for tests.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Convenience: add a PNG under the `images` field.
    pub fn png(self, filename: &str) -> Self {
        self.file("images", filename, "image/png", PNG)
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// A complete enrollment form without images.
pub fn enrollment_form(program_name: &str) -> MultipartForm {
    MultipartForm::new()
        .text("host_email", "host@example.com")
        .text("host_name", "Jeju Host")
        .text("host_description", "Original host bio")
        .text("program_name", program_name)
        .text("road_name_address", "1 Seaside-ro, Jeju")
        .text("category", "outdoor")
        .text("description", "Original description")
        .text("start_date", "2026-05-01T09:00:00Z")
        .text("price", "15000")
        .text("chat_link", "https://chat.example.com/walk")
        .text("spend_time", "2 hours")
        .text("latitude", "33.45")
        .text("longitude", "126.56")
}

/// Enroll a program through the API and return its id.
pub async fn enroll(app: Router, form: MultipartForm) -> i64 {
    let response = post_multipart(app, "/api/v1/programs", form).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["program_id"]
        .as_i64()
        .unwrap()
}
