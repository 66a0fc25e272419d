//! Object storage for program gallery images.
//!
//! [`ObjectStorage`] is the upload contract used by the program service:
//! hand it a file and a category label, get back a public URL. Two providers
//! are available: [`s3::S3Storage`] for S3 and S3-compatible services, and
//! [`local::LocalStorage`] which writes under a directory for development.

pub mod config;
pub mod key;
pub mod local;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use programs_core::image::ImageKind;

pub use config::StorageConfig;

/// Errors raised by object storage providers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The provider rejected or failed the upload.
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage misconfigured: {0}")]
    Config(String),
}

/// A file ready to be written to object storage.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub extension: &'static str,
}

impl UploadFile {
    /// Wrap validated image bytes.
    pub fn image(kind: ImageKind, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: kind.mime(),
            extension: kind.extension(),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Upload contract for object storage providers.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `file` under `category` and return its public URL.
    async fn upload(&self, file: UploadFile, category: &str) -> Result<String, StorageError>;

    /// Provider name for logs.
    fn provider(&self) -> &'static str;
}

/// Build the provider selected by `config`.
pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    let storage: Arc<dyn ObjectStorage> = match config {
        StorageConfig::Local { root, base_url } => {
            Arc::new(local::LocalStorage::new(root.clone(), base_url.clone()))
        }
        StorageConfig::S3 {
            bucket,
            endpoint_url,
            public_base_url,
        } => Arc::new(
            s3::S3Storage::connect(bucket, endpoint_url.as_deref(), public_base_url.as_deref())
                .await?,
        ),
    };
    tracing::info!(provider = storage.provider(), "Object storage ready");
    Ok(storage)
}
