//! Filesystem-backed object storage for development and tests.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::key::{object_key, public_url};
use crate::{ObjectStorage, StorageError, UploadFile};

/// Writes objects under `root/{key}`.
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    pub fn new(root: PathBuf, base_url: String) -> Self {
        Self { root, base_url }
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(&self, file: UploadFile, category: &str) -> Result<String, StorageError> {
        let key = object_key(category, file.extension)?;
        let path = self.root.join(&key);

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&path, &file.bytes).await?;

        tracing::debug!(key = %key, bytes = file.size(), "Stored object on local filesystem");
        Ok(public_url(&self.base_url, &key))
    }

    fn provider(&self) -> &'static str {
        "local"
    }
}
