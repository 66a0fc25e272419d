//! Storage provider selection from environment variables.

use std::path::PathBuf;

use crate::StorageError;

/// Which object storage provider to use and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Write files under `root`; URLs are `{base_url}/{key}`.
    Local { root: PathBuf, base_url: String },
    /// Upload to an S3 bucket. Credentials and region come from the
    /// standard AWS provider chain.
    S3 {
        bucket: String,
        endpoint_url: Option<String>,
        public_base_url: Option<String>,
    },
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `STORAGE_BACKEND`        | `local`                          |
    /// | `LOCAL_STORAGE_ROOT`     | `storage`                        |
    /// | `LOCAL_STORAGE_BASE_URL` | `http://localhost:3000/storage`  |
    /// | `S3_BUCKET`              | required when backend is `s3`    |
    /// | `S3_ENDPOINT_URL`        | unset (AWS endpoint)             |
    /// | `S3_PUBLIC_BASE_URL`     | unset (virtual-hosted bucket URL)|
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StorageConfig::from_env`] but reading from an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = non_empty("STORAGE_BACKEND").unwrap_or_else(|| "local".into());
        match backend.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local {
                root: PathBuf::from(
                    non_empty("LOCAL_STORAGE_ROOT").unwrap_or_else(|| "storage".into()),
                ),
                base_url: non_empty("LOCAL_STORAGE_BASE_URL")
                    .unwrap_or_else(|| "http://localhost:3000/storage".into()),
            }),
            "s3" => {
                let bucket = non_empty("S3_BUCKET").ok_or_else(|| {
                    StorageError::Config("S3_BUCKET must be set when STORAGE_BACKEND=s3".into())
                })?;
                Ok(Self::S3 {
                    bucket,
                    endpoint_url: non_empty("S3_ENDPOINT_URL"),
                    public_base_url: non_empty("S3_PUBLIC_BASE_URL"),
                })
            }
            other => Err(StorageError::Config(format!(
                "Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3"
            ))),
        }
    }
}
