//! S3 (and S3-compatible) object storage provider.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::key::{object_key, public_url};
use crate::{ObjectStorage, StorageError, UploadFile};

/// Uploads objects to a single bucket with `PutObject`.
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    /// Build a client from the AWS provider chain.
    ///
    /// `endpoint_url` switches to path-style addressing for S3-compatible
    /// services (MinIO, LocalStack). Without `public_base_url`, URLs use the
    /// virtual-hosted bucket address for the resolved region.
    pub async fn connect(
        bucket: &str,
        endpoint_url: Option<&str>,
        public_base_url: Option<&str>,
    ) -> Result<Self, StorageError> {
        let sdk_config = aws_config::load_from_env().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());

        let public_base_url = match (public_base_url, endpoint_url) {
            (Some(base), _) => base.to_string(),
            (None, Some(endpoint)) => public_url(endpoint, bucket),
            (None, None) => {
                let region = sdk_config.region().ok_or_else(|| {
                    StorageError::Config(
                        "AWS region is not configured and S3_PUBLIC_BASE_URL is unset".into(),
                    )
                })?;
                format!("https://{bucket}.s3.{region}.amazonaws.com")
            }
        };

        Ok(Self::with_client(client, bucket.to_string(), public_base_url))
    }

    pub fn with_client(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(&self, file: UploadFile, category: &str) -> Result<String, StorageError> {
        let key = object_key(category, file.extension)?;
        let size = file.size();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(file.content_type)
            .body(ByteStream::from(file.bytes))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    bucket = %self.bucket,
                    key = %key,
                    error = %DisplayErrorContext(&e),
                    "S3 upload failed",
                );
                StorageError::Upload(format!("PutObject {key}: {e}"))
            })?;

        tracing::debug!(bucket = %self.bucket, key = %key, bytes = size, "Uploaded object to S3");
        Ok(public_url(&self.public_base_url, &key))
    }

    fn provider(&self) -> &'static str {
        "s3"
    }
}
