//! Object storage for the trust-store artifact.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use crate::error::ProvisionError;

/// Object store the provisioner writes the trust store into.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` at `bucket/key`, replacing any existing object.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ProvisionError>;

    /// Remove `bucket/key`. Succeeds when the object is already absent.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ProvisionError>;
}

/// S3-backed [`ObjectStore`].
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration (Lambda role credentials).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ProvisionError> {
        debug!(bucket = %bucket, key = %key, size = body.len(), "Putting object");

        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ProvisionError::StorageOperation {
                operation: "put",
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!(
            bucket = %bucket,
            key = %key,
            e_tag = ?output.e_tag(),
            version_id = ?output.version_id(),
            "Object put"
        );
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ProvisionError> {
        debug!(bucket = %bucket, key = %key, "Deleting object");

        let output = self
            .client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ProvisionError::StorageOperation {
                operation: "delete",
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!(
            bucket = %bucket,
            key = %key,
            delete_marker = ?output.delete_marker(),
            version_id = ?output.version_id(),
            "Object deleted"
        );
        Ok(())
    }
}
