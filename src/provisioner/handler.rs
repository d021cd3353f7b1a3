//! Custom-resource handler for the trust-store object.

use std::path::PathBuf;
use tracing::info;

use super::callback::CallbackClient;
use super::config::ProvisionerConfig;
use super::store::ObjectStore;
use super::types::{CompletionReport, ProvisioningEvent, RequestType};
use crate::error::ProvisionError;

/// Uploads or removes the trust store, then reports completion.
pub struct Provisioner<S> {
    store: S,
    callback: CallbackClient,
    truststore_path: PathBuf,
}

impl<S: ObjectStore> Provisioner<S> {
    pub fn new(config: &ProvisionerConfig, store: S, callback: CallbackClient) -> Self {
        Self {
            store,
            callback,
            truststore_path: config.truststore_path.clone(),
        }
    }

    /// Handle one lifecycle event.
    ///
    /// `log_stream` is the physical resource id used when the event has none.
    /// An unrecognized request type fails before any storage call, and a storage
    /// failure aborts before the callback, so either way nothing is reported.
    pub async fn handle(
        &self,
        event: &ProvisioningEvent,
        log_stream: &str,
    ) -> Result<CompletionReport, ProvisionError> {
        info!(
            request_type = %event.request_type,
            stack_id = %event.stack_id,
            request_id = %event.request_id,
            logical_resource_id = %event.logical_resource_id,
            "Custom resource event received"
        );

        let bucket = &event.resource_properties.bucket_name;
        let key = &event.resource_properties.object_key;

        match event.request_type()? {
            RequestType::Create | RequestType::Update => {
                let truststore = self.read_truststore()?;
                info!(bucket = %bucket, key = %key, size = truststore.len(), "Uploading trust store");
                self.store.put_object(bucket, key, truststore).await?;
            }
            RequestType::Delete => {
                info!(bucket = %bucket, key = %key, "Deleting trust store");
                self.store.delete_object(bucket, key).await?;
            }
        }

        let report = CompletionReport::success(event, log_stream);
        self.callback.send(&event.response_url, &report).await?;

        Ok(report)
    }

    fn read_truststore(&self) -> Result<Vec<u8>, ProvisionError> {
        std::fs::read(&self.truststore_path).map_err(|source| ProvisionError::TrustStoreRead {
            path: self.truststore_path.clone(),
            source,
        })
    }
}
