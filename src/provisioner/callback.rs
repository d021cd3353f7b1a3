//! Completion callback to CloudFormation.

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, error, info};

use super::types::CompletionReport;
use crate::error::ProvisionError;

/// Sends completion reports to the pre-signed response URL.
pub struct CallbackClient {
    http_client: reqwest::Client,
}

impl CallbackClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }

    /// PUT `report` to `url`. One attempt, no retry.
    ///
    /// The response status is logged but not interpreted; only transport failures
    /// are errors.
    pub async fn send(&self, url: &str, report: &CompletionReport) -> Result<(), ProvisionError> {
        let body = report.to_json()?;

        debug!(url = %url, body = %body, "Sending completion report");

        // The pre-signed URL is signed without a content type
        let response = self
            .http_client
            .put(url)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send completion report");
                ProvisionError::CallbackTransport {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            })?;

        info!(
            status = %response.status(),
            headers = ?response.headers(),
            "Completion report sent"
        );

        Ok(())
    }
}
