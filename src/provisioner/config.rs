//! Provisioner configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Trust-store provisioner settings, fixed for the lifetime of the function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisionerConfig {
    /// Trust-store file bundled with the deployment.
    /// Default: truststore.pem
    #[serde(default = "default_truststore_path")]
    pub truststore_path: PathBuf,

    /// Timeout for the completion callback request.
    #[serde(default = "default_callback_timeout_secs")]
    pub callback_timeout_secs: u64,
}

fn default_truststore_path() -> PathBuf {
    PathBuf::from("truststore.pem")
}

fn default_callback_timeout_secs() -> u64 {
    10
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            truststore_path: default_truststore_path(),
            callback_timeout_secs: default_callback_timeout_secs(),
        }
    }
}

impl ProvisionerConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.callback_timeout_secs == 0 {
            return Err("callback timeout must be at least one second".to_string());
        }

        // Delete events never read the file, so a missing trust store is not fatal here
        if !self.truststore_path.exists() {
            tracing::warn!(
                path = ?self.truststore_path,
                "Trust store file not found; Create and Update events will fail"
            );
        }

        Ok(())
    }
}
