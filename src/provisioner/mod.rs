//! Trust-store provisioner.
//!
//! CloudFormation custom resource that keeps the mTLS trust store object in S3
//! in step with the stack, reporting back through the pre-signed response URL.

pub mod callback;
pub mod config;
pub mod handler;
pub mod store;
pub mod types;

pub use callback::CallbackClient;
pub use config::ProvisionerConfig;
pub use handler::Provisioner;
pub use store::{ObjectStore, S3ObjectStore};
pub use types::{
    CompletionReport, ProvisioningEvent, RequestType, ResourceProperties, ResponseStatus,
};
