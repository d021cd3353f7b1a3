//! Lambda functions for an mTLS-protected API Gateway.
//!
//! - [`authorizer`]: derives a principal from the client certificate subject and
//!   returns an allow policy for the invoked method.
//! - [`provisioner`]: CloudFormation custom resource that uploads or deletes the
//!   trust-store object and reports completion.

pub mod authorizer;
pub mod error;
pub mod provisioner;
pub mod telemetry;

pub use error::{AuthorizerError, ProvisionError};
