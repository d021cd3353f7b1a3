//! mTLS request authorizer.
//!
//! Turns the client certificate forwarded by API Gateway into a principal
//! and a single-statement allow policy for the invoked method.

pub mod certificate;
pub mod handler;
pub mod types;

pub use certificate::{normalize_subject, subject_from_pem};
pub use handler::authorize;
pub use types::{AuthDecision, AuthorizerRequest, ClientCert, Effect, PolicyDocument};
