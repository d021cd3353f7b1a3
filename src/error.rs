//! Error types for the gateway functions.

use std::path::PathBuf;

/// Errors raised while authorizing a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizerError {
    /// The request context carried no client certificate.
    #[error("request carries no client certificate")]
    MissingClientCertificate,

    /// The presented PEM could not be decoded into an X.509 certificate.
    #[error("failed to parse client certificate: {reason}")]
    CertificateParse { reason: String },
}

impl AuthorizerError {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::CertificateParse {
            reason: reason.into(),
        }
    }
}

/// Errors raised while handling a custom-resource lifecycle event.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// RequestType outside Create/Update/Delete.
    #[error("unrecognized request type: {request_type}")]
    UnrecognizedRequestType { request_type: String },

    /// The bundled trust store could not be read.
    #[error("failed to read trust store {path:?}: {source}")]
    TrustStoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Put or delete against the object store failed.
    #[error("{operation} s3://{bucket}/{key} failed: {message}")]
    StorageOperation {
        operation: &'static str,
        bucket: String,
        key: String,
        message: String,
    },

    /// The completion report could not be serialised; nothing was sent.
    #[error("failed to encode completion report: {source}")]
    ReportEncoding {
        #[source]
        source: serde_json::Error,
    },

    /// The completion callback never got a response.
    #[error("completion callback to {url} failed: {message}")]
    CallbackTransport { url: String, message: String },
}
