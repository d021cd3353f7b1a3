//! Request authorizer.

use tracing::{debug, info};

use super::certificate::{normalize_subject, subject_from_pem};
use super::types::{AuthDecision, AuthorizerRequest};
use crate::error::AuthorizerError;

/// Derive the caller's identity from its client certificate and allow the invoked method.
///
/// Any certificate problem is returned as an error; no deny policy is ever built.
pub fn authorize(request: &AuthorizerRequest) -> Result<AuthDecision, AuthorizerError> {
    debug!(event = ?request, "Authorizer request");

    let client_cert = request
        .request_context
        .identity
        .client_cert
        .as_ref()
        .ok_or(AuthorizerError::MissingClientCertificate)?;

    info!(
        method_arn = %request.method_arn,
        gateway_subject = ?client_cert.subject_dn,
        serial = ?client_cert.serial_number,
        "Authorizing client certificate"
    );

    let subject = subject_from_pem(&client_cert.client_cert_pem)?;
    let client_cert_sub = normalize_subject(&subject);

    let decision = AuthDecision::allow(client_cert_sub, &request.method_arn);

    info!(
        principal_id = %decision.principal_id,
        resource = %request.method_arn,
        "Authorizer response"
    );
    if let Ok(json) = serde_json::to_string_pretty(&decision) {
        debug!(response = %json, "Authorizer response body");
    }

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorizer::certificate::fixtures::{CLIENT_CERT_PEM, CLIENT_CERT_SUBJECT};
    use crate::authorizer::types::{ClientCert, Effect, RequestContext, RequestIdentity};

    const METHOD_ARN: &str = "arn:aws:execute-api:us-east-1:123456789012:abc123/prod/GET/pets";

    fn request_with_pem(pem: &str) -> AuthorizerRequest {
        AuthorizerRequest {
            method_arn: METHOD_ARN.to_string(),
            request_context: RequestContext {
                identity: RequestIdentity {
                    client_cert: Some(ClientCert {
                        client_cert_pem: pem.to_string(),
                        subject_dn: None,
                        issuer_dn: None,
                        serial_number: None,
                        validity: None,
                    }),
                    source_ip: None,
                },
            },
        }
    }

    #[test]
    fn test_principal_is_normalized_subject() {
        let decision = authorize(&request_with_pem(CLIENT_CERT_PEM)).unwrap();

        assert_eq!(decision.principal_id, CLIENT_CERT_SUBJECT);
        assert_eq!(decision.context.client_cert_sub, decision.principal_id);
        assert!(!decision.principal_id.contains('\n'));
    }

    #[test]
    fn test_policy_scoped_to_method_arn() {
        let decision = authorize(&request_with_pem(CLIENT_CERT_PEM)).unwrap();

        let statements = &decision.policy_document.statement;
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].resource, METHOD_ARN);
        assert_eq!(statements[0].effect, Effect::Allow);
        assert_eq!(statements[0].action, "execute-api:Invoke");
        assert_eq!(decision.policy_document.version, "2012-10-17");
    }

    #[test]
    fn test_repeated_requests_are_identical() {
        let request = request_with_pem(CLIENT_CERT_PEM);
        assert_eq!(authorize(&request).unwrap(), authorize(&request).unwrap());
    }

    #[test]
    fn test_malformed_pem_fails() {
        let result = authorize(&request_with_pem("-----BEGIN CERTIFICATE-----\ngarbage"));
        assert!(matches!(
            result,
            Err(AuthorizerError::CertificateParse { .. })
        ));
    }

    #[test]
    fn test_missing_client_cert_fails() {
        let mut request = request_with_pem(CLIENT_CERT_PEM);
        request.request_context.identity.client_cert = None;

        assert!(matches!(
            authorize(&request),
            Err(AuthorizerError::MissingClientCertificate)
        ));
    }
}
