//! Authorizer request and response shapes.

use serde::{Deserialize, Serialize};

/// IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Action granted by every decision.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Inbound authorizer event from API Gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    /// ARN of the method being invoked.
    pub method_arn: String,
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub identity: RequestIdentity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdentity {
    #[serde(default)]
    pub client_cert: Option<ClientCert>,
    #[serde(default)]
    pub source_ip: Option<String>,
}

/// Client certificate as forwarded by the TLS-terminating gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCert {
    /// PEM-encoded certificate.
    pub client_cert_pem: String,
    /// Gateway's own rendering of the subject (diagnostics only).
    #[serde(default, rename = "subjectDN")]
    pub subject_dn: Option<String>,
    #[serde(default, rename = "issuerDN")]
    pub issuer_dn: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub validity: Option<CertValidity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertValidity {
    pub not_before: String,
    pub not_after: String,
}

/// Decision returned to API Gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDecision {
    pub principal_id: String,
    pub context: DecisionContext,
    pub policy_document: PolicyDocument,
}

/// Context map handed to the backend integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionContext {
    pub client_cert_sub: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}

/// Policy effect. Only allow decisions are ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
}

impl AuthDecision {
    /// Allow `subject` to invoke exactly `method_arn`.
    pub fn allow(subject: String, method_arn: &str) -> Self {
        Self {
            principal_id: subject.clone(),
            context: DecisionContext {
                client_cert_sub: subject,
            },
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![PolicyStatement {
                    action: INVOKE_ACTION.to_string(),
                    effect: Effect::Allow,
                    resource: method_arn.to_string(),
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decision_wire_shape() {
        let decision = AuthDecision::allow(
            "C=US,CN=client".to_string(),
            "arn:aws:execute-api:us-east-1:123456789012:abc123/prod/GET/items",
        );

        let value = serde_json::to_value(&decision).unwrap();
        assert_eq!(
            value,
            json!({
                "principalId": "C=US,CN=client",
                "context": { "clientCertSub": "C=US,CN=client" },
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Action": "execute-api:Invoke",
                        "Effect": "allow",
                        "Resource": "arn:aws:execute-api:us-east-1:123456789012:abc123/prod/GET/items"
                    }]
                }
            })
        );
    }

    #[test]
    fn test_request_parsing() {
        let event = json!({
            "type": "REQUEST",
            "methodArn": "arn:aws:execute-api:eu-west-1:111122223333:api/v1/POST/orders",
            "requestContext": {
                "identity": {
                    "sourceIp": "203.0.113.7",
                    "clientCert": {
                        "clientCertPem": "-----BEGIN CERTIFICATE-----\n...",
                        "subjectDN": "CN=client",
                        "issuerDN": "CN=ca",
                        "serialNumber": "01",
                        "validity": {
                            "notBefore": "May 28 12:30:02 2019 GMT",
                            "notAfter": "Aug  5 09:36:04 2021 GMT"
                        }
                    }
                }
            }
        });

        let request: AuthorizerRequest = serde_json::from_value(event).unwrap();
        let cert = request.request_context.identity.client_cert.unwrap();
        assert_eq!(cert.subject_dn.as_deref(), Some("CN=client"));
        assert_eq!(cert.issuer_dn.as_deref(), Some("CN=ca"));
        assert!(cert.client_cert_pem.starts_with("-----BEGIN CERTIFICATE-----"));
    }

    #[test]
    fn test_request_without_client_cert() {
        let event = json!({
            "methodArn": "arn:aws:execute-api:eu-west-1:111122223333:api/v1/GET/",
            "requestContext": { "identity": {} }
        });

        let request: AuthorizerRequest = serde_json::from_value(event).unwrap();
        assert!(request.request_context.identity.client_cert.is_none());
    }
}
