//! CloudFormation custom-resource event and response shapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProvisionError;

/// Lifecycle event delivered by CloudFormation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisioningEvent {
    /// Raw request type; see [`ProvisioningEvent::request_type`].
    pub request_type: String,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub service_token: Option<String>,
    pub resource_properties: ResourceProperties,
}

/// Target of the trust-store object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceProperties {
    pub bucket_name: String,
    pub object_key: String,
}

impl ProvisioningEvent {
    /// Parse the raw request type into a [`RequestType`].
    pub fn request_type(&self) -> Result<RequestType, ProvisionError> {
        self.request_type.parse()
    }
}

/// Custom-resource lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl FromStr for RequestType {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(RequestType::Create),
            "Update" => Ok(RequestType::Update),
            "Delete" => Ok(RequestType::Delete),
            other => Err(ProvisionError::UnrecognizedRequestType {
                request_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestType::Create => write!(f, "Create"),
            RequestType::Update => write!(f, "Update"),
            RequestType::Delete => write!(f, "Delete"),
        }
    }
}

/// Outcome reported to CloudFormation.
///
/// Failures are never reported: the handler errors out before the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
}

/// Body of the completion callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompletionReport {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
}

impl CompletionReport {
    /// Successful report for `event`.
    ///
    /// The physical resource id falls back to the function's log stream when the
    /// event carries none (first Create).
    pub fn success(event: &ProvisioningEvent, log_stream: &str) -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: format!("See the details in CloudWatch Logs: {log_stream}"),
            physical_resource_id: event
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| log_stream.to_string()),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
        }
    }

    /// JSON body for the callback request.
    pub fn to_json(&self) -> Result<String, ProvisionError> {
        serde_json::to_string(self).map_err(|source| ProvisionError::ReportEncoding { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_event() -> ProvisioningEvent {
        serde_json::from_value(json!({
            "RequestType": "Create",
            "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:upload-truststore",
            "ResponseURL": "https://cloudformation-custom-resource-response.s3.amazonaws.com/abc",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/mtls/guid",
            "RequestId": "unique-request-id",
            "LogicalResourceId": "TrustStoreObject",
            "ResourceType": "Custom::TrustStore",
            "ResourceProperties": {
                "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:upload-truststore",
                "BucketName": "mtls-truststore",
                "ObjectKey": "truststore.pem"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_event_parsing() {
        let event = create_event();
        assert_eq!(event.request_type().unwrap(), RequestType::Create);
        assert_eq!(event.resource_properties.bucket_name, "mtls-truststore");
        assert_eq!(event.resource_properties.object_key, "truststore.pem");
        assert!(event.physical_resource_id.is_none());
    }

    #[test]
    fn test_request_type_parsing() {
        assert_eq!("Update".parse::<RequestType>().unwrap(), RequestType::Update);
        assert_eq!("Delete".parse::<RequestType>().unwrap(), RequestType::Delete);

        let err = "Patch".parse::<RequestType>().unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::UnrecognizedRequestType { ref request_type } if request_type == "Patch"
        ));
        // Case-sensitive like the CloudFormation contract
        assert!("create".parse::<RequestType>().is_err());
    }

    #[test]
    fn test_report_uses_log_stream_fallback() {
        let report = CompletionReport::success(&create_event(), "2026/10/18/[$LATEST]abcdef");
        assert_eq!(report.physical_resource_id, "2026/10/18/[$LATEST]abcdef");
        assert_eq!(report.status, ResponseStatus::Success);
    }

    #[test]
    fn test_report_keeps_event_physical_id() {
        let mut event = create_event();
        event.physical_resource_id = Some("existing-id".to_string());

        let report = CompletionReport::success(&event, "stream");
        assert_eq!(report.physical_resource_id, "existing-id");
        assert_eq!(report.stack_id, event.stack_id);
        assert_eq!(report.request_id, event.request_id);
        assert_eq!(report.logical_resource_id, event.logical_resource_id);
    }

    #[test]
    fn test_status_only_success_on_the_wire() {
        assert_eq!(serde_json::to_value(ResponseStatus::Success).unwrap(), "SUCCESS");
        assert!(serde_json::from_str::<ResponseStatus>(r#""FAILED""#).is_err());
    }

    #[test]
    fn test_report_to_json() {
        let report = CompletionReport::success(&create_event(), "stream");
        let body = report.to_json().unwrap();
        let parsed: CompletionReport = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_report_wire_shape() {
        let report = CompletionReport::success(&create_event(), "stream");
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["Status"], "SUCCESS");
        assert_eq!(value["PhysicalResourceId"], "stream");
        assert_eq!(value["LogicalResourceId"], "TrustStoreObject");
        assert_eq!(value["RequestId"], "unique-request-id");
        assert!(value["Reason"].as_str().unwrap().contains("CloudWatch Logs"));
    }
}
