// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Tag record as returned by the management API, both for service-level tags
/// and for tags assigned to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagContract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<TagContractProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagContractProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// ARM error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_tag_contract() {
        let body = r#"{
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ApiManagement/service/svc/apis/a/operations/o/tags/t1",
            "type": "Microsoft.ApiManagement/service/apis/operations/tags",
            "name": "t1",
            "properties": { "displayName": "Tag One" }
        }"#;
        let tag: TagContract = serde_json::from_str(body).unwrap();
        assert_eq!(tag.name.as_deref(), Some("t1"));
        assert_eq!(
            tag.resource_type.as_deref(),
            Some("Microsoft.ApiManagement/service/apis/operations/tags")
        );
        assert_eq!(
            tag.properties.and_then(|p| p.display_name).as_deref(),
            Some("Tag One")
        );
    }

    #[test]
    fn tolerates_sparse_payloads() {
        let tag: TagContract = serde_json::from_str("{}").unwrap();
        assert_eq!(tag, TagContract::default());
    }

    #[test]
    fn decodes_error_envelope() {
        let body = r#"{"error":{"code":"ResourceNotFound","message":"Tag not found."}}"#;
        let err: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.code, "ResourceNotFound");
        assert_eq!(err.error.message, "Tag not found.");
    }
}
