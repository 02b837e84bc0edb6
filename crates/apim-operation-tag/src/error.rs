// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use apim_client::ClientError;
use apim_resource_id::IdError;

/// Errors surfaced by the operation tag resource lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("invalid resource id: {0}")]
    InvalidIdentifier(#[from] IdError),

    #[error("invalid value for {field:?}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("a resource with the ID {id:?} already exists - to be managed this resource needs to be imported into the state. Please see the resource documentation for {resource_type:?} for more information")]
    AlreadyExists {
        resource_type: &'static str,
        id: String,
    },

    #[error("{action} {id:?}: {source}")]
    Remote {
        action: &'static str,
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("{operation} of {id:?} did not complete within {timeout:?}")]
    Timeout {
        operation: &'static str,
        id: String,
        timeout: Duration,
    },

    #[error("cannot import non-existent remote object {id:?}")]
    ImportNotFound { id: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build management client: {0}")]
    ClientSetup(#[source] ClientError),
}

impl ResourceError {
    pub(crate) fn remote(action: &'static str, id: impl ToString, source: ClientError) -> Self {
        Self::Remote {
            action,
            id: id.to_string(),
            source,
        }
    }
}

pub type ResourceResult<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_carries_id_and_cause() {
        let err = ResourceError::remote(
            "retrieving",
            "/subscriptions/s/x",
            ClientError::UnexpectedStatus(302),
        );
        assert_eq!(
            err.to_string(),
            "retrieving \"/subscriptions/s/x\": unexpected status 302"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn already_exists_mentions_import() {
        let err = ResourceError::AlreadyExists {
            resource_type: "azurerm_api_management_api_operation_tag",
            id: "/subscriptions/s/x".into(),
        };
        let message = err.to_string();
        assert!(message.contains("already exists"));
        assert!(message.contains("imported"));
        assert!(message.contains("azurerm_api_management_api_operation_tag"));
    }

    #[test]
    fn id_errors_convert() {
        let err: ResourceError = IdError::Empty.into();
        assert!(matches!(err, ResourceError::InvalidIdentifier(IdError::Empty)));
    }
}
