// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::segments::Segments;
use crate::{IdError, PROVIDER_NAMESPACE};

fn service_prefix(subscription_id: &str, resource_group: &str, service_name: &str) -> String {
    format!(
        "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/{PROVIDER_NAMESPACE}/service/{service_name}"
    )
}

/// Parses the `/subscriptions/{}/resourceGroups/{}/providers/{}/service/{}` prefix
/// shared by every identifier below.
fn parse_service_prefix(segments: &mut Segments<'_>) -> Result<(String, String, String), IdError> {
    let subscription_id = segments.take("subscriptions")?;
    let resource_group = segments.take("resourceGroups")?;
    segments.take_provider()?;
    let service_name = segments.take("service")?;
    Ok((subscription_id, resource_group, service_name))
}

/// Identifier of an API operation, the parent of a tag assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiOperationId {
    pub subscription_id: String,
    pub resource_group: String,
    pub service_name: String,
    pub api_name: String,
    pub operation_name: String,
}

impl ApiOperationId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        service_name: impl Into<String>,
        api_name: impl Into<String>,
        operation_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            service_name: service_name.into(),
            api_name: api_name.into(),
            operation_name: operation_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, IdError> {
        let mut segments = Segments::parse(input)?;
        let (subscription_id, resource_group, service_name) = parse_service_prefix(&mut segments)?;
        let api_name = segments.take("apis")?;
        let operation_name = segments.take("operations")?;
        segments.finish()?;

        Ok(Self {
            subscription_id,
            resource_group,
            service_name,
            api_name,
            operation_name,
        })
    }

    pub fn id(&self) -> String {
        format!(
            "{}/apis/{}/operations/{}",
            service_prefix(
                &self.subscription_id,
                &self.resource_group,
                &self.service_name
            ),
            self.api_name,
            self.operation_name
        )
    }
}

impl fmt::Display for ApiOperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Identifier of a tag scoped to an API Management service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagId {
    pub subscription_id: String,
    pub resource_group: String,
    pub service_name: String,
    pub name: String,
}

impl TagId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        service_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            service_name: service_name.into(),
            name: name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, IdError> {
        let mut segments = Segments::parse(input)?;
        let (subscription_id, resource_group, service_name) = parse_service_prefix(&mut segments)?;
        let name = segments.take("tags")?;
        segments.finish()?;

        Ok(Self {
            subscription_id,
            resource_group,
            service_name,
            name,
        })
    }

    pub fn id(&self) -> String {
        format!(
            "{}/tags/{}",
            service_prefix(
                &self.subscription_id,
                &self.resource_group,
                &self.service_name
            ),
            self.name
        )
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Identifier of a tag assignment: the link between one tag and one operation.
///
/// This is the durable handle of the managed resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiOperationTagId {
    pub subscription_id: String,
    pub resource_group: String,
    pub service_name: String,
    pub api_name: String,
    pub operation_name: String,
    pub tag_name: String,
}

impl ApiOperationTagId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        service_name: impl Into<String>,
        api_name: impl Into<String>,
        operation_name: impl Into<String>,
        tag_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            service_name: service_name.into(),
            api_name: api_name.into(),
            operation_name: operation_name.into(),
            tag_name: tag_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, IdError> {
        let mut segments = Segments::parse(input)?;
        let (subscription_id, resource_group, service_name) = parse_service_prefix(&mut segments)?;
        let api_name = segments.take("apis")?;
        let operation_name = segments.take("operations")?;
        let tag_name = segments.take("tags")?;
        segments.finish()?;

        Ok(Self {
            subscription_id,
            resource_group,
            service_name,
            api_name,
            operation_name,
            tag_name,
        })
    }

    /// Parent operation, rebuilt under the given subscription.
    pub fn api_operation_id(&self, subscription_id: &str) -> ApiOperationId {
        ApiOperationId::new(
            subscription_id,
            &self.resource_group,
            &self.service_name,
            &self.api_name,
            &self.operation_name,
        )
    }

    pub fn id(&self) -> String {
        format!(
            "{}/apis/{}/operations/{}/tags/{}",
            service_prefix(
                &self.subscription_id,
                &self.resource_group,
                &self.service_name
            ),
            self.api_name,
            self.operation_name,
            self.tag_name
        )
    }
}

impl fmt::Display for ApiOperationTagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
