// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Create/Read/Delete lifecycle binding a tag to an API operation.
//!
//! Each call makes its remote requests strictly in order under one deadline
//! computed when the call starts. There is no update: both identifying fields
//! force recreation.

use std::future::Future;
use std::time::Duration;

use apim_client::Lookup;
use apim_resource_id::{ApiOperationId, ApiOperationTagId, TagId};
use tokio::time::Instant;
use tracing::debug;

use crate::config::Features;
use crate::context::ProviderContext;
use crate::error::{ResourceError, ResourceResult};
use crate::schema::{resource_schema, validate_import_id, ResourceSchema, ResourceTimeouts};
use crate::state::ResourceData;

/// Resource type name used in user-facing messages.
pub const RESOURCE_TYPE: &str = "azurerm_api_management_api_operation_tag";

/// Deadline shared by every remote call of one lifecycle invocation.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    operation: &'static str,
    at: Instant,
    timeout: Duration,
}

impl Deadline {
    fn start(operation: &'static str, timeout: Duration) -> Self {
        Self {
            operation,
            at: Instant::now() + timeout,
            timeout,
        }
    }

    /// Runs `fut`, cancelling it if the deadline passes first.
    async fn run<T>(&self, id: &str, fut: impl Future<Output = T>) -> ResourceResult<T> {
        tokio::time::timeout_at(self.at, fut)
            .await
            .map_err(|_| ResourceError::Timeout {
                operation: self.operation,
                id: id.to_string(),
                timeout: self.timeout,
            })
    }
}

#[derive(Debug, Clone)]
pub struct ApiOperationTagResource {
    schema: ResourceSchema,
    timeouts: ResourceTimeouts,
}

impl ApiOperationTagResource {
    pub fn new(features: &Features) -> Self {
        Self {
            schema: resource_schema(features),
            timeouts: ResourceTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: ResourceTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn timeouts(&self) -> &ResourceTimeouts {
        &self.timeouts
    }

    /// Assigns the declared tag to the declared operation and records the
    /// resulting id in `data`.
    ///
    /// Fails with `AlreadyExists` when the assignment is already present
    /// remotely; such an assignment has to be imported instead.
    pub async fn create(&self, ctx: &ProviderContext, data: &mut ResourceData) -> ResourceResult<()> {
        let deadline = Deadline::start("create", self.timeouts.create);
        let subscription_id = ctx.subscription_id();
        let client = ctx.client();

        let api_operation_id = ApiOperationId::parse(&data.api_operation_id)?;
        self.schema.validate(data)?;

        let tag_id = TagId::new(
            subscription_id,
            &api_operation_id.resource_group,
            &api_operation_id.service_name,
            &data.name,
        );
        let id = ApiOperationTagId::new(
            subscription_id,
            &api_operation_id.resource_group,
            &api_operation_id.service_name,
            &api_operation_id.api_name,
            &api_operation_id.operation_name,
            &tag_id.name,
        );
        let id_str = id.id();

        debug!(id = %id_str, tag = %tag_id, "checking for presence of tag");
        let tag = deadline
            .run(
                &id_str,
                client.get(&id.resource_group, &id.service_name, &tag_id.name),
            )
            .await?
            .map_err(|e| ResourceError::remote("checking for presence of Tag", &id_str, e))?;
        if let Lookup::NotFound = tag {
            debug!(tag = %tag_id, "tag does not exist yet");
        }

        let assignment = deadline
            .run(
                &id_str,
                client.get_by_operation(
                    &id.resource_group,
                    &id.service_name,
                    &id.api_name,
                    &id.operation_name,
                    &id.tag_name,
                ),
            )
            .await?
            .map_err(|e| {
                ResourceError::remote("checking for presence of Tag Assignment", &id_str, e)
            })?;
        if assignment.is_found() {
            return Err(ResourceError::AlreadyExists {
                resource_type: RESOURCE_TYPE,
                id: id_str,
            });
        }

        debug!(id = %id_str, "assigning tag to api operation");
        deadline
            .run(
                &id_str,
                client.assign_to_operation(
                    &id.resource_group,
                    &id.service_name,
                    &id.api_name,
                    &id.operation_name,
                    &id.tag_name,
                ),
            )
            .await?
            .map_err(|e| ResourceError::remote("assigning to api operation", &id_str, e))?;

        data.set_id(id_str);

        self.read_until(ctx, data, &deadline).await
    }

    /// Refreshes `data` from remote state.
    ///
    /// When the assignment no longer exists remotely the resource is dropped
    /// from state (`data` is cleared) and the call still succeeds.
    pub async fn read(&self, ctx: &ProviderContext, data: &mut ResourceData) -> ResourceResult<()> {
        let deadline = Deadline::start("read", self.timeouts.read);
        self.read_until(ctx, data, &deadline).await
    }

    async fn read_until(
        &self,
        ctx: &ProviderContext,
        data: &mut ResourceData,
        deadline: &Deadline,
    ) -> ResourceResult<()> {
        let id = ApiOperationTagId::parse(&data.id)?;
        let id_str = id.id();
        let api_operation_id = id.api_operation_id(ctx.subscription_id());

        let assignment = deadline
            .run(
                &id_str,
                ctx.client().get_by_operation(
                    &id.resource_group,
                    &id.service_name,
                    &id.api_name,
                    &id.operation_name,
                    &id.tag_name,
                ),
            )
            .await?
            .map_err(|e| ResourceError::remote("retrieving", &id_str, e))?;

        if let Lookup::NotFound = assignment {
            debug!("{id_str} was not found - removing from state!");
            data.clear();
            return Ok(());
        }

        data.api_operation_id = api_operation_id.id();
        data.name = id.tag_name;
        Ok(())
    }

    /// Detaches the tag from the operation. A missing assignment is an error.
    pub async fn delete(&self, ctx: &ProviderContext, data: &mut ResourceData) -> ResourceResult<()> {
        let deadline = Deadline::start("delete", self.timeouts.delete);
        let id = ApiOperationTagId::parse(&data.id)?;
        let id_str = id.id();

        debug!(id = %id_str, "detaching tag from api operation");
        deadline
            .run(
                &id_str,
                ctx.client().detach_from_operation(
                    &id.resource_group,
                    &id.service_name,
                    &id.api_name,
                    &id.operation_name,
                    &id.tag_name,
                ),
            )
            .await?
            .map_err(|e| ResourceError::remote("detaching api operation tag", &id_str, e))?;

        data.clear();
        Ok(())
    }

    /// Brings an existing assignment under management from its id alone.
    pub async fn import(&self, ctx: &ProviderContext, id: &str) -> ResourceResult<ResourceData> {
        validate_import_id(id)?;

        let mut data = ResourceData::from_id(id);
        self.read(ctx, &mut data).await?;
        if data.is_absent() {
            return Err(ResourceError::ImportNotFound { id: id.to_string() });
        }
        Ok(data)
    }
}
