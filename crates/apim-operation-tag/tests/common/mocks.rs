// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! In-memory management API used by the lifecycle tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use apim_client::{ClientError, Lookup, TagClient, TagContract, TagContractProperties};
use apim_operation_tag::ProviderContext;

pub const SUBSCRIPTION_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    GetTag(String),
    GetByOperation(String),
    Assign(String),
    Detach(String),
}

#[derive(Default)]
struct State {
    tags: HashSet<(String, String, String)>,
    assignments: HashSet<String>,
    calls: Vec<Call>,
}

/// Fake tag client backed by two sets: service tags and operation assignments.
#[derive(Clone, Default)]
pub struct MockTagClient {
    state: Arc<Mutex<State>>,
    /// Fails every call with a server error.
    fail_with_status: Option<u16>,
    /// Sleeps before answering any call.
    delay: Option<Duration>,
}

fn assignment_key(rg: &str, service: &str, api: &str, operation: &str, tag: &str) -> String {
    format!("{rg}/{service}/{api}/{operation}/{tag}")
}

fn contract(name: &str) -> TagContract {
    TagContract {
        id: None,
        name: Some(name.to_string()),
        resource_type: None,
        properties: Some(TagContractProperties {
            display_name: Some(name.to_string()),
        }),
    }
}

impl MockTagClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn context(&self) -> ProviderContext {
        ProviderContext::new(Arc::new(self.clone()), SUBSCRIPTION_ID)
    }

    pub fn add_tag(&self, rg: &str, service: &str, tag: &str) {
        self.state
            .lock()
            .unwrap()
            .tags
            .insert((rg.to_string(), service.to_string(), tag.to_string()));
    }

    pub fn add_assignment(&self, rg: &str, service: &str, api: &str, operation: &str, tag: &str) {
        self.state
            .lock()
            .unwrap()
            .assignments
            .insert(assignment_key(rg, service, api, operation, tag));
    }

    /// Deletes an assignment behind the adapter's back.
    pub fn remove_assignment(&self, rg: &str, service: &str, api: &str, operation: &str, tag: &str) {
        self.state
            .lock()
            .unwrap()
            .assignments
            .remove(&assignment_key(rg, service, api, operation, tag));
    }

    pub fn has_assignment(&self, rg: &str, service: &str, api: &str, operation: &str, tag: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .assignments
            .contains(&assignment_key(rg, service, api, operation, tag))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    async fn enter(&self, call: Call) -> Result<(), ClientError> {
        self.state.lock().unwrap().calls.push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.fail_with_status {
            Some(status) => Err(ClientError::Server {
                status,
                code: "InternalServerError".to_string(),
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl TagClient for MockTagClient {
    async fn get(
        &self,
        resource_group: &str,
        service_name: &str,
        tag_id: &str,
    ) -> Result<Lookup<TagContract>, ClientError> {
        self.enter(Call::GetTag(tag_id.to_string())).await?;
        let key = (
            resource_group.to_string(),
            service_name.to_string(),
            tag_id.to_string(),
        );
        if self.state.lock().unwrap().tags.contains(&key) {
            Ok(Lookup::Found(contract(tag_id)))
        } else {
            Ok(Lookup::NotFound)
        }
    }

    async fn get_by_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<Lookup<TagContract>, ClientError> {
        let key = assignment_key(resource_group, service_name, api_name, operation_name, tag_id);
        self.enter(Call::GetByOperation(key.clone())).await?;
        if self.state.lock().unwrap().assignments.contains(&key) {
            Ok(Lookup::Found(contract(tag_id)))
        } else {
            Ok(Lookup::NotFound)
        }
    }

    async fn assign_to_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<TagContract, ClientError> {
        let key = assignment_key(resource_group, service_name, api_name, operation_name, tag_id);
        self.enter(Call::Assign(key.clone())).await?;
        let mut state = self.state.lock().unwrap();
        state.tags.insert((
            resource_group.to_string(),
            service_name.to_string(),
            tag_id.to_string(),
        ));
        state.assignments.insert(key);
        Ok(contract(tag_id))
    }

    async fn detach_from_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<(), ClientError> {
        let key = assignment_key(resource_group, service_name, api_name, operation_name, tag_id);
        self.enter(Call::Detach(key.clone())).await?;
        if self.state.lock().unwrap().assignments.remove(&key) {
            Ok(())
        } else {
            Err(ClientError::NotFound(key))
        }
    }
}
