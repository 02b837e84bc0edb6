// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Control-plane client for API Management tags.
//!
//! The [`TagClient`] trait is the seam the resource adapter is written
//! against. Lookups return [`Lookup`] so a missing record is an ordinary value
//! rather than an error the caller has to pick apart; every other failure is a
//! [`ClientError`]. [`HttpTagClient`] implements the trait over the Azure
//! Resource Manager REST API.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use async_trait::async_trait;

pub mod http;
pub mod models;
pub mod token;

pub use http::{ClientError, HttpClientOptions, HttpTagClient, API_VERSION, DEFAULT_ENDPOINT};
pub use models::{TagContract, TagContractProperties};
pub use token::{AccessToken, TokenResolverFn, TokenSource};

/// Outcome of a lookup that may legitimately find nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

#[async_trait]
pub trait TagClient: Send + Sync {
    /// Fetches a service-level tag by name.
    async fn get(
        &self,
        resource_group: &str,
        service_name: &str,
        tag_id: &str,
    ) -> Result<Lookup<TagContract>, ClientError>;

    /// Fetches the assignment of `tag_id` to an API operation.
    async fn get_by_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<Lookup<TagContract>, ClientError>;

    /// Attaches `tag_id` to an API operation.
    async fn assign_to_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<TagContract, ClientError>;

    /// Detaches `tag_id` from an API operation. A missing assignment is an error.
    async fn detach_from_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accessors() {
        let found = Lookup::Found(1);
        assert!(found.is_found());

        let missing: Lookup<i32> = Lookup::NotFound;
        assert!(!missing.is_found());
    }
}
