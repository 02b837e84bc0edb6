// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle adapter that attaches an API Management tag to an API operation.
//!
//! [`ApiOperationTagResource`] turns a declared `(api_operation_id, name)` pair
//! into tag assignment calls against the management API and reconciles remote
//! state back on read. Dependencies are passed in through
//! [`ProviderContext`]; nothing here reads process-wide state.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod context;
pub mod error;
pub mod resource;
pub mod schema;
pub mod state;

pub use config::{Features, ProviderConfig};
pub use context::ProviderContext;
pub use error::{ResourceError, ResourceResult};
pub use resource::{ApiOperationTagResource, RESOURCE_TYPE};
pub use schema::{resource_schema, ResourceSchema, ResourceTimeouts};
pub use state::ResourceData;
