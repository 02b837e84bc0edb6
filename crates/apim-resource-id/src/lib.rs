// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Composite resource identifiers for API Management tag assignments.
//!
//! Every identifier is a `/key/value/...` path rooted at a subscription. The
//! types here parse those paths strictly (exact key order, no empty values, no
//! trailing segments) and format them back so that `parse(x.id()) == x`.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod ids;
mod segments;
pub mod validate;

pub use ids::{ApiOperationId, ApiOperationTagId, TagId};
pub use validate::{api_management_child_name, api_operation_id};

/// Resource provider namespace every identifier in this crate lives under.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.ApiManagement";

/// Reasons a composite identifier string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("resource id must not be empty")]
    Empty,

    #[error("resource id {0:?} must start with '/'")]
    NotRooted(String),

    #[error("the number of path segments is not divisible by 2 in {0:?}")]
    OddSegments(String),

    #[error("ID was missing the `{key}` element in {input:?}")]
    MissingSegment { key: &'static str, input: String },

    #[error("expected the `{expected}` element but found `{found}` in {input:?}")]
    UnexpectedSegment {
        expected: &'static str,
        found: String,
        input: String,
    },

    #[error("the `{key}` element is empty in {input:?}")]
    EmptySegment { key: String, input: String },

    #[error("ID contained more segments than required: {0:?}")]
    TrailingSegments(String),

    #[error("expected provider {PROVIDER_NAMESPACE:?} but found {found:?}")]
    WrongProvider { found: String },

    #[error("{field:?} may only contain alphanumeric characters and dashes up to 80 characters in length, got {value:?}")]
    InvalidChildName { field: String, value: String },
}
