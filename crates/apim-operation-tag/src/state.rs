// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::schema::{FIELD_API_OPERATION_ID, FIELD_DISPLAY_NAME, FIELD_NAME};

/// Declared and observed state of one operation tag resource.
///
/// An empty `id` means the resource is absent (never created, deleted, or
/// removed remotely).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub api_operation_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl ResourceData {
    pub fn new(api_operation_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_operation_id: api_operation_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// State seeded from nothing but a persisted identifier, as used by import.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        (!self.id.is_empty()).then_some(self.id.as_str())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn is_absent(&self) -> bool {
        self.id.is_empty()
    }

    /// Drops the resource from tracked state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Value of a schema field, `None` when unset or empty.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            FIELD_API_OPERATION_ID => self.api_operation_id.as_str(),
            FIELD_NAME => self.name.as_str(),
            FIELD_DISPLAY_NAME => self.display_name.as_deref()?,
            _ => return None,
        };
        (!value.is_empty()).then_some(value)
    }
}
