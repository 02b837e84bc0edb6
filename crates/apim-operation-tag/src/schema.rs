// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Declared-state schema and lifecycle timeouts of the operation tag resource.

use std::time::Duration;

use apim_resource_id::{validate, ApiOperationTagId, IdError};
use tracing::warn;

use crate::config::Features;
use crate::error::ResourceError;
use crate::state::ResourceData;

pub const FIELD_API_OPERATION_ID: &str = "api_operation_id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DISPLAY_NAME: &str = "display_name";

const DISPLAY_NAME_DEPRECATION: &str =
    "This property has been deprecated and will be removed in v4.0 of the provider";

/// Checks a field value; receives the field name for error messages.
pub type Validator = fn(&str, &str) -> Result<(), IdError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    /// Changing the value destroys and recreates the resource.
    pub force_new: bool,
    pub deprecated: Option<&'static str>,
    pub validate: Option<Validator>,
}

#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub fields: Vec<FieldSchema>,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Validates a declared state against the schema.
    ///
    /// Missing required values, values rejected by a field validator and
    /// values for fields the schema does not carry are all `InvalidField`.
    /// Use of a deprecated field only logs a warning.
    pub fn validate(&self, data: &ResourceData) -> Result<(), ResourceError> {
        for field in &self.fields {
            let value = data.field(field.name);
            let Some(value) = value else {
                if field.required {
                    return Err(ResourceError::InvalidField {
                        field: field.name.to_string(),
                        reason: "is required".to_string(),
                    });
                }
                continue;
            };

            if let Some(validate) = field.validate {
                validate(field.name, value).map_err(|e| ResourceError::InvalidField {
                    field: field.name.to_string(),
                    reason: e.to_string(),
                })?;
            }
            if let Some(deprecation) = field.deprecated {
                warn!("{}: {}", field.name, deprecation);
            }
        }

        if data.display_name.is_some() && self.field(FIELD_DISPLAY_NAME).is_none() {
            return Err(ResourceError::InvalidField {
                field: FIELD_DISPLAY_NAME.to_string(),
                reason: "unsupported argument".to_string(),
            });
        }

        Ok(())
    }
}

fn validate_api_operation_id(_field: &str, value: &str) -> Result<(), IdError> {
    validate::api_operation_id(value)
}

/// Builds the resource schema for the given feature set.
///
/// `display_name` only exists while the next-major-version flag is off.
pub fn resource_schema(features: &Features) -> ResourceSchema {
    let mut fields = vec![
        FieldSchema {
            name: FIELD_API_OPERATION_ID,
            field_type: FieldType::String,
            required: true,
            force_new: true,
            deprecated: None,
            validate: Some(validate_api_operation_id),
        },
        FieldSchema {
            name: FIELD_NAME,
            field_type: FieldType::String,
            required: true,
            force_new: true,
            deprecated: None,
            validate: Some(validate::api_management_child_name),
        },
    ];

    if !features.four_point_oh_beta {
        fields.push(FieldSchema {
            name: FIELD_DISPLAY_NAME,
            field_type: FieldType::String,
            required: false,
            // there is no update, so any change must recreate
            force_new: true,
            deprecated: Some(DISPLAY_NAME_DEPRECATION),
            validate: None,
        });
    }

    ResourceSchema { fields }
}

/// Validates an id passed to import before any remote call is made.
pub fn validate_import_id(id: &str) -> Result<(), IdError> {
    ApiOperationTagId::parse(id).map(|_| ())
}

/// Upper bounds for each lifecycle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceTimeouts {
    pub create: Duration,
    pub read: Duration,
    pub delete: Duration,
}

impl Default for ResourceTimeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * 60),
            read: Duration::from_secs(5 * 60),
            delete: Duration::from_secs(30 * 60),
        }
    }
}
