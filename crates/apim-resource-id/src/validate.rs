// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Field validators used by resource schemas.

use std::sync::OnceLock;

use regex::Regex;

use crate::{ApiOperationId, IdError};

// Letters, digits and dashes; first and last characters alphanumeric.
const CHILD_NAME_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,78}[a-zA-Z0-9]$";

fn child_name_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CHILD_NAME_PATTERN).ok())
        .as_ref()
}

/// Validates the name of a child resource of an API Management service
/// (tags, apis, operations, ...).
pub fn api_management_child_name(field: &str, value: &str) -> Result<(), IdError> {
    let matched = child_name_regex().is_some_and(|re| re.is_match(value));
    if !matched {
        return Err(IdError::InvalidChildName {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validates that `value` parses as an API operation identifier.
pub fn api_operation_id(value: &str) -> Result<(), IdError> {
    ApiOperationId::parse(value).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_child_names() {
        let longest = "a".repeat(80);
        for name in ["abc", "acctest-Tag-123", "A1b", longest.as_str()] {
            assert!(
                api_management_child_name("name", name).is_ok(),
                "{name} should be valid"
            );
        }
    }

    #[test]
    fn rejects_invalid_child_names() {
        let too_long = "a".repeat(81);
        for name in [
            "",
            "ab",
            "-abc",
            "abc-",
            "has space",
            "under_score",
            too_long.as_str(),
        ] {
            assert!(
                api_management_child_name("name", name).is_err(),
                "{name} should be invalid"
            );
        }
    }

    #[test]
    fn child_name_error_names_the_field() {
        let err = api_management_child_name("name", "-bad").unwrap_err();
        assert!(err.to_string().starts_with("\"name\" may only contain"));
    }

    #[test]
    fn operation_id_validator_delegates_to_parser() {
        assert!(api_operation_id("/subscriptions/s/resourceGroups/rg/providers/Microsoft.ApiManagement/service/svc/apis/a/operations/o").is_ok());
        assert!(api_operation_id("not-an-id").is_err());
    }
}
