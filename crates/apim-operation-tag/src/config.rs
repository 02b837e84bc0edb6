// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration resolved once at startup.
//!
//! Nothing in the resource lifecycle reads the process environment; the
//! values below are collected here and handed down explicitly.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use apim_client::DEFAULT_ENDPOINT;

use crate::error::ResourceError;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TOKEN_REFRESH_SECS: u64 = 300;
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Feature toggles that change the shape of resource schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// Opts into the next major version: deprecated fields are removed.
    pub four_point_oh_beta: bool,
}

/// Configuration for talking to the management API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Subscription every resource id is rooted at
    pub subscription_id: String,
    /// Bearer token for the management API
    pub access_token: Option<String>,
    /// File holding a bearer token that is rotated externally
    pub access_token_file: Option<PathBuf>,
    /// How long a token read from `access_token_file` is trusted
    pub token_refresh: Duration,
    /// Management endpoint (scheme + host)
    pub endpoint: String,
    /// Accept `http://` endpoints
    pub allow_plaintext: bool,
    pub features: Features,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// HTTPS proxy URL
    pub https_proxy: Option<String>,
    /// Timeout for each HTTP exchange
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            subscription_id: String::new(),
            access_token: None,
            access_token_file: None,
            token_refresh: Duration::from_secs(DEFAULT_TOKEN_REFRESH_SECS),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            allow_plaintext: false,
            features: Features::default(),
            log_level: "info".to_string(),
            https_proxy: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn flag(value: Option<&String>) -> bool {
    value.is_some_and(|val| val.eq_ignore_ascii_case("true") || val == "1")
}

impl ProviderConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ResourceError> {
        Self::from_env_iter(env::vars())
    }

    /// Create configuration from an explicit set of `(key, value)` pairs.
    pub fn from_env_iter<I, K, V>(vars: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let non_empty = |key: &str| vars.get(key).filter(|val| !val.trim().is_empty()).cloned();

        let subscription_id = non_empty("ARM_SUBSCRIPTION_ID").unwrap_or_default();
        let access_token = non_empty("ARM_ACCESS_TOKEN");
        let access_token_file = non_empty("ARM_ACCESS_TOKEN_FILE").map(PathBuf::from);
        let token_refresh = non_empty("ARM_TOKEN_REFRESH_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TOKEN_REFRESH_SECS));
        let endpoint = non_empty("ARM_ENDPOINT")
            .map(|val| val.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let allow_plaintext = flag(vars.get("ARM_ALLOW_PLAINTEXT"));
        let features = Features {
            four_point_oh_beta: flag(vars.get("ARM_FOUR_POINT_OH_BETA")),
        };
        let log_level = non_empty("ARM_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|| "info".to_string());
        let https_proxy = non_empty("ARM_HTTPS_PROXY").or_else(|| non_empty("HTTPS_PROXY"));
        let request_timeout = non_empty("ARM_REQUEST_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let config = Self {
            subscription_id,
            access_token,
            access_token_file,
            token_refresh,
            endpoint,
            allow_plaintext,
            features,
            log_level,
            https_proxy,
            request_timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.subscription_id.trim().is_empty() {
            return Err(ResourceError::InvalidConfig(
                "ARM_SUBSCRIPTION_ID cannot be empty".to_string(),
            ));
        }

        if self.endpoint.starts_with("http://") && !self.allow_plaintext {
            return Err(ResourceError::InvalidConfig(format!(
                "plaintext endpoint '{}' requires ARM_ALLOW_PLAINTEXT=true",
                self.endpoint
            )));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ResourceError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}
