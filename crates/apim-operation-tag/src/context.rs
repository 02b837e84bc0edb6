// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use apim_client::{
    AccessToken, ClientError, HttpClientOptions, HttpTagClient, TagClient, TokenResolverFn,
    TokenSource,
};
use tokio::time::Instant;

use crate::config::ProviderConfig;
use crate::error::ResourceError;

/// Dependencies every lifecycle call needs: the management client and the
/// subscription resource ids are rooted at.
#[derive(Clone)]
pub struct ProviderContext {
    client: Arc<dyn TagClient>,
    subscription_id: String,
}

impl ProviderContext {
    pub fn new(client: Arc<dyn TagClient>, subscription_id: impl Into<String>) -> Self {
        Self {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    /// Builds an HTTP-backed context from provider configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ResourceError> {
        let client = HttpTagClient::new(
            &config.endpoint,
            config.subscription_id.clone(),
            Arc::new(token_source(config)?),
            HttpClientOptions {
                allow_plaintext: config.allow_plaintext,
                request_timeout: config.request_timeout,
                https_proxy: config.https_proxy.clone(),
            },
        )
        .map_err(ResourceError::ClientSetup)?;

        Ok(Self::new(Arc::new(client), config.subscription_id.clone()))
    }

    pub fn client(&self) -> &dyn TagClient {
        self.client.as_ref()
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }
}

impl fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext")
            .field("subscription_id", &self.subscription_id)
            .finish_non_exhaustive()
    }
}

/// A literal token wins over a token file.
fn token_source(config: &ProviderConfig) -> Result<TokenSource, ResourceError> {
    if let Some(token) = config.access_token.as_deref() {
        return Ok(TokenSource::new_static(token));
    }
    if let Some(path) = &config.access_token_file {
        return Ok(TokenSource::new_refreshing(file_token_resolver(
            path.clone(),
            config.token_refresh,
        )));
    }
    Err(ResourceError::InvalidConfig(
        "one of ARM_ACCESS_TOKEN or ARM_ACCESS_TOKEN_FILE must be set".to_string(),
    ))
}

/// Re-reads `path` whenever the previous token is older than `ttl`.
fn file_token_resolver(path: PathBuf, ttl: Duration) -> TokenResolverFn {
    Arc::new(move || {
        let path = path.clone();
        Box::pin(async move {
            let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
                ClientError::Token(format!("reading {}: {e}", path.display()))
            })?;
            let secret = raw.trim();
            if secret.is_empty() {
                return Err(ClientError::Token(format!("{} is empty", path.display())));
            }
            Ok(AccessToken::new(secret, Some(Instant::now() + ttl)))
        })
    })
}
