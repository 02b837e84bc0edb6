// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Azure Resource Manager implementation of [`TagClient`].
//!
//! Every call is a single request against
//! `{endpoint}/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.ApiManagement/service/{svc}/...`.
//! Status codes are classified into [`ClientError`]; no retries happen here.

use std::sync::Arc;
use std::time::Duration;

use apim_resource_id::PROVIDER_NAMESPACE;
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, Method, Response, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::models::{ErrorResponse, TagContract};
use crate::token::TokenSource;
use crate::{Lookup, TagClient};

/// Management API version used for every request.
pub const API_VERSION: &str = "2021-08-01";
/// Public Azure cloud management endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed record does not exist. Lookups report this as
    /// [`Lookup::NotFound`] instead.
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },
    #[error("request rejected (status {status}) {code}: {message}")]
    Request {
        status: u16,
        code: String,
        message: String,
    },
    #[error("server error (status {status}) {code}: {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to obtain access token: {0}")]
    Token(String),
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    /// Whether `http://` endpoints are accepted (local emulators, tests).
    pub allow_plaintext: bool,
    /// Upper bound for a single HTTP exchange.
    pub request_timeout: Duration,
    pub https_proxy: Option<String>,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            allow_plaintext: false,
            request_timeout: Duration::from_secs(60),
            https_proxy: None,
        }
    }
}

/// [`TagClient`] over the ARM REST API, bound to one subscription.
#[derive(Debug, Clone)]
pub struct HttpTagClient {
    client: Client,
    endpoint: Url,
    subscription_id: String,
    token_source: Arc<TokenSource>,
}

impl HttpTagClient {
    pub fn new(
        endpoint: &str,
        subscription_id: impl Into<String>,
        token_source: Arc<TokenSource>,
        options: HttpClientOptions,
    ) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientError::InvalidConfig(format!("invalid endpoint {endpoint:?}: {e}")))?;
        if endpoint.scheme() == "http" && !options.allow_plaintext {
            return Err(ClientError::InvalidConfig(format!(
                "insecure endpoint {endpoint} requires explicit opt-in"
            )));
        }
        if endpoint.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "endpoint {endpoint} cannot be used as a base url"
            )));
        }

        let mut headers = HeaderMap::new();
        let user_agent = format!("apim-operation-tag/{}", env!("CARGO_PKG_VERSION"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|e| ClientError::InvalidConfig(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(options.request_timeout);
        if let Some(proxy) = &options.https_proxy {
            builder = builder.proxy(reqwest::Proxy::https(proxy)?);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint,
            subscription_id: subscription_id.into(),
            token_source,
        })
    }

    /// Builds the request url, percent-encoding each path segment.
    fn url(&self, resource_group: &str, service_name: &str, tail: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidConfig("endpoint cannot be a base".into()))?;
            segments.pop_if_empty().extend([
                "subscriptions",
                self.subscription_id.as_str(),
                "resourceGroups",
                resource_group,
                "providers",
                PROVIDER_NAMESPACE,
                "service",
                service_name,
            ]);
            segments.extend(tail);
        }
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url) -> Result<Response, ClientError> {
        let token = self.token_source.bearer().await?;
        debug!(
            method = %method,
            url = %url,
            authorization = "<redacted>",
            "api management request"
        );

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, format!("Bearer {token}"));
        // Bodyless PUT.
        if method == Method::PUT {
            builder = builder.header(CONTENT_LENGTH, HeaderValue::from_static("0"));
        }
        let response = builder.send().await?;

        debug!(
            method = %method,
            url = %url,
            status = response.status().as_u16(),
            "api management response"
        );
        Ok(response)
    }

    async fn lookup(&self, url: Url) -> Result<Lookup<TagContract>, ClientError> {
        let response = self.send(Method::GET, url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        let response = ensure_success(response, &[StatusCode::OK]).await?;
        decode(response).await.map(Lookup::Found)
    }

    fn operation_tag_tail<'a>(
        api_name: &'a str,
        operation_name: &'a str,
        tag_id: &'a str,
    ) -> [&'a str; 6] {
        [
            "apis",
            api_name,
            "operations",
            operation_name,
            "tags",
            tag_id,
        ]
    }
}

#[async_trait]
impl TagClient for HttpTagClient {
    async fn get(
        &self,
        resource_group: &str,
        service_name: &str,
        tag_id: &str,
    ) -> Result<Lookup<TagContract>, ClientError> {
        let url = self.url(resource_group, service_name, &["tags", tag_id])?;
        self.lookup(url).await
    }

    async fn get_by_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<Lookup<TagContract>, ClientError> {
        let tail = Self::operation_tag_tail(api_name, operation_name, tag_id);
        let url = self.url(resource_group, service_name, &tail)?;
        self.lookup(url).await
    }

    async fn assign_to_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<TagContract, ClientError> {
        let tail = Self::operation_tag_tail(api_name, operation_name, tag_id);
        let url = self.url(resource_group, service_name, &tail)?;
        let response = self.send(Method::PUT, url).await?;
        let response = ensure_success(response, &[StatusCode::OK, StatusCode::CREATED]).await?;
        decode(response).await
    }

    async fn detach_from_operation(
        &self,
        resource_group: &str,
        service_name: &str,
        api_name: &str,
        operation_name: &str,
        tag_id: &str,
    ) -> Result<(), ClientError> {
        let tail = Self::operation_tag_tail(api_name, operation_name, tag_id);
        let url = self.url(resource_group, service_name, &tail)?;
        let response = self.send(Method::DELETE, url.clone()).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.to_string()));
        }
        ensure_success(response, &[StatusCode::OK, StatusCode::NO_CONTENT]).await?;
        Ok(())
    }
}

async fn decode(response: Response) -> Result<TagContract, ClientError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Passes `response` through when its status is one of `expected`, otherwise
/// turns it into a [`ClientError`] using the ARM error envelope when present.
async fn ensure_success(
    response: Response,
    expected: &[StatusCode],
) -> Result<Response, ClientError> {
    let status = response.status();
    if expected.contains(&status) {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => (parsed.error.code, parsed.error.message),
        Err(_) => (String::new(), body),
    };
    Err(classify_status(status, url, code, message))
}

/// Maps a non-success status code to the client error taxonomy.
fn classify_status(status: StatusCode, url: String, code: String, message: String) -> ClientError {
    let status_code = status.as_u16();
    if status == StatusCode::NOT_FOUND {
        return ClientError::NotFound(url);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ClientError::Unauthorized {
            status: status_code,
            message,
        };
    }
    if status.is_client_error() {
        return ClientError::Request {
            status: status_code,
            code,
            message,
        };
    }
    if status.is_server_error() {
        return ClientError::Server {
            status: status_code,
            code,
            message,
        };
    }
    ClientError::UnexpectedStatus(status_code)
}
