// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Bearer credentials for the management API.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use std::{future::Future, pin::Pin};

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::http::ClientError;

/// A token is refreshed this long before it expires.
pub const EXPIRY_SKEW: Duration = Duration::from_secs(30);

pub type TokenResolverFn = Arc<
    dyn Fn() -> Pin<Box<dyn Future<Output = Result<AccessToken, ClientError>> + Send>>
        + Send
        + Sync,
>;

/// A resolved bearer token and the instant it stops being usable.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    expires_at: Option<Instant>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_at: Option<Instant>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at
            .map_or(true, |at| now + EXPIRY_SKEW < at)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Where the bearer token for each request comes from.
///
/// `Refreshing` caches the last resolved token and calls the resolver again
/// once the token is within [`EXPIRY_SKEW`] of its expiry. Failed resolutions
/// are not cached.
#[derive(Clone)]
pub enum TokenSource {
    Static(String),
    Refreshing {
        resolver_fn: TokenResolverFn,
        cached: Arc<Mutex<Option<AccessToken>>>,
    },
}

impl TokenSource {
    pub fn new_static(token: &str) -> Self {
        Self::Static(token.to_string())
    }

    pub fn new_refreshing(resolver_fn: TokenResolverFn) -> Self {
        Self::Refreshing {
            resolver_fn,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns a token that is valid for at least [`EXPIRY_SKEW`].
    pub async fn bearer(&self) -> Result<String, ClientError> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::Refreshing {
                resolver_fn,
                cached,
            } => {
                let mut cached = cached.lock().await;
                if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
                    return Ok(token.secret.clone());
                }
                let token = (resolver_fn)().await?;
                debug!(expires_at = ?token.expires_at, "resolved access token");
                let secret = token.secret.clone();
                *cached = Some(token);
                Ok(secret)
            }
        }
    }
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(_) => write!(f, "TokenSource::Static"),
            Self::Refreshing { .. } => write!(f, "TokenSource::Refreshing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_source(ttl: Duration) -> (TokenSource, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = TokenSource::new_refreshing(Arc::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Box::pin(async move {
                Ok::<_, ClientError>(AccessToken::new(
                    format!("token-{n}"),
                    Some(Instant::now() + ttl),
                ))
            })
        }));
        (source, calls)
    }

    #[tokio::test]
    async fn static_token() {
        let source = TokenSource::new_static("mock-token");
        assert_eq!(source.bearer().await.unwrap(), "mock-token");
    }

    #[tokio::test(start_paused = true)]
    async fn refreshing_token_is_cached_until_near_expiry() {
        let (source, calls) = counting_source(Duration::from_secs(300));

        assert_eq!(source.bearer().await.unwrap(), "token-1");
        tokio::time::advance(Duration::from_secs(200)).await;
        assert_eq!(source.bearer().await.unwrap(), "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // inside the skew window
        tokio::time::advance(Duration::from_secs(80)).await;
        assert_eq!(source.bearer().await.unwrap(), "token-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn token_without_expiry_is_resolved_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = TokenSource::new_refreshing(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok::<_, ClientError>(AccessToken::new("forever", None)) })
        }));

        source.bearer().await.unwrap();
        source.bearer().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_resolution_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = TokenSource::new_refreshing(Arc::new(move || {
            let first = counter.fetch_add(1, Ordering::SeqCst) == 0;
            Box::pin(async move {
                if first {
                    Err(ClientError::Token("identity endpoint unavailable".into()))
                } else {
                    Ok(AccessToken::new("recovered", None))
                }
            })
        }));

        assert!(matches!(source.bearer().await, Err(ClientError::Token(_))));
        assert_eq!(source.bearer().await.unwrap(), "recovered");
    }

    #[test]
    fn debug_does_not_leak_token() {
        let source = TokenSource::new_static("secret");
        assert_eq!(format!("{source:?}"), "TokenSource::Static");
        let token = AccessToken::new("secret", None);
        assert!(!format!("{token:?}").contains("secret"));
    }
}
