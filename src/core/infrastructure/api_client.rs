//! Internal HTTP client that handles authentication headers and rate limiting.

use crate::core::domain::{
    error::{ConsoleError, ConsoleResult, ValidationError},
    value_object::{AuthToken, ConsoleUrl},
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// Runtime configuration for the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Optional outbound rate limit; `None` disables throttling.
    pub rate_limit: Option<RateLimitConfig>,
    /// Accept self-signed certificates (testing only).
    pub accept_invalid_certs: bool,
}

/// Outbound request throttling parameters.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Sustained requests per second.
    pub requests_per_second: u32,
    /// Requests allowed to burst above the sustained rate.
    pub burst_size: u32,
}

/// Internal HTTP client for the console's ReST API.
///
/// The client automatically attaches the bearer token (when one is set) to
/// each request, maps non-success statuses onto [`ConsoleError`], and
/// optionally throttles outbound requests so that bursts of per-resource
/// lookups cannot overwhelm the console.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: ConsoleUrl,
    auth: Arc<RwLock<Option<AuthToken>>>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient` rooted at the console's base URL.
    ///
    /// # Errors
    /// Returns `ConsoleError::Connection` if the HTTP client cannot be built,
    /// or `ConsoleError::Validation` for a zero rate-limit quota.
    pub fn new(
        base_url: ConsoleUrl,
        config: ClientConfig,
        auth_token: Option<AuthToken>,
    ) -> ConsoleResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ConsoleError::Connection(e.to_string()))?;

        let rate_limiter = match config.rate_limit {
            Some(rl) => Some(Arc::new(DefaultDirectRateLimiter::direct(rate_quota(rl)?))),
            None => None,
        };

        Ok(Self {
            http_client,
            base_url,
            auth: Arc::new(RwLock::new(auth_token)),
            rate_limiter,
        })
    }

    /// Returns the base URL this client is rooted at.
    pub fn base_url(&self) -> &ConsoleUrl {
        &self.base_url
    }

    /// Sets the bearer token attached to subsequent requests.
    pub async fn set_auth_token(&self, token: AuthToken) {
        *self.auth.write().await = Some(token);
    }

    /// Removes the bearer token; subsequent requests go out unauthenticated.
    pub async fn clear_auth_token(&self) {
        *self.auth.write().await = None;
    }

    /// Returns `true` if a bearer token is currently set.
    pub async fn has_auth_token(&self) -> bool {
        self.auth.read().await.is_some()
    }

    /// Performs a GET request against `segments` below the base URL and
    /// parses the JSON response.
    ///
    /// # Errors
    /// Returns `ConsoleError` if the request fails at the transport level,
    /// the server answers with a non-success status, or the response body
    /// cannot be parsed.
    pub async fn get<T>(&self, segments: &[&str], query: &[(&str, String)]) -> ConsoleResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(segments, query)?;
        self.throttle().await;

        let request = self.authorize(self.http_client.get(url)).await;
        let response = request
            .send()
            .await
            .map_err(|e| ConsoleError::Connection(format!("HTTP request failed: {}", e)))?;
        let response = Self::check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ConsoleError::Connection(format!("Failed to parse response: {}", e)))
    }

    /// Performs a POST request with a JSON body and returns the raw response
    /// body as text. Used for endpoints that mint plain-text identifiers.
    ///
    /// # Errors
    /// Returns `ConsoleError` if the request fails at the transport level or
    /// the server answers with a non-success status.
    pub async fn post_for_text<B>(&self, segments: &[&str], body: &B) -> ConsoleResult<String>
    where
        B: serde::Serialize,
    {
        let url = self.endpoint(segments, &[])?;
        self.throttle().await;

        let request = self.authorize(self.http_client.post(url).json(body)).await;
        let response = request
            .send()
            .await
            .map_err(|e| ConsoleError::Connection(format!("HTTP request failed: {}", e)))?;
        let response = Self::check_status(response).await?;

        response
            .text()
            .await
            .map_err(|e| ConsoleError::Connection(format!("Failed to read response: {}", e)))
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> ConsoleResult<Url> {
        let mut url = self.base_url.as_url().clone();
        url.path_segments_mut()
            .map_err(|_| ValidationError::Format("base URL cannot carry path segments".to_string()))
            .map_err(ConsoleError::from)?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let auth = self.auth.read().await;
        match auth.as_ref() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    async fn check_status(response: Response) -> ConsoleResult<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ConsoleError::Authentication(
                "The console rejected the request credentials".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(ConsoleError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.rate_limiter {
            // `until_ready()` completes when capacity is available.
            limiter.until_ready().await;
        }
    }
}

fn rate_quota(rl: RateLimitConfig) -> ConsoleResult<Quota> {
    let per_second = NonZeroU32::new(rl.requests_per_second).ok_or_else(|| {
        ConsoleError::from(ValidationError::Field {
            field: "requests_per_second".to_string(),
            message: "Rate limit must be non-zero".to_string(),
        })
    })?;
    let burst = NonZeroU32::new(rl.burst_size).ok_or_else(|| {
        ConsoleError::from(ValidationError::Field {
            field: "burst_size".to_string(),
            message: "Burst size must be non-zero".to_string(),
        })
    })?;
    Ok(Quota::per_second(per_second).allow_burst(burst))
}
