use std::{fmt, num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::trace;

use super::region::Platform;
use crate::error::AppError;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Thin wrapper over the platform-routed Riot endpoints.
///
/// Every request waits on a shared token bucket, carries the API key as the
/// `api_key` query parameter and turns any non-200 answer into
/// [`AppError::RiotApi`].
#[derive(Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    limiter: Arc<DirectLimiter>,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl RiotClient {
    pub fn new(api_key: String, platform: Platform, rate_limit_per_second: NonZeroU32) -> Self {
        Self {
            http: reqwest::Client::new(),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(
                rate_limit_per_second,
            ))),
            api_key,
            base_url: platform.base_url(),
        }
    }

    /// Point the client at another host (proxy, mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        trace!(url = %url, ?params, "🛰️ GET");

        let res = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            status => {
                let message = res
                    .text()
                    .await
                    .ok()
                    .filter(|body| !body.is_empty())
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
                Err(AppError::RiotApi {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
