//! Upstream Fund Service Adapter
//!
//! Talks to the external service that computes fund returns. The service
//! exposes:
//!
//! - `GET  {base}/api/funds`   -> `{ "funds": [FundRecord] }`
//! - `POST {base}/api/refresh` -> arbitrary JSON acknowledgment
//!
//! # Error Handling
//!
//! Failures are mapped to `PortError` variants:
//! - connection failures -> `PortError::Transport`
//! - request timeouts -> `PortError::Timeout`
//! - non-2xx responses -> `PortError::UpstreamStatus`
//! - undecodable or invalid payloads -> `PortError::Parse`
//!
//! Transient failures (connection errors, attempt timeouts, 5xx, 429) are
//! retried with bounded exponential backoff before surfacing. Each attempt is
//! bounded by an equal share of the overall timeout, so a slow first attempt
//! leaves room for the retries.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::time::Duration;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};

use crate::fund::FundRecord;
use crate::ports::{FundSource, FundsPayload, RefreshAck};

/// Connection settings for the upstream service
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL, e.g. "http://localhost:5000"
    pub base_url: String,
    /// Overall bound on one call, retries included
    pub timeout: Duration,
    /// Retries for transient failures
    pub max_retries: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
        }
    }
}

impl UpstreamConfig {
    /// Bound on a single attempt: the overall timeout split across the first
    /// attempt and every retry
    pub fn attempt_timeout(&self) -> Duration {
        self.timeout / self.max_retries.saturating_add(1)
    }
}

/// HTTP adapter for the upstream fund service
#[derive(Debug, Clone)]
pub struct UpstreamFundSource {
    client: ClientWithMiddleware,
    config: UpstreamConfig,
}

impl UpstreamFundSource {
    /// Builds the HTTP client with timeout and retry middleware
    pub fn new(config: UpstreamConfig) -> Result<Self, PortError> {
        let reqwest_client = reqwest::Client::builder()
            .timeout(config.attempt_timeout())
            .build()
            .map_err(|e| PortError::Transport {
                message: format!("failed to build HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(2))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, config })
    }

    /// Returns the base URL of the upstream service
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn map_send_error(&self, operation: &str, err: reqwest_middleware::Error) -> PortError {
        match &err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                PortError::timeout(operation, self.config.attempt_timeout().as_millis() as u64)
            }
            _ => PortError::Transport {
                message: format!("{} failed: {}", operation, err),
                source: Some(Box::new(err)),
            },
        }
    }

    /// Sends a request and returns the body of a 2xx response
    async fn send(
        &self,
        operation: &str,
        request: reqwest_middleware::RequestBuilder,
    ) -> Result<String, PortError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::upstream_status(
                status.as_u16(),
                format!("{} returned {}", operation, status),
            ));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                PortError::timeout(operation, self.config.attempt_timeout().as_millis() as u64)
            } else {
                PortError::Transport {
                    message: format!("{} body read failed: {}", operation, e),
                    source: Some(Box::new(e)),
                }
            }
        })
    }
}

impl DomainPort for UpstreamFundSource {}

#[async_trait]
impl FundSource for UpstreamFundSource {
    fn name(&self) -> &str {
        "upstream"
    }

    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn fetch_funds(&self) -> Result<Vec<FundRecord>, PortError> {
        let body = self
            .send("fetch_funds", self.client.get(self.url("/api/funds")))
            .await?;

        let payload: FundsPayload = serde_json::from_str(&body)?;
        for record in &payload.funds {
            record
                .validate()
                .map_err(|e| PortError::parse(e.to_string()))?;
        }

        debug!(count = payload.funds.len(), "Fetched funds from upstream");
        Ok(payload.funds)
    }

    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn trigger_refresh(&self) -> Result<RefreshAck, PortError> {
        let body = self
            .send("trigger_refresh", self.client.post(self.url("/api/refresh")))
            .await?;

        Ok(RefreshAck(serde_json::from_str(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_tolerates_trailing_slash() {
        let source = UpstreamFundSource::new(UpstreamConfig {
            base_url: "http://upstream:5000/".to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap();
        assert_eq!(source.url("/api/funds"), "http://upstream:5000/api/funds");
    }

    #[test]
    fn test_attempt_timeout_shares_overall_bound() {
        let config = UpstreamConfig {
            timeout: Duration::from_secs(9),
            max_retries: 2,
            ..UpstreamConfig::default()
        };
        assert_eq!(config.attempt_timeout(), Duration::from_secs(3));

        let single = UpstreamConfig {
            max_retries: 0,
            ..config
        };
        assert_eq!(single.attempt_timeout(), Duration::from_secs(9));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_failure() {
        let source = UpstreamFundSource::new(UpstreamConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
            max_retries: 0,
        })
        .unwrap();

        let err = source.fetch_funds().await.unwrap_err();
        assert!(matches!(err, PortError::Transport { .. }), "got {:?}", err);
    }
}
