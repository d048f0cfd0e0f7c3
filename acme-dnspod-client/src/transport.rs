//! HTTP transport for the form-encoded legacy API.
//!
//! The [`Transport`] trait is the seam between the reconciliation logic and
//! the network: it reports connectivity failures as errors and hands back
//! every received HTTP response (status plus body text) untouched, leaving
//! status interpretation to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ClientError, Result};
use crate::utils::truncate_body;

/// Base URL of the DNSPod legacy API; action names are appended as the path.
pub(crate) const API_BASE_URL: &str = "https://dnsapi.cn";

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raw result of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct FormResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

/// A transport able to POST a form-encoded body to a named API action.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `params` form-encoded to the endpoint for `action`.
    ///
    /// Returns an error only for connectivity failures (DNS resolution,
    /// connection refused, timeout); any received response is returned
    /// as-is, whatever its status code.
    async fn post_form(&self, action: &str, params: &[(String, String)]) -> Result<FormResponse>;
}

/// reqwest-backed [`Transport`] with connect/request timeouts and the
/// `User-Agent` the provider's usage policy requires.
pub struct HttpTransport {
    client: Client,
    user_agent: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(user_agent: String) -> Self {
        Self {
            client: create_http_client(),
            user_agent,
        }
    }
}

fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, action: &str, params: &[(String, String)]) -> Result<FormResponse> {
        let url = format!("{API_BASE_URL}/{action}");
        log::debug!("[dnspod] POST {url}");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout {
                        action: action.to_string(),
                        detail: e.to_string(),
                    }
                } else {
                    ClientError::Network {
                        action: action.to_string(),
                        detail: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        log::debug!("[dnspod] Response Status: {status}");

        let body = response.text().await.map_err(|e| ClientError::Network {
            action: action.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;
        log::debug!("[dnspod] Response Body: {}", truncate_body(&body));

        Ok(FormResponse { status, body })
    }
}
