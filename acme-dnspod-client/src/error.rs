//! Unified error type definition

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for all challenge record operations.
///
/// Transport-level failures ([`Network`](Self::Network),
/// [`Timeout`](Self::Timeout), [`Transport`](Self::Transport),
/// [`MalformedResponse`](Self::MalformedResponse)) are kept distinct from
/// provider rejections ([`Api`](Self::Api)) so callers can tell "could not
/// reach DNSPod" apart from "DNSPod refused the request". All variants are
/// serializable for structured error reporting.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code", content = "details")]
pub enum ClientError {
    /// The input domain cannot be split into a zone and a subdomain label.
    #[error("[dnspod] unable to split full domain: {domain}")]
    MalformedDomain {
        /// The rejected input.
        domain: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, etc.) before an HTTP response was received.
    #[error("[dnspod] network error, action: {action}, detail: {detail}")]
    Network {
        /// API action being requested.
        action: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[dnspod] request timeout, action: {action}, detail: {detail}")]
    Timeout {
        /// API action being requested.
        action: String,
        /// Error details.
        detail: String,
    },

    /// The provider answered with a non-2xx HTTP status.
    #[error("[dnspod] HTTP error, action: {action}, status_code: {status}")]
    Transport {
        /// API action being requested.
        action: String,
        /// HTTP status code of the response.
        status: u16,
    },

    /// The response body could not be parsed as JSON.
    #[error("[dnspod] API response with non JSON, action: {action}, content: {body}")]
    MalformedResponse {
        /// API action being requested.
        action: String,
        /// Response body, truncated to a safe length.
        body: String,
    },

    /// The provider rejected the request with a non-success status code.
    #[error("[dnspod] {operation} failed, domain: {domain}, err_code: {code}, err_msg: {message}")]
    Api {
        /// Operation that failed (e.g. "Create TXT record").
        operation: String,
        /// Fully-qualified domain the operation targeted.
        domain: String,
        /// Provider status code.
        code: String,
        /// Provider status message.
        message: String,
    },
}

impl ClientError {
    /// Whether the error reflects expected conditions (bad input, provider
    /// rejection) rather than an infrastructure fault. `true` should log at
    /// `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::MalformedDomain { .. } | Self::Api { .. })
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
