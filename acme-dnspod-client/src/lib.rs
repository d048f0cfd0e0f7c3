//! # acme-dnspod-client
//!
//! A client for fulfilling ACME dns-01 challenges against the DNSPod legacy
//! API (`dnsapi.cn`): it converges the `_acme-challenge` TXT record for a
//! fully-qualified name onto a validation token, and removes it again once
//! validation is done.
//!
//! The client is deliberately narrow. It manages a single TXT record per
//! call, decides create vs. modify vs. no-op by comparing the desired value
//! with what the provider currently serves, and refuses to delete records
//! whose value it does not recognize.
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS
//!   implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use acme_dnspod_client::{Credentials, DnspodClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DnspodClient::new(Credentials {
//!         api_token: "13490,6b5976c68aba5b14a0558b77c17c3932".to_string(),
//!         ttl: 600,
//!         contact_email: "ops@example.com".to_string(),
//!     });
//!
//!     // Challenge issuance: make the validation token resolvable.
//!     client
//!         .ensure_record("_acme-challenge.example.com", "token-value")
//!         .await?;
//!
//!     // Challenge cleanup: best-effort, never blocks the ACME flow.
//!     client
//!         .remove_record("_acme-challenge.example.com", "token-value")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError). Transport
//! failures (unreachable provider, non-2xx status, unparsable body) stay
//! distinct from provider rejections, and every provider rejection carries
//! the full domain plus the provider's own code and message, so
//! misconfiguration (wrong token, locked domain, rate limits) is diagnosable
//! from the error alone. The client never retries; callers that want retry
//! policy layer it on top.

mod client;
mod domain;
mod error;
mod transport;
mod types;
mod utils;

pub use client::{
    Credentials, DnspodClient, DnspodClientBuilder, LogRemovalReporter, RemovalReporter,
};
pub use domain::{DomainParts, ROOT_LABEL, split_full_domain};
pub use error::{ClientError, Result};
pub use transport::{FormResponse, HttpTransport, Transport};
pub use types::{DomainInfo, TxtRecord};
