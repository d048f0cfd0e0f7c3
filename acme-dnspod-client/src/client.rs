//! The DNSPod challenge record client: lookup, create/modify/remove
//! decisions, and provider status-code interpretation.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::split_full_domain;
use crate::error::{ClientError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    DomainInfo, DomainInfoResponse, RecordListResponse, ResponseStatus, StatusOnlyResponse,
    TxtRecord,
};
use crate::utils::truncate_body;

/// Status code the provider uses for success.
pub(crate) const SUCCESS_CODE: &str = "1";
/// Status code on `Record.List` meaning "no matching record" (not an error).
pub(crate) const NO_RECORD_CODE: &str = "10";

const RECORD_TYPE_TXT: &str = "TXT";
/// The provider's default routing line literal.
const DEFAULT_RECORD_LINE: &str = "默认";

const USER_AGENT_PRODUCT: &str = "acme-dnspod-client";

type Params = Vec<(String, String)>;

fn param(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

/// Account configuration, loaded once by the caller and owned by the client.
///
/// The TTL is not range-checked locally; the provider enforces the minimum
/// for the account tier and rejects violations with its own error code.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Static API token (`id,token` form as issued by the provider).
    pub api_token: String,
    /// TTL in seconds applied to newly created records.
    pub ttl: u32,
    /// Contact email embedded in the `User-Agent`, required by the
    /// provider's usage policy for operator traceability.
    pub contact_email: String,
}

/// Receiver for the one failure class that is reported instead of raised:
/// a cleanup removal call the provider rejected.
pub trait RemovalReporter: Send + Sync {
    fn removal_failed(&self, full_domain: &str, error: &ClientError);
}

/// Default [`RemovalReporter`] forwarding to the `log` facade.
pub struct LogRemovalReporter;

impl RemovalReporter for LogRemovalReporter {
    fn removal_failed(&self, full_domain: &str, error: &ClientError) {
        log::error!("[dnspod] TXT record cleanup failed for {full_domain}: {error}");
    }
}

/// Client for reconciling one ACME dns-01 TXT record at a time against the
/// DNSPod legacy API.
///
/// Holds only immutable configuration; a single instance is safe to share
/// across concurrent invocations targeting independent domains. Each
/// operation reads current state fresh from the provider, so there is no
/// cache to go stale.
pub struct DnspodClient {
    transport: Arc<dyn Transport>,
    reporter: Arc<dyn RemovalReporter>,
    api_token: String,
    ttl: u32,
}

/// Builder for [`DnspodClient`], allowing the transport and the removal
/// reporter to be swapped out.
pub struct DnspodClientBuilder {
    credentials: Credentials,
    transport: Option<Arc<dyn Transport>>,
    reporter: Option<Arc<dyn RemovalReporter>>,
}

impl DnspodClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            transport: None,
            reporter: None,
        }
    }

    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn RemovalReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    #[must_use]
    pub fn build(self) -> DnspodClient {
        let transport = self.transport.unwrap_or_else(|| {
            Arc::new(HttpTransport::new(user_agent(
                &self.credentials.contact_email,
            )))
        });
        DnspodClient {
            transport,
            reporter: self.reporter.unwrap_or_else(|| Arc::new(LogRemovalReporter)),
            api_token: self.credentials.api_token,
            ttl: self.credentials.ttl,
        }
    }
}

/// `<product>/<version>(<contact email>)`, as the provider's usage policy
/// asks clients to identify themselves.
fn user_agent(contact_email: &str) -> String {
    format!(
        "{USER_AGENT_PRODUCT}/{}({contact_email})",
        env!("CARGO_PKG_VERSION")
    )
}

impl DnspodClient {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::builder(credentials).build()
    }

    #[must_use]
    pub fn builder(credentials: Credentials) -> DnspodClientBuilder {
        DnspodClientBuilder::new(credentials)
    }

    /// Converge the TXT record at `full_domain` onto `value`.
    ///
    /// Creates the record when absent, modifies it in place when its value
    /// differs (keeping the provider-side TTL), and does nothing when it
    /// already matches. Every provider or transport failure propagates:
    /// a record that cannot be converged must abort challenge issuance.
    pub async fn ensure_record(&self, full_domain: &str, value: &str) -> Result<()> {
        match self.find_record(full_domain).await? {
            Some(existing) if existing.value == value => {
                log::debug!("[dnspod] TXT record for {full_domain} already up to date");
                Ok(())
            }
            Some(existing) => self.modify_txt_record(&existing.id, full_domain, value).await,
            None => self.create_txt_record(full_domain, value).await,
        }
    }

    /// Remove the TXT record at `full_domain`, but only when its value still
    /// equals `expected_value`.
    ///
    /// Absent records and value mismatches are successful no-ops: a record
    /// this client did not put there is not this client's to delete. A
    /// provider failure on the removal call itself is handed to the
    /// [`RemovalReporter`] and swallowed; cleanup must never block the
    /// surrounding challenge flow. Lookup failures still propagate, since
    /// without current state no safe decision exists.
    pub async fn remove_record(&self, full_domain: &str, expected_value: &str) -> Result<()> {
        let Some(existing) = self.find_record(full_domain).await? else {
            log::debug!("[dnspod] no TXT record to clean up for {full_domain}");
            return Ok(());
        };

        if existing.value != expected_value {
            log::warn!(
                "[dnspod] TXT record for {full_domain} holds an unexpected value, leaving it in place"
            );
            return Ok(());
        }

        if let Err(error) = self.remove_record_by_id(&existing.id, full_domain).await {
            self.reporter.removal_failed(full_domain, &error);
        }
        Ok(())
    }

    /// Fetch the current TXT record for `full_domain`, if any.
    ///
    /// The provider's "no record" status code maps to `Ok(None)`. Exact
    /// `sub_domain` + type filters are expected to match at most one record;
    /// whether the API can ever return more here is unverified, so the first
    /// entry wins.
    pub async fn find_record(&self, full_domain: &str) -> Result<Option<TxtRecord>> {
        let parts = split_full_domain(full_domain)?;
        let params = vec![
            param("domain", parts.base_domain),
            param("sub_domain", parts.subdomain),
            param("record_type", RECORD_TYPE_TXT),
        ];

        let response: RecordListResponse = self.request("Record.List", params).await?;
        match response.status.code.as_str() {
            NO_RECORD_CODE => Ok(None),
            SUCCESS_CODE => Ok(response.records.unwrap_or_default().into_iter().next()),
            _ => Err(api_error(
                "Get TXT record info",
                full_domain,
                response.status,
            )),
        }
    }

    /// Fetch zone metadata via `Domain.Info`.
    pub async fn domain_info(&self, domain: &str) -> Result<DomainInfo> {
        let params = vec![param("domain", domain)];
        let response: DomainInfoResponse = self.request("Domain.Info", params).await?;
        if response.status.code != SUCCESS_CODE {
            return Err(api_error("Get domain info", domain, response.status));
        }
        response
            .domain
            .ok_or_else(|| ClientError::MalformedResponse {
                action: "Domain.Info".to_string(),
                body: "missing domain payload".to_string(),
            })
    }

    /// Probe whether the configured token can see `domain`.
    ///
    /// `Ok(false)` on provider rejection (bad token, foreign zone);
    /// transport-level failures propagate so callers can distinguish
    /// "rejected" from "unreachable".
    pub async fn validate_credentials(&self, domain: &str) -> Result<bool> {
        match self.domain_info(domain).await {
            Ok(_) => Ok(true),
            Err(ClientError::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_txt_record(&self, full_domain: &str, value: &str) -> Result<()> {
        let parts = split_full_domain(full_domain)?;
        let params = vec![
            param("domain", parts.base_domain),
            param("sub_domain", parts.subdomain),
            param("record_type", RECORD_TYPE_TXT),
            param("record_line", DEFAULT_RECORD_LINE),
            param("value", value),
            param("ttl", self.ttl.to_string()),
        ];

        let response: StatusOnlyResponse = self.request("Record.Create", params).await?;
        if response.status.code != SUCCESS_CODE {
            return Err(api_error("Create TXT record", full_domain, response.status));
        }
        log::info!("[dnspod] created TXT record for {full_domain}");
        Ok(())
    }

    async fn modify_txt_record(&self, record_id: &str, full_domain: &str, value: &str) -> Result<()> {
        let parts = split_full_domain(full_domain)?;
        // No ttl parameter: the provider keeps the record's prior TTL on
        // modify.
        let params = vec![
            param("domain", parts.base_domain),
            param("record_id", record_id),
            param("sub_domain", parts.subdomain),
            param("record_type", RECORD_TYPE_TXT),
            param("record_line", DEFAULT_RECORD_LINE),
            param("value", value),
        ];

        let response: StatusOnlyResponse = self.request("Record.Modify", params).await?;
        if response.status.code != SUCCESS_CODE {
            return Err(api_error("Modify TXT record", full_domain, response.status));
        }
        log::info!("[dnspod] modified TXT record for {full_domain}");
        Ok(())
    }

    async fn remove_record_by_id(&self, record_id: &str, full_domain: &str) -> Result<()> {
        let parts = split_full_domain(full_domain)?;
        let params = vec![
            param("domain", parts.base_domain),
            param("record_id", record_id),
        ];

        let response: StatusOnlyResponse = self.request("Record.Remove", params).await?;
        if response.status.code != SUCCESS_CODE {
            return Err(api_error("Remove record", full_domain, response.status));
        }
        log::info!("[dnspod] removed TXT record for {full_domain}");
        Ok(())
    }

    /// Issue one API call: append the common parameters every request
    /// carries, post the form, and map transport-level failures.
    async fn request<T: DeserializeOwned>(&self, action: &str, mut params: Params) -> Result<T> {
        params.push(param("login_token", self.api_token.clone()));
        params.push(param("format", "json"));
        params.push(param("error_on_empty", "no"));
        params.push(param("lang", "en"));

        let response = self.transport.post_form(action, &params).await?;
        if !(200..300).contains(&response.status) {
            return Err(ClientError::Transport {
                action: action.to_string(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            log::error!("[dnspod] JSON parse failed, action: {action}: {e}");
            ClientError::MalformedResponse {
                action: action.to_string(),
                body: truncate_body(&response.body),
            }
        })
    }
}

fn api_error(operation: &str, full_domain: &str, status: ResponseStatus) -> ClientError {
    ClientError::Api {
        operation: operation.to_string(),
        domain: full_domain.to_string(),
        code: status.code,
        message: status.message,
    }
}
