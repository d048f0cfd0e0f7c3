//! DNSPod legacy API (`dnsapi.cn`) wire types.
//!
//! The legacy endpoints encode numeric fields as JSON strings; the structs
//! here keep them as strings and only name the fields the client consumes.

use serde::Deserialize;

/// `status` object attached to every response.
///
/// `code` is a string: `"1"` means success; `"10"` on `Record.List` means
/// no matching record.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseStatus {
    pub code: String,
    pub message: String,
}

/// The subset of a returned TXT record that reconciliation decisions need.
#[derive(Debug, Clone, Deserialize)]
pub struct TxtRecord {
    /// Provider-assigned record id, used for modify/remove calls.
    pub id: String,
    /// Subdomain label the record lives at.
    pub name: String,
    /// Record type as reported by the API (`TXT` for everything this
    /// client touches).
    #[serde(rename = "type")]
    pub record_type: String,
    /// TTL in seconds, string-encoded by the API.
    #[serde(default)]
    pub ttl: Option<String>,
    /// Record content.
    pub value: String,
}

/// Response payload for `Record.List`.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordListResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub records: Option<Vec<TxtRecord>>,
}

/// Response payload for `Record.Create`, `Record.Modify` and
/// `Record.Remove`; nothing beyond `status` is consumed.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusOnlyResponse {
    pub status: ResponseStatus,
}

/// Zone metadata returned by `Domain.Info`.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainInfo {
    /// Zone name as the provider knows it.
    pub name: String,
    /// Account tier the zone is served under (drives the TTL minimum the
    /// provider enforces).
    #[serde(default)]
    pub grade: Option<String>,
    /// Owning account, when the API reports it.
    #[serde(default)]
    pub owner: Option<String>,
}

/// Response payload for `Domain.Info`.
#[derive(Debug, Deserialize)]
pub(crate) struct DomainInfoResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub domain: Option<DomainInfo>,
}
