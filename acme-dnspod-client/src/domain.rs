//! Splitting fully-qualified names into the `(sub_domain, domain)` pair the
//! DNSPod API addresses records by.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Relative label the API uses for records at the zone apex.
pub const ROOT_LABEL: &str = "@";

/// A fully-qualified domain split into the parts the provider addresses.
///
/// When `subdomain` is not [`ROOT_LABEL`], joining the parts with a dot
/// yields the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParts {
    /// Label relative to the zone, e.g. `_acme-challenge`.
    pub subdomain: String,
    /// Registrable zone the provider manages, e.g. `example.com`.
    pub base_domain: String,
}

/// Split a full domain into `(sub_domain, base_domain)`.
///
/// Keeps at most the last three dot-separated labels:
/// `a.b.example.com` becomes `("a.b", "example.com")`,
/// `example.com` becomes `("@", "example.com")`, and anything with no dot
/// fails with [`ClientError::MalformedDomain`].
///
/// A wrong split silently targets the wrong zone, so this is the sole place
/// full names are translated.
pub fn split_full_domain(full_domain: &str) -> Result<DomainParts> {
    let mut parts: Vec<&str> = full_domain.rsplitn(3, '.').collect();
    parts.reverse();

    let (subdomain, base_domain) = match parts.as_slice() {
        [sub, domain, tld] => ((*sub).to_string(), format!("{domain}.{tld}")),
        [_, _] => (ROOT_LABEL.to_string(), full_domain.to_string()),
        _ => {
            return Err(ClientError::MalformedDomain {
                domain: full_domain.to_string(),
            });
        }
    };

    Ok(DomainParts {
        subdomain,
        base_domain,
    })
}
