//! Credentials file loading.
//!
//! The file is `key = value` lines with `#` comments:
//!
//! ```ini
//! # DNSPod API credentials
//! api_token = 13490,6b5976c68aba5b14a0558b77c17c3932
//! ttl = 600
//! contact_email = ops@example.com
//! ```

use std::fs;
use std::path::Path;

use acme_dnspod_client::Credentials;
use anyhow::{Context, Result, bail};

/// Applied when the file does not set a TTL. The provider enforces its
/// per-tier minimum either way.
const DEFAULT_TTL: u32 = 600;

/// Read and parse the credentials file at `path`.
pub fn load(path: &Path) -> Result<Credentials> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read credentials file {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid credentials file {}", path.display()))
}

fn parse(content: &str) -> Result<Credentials> {
    let mut api_token = None;
    let mut contact_email = None;
    let mut ttl = DEFAULT_TTL;

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            bail!("line {}: expected key = value", index + 1);
        };
        let value = value.trim();
        match key.trim() {
            "api_token" => api_token = Some(value.to_string()),
            "contact_email" => contact_email = Some(value.to_string()),
            "ttl" => {
                ttl = value
                    .parse()
                    .with_context(|| format!("line {}: ttl must be an integer", index + 1))?;
            }
            other => bail!("line {}: unknown key '{other}'", index + 1),
        }
    }

    let Some(api_token) = api_token.filter(|v| !v.is_empty()) else {
        bail!("missing api_token");
    };
    let Some(contact_email) = contact_email.filter(|v| !v.is_empty()) else {
        bail!("missing contact_email");
    };

    Ok(Credentials {
        api_token,
        ttl,
        contact_email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_file() {
        let creds = parse(
            "# comment\n\
             api_token = 13490,abcdef\n\
             ttl = 3600\n\
             contact_email = ops@example.com\n",
        )
        .unwrap();
        assert_eq!(creds.api_token, "13490,abcdef");
        assert_eq!(creds.ttl, 3600);
        assert_eq!(creds.contact_email, "ops@example.com");
    }

    #[test]
    fn ttl_defaults_when_absent() {
        let creds = parse("api_token = t\ncontact_email = e@x.com\n").unwrap();
        assert_eq!(creds.ttl, DEFAULT_TTL);
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let creds = parse("\n# a\n  \napi_token = t\n# b\ncontact_email = e@x.com\n").unwrap();
        assert_eq!(creds.api_token, "t");
    }

    #[test]
    fn missing_api_token_is_an_error() {
        let err = parse("contact_email = e@x.com\n").unwrap_err();
        assert!(err.to_string().contains("api_token"));
    }

    #[test]
    fn empty_api_token_is_an_error() {
        let err = parse("api_token =\ncontact_email = e@x.com\n").unwrap_err();
        assert!(err.to_string().contains("api_token"));
    }

    #[test]
    fn missing_contact_email_is_an_error() {
        let err = parse("api_token = t\n").unwrap_err();
        assert!(err.to_string().contains("contact_email"));
    }

    #[test]
    fn non_numeric_ttl_is_an_error() {
        let err = parse("api_token = t\ncontact_email = e@x.com\nttl = soon\n").unwrap_err();
        assert!(err.to_string().contains("ttl"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("api_token = t\nsecret = nope\n").unwrap_err();
        assert!(err.to_string().contains("unknown key"));
    }

    #[test]
    fn lines_without_equals_are_rejected() {
        let err = parse("api_token\n").unwrap_err();
        assert!(err.to_string().contains("key = value"));
    }
}
