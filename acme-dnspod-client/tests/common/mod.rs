//! Shared test helpers: a scripted, recording transport plus response
//! body builders.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use acme_dnspod_client::{
    ClientError, Credentials, DnspodClient, FormResponse, RemovalReporter, Result, Transport,
};
use async_trait::async_trait;

/// Skip an env-gated live test when credentials are missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// One call seen by the [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub action: String,
    pub params: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
    }
}

/// Transport double: answers each action from a scripted queue and records
/// every call it sees. The last scripted response for an action is sticky.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<FormResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response for `action`.
    pub fn on(self: Arc<Self>, action: &str, status: u16, body: impl Into<String>) -> Arc<Self> {
        self.responses
            .lock()
            .unwrap()
            .entry(action.to_string())
            .or_default()
            .push_back(FormResponse {
                status,
                body: body.into(),
            });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, action: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.action == action)
            .collect()
    }

    /// Calls that would change provider state.
    pub fn mutating_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c.action.as_str(),
                    "Record.Create" | "Record.Modify" | "Record.Remove"
                )
            })
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_form(&self, action: &str, params: &[(String, String)]) -> Result<FormResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            action: action.to_string(),
            params: params.to_vec(),
        });

        let mut responses = self.responses.lock().unwrap();
        let queue = responses
            .get_mut(action)
            .unwrap_or_else(|| panic!("no scripted response for action {action}"));
        assert!(!queue.is_empty(), "no scripted response for action {action}");
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap())
        } else {
            Ok(queue.front().unwrap().clone())
        }
    }
}

/// Reporter double counting swallowed removal failures.
#[derive(Default)]
pub struct CountingReporter {
    pub failures: AtomicUsize,
}

impl RemovalReporter for CountingReporter {
    fn removal_failed(&self, _full_domain: &str, _error: &ClientError) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn test_credentials() -> Credentials {
    Credentials {
        api_token: "13490,6b5976c68aba5b14a0558b77c17c3932".to_string(),
        ttl: 600,
        contact_email: "ops@example.com".to_string(),
    }
}

pub fn client_with(transport: Arc<MockTransport>) -> DnspodClient {
    DnspodClient::builder(test_credentials())
        .transport(transport)
        .build()
}

// ---- response body builders ----

pub fn ok_body() -> String {
    r#"{"status":{"code":"1","message":"Action completed successful"}}"#.to_string()
}

pub fn status_body(code: &str, message: &str) -> String {
    format!(r#"{{"status":{{"code":"{code}","message":"{message}"}}}}"#)
}

pub fn no_record_body() -> String {
    status_body("10", "No records on the list")
}

pub fn list_body(id: &str, name: &str, value: &str) -> String {
    format!(
        r#"{{"status":{{"code":"1","message":"Action completed successful"}},
            "records":[{{"id":"{id}","name":"{name}","line":"默认","type":"TXT","ttl":"600","value":"{value}","enabled":"1"}}]}}"#
    )
}

pub fn domain_info_body(name: &str, grade: &str) -> String {
    format!(
        r#"{{"status":{{"code":"1","message":"Action completed successful"}},
            "domain":{{"id":6,"name":"{name}","grade":"{grade}","owner":"ops@example.com"}}}}"#
    )
}
