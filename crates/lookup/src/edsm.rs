//! EDSM (Elite Dangerous Star Map) system lookup.
//!
//! The primary source. EDSM answers a name query with an array of
//! matching systems, or with an empty array / empty object when the
//! system is unknown.

use ceti_model::{LookupResult, TRANSPORT_FAILURE_STATUS, Verdict};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::client::{LookupClient, LookupFuture};
use crate::error::LookupError;

const DEFAULT_BASE_URL: &str = "https://www.edsm.net";
const SOURCE: &str = "edsm";

/// One system record from the EDSM systems endpoint.
#[derive(Debug, Deserialize)]
struct SystemRecord {
    #[serde(default)]
    id: Option<u64>,
}

/// EDSM returns `[]`, `{}` or `null` for an unknown system.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SystemsPayload {
    Records(Vec<SystemRecord>),
    Empty(serde_json::Map<String, serde_json::Value>),
    Null,
}

/// Parsed answer of one systems query.
#[derive(Debug)]
struct Answer {
    status: u16,
    /// `Some` when at least one record matched.
    record_id: Option<Option<u64>>,
}

/// Client for the EDSM systems API.
pub struct EdsmClient {
    http: reqwest::Client,
    base_url: String,
}

impl EdsmClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different host (mirrors, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Returns the browsable system page for `name`.
    pub fn system_url(&self, name: &str) -> String {
        let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC);
        format!("{}/en/system?systemName={encoded}", self.base_url)
    }

    /// Looks a system up by name.
    pub async fn lookup(&self, name: &str) -> LookupResult {
        let url = self.system_url(name);

        match self.fetch(name).await {
            Ok(Answer {
                status,
                record_id: Some(id),
            }) => {
                let result = LookupResult::new(SOURCE, Verdict::Visited)
                    .with_status(status)
                    .with_url(url);
                match id {
                    Some(id) => result.with_reference_id(id),
                    None => result,
                }
            }
            Ok(Answer {
                status,
                record_id: None,
            }) => LookupResult::new(SOURCE, Verdict::NotVisited)
                .with_status(status)
                .with_url(url),
            Err(e) => {
                tracing::warn!(system = name, error = %e, "EDSM lookup failed");
                LookupResult::new(SOURCE, Verdict::Unknown)
                    .with_status(TRANSPORT_FAILURE_STATUS)
                    .with_url(url)
            }
        }
    }

    async fn fetch(&self, name: &str) -> Result<Answer, LookupError> {
        let endpoint = format!("{}/api-v1/systems", self.base_url);
        let resp = self
            .http
            .get(&endpoint)
            .query(&[("systemName", name), ("showId", "1")])
            .send()
            .await?;
        let status = resp.status();

        if status != reqwest::StatusCode::OK {
            tracing::debug!(system = name, status = status.as_u16(), "EDSM non-200");
            return Ok(Answer {
                status: status.as_u16(),
                record_id: None,
            });
        }

        let body = resp.bytes().await?;
        let payload: SystemsPayload = serde_json::from_slice(&body)?;
        let record_id = match payload {
            SystemsPayload::Records(records) => records.into_iter().next().map(|r| r.id),
            SystemsPayload::Empty(_) | SystemsPayload::Null => None,
        };

        Ok(Answer {
            status: status.as_u16(),
            record_id,
        })
    }
}

impl LookupClient for EdsmClient {
    fn source(&self) -> &'static str {
        SOURCE
    }

    fn query<'a>(&'a self, name: &'a str, _address: Option<u64>) -> LookupFuture<'a> {
        Box::pin(self.lookup(name))
    }
}
