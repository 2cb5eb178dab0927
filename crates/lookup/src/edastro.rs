//! Edastro star system lookup.
//!
//! Edastro is treated as a yes/no source: every failure, including
//! non-200 responses and transport errors, reads as "not visited".

use ceti_model::{LookupResult, TRANSPORT_FAILURE_STATUS, Verdict};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::client::{LookupClient, LookupFuture};
use crate::error::LookupError;

const DEFAULT_BASE_URL: &str = "https://edastro.com";
const SOURCE: &str = "edastro";

/// Client for the Edastro star system API.
pub struct EdastroClient {
    http: reqwest::Client,
    base_url: String,
}

impl EdastroClient {
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

    /// Returns the request URL for `name`, which doubles as the link.
    pub fn system_url(&self, name: &str) -> String {
        let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC);
        format!("{}/api/starsystem?q={encoded}", self.base_url)
    }

    /// Looks a system up by name.
    pub async fn lookup(&self, name: &str) -> LookupResult {
        let url = self.system_url(name);

        match self.fetch(&url).await {
            Ok((status, known)) => LookupResult::new(SOURCE, Verdict::from(known))
                .with_status(status)
                .with_url(url),
            Err(e) => {
                tracing::warn!(system = name, error = %e, "Edastro lookup failed");
                LookupResult::new(SOURCE, Verdict::NotVisited).with_status(TRANSPORT_FAILURE_STATUS)
            }
        }
    }

    /// Returns the status and whether the payload names the system.
    async fn fetch(&self, url: &str) -> Result<(u16, bool), LookupError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if status != reqwest::StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "Edastro non-200");
            return Ok((status.as_u16(), false));
        }

        let body = resp.bytes().await?;
        let payload: serde_json::Value = serde_json::from_slice(&body)?;
        Ok((status.as_u16(), names_system(&payload)))
    }
}

/// True if the payload is an object with a non-empty `name`.
fn names_system(payload: &serde_json::Value) -> bool {
    payload
        .get("name")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|name| !name.is_empty())
}

impl LookupClient for EdastroClient {
    fn source(&self) -> &'static str {
        SOURCE
    }

    fn query<'a>(&'a self, name: &'a str, _address: Option<u64>) -> LookupFuture<'a> {
        Box::pin(self.lookup(name))
    }
}
