//! Spansh system link.
//!
//! Spansh pages are keyed by the numeric system address, so the link is
//! derived locally. No request is made and no verdict is offered.

use ceti_model::{LookupResult, Verdict};

use crate::client::{LookupClient, LookupFuture};

const SYSTEM_URL_BASE: &str = "https://spansh.co.uk/system";
const SOURCE: &str = "spansh";

/// Status reported for a derived link.
const LINK_STATUS: u16 = 200;

/// Link-only source built from the system address.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanshLink;

impl SpanshLink {
    /// Returns the Spansh page for a system address.
    pub fn system_url(address: u64) -> String {
        format!("{SYSTEM_URL_BASE}/{address}")
    }

    /// Builds the result for an optional address.
    pub fn resolve(address: Option<u64>) -> LookupResult {
        let result = LookupResult::new(SOURCE, Verdict::Unknown);
        match address {
            Some(address) => result
                .with_status(LINK_STATUS)
                .with_url(Self::system_url(address)),
            None => result,
        }
    }
}

impl LookupClient for SpanshLink {
    fn source(&self) -> &'static str {
        SOURCE
    }

    fn query<'a>(&'a self, _name: &'a str, address: Option<u64>) -> LookupFuture<'a> {
        Box::pin(std::future::ready(Self::resolve(address)))
    }
}
