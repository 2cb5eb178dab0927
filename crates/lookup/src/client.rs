//! The `LookupClient` capability and shared HTTP setup.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use ceti_model::LookupResult;

use crate::error::LookupError;

/// Default per-request timeout for network sources.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Future returned by [`LookupClient::query`].
pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = LookupResult> + Send + 'a>>;

/// One external source that can tell whether a system is known.
///
/// Implementations map their own transport and payload failures to a
/// verdict; `query` never fails. Elapsed time is measured by the caller.
pub trait LookupClient: Send + Sync {
    /// Short source name used as the result key.
    fn source(&self) -> &'static str;

    /// Queries the source for a system, by name and optional address.
    fn query<'a>(&'a self, name: &'a str, address: Option<u64>) -> LookupFuture<'a>;
}

/// Builds the HTTP client shared by the network sources.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, LookupError> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ceti/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(http)
}
