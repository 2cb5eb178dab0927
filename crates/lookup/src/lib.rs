//! Star system lookup clients.
//!
//! Each client answers one question for one data source: has this system
//! been visited (i.e. is it known to the source)? Clients never fail;
//! transport and payload problems are folded into the returned
//! [`LookupResult`] according to the source's own policy.
//!
//! | Source  | Network | Failure policy                       |
//! |---------|---------|--------------------------------------|
//! | EDSM    | yes     | transport/payload error → `Unknown`  |
//! | Edastro | yes     | any error or non-200 → `NotVisited`  |
//! | Spansh  | no      | always `Unknown`, link only          |

pub mod client;
pub mod edastro;
pub mod edsm;
pub mod error;
pub mod spansh;

#[cfg(test)]
pub(crate) mod mock;

pub use ceti_model::{LookupResult, Verdict};
pub use client::{DEFAULT_TIMEOUT, LookupClient, LookupFuture, http_client};
pub use edastro::EdastroClient;
pub use edsm::EdsmClient;
pub use error::LookupError;
pub use spansh::SpanshLink;

/// Returns the standard client set in query order. EDSM is the primary.
pub fn default_clients(http: &reqwest::Client) -> Vec<Box<dyn LookupClient>> {
    vec![
        Box::new(EdsmClient::new(http.clone())),
        Box::new(EdastroClient::new(http.clone())),
        Box::new(SpanshLink),
    ]
}
