use serde::{Deserialize, Serialize};

/// An event extracted from the game journal or the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SystemEvent {
    /// The player targeted a system for travel.
    #[serde(rename_all = "camelCase")]
    Targeted {
        name: String,
        /// Numeric system address, when the source carries one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<u64>,
    },
    /// The galaxy map was opened.
    MapOpened,
    /// The galaxy map was closed.
    MapClosed,
}

impl SystemEvent {
    /// Convenience constructor for a target event.
    pub fn targeted(name: impl Into<String>, address: Option<u64>) -> Self {
        Self::Targeted {
            name: name.into(),
            address,
        }
    }
}
