//! Drawn edges between learning nodes.

use serde::{Deserialize, Serialize};

/// Why two nodes are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Mirrors one `dependencies` entry.
    Prerequisite,
    /// Synthetic sequencing hint between nodes of the same type.
    Recommended,
    /// Weaker sequencing hint; the order may be ignored.
    Optional,
}

/// A directed connection `from → to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
}

impl Connection {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: ConnectionType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    #[must_use]
    pub fn prerequisite(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, ConnectionType::Prerequisite)
    }

    /// The `(from, to)` pair used for deduplication.
    #[must_use]
    pub fn endpoints(&self) -> (&str, &str) {
        (self.from.as_str(), self.to.as_str())
    }
}
