//! The aggregate produced by one generation call.

use serde::{Deserialize, Serialize};

use super::{Connection, Difficulty, LearningNode};

/// Derived statistics over the finished node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapMetadata {
    pub total_nodes: usize,
    /// Rendered duration, e.g. `"12 hours"` or `"9 weeks"`.
    pub estimated_duration: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    /// Percentage of completed nodes, `0..=100`.
    pub completion_rate: u32,
}

/// A laid-out learning roadmap.
///
/// `nodes` keep creation order, not layout order. `connections` is the
/// reduced presentation set; the full dependency graph stays available via
/// each node's `dependencies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    /// Content hash of the input (`blake3:` prefix).
    pub id: String,
    pub title: String,
    pub topic: String,
    pub nodes: Vec<LearningNode>,
    pub connections: Vec<Connection>,
    pub metadata: RoadmapMetadata,
}

impl Roadmap {
    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&LearningNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
