//! Learning node entity.
//!
//! A [`LearningNode`] is one box in the rendered roadmap. Its `dependencies`
//! list defines the DAG (edge direction: dependency → dependent) and its
//! `position` is the only field written by the layout engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a learning node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Prerequisite,
    Core,
    Advanced,
    Project,
    Milestone,
}

impl NodeType {
    /// Seed order inside a layer before crossing minimization runs.
    ///
    /// `prerequisite < core < project < advanced < milestone`.
    #[must_use]
    pub const fn layer_priority(self) -> u8 {
        match self {
            Self::Prerequisite => 0,
            Self::Core => 1,
            Self::Project => 2,
            Self::Advanced => 3,
            Self::Milestone => 4,
        }
    }

    /// Id prefix used by the builder for nodes of this type.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Prerequisite => "prerequisite",
            Self::Core => "core",
            Self::Advanced => "advanced",
            Self::Project => "project",
            Self::Milestone => "milestone",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Progress state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStatus {
    NotStarted,
    InProgress,
    Completed,
    Locked,
}

/// Difficulty rating, ordered from easiest to hardest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// The next harder rating, saturating at [`Difficulty::Expert`].
    #[must_use]
    pub const fn step_up(self) -> Self {
        match self {
            Self::Beginner => Self::Intermediate,
            Self::Intermediate => Self::Advanced,
            Self::Advanced | Self::Expert => Self::Expert,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        };
        f.write_str(label)
    }
}

/// Kind of a suggested learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Video,
    Practice,
}

/// A suggested resource attached to a node. Opaque to layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// 2-D layout coordinate. Origin until the layout engine runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One node of the learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub status: NodeStatus,
    /// Ids of nodes that must be reached first, in insertion order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub position: Position,
}

impl LearningNode {
    /// Create a node with no dependencies and no annotations.
    ///
    /// Status defaults to [`NodeStatus::Locked`].
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            node_type,
            status: NodeStatus::Locked,
            dependencies: Vec::new(),
            estimated_time: String::new(),
            difficulty: Difficulty::default(),
            resources: Vec::new(),
            skills: Vec::new(),
            position: Position::default(),
        }
    }

    /// Builder-style setter for the dependency list.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Append a dependency unless it is already present.
    pub fn add_dependency(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.dependencies.contains(&id) {
            self.dependencies.push(id);
        }
    }

    #[must_use]
    pub fn is_milestone(&self) -> bool {
        self.node_type == NodeType::Milestone
    }
}
