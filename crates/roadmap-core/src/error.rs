use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    UnknownDependency,
    CycleDetected,
    DuplicateNodeId,
    InvalidInput,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::UnknownDependency => "E2001",
            Self::CycleDetected => "E2003",
            Self::DuplicateNodeId => "E2004",
            Self::InvalidInput => "E2005",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::UnknownDependency => "Dependency references an unknown node",
            Self::CycleDetected => "Dependency cycle detected",
            Self::DuplicateNodeId => "Duplicate node id",
            Self::InvalidInput => "Invalid categorized content",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in the roadmap TOML config and retry."),
            Self::UnknownDependency => {
                Some("Every dependency must name a node present in the same roadmap.")
            }
            Self::CycleDetected => Some("Remove/adjust dependency links to keep the graph acyclic."),
            Self::DuplicateNodeId => Some("Give every node a unique id."),
            Self::InvalidInput => Some("Provide JSON with topic, prerequisites, coreTopics, projects and advancedTopics."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures raised while turning a node set into a laid-out roadmap.
///
/// Degenerate input (empty categories, a single node) is never an error;
/// only graphs the layering pass cannot order are rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoadmapError {
    /// The dependency graph contains a cycle. `path` starts and ends with
    /// the same node id.
    #[error("dependency cycle detected: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// A node lists a dependency id that names no node in the set.
    #[error("node '{node}' depends on unknown node '{dependency}'")]
    UnknownDependency { node: String, dependency: String },

    /// Two nodes share the same id.
    #[error("duplicate node id: '{0}'")]
    DuplicateNodeId(String),
}

impl RoadmapError {
    /// The stable [`ErrorCode`] for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::UnknownDependency { .. } => ErrorCode::UnknownDependency,
            Self::DuplicateNodeId(_) => ErrorCode::DuplicateNodeId,
        }
    }

    /// Remediation text for terminal and JSON error output.
    #[must_use]
    pub fn suggestion(&self) -> String {
        self.code()
            .hint()
            .unwrap_or_else(|| self.code().message())
            .to_string()
    }
}
