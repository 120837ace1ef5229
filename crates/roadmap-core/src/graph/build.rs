//! Dependency graph synthesis from categorized content.
//!
//! # Overview
//!
//! The builder turns four buckets of outline items into [`LearningNode`]s
//! whose `dependencies` form a DAG, then derives the [`Connection`] list the
//! layout and reducer stages work on.
//!
//! ## Edge Rules
//!
//! | Node            | Depends on |
//! |-----------------|------------|
//! | start milestone | nothing |
//! | prerequisite    | start |
//! | core 0          | last prerequisite, else start |
//! | core i > 0      | core i-1 |
//! | project         | core `floor(core_count / 2)` (if any core) |
//! | advanced        | last core (if any) and first project (if any) |
//! | completion      | every content node (start when there are none) |
//!
//! Every rule references nodes that were already emitted, so the result is
//! acyclic by construction.
//!
//! ## Connections
//!
//! One `prerequisite` connection per dependency edge, followed by sequencing
//! hints between consecutive nodes of one type: `recommended` for core and
//! project nodes, `optional` for advanced nodes. Hints always point forward
//! in emission order.
//!
//! ## Content Hash
//!
//! [`RoadmapGraph::content_hash`] is a BLAKE3 hash of the input buckets. It
//! doubles as the roadmap id, so identical input yields an identical id.

#![allow(clippy::module_name_repetitions)]

use tracing::{debug, instrument};

use crate::annotate::Annotator;
use crate::config::BuilderConfig;
use crate::model::{
    CategorizedContent, Connection, ConnectionType, ContentItem, LearningNode, NodeStatus,
    NodeType,
};

/// Id of the root milestone.
pub const START_ID: &str = "start";
/// Id of the sink milestone.
pub const COMPLETE_ID: &str = "complete";

// ---------------------------------------------------------------------------
// RoadmapGraph
// ---------------------------------------------------------------------------

/// Nodes and connections produced by the builder, before layout.
#[derive(Debug, Clone)]
pub struct RoadmapGraph {
    /// Nodes in creation order.
    pub nodes: Vec<LearningNode>,
    /// Dependency connections followed by sequencing hints, possibly with
    /// duplicate endpoints.
    pub connections: Vec<Connection>,
    /// BLAKE3 content hash of the input.
    pub content_hash: String,
}

impl RoadmapGraph {
    /// Build nodes and connections for `content`.
    #[must_use]
    #[instrument(skip_all, fields(topic = %content.topic, items = content.item_count()))]
    pub fn from_content(
        content: &CategorizedContent,
        config: &BuilderConfig,
        annotator: &dyn Annotator,
    ) -> Self {
        let nodes = build_nodes(content, config, annotator);
        let connections = synthesize_connections(&nodes);
        let content_hash = compute_content_hash(content);

        debug!(
            nodes = nodes.len(),
            connections = connections.len(),
            "built roadmap graph"
        );

        Self {
            nodes,
            connections,
            content_hash,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&LearningNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

// ---------------------------------------------------------------------------
// Node emission
// ---------------------------------------------------------------------------

/// Emit all nodes for `content` with dependencies populated.
#[must_use]
pub fn build_nodes(
    content: &CategorizedContent,
    config: &BuilderConfig,
    annotator: &dyn Annotator,
) -> Vec<LearningNode> {
    let topic = milestone_topic(&content.topic);
    let mut nodes: Vec<LearningNode> = Vec::with_capacity(content.item_count() + 2);

    let mut start = milestone(
        START_ID,
        format!("Start: {topic}"),
        format!("Begin your {topic} learning journey"),
        annotator,
    );
    start.status = NodeStatus::NotStarted;
    nodes.push(start);

    let prerequisites: Vec<LearningNode> = content
        .prerequisites
        .iter()
        .enumerate()
        .map(|(i, item)| {
            content_node(NodeType::Prerequisite, i, item, annotator).with_dependencies([START_ID])
        })
        .collect();

    let mut core: Vec<LearningNode> = Vec::with_capacity(content.core_topics.len());
    for (i, item) in content.core_topics.iter().enumerate() {
        let anchor = if i == 0 {
            prerequisites
                .last()
                .map_or(START_ID, |n| n.id.as_str())
                .to_string()
        } else {
            core[i - 1].id.clone()
        };
        core.push(content_node(NodeType::Core, i, item, annotator).with_dependencies([anchor]));
    }

    let midpoint = core.get(core.len() / 2).map(|n| n.id.clone());
    let projects: Vec<LearningNode> = content
        .projects
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut node = content_node(NodeType::Project, i, item, annotator);
            match &midpoint {
                Some(id) => node.add_dependency(id.clone()),
                None if config.anchor_orphans_to_start => node.add_dependency(START_ID),
                None => {}
            }
            node
        })
        .collect();

    let last_core = core.last().map(|n| n.id.clone());
    let first_project = projects.first().map(|n| n.id.clone());
    let advanced: Vec<LearningNode> = content
        .advanced_topics
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut node = content_node(NodeType::Advanced, i, item, annotator);
            if let Some(id) = &last_core {
                node.add_dependency(id.clone());
            }
            if let Some(id) = &first_project {
                node.add_dependency(id.clone());
            }
            if node.dependencies.is_empty() && config.anchor_orphans_to_start {
                node.add_dependency(START_ID);
            }
            node
        })
        .collect();

    nodes.extend(prerequisites);
    nodes.extend(core);
    nodes.extend(projects);
    nodes.extend(advanced);

    let mut complete = milestone(
        COMPLETE_ID,
        format!("{topic} Mastery"),
        format!("You have completed the {topic} roadmap"),
        annotator,
    );
    for node in nodes.iter().filter(|n| !n.is_milestone()) {
        complete.add_dependency(node.id.clone());
    }
    if complete.dependencies.is_empty() {
        complete.add_dependency(START_ID);
    }
    nodes.push(complete);

    nodes
}

/// Derive connections from `nodes`: one `prerequisite` connection per
/// dependency edge, then same-type sequencing hints.
#[must_use]
pub fn synthesize_connections(nodes: &[LearningNode]) -> Vec<Connection> {
    let mut connections: Vec<Connection> = nodes
        .iter()
        .flat_map(|node| {
            node.dependencies
                .iter()
                .map(move |dep| Connection::prerequisite(dep.clone(), node.id.clone()))
        })
        .collect();

    for (node_type, kind) in [
        (NodeType::Core, ConnectionType::Recommended),
        (NodeType::Project, ConnectionType::Recommended),
        (NodeType::Advanced, ConnectionType::Optional),
    ] {
        let same_type: Vec<&LearningNode> =
            nodes.iter().filter(|n| n.node_type == node_type).collect();
        connections.extend(
            same_type
                .windows(2)
                .map(|pair| Connection::new(pair[0].id.clone(), pair[1].id.clone(), kind)),
        );
    }

    connections
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn milestone_topic(topic: &str) -> &str {
    let trimmed = topic.trim();
    if trimmed.is_empty() { "Learning" } else { trimmed }
}

fn milestone(
    id: &str,
    title: String,
    description: String,
    annotator: &dyn Annotator,
) -> LearningNode {
    let item = ContentItem::new(title, description);
    let annotation = annotator.annotate(&item, NodeType::Milestone);

    let mut node = LearningNode::new(id, item.title, NodeType::Milestone);
    node.description = item.description;
    node.estimated_time = annotation.estimated_time;
    node.difficulty = annotation.difficulty;
    node
}

fn content_node(
    node_type: NodeType,
    index: usize,
    item: &ContentItem,
    annotator: &dyn Annotator,
) -> LearningNode {
    let annotation = annotator.annotate(item, node_type);

    let mut node = LearningNode::new(
        format!("{}-{}", node_type.slug(), index + 1),
        item.title.clone(),
        node_type,
    );
    node.description.clone_from(&item.description);
    node.estimated_time = annotation.estimated_time;
    node.difficulty = annotation.difficulty;
    node.resources = annotation.resources;
    node.skills = annotation.skills;
    node
}

/// Compute a BLAKE3 hash over the topic and every bucket in order.
fn compute_content_hash(content: &CategorizedContent) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(content.topic.as_bytes());
    hasher.update(b"\x00");
    for (bucket, items) in [
        ("prerequisites", &content.prerequisites),
        ("core", &content.core_topics),
        ("projects", &content.projects),
        ("advanced", &content.advanced_topics),
    ] {
        hasher.update(bucket.as_bytes());
        hasher.update(b"\x01");
        for item in items {
            hasher.update(item.title.as_bytes());
            hasher.update(b"\x00");
            hasher.update(item.description.as_bytes());
            hasher.update(b"\x00");
        }
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::TemplateAnnotator;

    fn items(prefix: &str, n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| ContentItem::new(format!("{prefix} {i}"), format!("about {prefix} {i}")))
            .collect()
    }

    fn content(pre: usize, core: usize, projects: usize, advanced: usize) -> CategorizedContent {
        CategorizedContent {
            topic: "Rust".to_string(),
            prerequisites: items("pre", pre),
            core_topics: items("core", core),
            projects: items("project", projects),
            advanced_topics: items("adv", advanced),
        }
    }

    fn build(c: &CategorizedContent) -> Vec<LearningNode> {
        build_nodes(c, &BuilderConfig::default(), &TemplateAnnotator)
    }

    fn deps<'a>(nodes: &'a [LearningNode], id: &str) -> Vec<&'a str> {
        nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.dependencies.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn empty_content_yields_two_milestones() {
        let nodes = build(&content(0, 0, 0, 0));
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![START_ID, COMPLETE_ID]);
        assert_eq!(deps(&nodes, COMPLETE_ID), vec![START_ID]);
        assert_eq!(nodes[0].status, NodeStatus::NotStarted);
        assert_eq!(nodes[1].status, NodeStatus::Locked);
    }

    #[test]
    fn core_chain_without_prerequisites_starts_at_start() {
        let nodes = build(&content(0, 2, 0, 0));
        assert_eq!(deps(&nodes, "core-1"), vec![START_ID]);
        assert_eq!(deps(&nodes, "core-2"), vec!["core-1"]);
        assert_eq!(deps(&nodes, COMPLETE_ID), vec!["core-1", "core-2"]);
    }

    #[test]
    fn first_core_follows_last_prerequisite() {
        let nodes = build(&content(3, 1, 0, 0));
        for id in ["prerequisite-1", "prerequisite-2", "prerequisite-3"] {
            assert_eq!(deps(&nodes, id), vec![START_ID]);
        }
        assert_eq!(deps(&nodes, "core-1"), vec!["prerequisite-3"]);
    }

    #[test]
    fn projects_hang_off_midpoint_core() {
        let nodes = build(&content(1, 5, 2, 0));
        assert_eq!(deps(&nodes, "project-1"), vec!["core-3"]);
        assert_eq!(deps(&nodes, "project-2"), vec!["core-3"]);
    }

    #[test]
    fn advanced_depends_on_last_core_and_first_project() {
        let nodes = build(&content(1, 2, 1, 1));
        assert_eq!(deps(&nodes, "project-1"), vec!["core-2"]);
        assert_eq!(deps(&nodes, "advanced-1"), vec!["core-2", "project-1"]);
    }

    #[test]
    fn orphans_stay_unanchored_by_default() {
        let nodes = build(&content(0, 0, 1, 1));
        assert!(deps(&nodes, "project-1").is_empty());
        assert_eq!(deps(&nodes, "advanced-1"), vec!["project-1"]);

        let nodes = build(&content(0, 0, 0, 1));
        assert!(deps(&nodes, "advanced-1").is_empty());
    }

    #[test]
    fn orphans_anchor_to_start_when_configured() {
        let config = BuilderConfig {
            anchor_orphans_to_start: true,
        };
        let nodes = build_nodes(&content(0, 0, 1, 2), &config, &TemplateAnnotator);
        assert_eq!(deps(&nodes, "project-1"), vec![START_ID]);
        // project-1 exists, so advanced nodes follow it rather than start.
        assert_eq!(deps(&nodes, "advanced-1"), vec!["project-1"]);

        let nodes = build_nodes(&content(0, 0, 0, 1), &config, &TemplateAnnotator);
        assert_eq!(deps(&nodes, "advanced-1"), vec![START_ID]);
    }

    #[test]
    fn completion_never_depends_on_milestones_when_content_exists() {
        let nodes = build(&content(2, 2, 1, 1));
        let complete = deps(&nodes, COMPLETE_ID);
        assert_eq!(complete.len(), 6);
        assert!(!complete.contains(&START_ID));
    }

    #[test]
    fn dependencies_only_reference_earlier_nodes() {
        let nodes = build(&content(2, 4, 3, 2));
        for (i, node) in nodes.iter().enumerate() {
            for dep in &node.dependencies {
                let pos = nodes.iter().position(|n| &n.id == dep).expect("dep exists");
                assert!(pos < i, "{} depends on later node {dep}", node.id);
            }
        }
    }

    #[test]
    fn connections_mirror_dependencies_then_hints() {
        let nodes = build(&content(0, 3, 2, 2));
        let connections = synthesize_connections(&nodes);

        let prereq_count: usize = nodes.iter().map(|n| n.dependencies.len()).sum();
        let prereq: Vec<&Connection> = connections
            .iter()
            .take_while(|c| c.kind == ConnectionType::Prerequisite)
            .collect();
        assert_eq!(prereq.len(), prereq_count);

        let hints: Vec<(&str, &str, ConnectionType)> = connections[prereq_count..]
            .iter()
            .map(|c| (c.from.as_str(), c.to.as_str(), c.kind))
            .collect();
        assert_eq!(
            hints,
            vec![
                ("core-1", "core-2", ConnectionType::Recommended),
                ("core-2", "core-3", ConnectionType::Recommended),
                ("project-1", "project-2", ConnectionType::Recommended),
                ("advanced-1", "advanced-2", ConnectionType::Optional),
            ]
        );
    }

    #[test]
    fn content_hash_is_stable_and_input_sensitive() {
        let a = RoadmapGraph::from_content(
            &content(1, 2, 1, 1),
            &BuilderConfig::default(),
            &TemplateAnnotator,
        );
        let b = RoadmapGraph::from_content(
            &content(1, 2, 1, 1),
            &BuilderConfig::default(),
            &TemplateAnnotator,
        );
        let c = RoadmapGraph::from_content(
            &content(1, 2, 1, 2),
            &BuilderConfig::default(),
            &TemplateAnnotator,
        );
        assert!(a.content_hash.starts_with("blake3:"));
        assert_eq!(a.content_hash, b.content_hash);
        assert_ne!(a.content_hash, c.content_hash);
    }

    #[test]
    fn milestone_titles_fall_back_for_blank_topic() {
        let mut c = content(0, 0, 0, 0);
        c.topic = "   ".to_string();
        let nodes = build(&c);
        assert_eq!(nodes[0].title, "Start: Learning");
        assert_eq!(nodes[1].title, "Learning Mastery");
    }
}
