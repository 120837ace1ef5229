//! One-call roadmap generation.
//!
//! ```text
//! build → connections → layers → crossing minimization → coordinates
//!       → edge reduction → summary
//! ```
//!
//! Each stage is pure; the same content and config always produce the same
//! [`Roadmap`], byte for byte once serialized.

use tracing::{debug, info, instrument};

use crate::annotate::Annotator;
use crate::config::RoadmapConfig;
use crate::error::RoadmapError;
use crate::graph::build::RoadmapGraph;
use crate::graph::layers::LayerAssignment;
use crate::graph::reduce::reduce_connections;
use crate::layout::{Layout, apply_positions};
use crate::model::{CategorizedContent, Connection, LearningNode, Roadmap};
use crate::summary::summarize;

/// Generate a laid-out roadmap from categorized content.
///
/// # Errors
///
/// The builder only emits acyclic node sets, so this fails only if a custom
/// annotator or a future builder rule breaks that guarantee. The errors are
/// those of [`LayerAssignment::from_nodes`].
#[instrument(skip_all, fields(topic = %content.topic))]
pub fn generate_roadmap(
    content: &CategorizedContent,
    config: &RoadmapConfig,
    annotator: &dyn Annotator,
) -> Result<Roadmap, RoadmapError> {
    let RoadmapGraph {
        mut nodes,
        connections,
        content_hash,
    } = RoadmapGraph::from_content(content, &config.builder, annotator);

    let layout = layout_nodes(&mut nodes, &connections, config)?;
    let reduced = reduce_connections(&connections, &config.edges);
    let metadata = summarize(content, &nodes, &config.summary);

    info!(
        nodes = nodes.len(),
        layers = layout.layers.len(),
        edges = reduced.kept.len(),
        "generated roadmap"
    );

    Ok(Roadmap {
        id: content_hash,
        title: roadmap_title(&content.topic),
        topic: content.topic.clone(),
        nodes,
        connections: reduced.kept,
        metadata,
    })
}

/// Lay out a caller-provided node set in place and return the layout.
///
/// # Errors
///
/// - [`RoadmapError::DuplicateNodeId`] if two nodes share an id.
/// - [`RoadmapError::UnknownDependency`] if a dependency names no node.
/// - [`RoadmapError::CycleDetected`] if the dependencies contain a cycle.
#[instrument(skip_all, fields(nodes = nodes.len(), connections = connections.len()))]
pub fn layout_nodes(
    nodes: &mut [LearningNode],
    connections: &[Connection],
    config: &RoadmapConfig,
) -> Result<Layout, RoadmapError> {
    let assignment = LayerAssignment::from_nodes(nodes)?;
    let layout = Layout::compute(&assignment.layers, connections, &config.layout);
    apply_positions(nodes, &layout.positions);
    debug!(max_width = assignment.max_width(), "applied positions");
    Ok(layout)
}

fn roadmap_title(topic: &str) -> String {
    let topic = topic.trim();
    if topic.is_empty() {
        "Learning Roadmap".to_string()
    } else {
        format!("{topic} Learning Roadmap")
    }
}
