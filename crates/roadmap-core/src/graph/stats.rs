//! Diagnostic statistics for a roadmap graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **connection_count**: sizes of the built graph, with
//!   connections counted before reduction.
//! - **density**: `prerequisite_edges / (n * (n - 1))` over dependency edges.
//!   Zero for graphs with 0 or 1 node.
//! - **max_in_degree** / **max_out_degree**: widest fan-in and fan-out along
//!   dependency edges.
//! - **layer_count** / **max_layer_width**: shape of the layered layout.
//! - **seed_crossings** / **final_crossings**: adjacent-layer crossings
//!   before and after median sweeps.
//! - **rendered_edges**, **duplicates_removed**, **redundant_removed**,
//!   **truncated**: what the edge reducer did.
//! - **cycles**: strongly connected components, non-empty only when
//!   layering failed on a cycle.
//! - **layering_error**: why layering failed, if it did.
//!
//! Input that cannot be layered still yields stats: layout fields stay zero
//! and `layering_error` names the problem. For cyclic input `cycles` also
//! lists the offending groups.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use crate::config::RoadmapConfig;
use crate::error::RoadmapError;
use crate::graph::cycles::find_all_cycles;
use crate::graph::layers::LayerAssignment;
use crate::graph::reduce::reduce_connections;
use crate::layout::order::{count_crossings, minimize_crossings};
use crate::model::{Connection, LearningNode};

/// Summary statistics for one node set and its connections.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub connection_count: usize,
    pub dependency_edge_count: usize,
    pub density: f64,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub layer_count: usize,
    pub max_layer_width: usize,
    pub seed_crossings: usize,
    pub final_crossings: usize,
    pub rendered_edges: usize,
    pub duplicates_removed: usize,
    pub redundant_removed: usize,
    pub truncated: usize,
    /// Sorted member ids per dependency cycle.
    pub cycles: Vec<Vec<String>>,
    /// Message of the error that stopped layering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layering_error: Option<String>,
}

impl GraphStats {
    /// Compute statistics for `nodes` and `connections` under `config`.
    #[must_use]
    #[instrument(skip_all, fields(nodes = nodes.len()))]
    pub fn compute(
        nodes: &[LearningNode],
        connections: &[Connection],
        config: &RoadmapConfig,
    ) -> Self {
        let dependency_edge_count: usize = nodes.iter().map(|n| n.dependencies.len()).sum();
        let (max_in_degree, max_out_degree) = degree_extremes(nodes);
        let reduced = reduce_connections(connections, &config.edges);

        let mut stats = Self {
            node_count: nodes.len(),
            connection_count: connections.len(),
            dependency_edge_count,
            density: compute_density(nodes.len(), dependency_edge_count),
            max_in_degree,
            max_out_degree,
            rendered_edges: reduced.kept.len(),
            duplicates_removed: reduced.duplicates_removed,
            redundant_removed: reduced.redundant_removed,
            truncated: reduced.truncated,
            ..Self::default()
        };

        match LayerAssignment::from_nodes(nodes) {
            Ok(assignment) => {
                let ordered =
                    minimize_crossings(&assignment.layers, connections, config.layout.iterations);
                stats.layer_count = assignment.layer_count();
                stats.max_layer_width = assignment.max_width();
                stats.seed_crossings = count_crossings(&assignment.layers, connections);
                stats.final_crossings = count_crossings(&ordered, connections);
            }
            Err(err) => {
                if matches!(err, RoadmapError::CycleDetected { .. }) {
                    stats.cycles = find_all_cycles(nodes);
                }
                stats.layering_error = Some(err.to_string());
            }
        }

        stats
    }

    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_edges = node_count * (node_count - 1);
    edge_count as f64 / max_edges as f64
}

fn degree_extremes(nodes: &[LearningNode]) -> (usize, usize) {
    let mut out_degree: HashMap<&str, usize> = HashMap::new();
    for node in nodes {
        for dep in &node.dependencies {
            *out_degree.entry(dep.as_str()).or_default() += 1;
        }
    }
    let max_in = nodes.iter().map(|n| n.dependencies.len()).max().unwrap_or(0);
    let max_out = out_degree.values().copied().max().unwrap_or(0);
    (max_in, max_out)
}
