//! Topological depth and layer grouping.
//!
//! # Definitions
//!
//! | Term    | Definition |
//! |---------|------------|
//! | `depth` | 0 for a node without dependencies, else `1 + max(depth(dep))`. |
//! | layer k | every node whose depth is `k`, for `k` in `0..=max_depth`. |
//!
//! Depth strictly increases along every dependency edge, so drawing layer
//! `k` at `y = k * v_gap` makes every dependency point downward.
//!
//! # Algorithm
//!
//! Depths are memoized per id and computed by an explicit-stack DFS over
//! `dependencies` (no recursion, so long chains cannot overflow the stack).
//! Each node is marked *visiting* while it is on the stack; reaching a
//! visiting node again means the input has a cycle and the computation
//! fails with [`RoadmapError::CycleDetected`]. The builder never produces a
//! cycle, but node sets handed in from elsewhere are checked the same way.
//!
//! # Seed Order
//!
//! Within a layer nodes are sorted by [`NodeType::layer_priority`], then by
//! id. That order seeds crossing minimization.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::error::RoadmapError;
use crate::model::{LearningNode, NodeType};

// ---------------------------------------------------------------------------
// LayerAssignment
// ---------------------------------------------------------------------------

/// Depth per node plus the seed-ordered layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerAssignment {
    /// Depth keyed by node id.
    pub depths: HashMap<String, usize>,
    /// `layers[k]` holds the ids at depth `k` in seed order.
    pub layers: Vec<Vec<String>>,
}

impl LayerAssignment {
    /// Compute depths and layers for `nodes`.
    ///
    /// # Errors
    ///
    /// - [`RoadmapError::DuplicateNodeId`] if two nodes share an id.
    /// - [`RoadmapError::UnknownDependency`] if a dependency names no node.
    /// - [`RoadmapError::CycleDetected`] if the dependencies contain a cycle.
    #[instrument(skip_all, fields(nodes = nodes.len()))]
    pub fn from_nodes(nodes: &[LearningNode]) -> Result<Self, RoadmapError> {
        let depths = compute_depths(nodes)?;
        let layers = group_layers(nodes, &depths);
        debug!(layers = layers.len(), "assigned layers");
        Ok(Self { depths, layers })
    }

    #[must_use]
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.depths.get(id).copied()
    }

    /// Number of layers (`max_depth + 1`, or 0 for an empty node set).
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Largest depth, `None` for an empty node set.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.layers.len().checked_sub(1)
    }

    /// Size of the widest layer.
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.layers.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Depth computation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Mark {
    Visiting,
    Done(usize),
}

/// Compute the topological depth of every node.
///
/// # Errors
///
/// See [`LayerAssignment::from_nodes`].
pub fn compute_depths(nodes: &[LearningNode]) -> Result<HashMap<String, usize>, RoadmapError> {
    let index = index_nodes(nodes)?;
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(nodes.len());

    for root in nodes {
        if marks.contains_key(root.id.as_str()) {
            continue;
        }

        // (node id, index of the next dependency to visit)
        let mut stack: Vec<(&str, usize)> = vec![(root.id.as_str(), 0)];
        marks.insert(root.id.as_str(), Mark::Visiting);

        while let Some(&(current, next)) = stack.last() {
            let deps = dependencies_of(&index, current);

            if let Some(dep) = deps.get(next) {
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }
                let dep = dep.as_str();
                if !index.contains_key(dep) {
                    return Err(RoadmapError::UnknownDependency {
                        node: current.to_string(),
                        dependency: dep.to_string(),
                    });
                }
                match marks.get(dep) {
                    Some(Mark::Done(_)) => {}
                    Some(Mark::Visiting) => return Err(cycle_error(&stack, dep)),
                    None => {
                        marks.insert(dep, Mark::Visiting);
                        stack.push((dep, 0));
                    }
                }
                continue;
            }

            let depth = deps
                .iter()
                .filter_map(|d| match marks.get(d.as_str()) {
                    Some(Mark::Done(depth)) => Some(*depth),
                    _ => None,
                })
                .max()
                .map_or(0, |m| m + 1);
            marks.insert(current, Mark::Done(depth));
            stack.pop();
        }
    }

    Ok(marks
        .into_iter()
        .filter_map(|(id, mark)| match mark {
            Mark::Done(depth) => Some((id.to_string(), depth)),
            Mark::Visiting => None,
        })
        .collect())
}

/// Group nodes into layers by depth, each sorted into seed order.
///
/// Nodes missing from `depths` are skipped.
#[must_use]
pub fn group_layers(nodes: &[LearningNode], depths: &HashMap<String, usize>) -> Vec<Vec<String>> {
    let Some(max_depth) = depths.values().copied().max() else {
        return Vec::new();
    };

    let mut layers: Vec<Vec<&LearningNode>> = vec![Vec::new(); max_depth + 1];
    for node in nodes {
        if let Some(&depth) = depths.get(&node.id) {
            layers[depth].push(node);
        }
    }

    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by(|a, b| seed_key(a.node_type, &a.id).cmp(&seed_key(b.node_type, &b.id)));
            layer.into_iter().map(|n| n.id.clone()).collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn seed_key(node_type: NodeType, id: &str) -> (u8, &str) {
    (node_type.layer_priority(), id)
}

fn index_nodes(nodes: &[LearningNode]) -> Result<HashMap<&str, &LearningNode>, RoadmapError> {
    let mut index: HashMap<&str, &LearningNode> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if index.insert(node.id.as_str(), node).is_some() {
            return Err(RoadmapError::DuplicateNodeId(node.id.clone()));
        }
    }
    Ok(index)
}

fn dependencies_of<'a>(index: &HashMap<&str, &'a LearningNode>, id: &str) -> &'a [String] {
    index
        .get(id)
        .copied()
        .map_or(&[][..], |node| node.dependencies.as_slice())
}

/// Build the cycle path `dep -> ... -> current -> dep` from the DFS stack.
fn cycle_error(stack: &[(&str, usize)], dep: &str) -> RoadmapError {
    let start = stack.iter().position(|(id, _)| *id == dep).unwrap_or(0);
    let mut path: Vec<String> = stack[start..].iter().map(|(id, _)| (*id).to_string()).collect();
    path.push(dep.to_string());
    RoadmapError::CycleDetected { path }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
