//! Presentation edge set: deduplication, transitive reduction and the
//! render cap.
//!
//! # Overview
//!
//! The builder's connection list mixes dependency edges with sequencing
//! hints, so the same `(from, to)` pair can appear twice and many edges are
//! implied by longer paths. The reducer keeps only what a renderer needs:
//!
//! 1. **Deduplication**: exact `(from, to)` pairs collapse to the first
//!    occurrence, whatever its [`ConnectionType`](crate::model::ConnectionType).
//! 2. **Transitive reduction**: an edge `from → to` is dropped when `to` is
//!    reachable from some other direct successor of `from`. Reachable sets
//!    come from a depth-first traversal and are memoized per successor in a
//!    table that lives only for one [`reduce_connections`] call.
//! 3. **Cap**: at most `max_rendered_edges` edges are kept; the rest are
//!    counted in [`ReducedEdges::truncated`] and omitted.
//!
//! Only the drawn edge set is pruned. Node `dependencies` are never touched.
//! A reduced hint may therefore disappear behind a prerequisite path; that is
//! expected.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::Dfs,
};
use tracing::{debug, instrument};

use crate::config::EdgeConfig;
use crate::model::Connection;

// ---------------------------------------------------------------------------
// ReducedEdges
// ---------------------------------------------------------------------------

/// Result of one reducer run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReducedEdges {
    /// Kept connections, in input order.
    pub kept: Vec<Connection>,
    /// Exact `(from, to)` repeats dropped in step 1.
    pub duplicates_removed: usize,
    /// Edges implied by another path, dropped in step 2.
    pub redundant_removed: usize,
    /// Non-redundant edges omitted because the cap was reached.
    pub truncated: usize,
}

impl ReducedEdges {
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated > 0
    }
}

/// Reduce `connections` to the presentation edge set.
#[must_use]
#[instrument(skip_all, fields(connections = connections.len(), cap = config.max_rendered_edges))]
pub fn reduce_connections(connections: &[Connection], config: &EdgeConfig) -> ReducedEdges {
    let (unique, duplicates_removed) = dedup_connections(connections);
    let forward = ForwardGraph::from_connections(&unique);

    let mut memo: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::new();
    let mut result = ReducedEdges {
        duplicates_removed,
        ..ReducedEdges::default()
    };

    for conn in unique {
        if forward.is_redundant(conn, &mut memo) {
            result.redundant_removed += 1;
            continue;
        }
        if result.kept.len() >= config.max_rendered_edges {
            result.truncated += 1;
            continue;
        }
        result.kept.push(conn.clone());
    }

    if result.is_truncated() {
        debug!(
            kept = result.kept.len(),
            truncated = result.truncated,
            "render cap reached, dropping remaining edges"
        );
    }
    debug!(
        kept = result.kept.len(),
        duplicates = result.duplicates_removed,
        redundant = result.redundant_removed,
        memoized = memo.len(),
        "reduced connections"
    );

    result
}

/// Keep the first connection for every `(from, to)` pair.
///
/// Returns the survivors in input order and the number of repeats dropped.
#[must_use]
pub fn dedup_connections(connections: &[Connection]) -> (Vec<&Connection>, usize) {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(connections.len());
    let unique: Vec<&Connection> = connections
        .iter()
        .filter(|conn| seen.insert(conn.endpoints()))
        .collect();
    let removed = connections.len() - unique.len();
    (unique, removed)
}

// ---------------------------------------------------------------------------
// Forward adjacency
// ---------------------------------------------------------------------------

/// Adjacency over connection endpoints, edge direction `from → to`.
struct ForwardGraph<'c> {
    graph: DiGraph<&'c str, ()>,
    index: HashMap<&'c str, NodeIndex>,
}

impl<'c> ForwardGraph<'c> {
    fn from_connections(connections: &[&'c Connection]) -> Self {
        let mut graph = DiGraph::new();
        let mut index: HashMap<&'c str, NodeIndex> = HashMap::new();

        for conn in connections {
            let (from, to) = conn.endpoints();
            let a = *index.entry(from).or_insert_with(|| graph.add_node(from));
            let b = *index.entry(to).or_insert_with(|| graph.add_node(to));
            graph.add_edge(a, b, ());
        }

        Self { graph, index }
    }

    /// `true` when `conn.to` is reachable from another successor of
    /// `conn.from`.
    fn is_redundant(
        &self,
        conn: &Connection,
        memo: &mut HashMap<NodeIndex, HashSet<NodeIndex>>,
    ) -> bool {
        let (Some(&from), Some(&to)) = (
            self.index.get(conn.from.as_str()),
            self.index.get(conn.to.as_str()),
        ) else {
            return false;
        };

        self.graph
            .neighbors_directed(from, Direction::Outgoing)
            .filter(|&mid| mid != to && mid != from)
            .any(|mid| {
                memo.entry(mid)
                    .or_insert_with(|| self.reachable_from(mid))
                    .contains(&to)
            })
    }

    /// Every node reachable from `start`, `start` included.
    fn reachable_from(&self, start: NodeIndex) -> HashSet<NodeIndex> {
        let mut reached = HashSet::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(node) = dfs.next(&self.graph) {
            reached.insert(node);
        }
        reached
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
