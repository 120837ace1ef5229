//! Whole-graph cycle report for node sets that failed layering.
//!
//! Layer assignment stops at the first cycle it walks into. This module
//! reports every strongly connected component instead, so a caller can show
//! all offending groups at once.
//!
//! # Edge Direction
//!
//! Edges run `dependency → dependent`, matching the drawn connections.
//! Dependencies naming unknown ids are skipped here; layering reports them.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::LearningNode;

/// Build the dependency graph of `nodes`.
///
/// Node weights are ids. Duplicate ids map to the first node.
#[must_use]
pub fn dependency_graph(nodes: &[LearningNode]) -> DiGraph<String, ()> {
    let mut graph = DiGraph::<String, ()>::with_capacity(nodes.len(), nodes.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        index
            .entry(node.id.as_str())
            .or_insert_with(|| graph.add_node(node.id.clone()));
    }

    for node in nodes {
        let Some(&target) = index.get(node.id.as_str()) else {
            continue;
        };
        for dep in &node.dependencies {
            if let Some(&source) = index.get(dep.as_str()) {
                graph.update_edge(source, target, ());
            }
        }
    }

    graph
}

/// Find all dependency cycles in `nodes`.
///
/// Each entry is the sorted member ids of one strongly connected component.
/// Self-dependencies are reported as one-element cycles. Output is sorted.
#[must_use]
pub fn find_all_cycles(nodes: &[LearningNode]) -> Vec<Vec<String>> {
    let graph = dependency_graph(nodes);

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|idx| graph.find_edge(*idx, *idx).is_some())
        })
        .map(|component| {
            let mut ids: Vec<String> = component
                .into_iter()
                .filter_map(|idx| graph.node_weight(idx).cloned())
                .collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeType;

    fn node(id: &str, deps: &[&str]) -> LearningNode {
        LearningNode::new(id, id, NodeType::Core).with_dependencies(deps.iter().copied())
    }

    #[test]
    fn acyclic_set_has_no_cycles() {
        let nodes = vec![node("a", &[]), node("b", &["a"]), node("c", &["a", "b"])];
        assert!(find_all_cycles(&nodes).is_empty());
    }

    #[test]
    fn reports_each_component_sorted() {
        let nodes = vec![
            node("b", &["a"]),
            node("a", &["b"]),
            node("z", &["y"]),
            node("y", &["x"]),
            node("x", &["z"]),
            node("free", &["a"]),
        ];
        assert_eq!(
            find_all_cycles(&nodes),
            vec![vec!["a", "b"], vec!["x", "y", "z"]]
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let nodes = vec![node("loop", &["loop"])];
        assert_eq!(find_all_cycles(&nodes), vec![vec!["loop"]]);
    }

    #[test]
    fn unknown_dependencies_are_skipped() {
        let nodes = vec![node("a", &["ghost"])];
        let graph = dependency_graph(&nodes);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
