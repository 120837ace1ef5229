#![allow(clippy::cast_precision_loss)]

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use proptest::prelude::*;

use roadmap_core::config::EdgeConfig;
use roadmap_core::graph::build::RoadmapGraph;
use roadmap_core::graph::layers::LayerAssignment;
use roadmap_core::graph::reduce::reduce_connections;
use roadmap_core::model::{CategorizedContent, Connection, ContentItem};
use roadmap_core::{RoadmapConfig, TemplateAnnotator, generate_roadmap, layout_nodes};

fn arb_items(prefix: &'static str, max: usize) -> impl Strategy<Value = Vec<ContentItem>> {
    prop::collection::vec("[a-z]{3,9}( [A-Za-z]{4,8}){0,3}", 0..max).prop_map(move |titles| {
        titles
            .into_iter()
            .map(|t| ContentItem::new(t, format!("{prefix} material")))
            .collect()
    })
}

fn arb_content() -> impl Strategy<Value = CategorizedContent> {
    (
        "[A-Z][a-z]{2,8}",
        arb_items("prerequisite", 5),
        arb_items("core", 9),
        arb_items("project", 5),
        arb_items("advanced", 5),
    )
        .prop_map(|(topic, prerequisites, core_topics, projects, advanced_topics)| {
            CategorizedContent {
                topic,
                prerequisites,
                core_topics,
                projects,
                advanced_topics,
            }
        })
}

/// Random DAG edges over `n0..n11`, always pointing from lower to higher.
fn arb_dag_edges() -> impl Strategy<Value = Vec<Connection>> {
    prop::collection::vec((0usize..12, 0usize..12), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| {
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                Connection::prerequisite(format!("n{lo}"), format!("n{hi}"))
            })
            .collect()
    })
}

fn graph_of(connections: &[Connection]) -> (DiGraph<String, ()>, HashMap<String, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut index = HashMap::new();
    for id in (0..12).map(|i| format!("n{i}")) {
        let idx = graph.add_node(id.clone());
        index.insert(id, idx);
    }
    for conn in connections {
        graph.add_edge(index[&conn.from], index[&conn.to], ());
    }
    (graph, index)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn depth_increases_along_every_dependency(content in arb_content()) {
        let roadmap = generate_roadmap(&content, &RoadmapConfig::default(), &TemplateAnnotator)
            .expect("builder output is acyclic");
        let assignment = LayerAssignment::from_nodes(&roadmap.nodes).expect("layers");

        for node in &roadmap.nodes {
            let depth = assignment.depth(&node.id).expect("depth");
            for dep in &node.dependencies {
                let dep_depth = assignment.depth(dep).expect("dep depth");
                prop_assert!(dep_depth < depth, "{} at {} <= {} at {}", node.id, depth, dep, dep_depth);
            }
        }
    }

    #[test]
    fn layers_partition_the_node_set(content in arb_content()) {
        let roadmap = generate_roadmap(&content, &RoadmapConfig::default(), &TemplateAnnotator)
            .expect("generate");
        let assignment = LayerAssignment::from_nodes(&roadmap.nodes).expect("layers");

        let mut layered: Vec<&str> = assignment.layers.iter().flatten().map(String::as_str).collect();
        let mut ids: Vec<&str> = roadmap.nodes.iter().map(|n| n.id.as_str()).collect();
        layered.sort_unstable();
        ids.sort_unstable();
        prop_assert_eq!(layered, ids);
        prop_assert!(assignment.layers.iter().all(|layer| !layer.is_empty()));
    }

    #[test]
    fn every_layer_is_centered(content in arb_content()) {
        let config = RoadmapConfig::default();
        let roadmap = generate_roadmap(&content, &config, &TemplateAnnotator).expect("generate");
        let assignment = LayerAssignment::from_nodes(&roadmap.nodes).expect("layers");

        let (h, v) = (config.layout.h_gap, config.layout.v_gap);
        let mut xs_by_depth: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
        for node in &roadmap.nodes {
            let depth = assignment.depth(&node.id).expect("depth");
            prop_assert!((node.position.y - depth as f64 * v).abs() < 1e-9);
            xs_by_depth.entry(depth).or_default().push(node.position.x);
        }

        for (depth, mut xs) in xs_by_depth {
            xs.sort_by(f64::total_cmp);
            let offset = (xs.len() - 1) as f64 * h / 2.0;
            for (i, x) in xs.iter().enumerate() {
                let expected = (i as f64).mul_add(h, -offset);
                prop_assert!((x - expected).abs() < 1e-9, "depth {depth} slot {i}: {x} != {expected}");
            }
        }
    }

    #[test]
    fn returned_positions_match_layout(content in arb_content()) {
        let config = RoadmapConfig::default();
        let roadmap = generate_roadmap(&content, &config, &TemplateAnnotator).expect("generate");

        let mut graph = RoadmapGraph::from_content(&content, &config.builder, &TemplateAnnotator);
        let layout = layout_nodes(&mut graph.nodes, &graph.connections, &config).expect("layout");

        prop_assert_eq!(layout.positions.len(), roadmap.nodes.len());
        for node in &roadmap.nodes {
            let placed = layout.position(&node.id).expect("placed");
            prop_assert_eq!(node.position, placed);
        }
    }

    #[test]
    fn generation_is_deterministic(content in arb_content()) {
        let config = RoadmapConfig::default();
        let a = generate_roadmap(&content, &config, &TemplateAnnotator).expect("first");
        let b = generate_roadmap(&content, &config, &TemplateAnnotator).expect("second");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn reduction_preserves_reachability(edges in arb_dag_edges()) {
        let reduced = reduce_connections(&edges, &EdgeConfig { max_rendered_edges: usize::MAX });
        prop_assert_eq!(reduced.truncated, 0);

        let (graph, index) = graph_of(&reduced.kept);
        for conn in &edges {
            prop_assert!(
                has_path_connecting(&graph, index[&conn.from], index[&conn.to], None),
                "{} no longer reaches {}", conn.from, conn.to
            );
        }
    }

    #[test]
    fn reduction_keeps_a_subset_without_duplicates(edges in arb_dag_edges()) {
        let reduced = reduce_connections(&edges, &EdgeConfig::default());
        let mut seen = std::collections::HashSet::new();
        for conn in &reduced.kept {
            prop_assert!(edges.contains(conn));
            prop_assert!(seen.insert(conn.endpoints()));
        }
        prop_assert_eq!(
            reduced.kept.len() + reduced.duplicates_removed + reduced.redundant_removed + reduced.truncated,
            edges.len()
        );
    }
}
