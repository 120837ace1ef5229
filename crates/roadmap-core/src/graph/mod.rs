//! Dependency graph construction, layering and presentation reduction.
//!
//! # Overview
//!
//! Nodes reference their dependencies by id. This module turns categorized
//! content into such a node set, assigns every node a topological depth and
//! derives the edge set a renderer should draw.
//!
//! ## Pipeline
//!
//! ```text
//! CategorizedContent
//!        ↓  build::RoadmapGraph::from_content()
//! RoadmapGraph (nodes + raw connections + content hash)
//!        ↓  layers::LayerAssignment::from_nodes()
//! LayerAssignment (depth per id, seed-ordered layers)
//!        ↓  crate::layout
//! positions
//!        ↓  reduce::reduce_connections()
//! ReducedEdges (deduplicated, transitively reduced, capped)
//! ```
//!
//! [`stats::GraphStats`] and [`cycles::find_all_cycles`] are diagnostics on
//! top of the same pieces.
//!
//! ## Content Hash
//!
//! [`RoadmapGraph::content_hash`] is a BLAKE3 hash of the input buckets and
//! serves as the roadmap id.

pub mod build;
pub mod cycles;
pub mod layers;
pub mod reduce;
pub mod stats;

pub use build::{COMPLETE_ID, RoadmapGraph, START_ID};
pub use cycles::find_all_cycles;
pub use layers::LayerAssignment;
pub use reduce::{ReducedEdges, reduce_connections};
pub use stats::GraphStats;
