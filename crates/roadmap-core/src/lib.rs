#![forbid(unsafe_code)]
//! roadmap-core library.
//!
//! Turns categorized learning material into a layered, laid-out roadmap
//! graph. Entry point: [`generate_roadmap`].
//!
//! # Conventions
//!
//! - **Errors**: [`RoadmapError`] for graph failures, `anyhow::Result` for
//!   config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `debug!`, `trace!`).
//! - **Determinism**: no randomness and no shared state; identical input
//!   yields identical output.

pub mod annotate;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod summary;

pub use annotate::{Annotation, Annotator, TemplateAnnotator};
pub use config::{RoadmapConfig, load_config, resolve_config};
pub use error::{ErrorCode, RoadmapError};
pub use pipeline::{generate_roadmap, layout_nodes};
