//! `roadmap layers`: print the crossing-minimized layer order.

use std::path::PathBuf;

use clap::Args;
use roadmap_core::graph::build::RoadmapGraph;
use roadmap_core::{RoadmapConfig, TemplateAnnotator, layout_nodes};
use serde::Serialize;

use crate::output::{CliError, OutputMode, pretty_section, render_error, render_mode};

/// Arguments for `roadmap layers`.
#[derive(Args, Debug)]
pub struct LayersArgs {
    /// Categorized content JSON file, or `-` for stdin.
    pub input: PathBuf,
}

/// One layer of the final layout.
#[derive(Debug, Serialize)]
pub struct LayerRow {
    pub depth: usize,
    pub y: f64,
    pub nodes: Vec<String>,
}

/// Execute `roadmap layers`.
pub fn run_layers(
    args: &LayersArgs,
    output: OutputMode,
    config: &RoadmapConfig,
) -> anyhow::Result<()> {
    let content = super::load_content(&args.input, output)?;
    let mut graph = RoadmapGraph::from_content(&content, &config.builder, &TemplateAnnotator);

    let layout = match layout_nodes(&mut graph.nodes, &graph.connections, config) {
        Ok(layout) => layout,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };

    let rows: Vec<LayerRow> = layout
        .layers
        .into_iter()
        .enumerate()
        .map(|(depth, nodes)| LayerRow {
            depth,
            y: nodes
                .first()
                .and_then(|id| layout.positions.get(id))
                .map_or(0.0, |p| p.y),
            nodes,
        })
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(w, "{}  {}", row.depth, row.nodes.join(" "))?;
            }
            Ok(())
        },
        |rows, w| {
            pretty_section(w, &format!("{} layers", rows.len()))?;
            for row in rows {
                writeln!(w, "  {:>3}  y={:<8.1} {}", row.depth, row.y, row.nodes.join("  "))?;
            }
            Ok(())
        },
    )
}
