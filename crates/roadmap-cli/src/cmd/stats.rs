//! `roadmap stats`: graph diagnostics.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use roadmap_core::graph::GraphStats;
use roadmap_core::graph::build::RoadmapGraph;
use roadmap_core::{RoadmapConfig, TemplateAnnotator};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadmap stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Categorized content JSON file, or `-` for stdin.
    pub input: PathBuf,
}

/// Execute `roadmap stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode, config: &RoadmapConfig) -> anyhow::Result<()> {
    let content = super::load_content(&args.input, output)?;
    let graph = RoadmapGraph::from_content(&content, &config.builder, &TemplateAnnotator);
    let stats = GraphStats::compute(&graph.nodes, &graph.connections, config);

    render_mode(output, &stats, render_text, render_pretty)
}

fn render_text(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "nodes={} connections={} layers={} width={} crossings={}->{} rendered={} cycles={}",
        stats.node_count,
        stats.connection_count,
        stats.layer_count,
        stats.max_layer_width,
        stats.seed_crossings,
        stats.final_crossings,
        stats.rendered_edges,
        stats.cycles.len()
    )?;
    if let Some(err) = &stats.layering_error {
        writeln!(w, "error={err}")?;
    }
    Ok(())
}

fn render_pretty(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph")?;
    pretty_kv(w, "Nodes", stats.node_count.to_string())?;
    pretty_kv(w, "Connections", stats.connection_count.to_string())?;
    pretty_kv(w, "Dependency edges", stats.dependency_edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.3}", stats.density))?;
    pretty_kv(w, "Max in-degree", stats.max_in_degree.to_string())?;
    pretty_kv(w, "Max out-degree", stats.max_out_degree.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Layout")?;
    pretty_kv(w, "Layers", stats.layer_count.to_string())?;
    if let Some(err) = &stats.layering_error {
        pretty_kv(w, "Layering failed", err)?;
    }
    pretty_kv(w, "Widest layer", stats.max_layer_width.to_string())?;
    pretty_kv(
        w,
        "Crossings",
        format!("{} -> {}", stats.seed_crossings, stats.final_crossings),
    )?;
    writeln!(w)?;

    pretty_section(w, "Edges")?;
    pretty_kv(w, "Rendered", stats.rendered_edges.to_string())?;
    pretty_kv(w, "Duplicates", stats.duplicates_removed.to_string())?;
    pretty_kv(w, "Redundant", stats.redundant_removed.to_string())?;
    pretty_kv(w, "Truncated", stats.truncated.to_string())?;

    if stats.has_cycles() {
        writeln!(w)?;
        pretty_section(w, "Cycles")?;
        for cycle in &stats.cycles {
            writeln!(w, "  {}", cycle.join(", "))?;
        }
    }
    Ok(())
}
