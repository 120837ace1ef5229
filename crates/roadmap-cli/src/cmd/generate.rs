//! `roadmap generate`: build and lay out a full roadmap.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use roadmap_core::model::Roadmap;
use roadmap_core::{RoadmapConfig, TemplateAnnotator, generate_roadmap};
use tracing::instrument;

use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `roadmap generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Categorized content JSON file, or `-` for stdin.
    pub input: PathBuf,
}

/// Execute `roadmap generate`.
#[instrument(skip_all, fields(input = %args.input.display()))]
pub fn run_generate(
    args: &GenerateArgs,
    output: OutputMode,
    config: &RoadmapConfig,
) -> anyhow::Result<()> {
    let content = super::load_content(&args.input, output)?;

    let roadmap = match generate_roadmap(&content, config, &TemplateAnnotator) {
        Ok(roadmap) => roadmap,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };

    render_mode(output, &roadmap, render_text, render_pretty)
}

fn render_text(roadmap: &Roadmap, w: &mut dyn Write) -> std::io::Result<()> {
    for node in &roadmap.nodes {
        writeln!(
            w,
            "{}  {}  {:.1},{:.1}  {}",
            node.id, node.node_type, node.position.x, node.position.y, node.title
        )?;
    }
    for conn in &roadmap.connections {
        writeln!(w, "{} -> {}", conn.from, conn.to)?;
    }
    Ok(())
}

fn render_pretty(roadmap: &Roadmap, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &roadmap.title)?;
    pretty_kv(w, "Id", &roadmap.id)?;
    pretty_kv(w, "Nodes", roadmap.metadata.total_nodes.to_string())?;
    pretty_kv(w, "Edges", roadmap.connections.len().to_string())?;
    pretty_kv(w, "Duration", &roadmap.metadata.estimated_duration)?;
    pretty_kv(w, "Difficulty", roadmap.metadata.difficulty.to_string())?;
    pretty_kv(w, "Tags", roadmap.metadata.tags.join(", "))?;
    writeln!(w)?;

    pretty_section(w, "Nodes")?;
    for node in &roadmap.nodes {
        writeln!(
            w,
            "  {:<16} {:<12} ({:>7.1}, {:>7.1})  {}",
            node.id, node.node_type, node.position.x, node.position.y, node.title
        )?;
        if !node.dependencies.is_empty() {
            writeln!(w, "  {:<16} after {}", "", node.dependencies.join(", "))?;
        }
    }
    Ok(())
}
