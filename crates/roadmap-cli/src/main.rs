#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use roadmap_core::ErrorCode;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::output::{CliError, render_error};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "roadmap: layered learning-roadmap graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Roadmap TOML config (default: ./roadmap.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Generate a laid-out roadmap",
        long_about = "Build nodes and dependencies from categorized content, lay them out in layers and print the roadmap.",
        after_help = "EXAMPLES:\n    # Generate from a file\n    roadmap generate content.json\n\n    # Read from stdin, human-readable\n    cat content.json | roadmap generate - --format pretty"
    )]
    Generate(cmd::generate::GenerateArgs),

    #[command(
        about = "Show layer order",
        long_about = "Print every layer of the layout after crossing minimization.",
        after_help = "EXAMPLES:\n    roadmap layers content.json --format text"
    )]
    Layers(cmd::layers::LayersArgs),

    #[command(
        about = "Show graph statistics",
        long_about = "Print node, edge, layer, crossing and reduction counts for the generated graph.",
        after_help = "EXAMPLES:\n    roadmap stats content.json --format pretty"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ROADMAP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "roadmap_core=debug,roadmap_cli=debug,info"
        } else {
            "roadmap_core=warn,roadmap_cli=info,warn"
        })
    });

    let format = env::var("ROADMAP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let cwd = env::current_dir()?;
    let config = match roadmap_core::resolve_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(err) => {
            let code = ErrorCode::ConfigParseError;
            render_error(
                output,
                &CliError::with_details(
                    format!("{err:#}"),
                    code.hint().unwrap_or_default(),
                    code.code(),
                ),
            )?;
            return Err(err);
        }
    };
    debug!(?config, "resolved config");

    match cli.command {
        Commands::Generate(ref args) => cmd::generate::run_generate(args, output, &config),
        Commands::Layers(ref args) => cmd::layers::run_layers(args, output, &config),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output, &config),
    }
}
