use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "roadmap.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoadmapConfig {
    #[serde(default)]
    pub builder: BuilderConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub edges: EdgeConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuilderConfig {
    /// Make projects without core topics, and advanced topics without
    /// core topics or projects, depend on the start milestone instead of
    /// floating at depth 0.
    #[serde(default)]
    pub anchor_orphans_to_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between neighbors in a layer.
    #[serde(default = "default_h_gap")]
    pub h_gap: f64,
    /// Vertical distance between layers.
    #[serde(default = "default_v_gap")]
    pub v_gap: f64,
    /// Down+up sweep rounds of crossing minimization.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            h_gap: default_h_gap(),
            v_gap: default_v_gap(),
            iterations: default_iterations(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Upper bound on connections handed to the renderer.
    #[serde(default = "default_max_rendered_edges")]
    pub max_rendered_edges: usize,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            max_rendered_edges: default_max_rendered_edges(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Frequent words appended after the topic words.
    #[serde(default = "default_tag_limit")]
    pub tag_limit: usize,
    /// Totals above this many hours are rendered in weeks.
    #[serde(default = "default_week_threshold_hours")]
    pub week_threshold_hours: u32,
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            tag_limit: default_tag_limit(),
            week_threshold_hours: default_week_threshold_hours(),
            hours_per_week: default_hours_per_week(),
        }
    }
}

/// Load a [`RoadmapConfig`] from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// this schema.
pub fn load_config(path: &Path) -> Result<RoadmapConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<RoadmapConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective config: an explicit path wins, then
/// `roadmap.toml` inside `dir`, then defaults.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be loaded.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<RoadmapConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let discovered: PathBuf = dir.join(CONFIG_FILE_NAME);
    if !discovered.exists() {
        return Ok(RoadmapConfig::default());
    }
    load_config(&discovered)
}

const fn default_h_gap() -> f64 {
    220.0
}

const fn default_v_gap() -> f64 {
    140.0
}

const fn default_iterations() -> usize {
    3
}

const fn default_max_rendered_edges() -> usize {
    160
}

const fn default_tag_limit() -> usize {
    5
}

const fn default_week_threshold_hours() -> u32 {
    40
}

const fn default_hours_per_week() -> u32 {
    10
}
