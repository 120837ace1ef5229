pub mod generate;
pub mod layers;
pub mod stats;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use roadmap_core::ErrorCode;
use roadmap_core::model::CategorizedContent;

use crate::output::{CliError, OutputMode, render_error};

/// Read categorized content JSON from `input`, or from stdin when `input`
/// is `-`.
///
/// Malformed input is reported through the output layer before the error
/// is returned.
pub fn load_content(input: &Path, output: OutputMode) -> anyhow::Result<CategorizedContent> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read content from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    match serde_json::from_str::<CategorizedContent>(&raw) {
        Ok(content) => Ok(content),
        Err(err) => {
            let code = ErrorCode::InvalidInput;
            render_error(
                output,
                &CliError::with_details(
                    format!("{}: {err}", code.message()),
                    code.hint().unwrap_or_default(),
                    code.code(),
                ),
            )?;
            anyhow::bail!("invalid content in {}", input.display())
        }
    }
}
