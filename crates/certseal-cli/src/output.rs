//! Output Formatting
//!
//! Renders lookup answers. Plaintext from `decrypt` is written untouched.

use serde_yaml::Value;

use crate::commands::OutputFormat;
use crate::error::{CliError, CliResult};

/// Render a value as YAML or pretty JSON, always ending in a newline
pub fn render(value: &Value, format: OutputFormat) -> CliResult<String> {
    let mut text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(CliError::format)?,
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(CliError::format)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}
