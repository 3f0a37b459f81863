//! Output formatting for loaded LMT packages.
//!
//! Supports multiple output formats: the package file text, JSON, and a table view.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use super::writer::render_package;
use crate::domain::LinkageConfig;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The package file exactly as it would be written.
    #[default]
    Text,
    /// JSON format for programmatic use.
    Json,
    /// Key/value table.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!("Unknown format: {s}. Use: text, json, table")),
        }
    }
}

/// Formats a package in the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_package(lmt: &LinkageConfig, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_package(lmt)),
        OutputFormat::Json => format_package_json(lmt),
        OutputFormat::Table => Ok(format_package_table(lmt)),
    }
}

/// Formats a package as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_package_json(lmt: &LinkageConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(lmt)
}

/// Formats a key/value table of package settings.
pub fn format_package_table(lmt: &LinkageConfig) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Setting", "Value"]);

    let flows = if lmt.package_flows.is_empty() {
        "-".to_string()
    } else {
        lmt.package_flows.join(" ")
    };

    table.add_row(vec!["File type", lmt.package.name()]);
    table.add_row(vec!["Unit number", &lmt.package.unit_number().to_string()]);
    table.add_row(vec!["File name", lmt.package.file_name()]);
    table.add_row(vec!["Package file", &lmt.fn_path().display().to_string()]);
    table.add_row(vec!["Output file name", &lmt.output_file_name]);
    table.add_row(vec!["Output file unit", &lmt.output_file_unit.to_string()]);
    table.add_row(vec!["Output file header", &lmt.output_file_header]);
    table.add_row(vec!["Output file format", &lmt.output_file_format]);
    table.add_row(vec!["Package flows", &flows]);

    table.to_string()
}

/// One-line summary printed after a file is written.
pub fn format_written(lmt: &LinkageConfig) -> String {
    format!(
        "{} Wrote {} package (unit {}) to {}",
        "✓".green().bold(),
        lmt.package.name().cyan(),
        lmt.package.unit_number(),
        lmt.fn_path().display()
    )
}
