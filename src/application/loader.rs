//! Loading of existing LMT package files.
//!
//! Scans keyword directives line by line and rebuilds a [`LinkageConfig`]
//! through the normal construction path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{AppError, ExtUnitTable, LinkageConfig, LinkageOptions, ModelHost, Result};

/// Defaults applied when a directive is absent from the input.
const LOAD_DEFAULT_UNIT: i64 = 333;
const LOAD_DEFAULT_HEADER: &str = "standard";
const LOAD_DEFAULT_FORMAT: &str = "unformatted";

/// Loads an LMT package from a file on disk.
///
/// # Errors
/// Returns error if the file cannot be read, a unit number is not an
/// integer, or package registration fails.
pub fn load_file<M: ModelHost + ?Sized>(
    path: &Path,
    model: &M,
    ext_unit_table: Option<&mut ExtUnitTable>,
) -> Result<LinkageConfig> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open {}", path.display()), e))?;

    load_from_reader(
        BufReader::new(file),
        &path.to_string_lossy(),
        model,
        ext_unit_table,
    )
}

/// Loads an LMT package from an open reader.
///
/// `source_name` only seeds the default output file name
/// (`<stem>.ftl`).
///
/// # Errors
/// Returns error if reading fails, a unit number is not an integer, or
/// package registration fails.
pub fn load_from_reader<R: BufRead, M: ModelHost + ?Sized>(
    reader: R,
    source_name: &str,
    model: &M,
    ext_unit_table: Option<&mut ExtUnitTable>,
) -> Result<LinkageConfig> {
    if model.verbose() {
        tracing::info!("loading lmt package file...");
    }

    let mut options = LinkageOptions {
        output_file_name: default_output_file_name(source_name),
        output_file_unit: LOAD_DEFAULT_UNIT,
        output_file_header: LOAD_DEFAULT_HEADER.to_string(),
        output_file_format: LOAD_DEFAULT_FORMAT.to_string(),
        ..LinkageOptions::default()
    };

    for (index, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| AppError::io(format!("Failed to read {source_name}"), e))?;
        apply_directive(&mut options, index + 1, &line)?;
    }

    if let Some(table) = ext_unit_table {
        if let Some((unit, file_name)) = model.ext_unit_attr(table, LinkageConfig::file_type()) {
            tracing::debug!(unit, ?file_name, "Resolved LMT6 from external unit table");
            options.unit_number = Some(unit);
            options.filenames = vec![file_name];
        }
        if !table.is_empty() {
            tracing::debug!(remaining = table.len(), "External units left unresolved");
        }
    }

    let lmt = LinkageConfig::new(model, options)?;
    tracing::info!(source = source_name, "LMT package loaded");
    Ok(lmt)
}

/// Applies a single input line to the accumulated options.
fn apply_directive(options: &mut LinkageOptions, line_no: usize, line: &str) -> Result<()> {
    if line.starts_with('#') {
        return Ok(());
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Ok(());
    }

    match tokens[0].to_lowercase().as_str() {
        "output_file_name" => options.output_file_name = tokens[1].to_string(),
        "output_file_unit" => {
            options.output_file_unit = tokens[1]
                .parse()
                .map_err(|e| AppError::parse_int(line_no, tokens[1], e))?;
        }
        "output_file_header" => options.output_file_header = tokens[1].to_string(),
        "output_file_format" => options.output_file_format = tokens[1].to_string(),
        "package_flows" => options
            .package_flows
            .extend(tokens[1..].iter().map(|t| (*t).to_string())),
        other => tracing::debug!(line = line_no, keyword = other, "Ignoring unknown keyword"),
    }

    Ok(())
}

/// Derives `<stem>.ftl` from a source path.
fn default_output_file_name(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    format!("{stem}.ftl")
}
