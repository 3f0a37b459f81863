//! Rendering of the LMT package input file.
//!
//! The layout follows the fixed-column keyword convention read by
//! MODFLOW's LMT package: one directive per line, keyword first.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::domain::{AppError, LinkageConfig, Result};

/// Renders the package file contents.
#[must_use]
pub fn render_package(lmt: &LinkageConfig) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", lmt.heading);
    let _ = writeln!(out, "{:<20}", format!("OUTPUT_FILE_NAME {}", lmt.output_file_name));
    let _ = writeln!(out, "{:<20} {:>10}", "OUTPUT_FILE_UNIT ", lmt.output_file_unit);
    let _ = writeln!(
        out,
        "{:<20}",
        format!("OUTPUT_FILE_HEADER {}", lmt.output_file_header)
    );
    let _ = writeln!(
        out,
        "{:<20}",
        format!("OUTPUT_FILE_FORMAT {}", lmt.output_file_format)
    );

    if !lmt.package_flows.is_empty() {
        out.push_str("PACKAGE_FLOWS ");
        for flow in lmt.recognized_flows() {
            out.push_str(flow.keyword());
            out.push(' ');
        }
        out.push('\n');
    }

    out
}

/// Writes the package file contents to `writer`.
///
/// # Errors
/// Returns error if the writer fails.
pub fn write_package<W: Write>(lmt: &LinkageConfig, writer: &mut W) -> Result<()> {
    writer
        .write_all(render_package(lmt).as_bytes())
        .map_err(|e| AppError::io("Failed to write LMT package", e))
}

/// Writes the package file to its resolved path, overwriting it.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn write_package_file(lmt: &LinkageConfig) -> Result<()> {
    let path = lmt.fn_path();
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {}", path.display()), e))?;

    let mut writer = BufWriter::new(file);
    write_package(lmt, &mut writer)?;
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;

    tracing::info!(path = %path.display(), "LMT package written");
    Ok(())
}
