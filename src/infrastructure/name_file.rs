//! MODFLOW name file reader.
//!
//! Builds the external unit table used to resolve package unit numbers
//! and file names when loading an existing model.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{AppError, ExtUnitTable, NameFileEntry, Result};

/// Reads a name file from disk.
///
/// # Errors
/// Returns error if the file cannot be read or a unit is not an integer.
pub fn read_name_file(path: &Path) -> Result<ExtUnitTable> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open name file {}", path.display()), e))?;
    let table = parse_name_file(BufReader::new(file))?;

    tracing::debug!(path = %path.display(), entries = table.len(), "Name file read");
    Ok(table)
}

/// Parses `FTYPE UNIT FNAME [STATUS]` records.
///
/// # Errors
/// Returns error if reading fails or a unit is not an integer.
pub fn parse_name_file<R: BufRead>(reader: R) -> Result<ExtUnitTable> {
    let mut table = ExtUnitTable::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AppError::io("Failed to read name file", e))?;
        let line_no = index + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(AppError::Parse {
                line: line_no,
                message: format!("expected 'FTYPE UNIT FNAME', found '{trimmed}'"),
                source: None,
            });
        }

        let unit: i32 = tokens[1]
            .parse()
            .map_err(|e| AppError::parse_int(line_no, tokens[1], e))?;

        let entry = NameFileEntry {
            file_type: tokens[0].to_uppercase(),
            unit,
            file_name: tokens[2].to_string(),
        };

        if let Some(previous) = table.insert(entry) {
            tracing::warn!(unit, previous = %previous.file_type, "Duplicate unit in name file");
        }
    }

    Ok(table)
}
