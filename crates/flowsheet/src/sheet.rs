//! Reading process steps out of a workbook column.
//!
//! The first row of the sheet is a header. Every row after it contributes one
//! optional step value taken from a fixed column; blank cells become `None`
//! so the builder can break the chain there.

use crate::error::{Error, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Number of leading header rows ignored when collecting steps.
pub const HEADER_ROWS: u32 = 1;

/// Read the step values of `column` in `sheet` from the workbook at `path`.
///
/// Any format `calamine` understands is accepted (`.xlsx`, `.xlsm`, `.xls`,
/// `.ods`). The returned vector has one entry per sheet row after the header,
/// up to and including the last used row.
///
/// # Errors
///
/// - [`Error::InputNotFound`] if `path` does not exist
/// - [`Error::SheetNotFound`] if the workbook has no sheet named `sheet`
/// - [`Error::Spreadsheet`] if the workbook cannot be opened or parsed
pub fn read_steps(path: &Path, sheet: &str, column: u32) -> Result<Vec<Option<String>>> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| Error::Spreadsheet(e.to_string()))?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(Error::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| Error::Spreadsheet(e.to_string()))?;

    let steps = steps_from_range(&range, column);
    tracing::debug!(
        path = %path.display(),
        sheet,
        column,
        rows = steps.len(),
        "Read step column"
    );
    Ok(steps)
}

/// Collect the step values of `column` from an already-loaded sheet range.
///
/// Rows are addressed by absolute sheet position, so a range whose used area
/// starts below row 0 still treats row 0 as the header.
pub fn steps_from_range(range: &Range<Data>, column: u32) -> Vec<Option<String>> {
    let Some((last_row, _)) = range.end() else {
        return Vec::new();
    };

    (HEADER_ROWS..=last_row)
        .map(|row| range.get_value((row, column)).and_then(cell_label))
        .collect()
}

/// Convert a cell into a node label, or `None` if the cell is blank.
///
/// Only truly blank cells and empty strings count as blank; a cell holding
/// whitespace is a real step.
pub fn cell_label(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parse a column reference given either as a zero-based index (`"1"`) or as
/// spreadsheet letters (`"B"`, `"aa"`).
///
/// # Errors
///
/// Returns [`Error::Config`] for anything that is neither form.
pub fn parse_column(s: &str) -> Result<u32> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::Config("Column cannot be empty".to_string()));
    }

    if let Ok(index) = s.parse::<u32>() {
        return Ok(index);
    }

    if !s.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::Config(format!(
            "Invalid column '{s}': expected a zero-based index or letters like 'B'"
        )));
    }

    // Bijective base-26: A=1 .. Z=26, AA=27, then shift to zero-based.
    let mut value: u32 = 0;
    for c in s.chars() {
        let digit = u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::Config(format!("Column '{s}' is out of range")))?;
    }
    Ok(value - 1)
}
