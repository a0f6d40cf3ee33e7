//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Validate a column reference.
///
/// Delegates to [`crate::sheet::parse_column`] so config files and flags
/// accept the same forms: a zero-based index (`1`) or letters (`B`).
pub fn validate_column(s: &str) -> Result<u32, String> {
    crate::sheet::parse_column(s).map_err(|e| e.to_string())
}

/// Validate a sheet name.
///
/// Sheet names are matched exactly, so only emptiness is rejected; the
/// workbook itself decides whether the name exists.
pub fn validate_sheet(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Sheet name cannot be empty".to_string());
    }
    Ok(s.to_string())
}
