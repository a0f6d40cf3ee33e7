//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (written files)
//!   - Info:      cyan    (step labels, paths)
//!   - Warning:   yellow  (empty results)
//!   - Connector: blue
//!   - Process:   white
//!   - Decision:  magenta
//!   - Emphasis:  bold    (section headers)

use crate::flowchart::NodeKind;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Bold text for section headers.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Apply the category color to a shape category name.
pub(crate) fn colorize_kind(kind: NodeKind, config: &OutputConfig) -> String {
    let text = kind.to_string();
    if !config.use_colors {
        return text;
    }
    match kind {
        NodeKind::Connector => text.blue().to_string(),
        NodeKind::Process => text.white().to_string(),
        NodeKind::Decision => text.magenta().to_string(),
    }
}
