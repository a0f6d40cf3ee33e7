//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.

pub mod color;

use crate::app::FlowchartSummary;
use crate::flowchart::NodeKind;
use crate::render::RenderedImage;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{info, success, warning};

use color::{bold, colorize_kind};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `FLOWSHEET_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("FLOWSHEET_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

/// Print a flowchart summary in the specified format.
pub fn print_summary(summary: &FlowchartSummary, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_summary_text(&mut handle, summary, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, summary),
    }
}

/// Print the list of rendered images in the specified format.
pub fn print_rendered(images: &[RenderedImage], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_rendered_text(&mut handle, images, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &images),
    }
}

fn write_summary_text<W: Write>(
    w: &mut W,
    summary: &FlowchartSummary,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} [{} column {}]",
        bold("Flowchart:", config),
        info(&summary.input.display().to_string(), config),
        summary.sheet,
        summary.column
    )?;
    writeln!(w, "  {} steps, {} transitions", summary.nodes, summary.edges)?;

    if summary.nodes == 0 {
        writeln!(w, "  {}", warning("No steps found", config))?;
        return Ok(());
    }

    for kind in [NodeKind::Connector, NodeKind::Process, NodeKind::Decision] {
        let labels = summary.classification.of_kind(kind);
        writeln!(w)?;
        writeln!(w, "{} ({})", colorize_kind(kind, config), labels.len())?;
        for label in labels {
            writeln!(w, "  {label}")?;
        }
    }
    Ok(())
}

fn write_rendered_text<W: Write>(
    w: &mut W,
    images: &[RenderedImage],
    config: &OutputConfig,
) -> io::Result<()> {
    for image in images {
        writeln!(
            w,
            "{} {:<10} {} ({})",
            success("✓", config),
            image.variant.name(),
            image.path.display(),
            image.layout
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flowchart::{BuildOptions, Flowchart};
    use crate::render::{Layout, Variant};
    use std::path::PathBuf;

    fn plain() -> OutputConfig {
        OutputConfig { use_colors: false }
    }

    fn summary() -> FlowchartSummary {
        let flowchart = Flowchart::from_steps(
            ["Start", "Check", "Done", "", "Check", "Retry"].map(Some),
            BuildOptions::default(),
        );
        FlowchartSummary {
            input: PathBuf::from("demo.xlsx"),
            sheet: "Sheet1".to_string(),
            column: 1,
            nodes: flowchart.node_count(),
            edges: flowchart.edge_count(),
            classification: flowchart.classify(),
        }
    }

    #[test]
    fn test_summary_text() {
        let mut buf = Vec::new();
        write_summary_text(&mut buf, &summary(), &plain()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Flowchart: demo.xlsx [Sheet1 column 1]"));
        assert!(text.contains("4 steps, 3 transitions"));
        assert!(text.contains("decision (1)\n  Check"));
        assert!(text.contains("connector (3)"));
        assert!(text.contains("process (0)"));
    }

    #[test]
    fn test_empty_summary_warns() {
        let empty = FlowchartSummary {
            input: PathBuf::from("empty.xlsx"),
            sheet: "Sheet1".to_string(),
            column: 1,
            nodes: 0,
            edges: 0,
            classification: Default::default(),
        };
        let mut buf = Vec::new();
        write_summary_text(&mut buf, &empty, &plain()).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("No steps found"));
    }

    #[test]
    fn test_summary_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, &summary()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["nodes"], 4);
        assert_eq!(value["classification"]["decision"][0], "Check");
    }

    #[test]
    fn test_rendered_text_and_json() {
        let images = vec![RenderedImage {
            variant: Variant::Fdp,
            layout: Layout::Fdp,
            path: PathBuf::from("out/fdp.png"),
        }];

        let mut buf = Vec::new();
        write_rendered_text(&mut buf, &images, &plain()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("fdp"));
        assert!(text.contains("out/fdp.png"));

        let mut buf = Vec::new();
        write_json(&mut buf, &images).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["variant"], "fdp");
        assert_eq!(value[0]["layout"], "fdp");
    }
}
