//! Application context for CLI command execution.
//!
//! [`App`] owns the resolved settings and the flowchart built from the
//! configured workbook. Commands borrow it to classify, emit DOT or render.
//!
//! # Example
//!
//! ```no_run
//! use flowsheet::app::App;
//! use flowsheet::config::Settings;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::load(Settings::default())?;
//!     let images = app.render(&app.settings().graphviz()).await?;
//!     println!("wrote {} images", images.len());
//!     Ok(())
//! }
//! ```

use crate::config::Settings;
use crate::error::Result;
use crate::flowchart::{Classification, Flowchart};
use crate::render::{self, LayoutEngine, RenderedImage, Variant};
use serde::Serialize;
use std::path::PathBuf;

/// Application context for CLI operations.
#[derive(Debug, Clone)]
pub struct App {
    settings: Settings,
    flowchart: Flowchart,
}

/// Serializable overview of a built flowchart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowchartSummary {
    /// Workbook the steps came from
    pub input: PathBuf,
    /// Sheet the steps came from
    pub sheet: String,
    /// Zero-based column the steps came from
    pub column: u32,
    /// Number of distinct steps
    pub nodes: usize,
    /// Number of distinct transitions
    pub edges: usize,
    /// Steps by shape category
    pub classification: Classification,
}

impl App {
    /// Read the configured workbook and build its flowchart.
    ///
    /// # Errors
    ///
    /// Returns any error from reading the workbook.
    pub fn load(settings: Settings) -> Result<Self> {
        let flowchart = Flowchart::from_workbook(
            &settings.input,
            &settings.sheet,
            settings.column,
            settings.build_options(),
        )?;
        tracing::info!(
            input = %settings.input.display(),
            sheet = %settings.sheet,
            nodes = flowchart.node_count(),
            edges = flowchart.edge_count(),
            "Loaded flowchart"
        );
        Ok(Self::with_flowchart(settings, flowchart))
    }

    /// Wrap an already-built flowchart.
    pub fn with_flowchart(settings: Settings, flowchart: Flowchart) -> Self {
        Self {
            settings,
            flowchart,
        }
    }

    /// Resolved settings for this run.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The built flowchart.
    pub fn flowchart(&self) -> &Flowchart {
        &self.flowchart
    }

    /// Overview of the flowchart and its classification.
    pub fn summary(&self) -> FlowchartSummary {
        FlowchartSummary {
            input: self.settings.input.clone(),
            sheet: self.settings.sheet.clone(),
            column: self.settings.column,
            nodes: self.flowchart.node_count(),
            edges: self.flowchart.edge_count(),
            classification: self.flowchart.classify(),
        }
    }

    /// DOT source of one variant.
    pub fn dot(&self, variant: Variant) -> String {
        render::dot::to_dot(&self.flowchart, &self.flowchart.classify(), variant)
    }

    /// Render the configured variants with `engine`.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error; earlier images stay on disk.
    pub async fn render(&self, engine: &dyn LayoutEngine) -> Result<Vec<RenderedImage>> {
        if self.flowchart.is_empty() {
            tracing::warn!(
                input = %self.settings.input.display(),
                "No transitions found; rendering an empty flowchart"
            );
        }
        render::render_all(
            engine,
            &self.flowchart,
            &self.settings.variants,
            &self.settings.render_options(),
        )
        .await
    }
}
