//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for flowsheet using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `render`: Render the flowchart image variants
//! - `classify`: Show each step's flowchart shape category
//! - `dot`: Print the Graphviz DOT source of one variant
//! - `init`: Write a `flowsheet.yaml` holding the default settings
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Read settings from this YAML file instead of `./flowsheet.yaml`
//!
//! # Example
//!
//! ```bash
//! flowsheet render demo.xlsx --out-dir charts
//! flowsheet render process.xlsx --sheet Steps --column B --variant flowchart,fdp --format svg
//! flowsheet --json classify demo.xlsx
//! flowsheet dot demo.xlsx --variant annotated > chart.dot
//! flowsheet init
//! ```

pub mod args;
pub mod execute;
pub mod types;
pub mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{ClassifyArgs, DotArgs, InitArgs, RenderArgs, SourceArgs};
pub use types::{FormatArg, VariantArg};
pub use validators::{validate_column, validate_sheet};

/// Flowsheet - turn a spreadsheet of process steps into a flowchart
///
/// Reads one column of a workbook, connects consecutive steps, and renders
/// the resulting graph through Graphviz in several styles.
#[derive(Parser, Debug)]
#[command(name = "flowsheet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// YAML config file (default: flowsheet.yaml in the current directory, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render flowchart images
    ///
    /// Builds the flowchart from the workbook and writes one image per
    /// variant into the output directory. Requires Graphviz.
    Render(RenderArgs),

    /// Show each step's shape category
    ///
    /// Steps with more than one successor are decisions; steps with no
    /// predecessor or no successor are connectors; the rest are processes.
    Classify(ClassifyArgs),

    /// Print Graphviz DOT source
    ///
    /// Emits the DOT text a variant would hand to Graphviz, without running it.
    Dot(DotArgs),

    /// Write a config file with the default settings
    ///
    /// Creates `flowsheet.yaml` in the current directory, or the file named
    /// by `--config`. An existing file is kept unless `--force` is given.
    Init(InitArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        let config = self.config.as_deref();

        match &self.command {
            Some(Commands::Render(args)) => {
                execute::execute_render(config, args, output_mode).await
            }
            Some(Commands::Classify(args)) => {
                execute::execute_classify(config, args, output_mode).await
            }
            Some(Commands::Dot(args)) => execute::execute_dot(config, args, output_mode).await,
            Some(Commands::Init(args)) => {
                execute::execute_init(config, args, output_mode).await
            }
            None => {
                println!("Flowsheet spreadsheet-to-flowchart renderer");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
