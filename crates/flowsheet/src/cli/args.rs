//! Argument structs for each command.

use clap::Parser;
use std::path::PathBuf;

use super::types::{FormatArg, VariantArg};
use super::validators::{validate_column, validate_sheet};
use crate::config::SettingsOverrides;

/// Where the steps come from; shared by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Workbook to read (default: demo.xlsx)
    pub input: Option<PathBuf>,

    /// Sheet holding the steps (default: Sheet1)
    #[arg(short, long, value_parser = validate_sheet)]
    pub sheet: Option<String>,

    /// Column holding the steps: zero-based index or letters (default: 1)
    #[arg(short, long, value_parser = validate_column)]
    pub column: Option<u32>,

    /// Do not connect a step to itself when it repeats on adjacent rows
    #[arg(long)]
    pub skip_self_loops: bool,
}

impl SourceArgs {
    /// Overrides carrying only the source fields.
    pub fn to_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            input: self.input.clone(),
            sheet: self.sheet.clone(),
            column: self.column,
            skip_self_loops: self.skip_self_loops,
            ..SettingsOverrides::default()
        }
    }
}

/// Arguments for the `render` command
#[derive(Parser, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Workbook selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory receiving the images (default: current directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Variants to render (comma-separated or repeated; default: all)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub variant: Vec<VariantArg>,

    /// Image format (default: png)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

impl RenderArgs {
    /// Overrides for every field this command accepts.
    pub fn to_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            output_dir: self.out_dir.clone(),
            format: self.format.map(Into::into),
            variants: self.variant.iter().copied().map(Into::into).collect(),
            ..self.source.to_overrides()
        }
    }
}

/// Arguments for the `classify` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ClassifyArgs {
    /// Workbook selection
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `dot` command
#[derive(Parser, Debug, Clone)]
pub struct DotArgs {
    /// Workbook selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// Variant whose DOT source to emit
    #[arg(short, long, value_enum, default_value = "flowchart")]
    pub variant: VariantArg,

    /// Write the DOT source to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}
