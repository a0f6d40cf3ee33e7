//! Configuration management for flowsheet.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. Command-line flags ([`SettingsOverrides`])
//! 2. A YAML config file ([`FlowsheetConfig`]), `flowsheet.yaml` by default
//! 3. Built-in defaults
//!
//! Relative paths inside a config file are resolved against the directory
//! holding that file, not the process working directory.

use crate::error::{Error, Result};
use crate::flowchart::BuildOptions;
use crate::render::{Graphviz, OutputFormat, RenderOptions, Variant};
use crate::sheet::parse_column;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "flowsheet.yaml";

/// Workbook read when no input is given
pub const DEFAULT_INPUT: &str = "demo.xlsx";

/// Sheet read when no sheet is given
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Zero-based column read when no column is given
pub const DEFAULT_COLUMN: u32 = 1;

/// A column reference as written in a config file: `1` or `B`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero-based column index
    Index(u32),
    /// Spreadsheet column letters or a quoted index
    Name(String),
}

impl ColumnRef {
    /// Zero-based column index this reference points at.
    pub fn index(&self) -> Result<u32> {
        match self {
            Self::Index(index) => Ok(*index),
            Self::Name(name) => parse_column(name),
        }
    }
}

/// Config file structure. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FlowsheetConfig {
    /// Workbook to read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Sheet holding the steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    /// Column holding the steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnRef>,

    /// Directory receiving rendered images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Image format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Drop transitions from a step to itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_self_loops: Option<bool>,

    /// Directory holding the Graphviz executables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphviz_dir: Option<PathBuf>,

    /// Variants rendered by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
}

impl FlowsheetConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file, resolving relative paths against the
    /// file's directory.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Cannot read config '{}': {e}", path.display()))
        })?;
        let config = Self::from_yaml(&content)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config.relative_to(base))
    }

    /// Load `flowsheet.yaml` from `dir` if it exists.
    pub async fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        Self::load(&path).await.map(Some)
    }

    /// Config written by `flowsheet init`: every setting spelled out at its
    /// default value.
    pub fn starter() -> Self {
        let defaults = Settings::default();
        Self {
            input: Some(defaults.input),
            sheet: Some(defaults.sheet),
            column: Some(ColumnRef::Index(defaults.column)),
            output_dir: Some(defaults.output_dir),
            format: Some(defaults.format),
            skip_self_loops: Some(defaults.skip_self_loops),
            graphviz_dir: defaults.graphviz_dir,
            variants: Some(defaults.variants),
        }
    }

    /// Save configuration to a file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.input = self.input.map(rebase);
        self.output_dir = self.output_dir.map(rebase);
        self.graphviz_dir = self.graphviz_dir.map(rebase);
        self
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Workbook to read
    pub input: Option<PathBuf>,
    /// Sheet holding the steps
    pub sheet: Option<String>,
    /// Column holding the steps
    pub column: Option<u32>,
    /// Directory receiving rendered images
    pub output_dir: Option<PathBuf>,
    /// Image format
    pub format: Option<OutputFormat>,
    /// Drop transitions from a step to itself
    pub skip_self_loops: bool,
    /// Variants to render; empty means "use config or all"
    pub variants: Vec<Variant>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Workbook to read
    pub input: PathBuf,
    /// Sheet holding the steps
    pub sheet: String,
    /// Zero-based column holding the steps
    pub column: u32,
    /// Directory receiving rendered images
    pub output_dir: PathBuf,
    /// Image format
    pub format: OutputFormat,
    /// Drop transitions from a step to itself
    pub skip_self_loops: bool,
    /// Directory holding the Graphviz executables
    pub graphviz_dir: Option<PathBuf>,
    /// Variants to render, in order
    pub variants: Vec<Variant>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            sheet: DEFAULT_SHEET.to_string(),
            column: DEFAULT_COLUMN,
            output_dir: PathBuf::from("."),
            format: OutputFormat::default(),
            skip_self_loops: false,
            graphviz_dir: None,
            variants: Variant::ALL.to_vec(),
        }
    }
}

impl Settings {
    /// Merge command-line overrides over an optional config file over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config names an invalid column or an
    /// empty variant list.
    pub fn resolve(config: Option<FlowsheetConfig>, overrides: SettingsOverrides) -> Result<Self> {
        let defaults = Self::default();
        let config = config.unwrap_or_default();

        let config_column = config.column.as_ref().map(ColumnRef::index).transpose()?;

        let variants = if !overrides.variants.is_empty() {
            overrides.variants
        } else {
            match config.variants {
                Some(v) if v.is_empty() => {
                    return Err(Error::Config(
                        "'variants' must list at least one variant".to_string(),
                    ));
                }
                Some(v) => v,
                None => defaults.variants,
            }
        };

        Ok(Self {
            input: overrides.input.or(config.input).unwrap_or(defaults.input),
            sheet: overrides.sheet.or(config.sheet).unwrap_or(defaults.sheet),
            column: overrides.column.or(config_column).unwrap_or(defaults.column),
            output_dir: overrides
                .output_dir
                .or(config.output_dir)
                .unwrap_or(defaults.output_dir),
            format: overrides.format.or(config.format).unwrap_or(defaults.format),
            skip_self_loops: overrides.skip_self_loops
                || config.skip_self_loops.unwrap_or(defaults.skip_self_loops),
            graphviz_dir: config.graphviz_dir,
            variants,
        })
    }

    /// Graph-building options derived from these settings.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            skip_self_loops: self.skip_self_loops,
        }
    }

    /// Rendering options derived from these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            output_dir: self.output_dir.clone(),
            format: self.format,
        }
    }

    /// Graphviz engine honouring the configured executable directory.
    pub fn graphviz(&self) -> Graphviz {
        match &self.graphviz_dir {
            Some(dir) => Graphviz::with_bin_dir(dir),
            None => Graphviz::new(),
        }
    }
}
