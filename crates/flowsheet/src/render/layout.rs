//! Layout engines: turning DOT source into an image file.
//!
//! Layout is delegated entirely to Graphviz. The [`LayoutEngine`] trait is the
//! seam between DOT generation and the external tool so rendering can be
//! exercised without Graphviz installed.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Graphviz layout program used to position nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Hierarchical layout (`dot`)
    Dot,
    /// Spring-model layout (`neato`)
    Neato,
    /// Force-directed placement (`fdp`)
    Fdp,
}

impl Layout {
    /// Name of the Graphviz executable implementing this layout.
    pub fn program(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Neato => "neato",
            Self::Fdp => "fdp",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Image format written by the layout engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Portable Network Graphics
    #[default]
    Png,
    /// Scalable Vector Graphics
    Svg,
    /// Portable Document Format
    Pdf,
}

impl OutputFormat {
    /// File extension and Graphviz `-T` value for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One layout job: DOT source in, image file out.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    /// Layout program to run
    pub layout: Layout,
    /// Image format to produce
    pub format: OutputFormat,
    /// Complete DOT source
    pub dot: &'a str,
    /// Destination file
    pub output: &'a Path,
}

/// Lays out DOT source and writes the resulting image.
#[async_trait]
pub trait LayoutEngine: Send + Sync {
    /// Render `request.dot` into `request.output`.
    async fn render(&self, request: &LayoutRequest<'_>) -> Result<()>;
}

/// Layout engine backed by the Graphviz command-line tools.
#[derive(Debug, Clone, Default)]
pub struct Graphviz {
    /// Directory holding the Graphviz executables; `PATH` lookup when `None`
    bin_dir: Option<PathBuf>,
}

impl Graphviz {
    /// Use Graphviz executables found on `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use Graphviz executables from a specific directory.
    pub fn with_bin_dir(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: Some(bin_dir.into()),
        }
    }

    /// Full command used for a layout.
    pub fn program_path(&self, layout: Layout) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(layout.program()),
            None => PathBuf::from(layout.program()),
        }
    }
}

#[async_trait]
impl LayoutEngine for Graphviz {
    async fn render(&self, request: &LayoutRequest<'_>) -> Result<()> {
        let program = self.program_path(request.layout);
        let tool = program.display().to_string();

        let mut child = Command::new(&program)
            .arg(format!("-T{}", request.format.extension()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    Error::LayoutToolUnavailable { tool: tool.clone() }
                }
                _ => Error::Io(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A tool that bails out early closes its end; its stderr explains why.
            match stdin.write_all(request.dot.as_bytes()).await {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(Error::Io(e)),
                _ => {}
            }
            // Closing stdin tells Graphviz the graph is complete.
            drop(stdin);
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(Error::LayoutFailed {
                tool,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tokio::fs::write(request.output, &output.stdout)
            .await
            .map_err(|source| Error::OutputWriteFailed {
                path: request.output.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            tool = %tool,
            output = %request.output.display(),
            bytes = output.stdout.len(),
            "Graphviz wrote image"
        );
        Ok(())
    }
}

/// A layout request captured by [`RecordingEngine`].
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLayout {
    /// Layout program that would have run
    pub layout: Layout,
    /// Requested image format
    pub format: OutputFormat,
    /// DOT source handed to the engine
    pub dot: String,
    /// Destination file
    pub output: PathBuf,
}

/// Layout engine that records requests and writes the DOT source as the
/// "image", for tests that must not depend on Graphviz.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct RecordingEngine {
    requests: std::sync::Mutex<Vec<RecordedLayout>>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingEngine {
    /// Create an engine with no recorded requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedLayout> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl LayoutEngine for RecordingEngine {
    async fn render(&self, request: &LayoutRequest<'_>) -> Result<()> {
        tokio::fs::write(request.output, request.dot)
            .await
            .map_err(|source| Error::OutputWriteFailed {
                path: request.output.to_path_buf(),
                source,
            })?;

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedLayout {
                layout: request.layout,
                format: request.format,
                dot: request.dot.to_string(),
                output: request.output.to_path_buf(),
            });
        }
        Ok(())
    }
}
