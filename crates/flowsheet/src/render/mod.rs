//! Flowchart rendering.
//!
//! Each [`Variant`] is a different presentation of the same flowchart: it
//! chooses a Graphviz layout program, a title, and how steps are shaped. The
//! renderer generates DOT for the variant and hands it to a
//! [`LayoutEngine`], which writes the image file.
//!
//! Renderers borrow the flowchart immutably; rendering the same flowchart
//! twice produces the same DOT and therefore the same image.

pub mod dot;
pub mod layout;

pub use layout::{Graphviz, Layout, LayoutEngine, LayoutRequest, OutputFormat};

#[cfg(any(test, feature = "test-util"))]
pub use layout::{RecordedLayout, RecordingEngine};

use crate::error::{Error, Result};
use crate::flowchart::{Classification, Flowchart};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A rendering style for the flowchart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Plain labelled nodes with a spring layout
    Simple,
    /// Every step as a rounded, filled box in a hierarchical layout
    Boxes,
    /// Flowchart shapes (circle, box, diamond) in a hierarchical layout
    Flowchart,
    /// Flowchart shapes (oval, box, diamond) with force-directed placement
    Fdp,
    /// Flowchart shapes (oval, rect, diamond) with a fallback for unclaimed steps
    Annotated,
}

impl Variant {
    /// Every variant, in the order they are rendered by default.
    pub const ALL: [Variant; 5] = [
        Variant::Simple,
        Variant::Boxes,
        Variant::Flowchart,
        Variant::Fdp,
        Variant::Annotated,
    ];

    /// Graphviz program that positions the nodes.
    pub fn layout(self) -> Layout {
        match self {
            Self::Simple => Layout::Neato,
            Self::Boxes | Self::Flowchart | Self::Annotated => Layout::Dot,
            Self::Fdp => Layout::Fdp,
        }
    }

    /// Title drawn above the chart.
    pub fn title(self) -> &'static str {
        match self {
            Self::Simple => "Simple flowchart",
            Self::Boxes => "Flowchart with box steps",
            Self::Flowchart => "Flowchart",
            Self::Fdp => "Force-directed flowchart",
            Self::Annotated => "Annotated flowchart",
        }
    }

    /// Variant name, also used as the output file stem.
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Boxes => "boxes",
            Self::Flowchart => "flowchart",
            Self::Fdp => "fdp",
            Self::Annotated => "annotated",
        }
    }

    /// Output file name for this variant in the given format.
    pub fn file_name(self, format: OutputFormat) -> String {
        format!("{}.{}", self.name(), format.extension())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where and how rendered images are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Directory receiving the image files; created if missing
    pub output_dir: PathBuf,
    /// Image format for every variant
    pub format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: OutputFormat::default(),
        }
    }
}

/// An image written by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedImage {
    /// Variant that produced the image
    pub variant: Variant,
    /// Layout program used
    pub layout: Layout,
    /// Path of the written file
    pub path: PathBuf,
}

/// Render one variant of the flowchart.
///
/// # Errors
///
/// - [`Error::OutputWriteFailed`] if the output directory cannot be created
/// - any error reported by the layout engine
pub async fn render(
    engine: &dyn LayoutEngine,
    flowchart: &Flowchart,
    classification: &Classification,
    variant: Variant,
    options: &RenderOptions,
) -> Result<RenderedImage> {
    ensure_dir(&options.output_dir).await?;

    let path = options.output_dir.join(variant.file_name(options.format));
    let source = dot::to_dot(flowchart, classification, variant);
    let layout = variant.layout();

    engine
        .render(&LayoutRequest {
            layout,
            format: options.format,
            dot: &source,
            output: &path,
        })
        .await?;

    tracing::info!(variant = %variant, layout = %layout, path = %path.display(), "Rendered flowchart");
    Ok(RenderedImage {
        variant,
        layout,
        path,
    })
}

/// Render each variant in order, stopping at the first failure.
///
/// The flowchart is classified once and the result shared by every variant.
///
/// # Errors
///
/// Returns the first error from [`render`].
pub async fn render_all(
    engine: &dyn LayoutEngine,
    flowchart: &Flowchart,
    variants: &[Variant],
    options: &RenderOptions,
) -> Result<Vec<RenderedImage>> {
    let classification = flowchart.classify();
    let mut images = Vec::with_capacity(variants.len());

    for &variant in variants {
        images.push(render(engine, flowchart, &classification, variant, options).await?);
    }

    Ok(images)
}

async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| Error::OutputWriteFailed {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flowchart::BuildOptions;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn flowchart() -> Flowchart {
        Flowchart::from_steps(
            ["Start", "Review", "Approve", "", "Review", "Reject"].map(Some),
            BuildOptions::default(),
        )
    }

    #[rstest]
    #[case(Variant::Simple, Layout::Neato, "simple.png")]
    #[case(Variant::Boxes, Layout::Dot, "boxes.png")]
    #[case(Variant::Flowchart, Layout::Dot, "flowchart.png")]
    #[case(Variant::Fdp, Layout::Fdp, "fdp.png")]
    #[case(Variant::Annotated, Layout::Dot, "annotated.png")]
    fn test_variant_layout_and_file(
        #[case] variant: Variant,
        #[case] layout: Layout,
        #[case] file: &str,
    ) {
        assert_eq!(variant.layout(), layout);
        assert_eq!(variant.file_name(OutputFormat::Png), file);
    }

    #[test]
    fn test_file_name_follows_format() {
        assert_eq!(Variant::Fdp.file_name(OutputFormat::Svg), "fdp.svg");
    }

    #[rstest]
    #[tokio::test]
    async fn test_render_all_writes_every_variant(flowchart: Flowchart) {
        let temp = TempDir::new().unwrap();
        let engine = RecordingEngine::new();
        let options = RenderOptions {
            output_dir: temp.path().join("out"),
            format: OutputFormat::Png,
        };

        let images = render_all(&engine, &flowchart, &Variant::ALL, &options)
            .await
            .unwrap();

        assert_eq!(images.len(), 5);
        for image in &images {
            assert!(image.path.exists(), "{} missing", image.path.display());
        }

        let requests = engine.requests();
        let layouts: Vec<Layout> = requests.iter().map(|r| r.layout).collect();
        assert_eq!(
            layouts,
            vec![
                Layout::Neato,
                Layout::Dot,
                Layout::Dot,
                Layout::Fdp,
                Layout::Dot
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_render_does_not_change_flowchart(flowchart: Flowchart) {
        let temp = TempDir::new().unwrap();
        let engine = RecordingEngine::new();
        let options = RenderOptions {
            output_dir: temp.path().to_path_buf(),
            format: OutputFormat::Svg,
        };
        let before: Vec<(String, String)> = flowchart
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();

        render_all(&engine, &flowchart, &[Variant::Flowchart, Variant::Flowchart], &options)
            .await
            .unwrap();

        let after: Vec<(String, String)> = flowchart
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        assert_eq!(before, after);

        let requests = engine.requests();
        assert_eq!(requests[0].dot, requests[1].dot);
        assert_eq!(requests[0].output, temp.path().join("flowchart.svg"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_unwritable_output_dir(flowchart: Flowchart) {
        let temp = TempDir::new().unwrap();
        // A regular file where the output directory should be.
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let options = RenderOptions {
            output_dir: blocker.join("out"),
            format: OutputFormat::Png,
        };
        let result = render_all(&RecordingEngine::new(), &flowchart, &Variant::ALL, &options).await;

        assert!(matches!(result, Err(Error::OutputWriteFailed { .. })));
    }
}
