//! CLI value enums and domain type conversions.
//!
//! This module contains the value enums used for CLI argument parsing
//! and their conversions to domain types.

use clap::ValueEnum;

use crate::render::{OutputFormat, Variant};

/// Rendering variant for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    /// Plain labelled nodes, spring layout (neato)
    Simple,
    /// Rounded filled boxes, hierarchical layout (dot)
    Boxes,
    /// Circle/box/diamond shapes, hierarchical layout (dot)
    Flowchart,
    /// Oval/box/diamond shapes, force-directed layout (fdp)
    Fdp,
    /// Oval/rect/diamond shapes with fallback, hierarchical layout (dot)
    Annotated,
}

impl std::fmt::Display for VariantArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Variant::from(*self))
    }
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Simple => Variant::Simple,
            VariantArg::Boxes => Variant::Boxes,
            VariantArg::Flowchart => Variant::Flowchart,
            VariantArg::Fdp => Variant::Fdp,
            VariantArg::Annotated => Variant::Annotated,
        }
    }
}

/// Image format for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// PNG raster image
    Png,
    /// SVG vector image
    Svg,
    /// PDF document
    Pdf,
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", OutputFormat::from(*self))
    }
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Pdf => OutputFormat::Pdf,
        }
    }
}
