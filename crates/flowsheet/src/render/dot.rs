//! DOT source generation for each rendering variant.
//!
//! Nodes are emitted with positional identifiers (`n0`, `n1`, ...) and the
//! step text as a quoted label, so arbitrary labels never collide or need
//! identifier sanitizing. Output depends only on the flowchart, which keeps
//! repeated renders byte-identical.

use super::Variant;
use crate::flowchart::{Classification, Flowchart, NodeKind};
use std::collections::HashMap;
use std::fmt::Write;

/// Graphviz node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Circle
    Circle,
    /// Oval (ellipse, named as in flowchart vocabulary)
    Oval,
    /// Box
    Box,
    /// Rectangle
    Rect,
    /// Diamond
    Diamond,
    /// Parallelogram, used for steps no category claims
    Parallelogram,
}

impl Shape {
    /// Graphviz `shape` attribute value.
    pub fn as_dot(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Oval => "oval",
            Self::Box => "box",
            Self::Rect => "rect",
            Self::Diamond => "diamond",
            Self::Parallelogram => "parallelogram",
        }
    }
}

/// Shape a variant gives a step of the given category.
///
/// Variants that do not distinguish categories return `None` and rely on the
/// graph-wide node defaults instead.
pub fn shape_for(variant: Variant, kind: Option<NodeKind>) -> Option<Shape> {
    match variant {
        Variant::Simple | Variant::Boxes => None,
        Variant::Flowchart => Some(match kind {
            Some(NodeKind::Connector) => Shape::Circle,
            Some(NodeKind::Decision) => Shape::Diamond,
            Some(NodeKind::Process) | None => Shape::Box,
        }),
        Variant::Fdp => Some(match kind {
            Some(NodeKind::Connector) => Shape::Oval,
            Some(NodeKind::Decision) => Shape::Diamond,
            Some(NodeKind::Process) | None => Shape::Box,
        }),
        Variant::Annotated => Some(match kind {
            Some(NodeKind::Decision) => Shape::Diamond,
            Some(NodeKind::Connector) => Shape::Oval,
            Some(NodeKind::Process) => Shape::Rect,
            None => Shape::Parallelogram,
        }),
    }
}

fn graph_defaults(variant: Variant) -> &'static [&'static str] {
    match variant {
        Variant::Simple => &["node [shape=ellipse];"],
        Variant::Boxes => &[
            "node [shape=box, style=\"rounded,filled\", fillcolor=skyblue, color=blue, margin=0.3];",
        ],
        Variant::Flowchart => &[
            "node [fontsize=12, margin=0.2];",
            "edge [penwidth=3, arrowsize=1];",
        ],
        Variant::Fdp => &["node [fontsize=12];"],
        Variant::Annotated => &["node [fontsize=12];"],
    }
}

/// Generate DOT source for `flowchart` in the style of `variant`.
///
/// `classification` decides per-step shapes for the variants that use them.
/// A step missing from it gets the variant's fallback shape.
pub fn to_dot(flowchart: &Flowchart, classification: &Classification, variant: Variant) -> String {
    let mut output = String::new();
    let ids: HashMap<&str, usize> = flowchart
        .nodes()
        .enumerate()
        .map(|(index, label)| (label, index))
        .collect();

    // Writing to a String cannot fail.
    let _ = writeln!(output, "digraph flowchart {{");
    let _ = writeln!(
        output,
        "  label=\"{}\";",
        escape_dot_string(variant.title())
    );
    let _ = writeln!(output, "  labelloc=t;");
    for line in graph_defaults(variant) {
        let _ = writeln!(output, "  {line}");
    }

    for (index, label) in flowchart.nodes().enumerate() {
        let label_attr = format!("label=\"{}\"", escape_dot_string(label));
        match shape_for(variant, classification.kind_of(label)) {
            Some(shape) => {
                let _ = writeln!(output, "  n{index} [{label_attr}, shape={}];", shape.as_dot());
            }
            None => {
                let _ = writeln!(output, "  n{index} [{label_attr}];");
            }
        }
    }

    for (from, to) in flowchart.edges() {
        let _ = writeln!(output, "  n{} -> n{};", ids[from], ids[to]);
    }

    let _ = writeln!(output, "}}");
    output
}

/// Escape a string for use inside a quoted DOT attribute.
pub fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
