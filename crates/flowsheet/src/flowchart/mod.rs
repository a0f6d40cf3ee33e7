//! Flowchart graph construction.
//!
//! A flowchart is a directed graph whose nodes are step labels and whose
//! edges mean "this step follows that step". It is built once from an
//! ordered list of optional step values and is read-only afterwards.
//!
//! # Graph Representation
//!
//! The graph uses petgraph's `DiGraph` with edges directed from a step to
//! the step that follows it. Node labels are deduplicated by value through a
//! label-to-index map, so a label appearing on several rows is one node.
//! Node and edge indices follow first-seen order, which makes every listing
//! derived from the graph deterministic.

mod classify;

pub use classify::{Classification, NodeKind};

use crate::error::Result;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use std::path::Path;

/// Options controlling how step sequences become edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Drop `X -> X` transitions produced by a step repeated on adjacent rows.
    pub skip_self_loops: bool,
}

/// A directed flowchart graph built from a column of steps.
#[derive(Debug, Clone, Default)]
pub struct Flowchart {
    /// Step graph. Edge direction: step -> following step.
    graph: DiGraph<String, ()>,

    /// Mapping from label to graph node.
    ///
    /// Every node in `graph` has exactly one entry here.
    node_map: HashMap<String, NodeIndex>,
}

impl Flowchart {
    /// Create an empty flowchart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a flowchart by connecting each step to the one after it.
    ///
    /// A pair is skipped when either side is `None` or empty. An ordered pair that
    /// already has an edge is not added again. Cycles, self-loops and
    /// disconnected pieces are all accepted.
    pub fn from_steps<I, S>(steps: I, options: BuildOptions) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut flowchart = Self::new();
        let mut previous: Option<String> = None;

        for step in steps {
            let current = step.map(Into::into).filter(|s: &String| !s.is_empty());
            if let (Some(from), Some(to)) = (previous.as_deref(), current.as_deref()) {
                if options.skip_self_loops && from == to {
                    tracing::debug!(step = from, "Skipping repeated step");
                } else {
                    flowchart.add_transition(from, to);
                }
            }
            previous = current;
        }

        tracing::debug!(
            nodes = flowchart.node_count(),
            edges = flowchart.edge_count(),
            "Built flowchart"
        );
        flowchart
    }

    /// Read a workbook column and build its flowchart.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`crate::sheet::read_steps`].
    pub fn from_workbook(
        path: &Path,
        sheet: &str,
        column: u32,
        options: BuildOptions,
    ) -> Result<Self> {
        let steps = crate::sheet::read_steps(path, sheet, column)?;
        Ok(Self::from_steps(steps, options))
    }

    /// Add the edge `from -> to`, creating either node if needed.
    ///
    /// Returns `false` without changing anything if the edge already exists.
    pub fn add_transition(&mut self, from: &str, to: &str) -> bool {
        let from_node = self.ensure_node(from);
        let to_node = self.ensure_node(to);

        if self.graph.contains_edge(from_node, to_node) {
            tracing::debug!(from, to, "Transition already present");
            return false;
        }

        self.graph.add_edge(from_node, to_node, ());
        tracing::debug!(from, to, "Added transition");
        true
    }

    fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&node) = self.node_map.get(label) {
            return node;
        }
        let node = self.graph.add_node(label.to_string());
        self.node_map.insert(label.to_string(), node);
        node
    }

    /// Number of distinct steps.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct transitions.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the flowchart has no steps.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Step labels in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(|n| self.graph[n].as_str())
    }

    /// Transitions as `(from, to)` label pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    /// Whether the label is a step in this flowchart.
    pub fn contains_node(&self, label: &str) -> bool {
        self.node_map.contains_key(label)
    }

    /// Whether the transition `from -> to` exists.
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Number of transitions leading into `label`, or `None` for an unknown label.
    pub fn in_degree(&self, label: &str) -> Option<usize> {
        self.degree(label, Direction::Incoming)
    }

    /// Number of transitions leaving `label`, or `None` for an unknown label.
    pub fn out_degree(&self, label: &str) -> Option<usize> {
        self.degree(label, Direction::Outgoing)
    }

    fn degree(&self, label: &str, direction: Direction) -> Option<usize> {
        let node = *self.node_map.get(label)?;
        Some(self.degree_of(node, direction))
    }

    fn degree_of(&self, node: NodeIndex, direction: Direction) -> usize {
        self.graph.edges_directed(node, direction).count()
    }

    /// Sort every step into connector, process or decision.
    pub fn classify(&self) -> Classification {
        classify::classify(self)
    }
}
