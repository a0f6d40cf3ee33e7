//! Flowchart shape classification.
//!
//! Every step gets exactly one shape category from its connectivity:
//!
//! 1. More than one outgoing transition: [`NodeKind::Decision`]
//! 2. Otherwise no predecessor or no successor: [`NodeKind::Connector`]
//! 3. Otherwise: [`NodeKind::Process`]
//!
//! The decision rule is checked first, so a branching start step is a
//! decision even though it has no predecessor.

use super::Flowchart;
use petgraph::Direction;
use serde::Serialize;
use std::fmt;

/// Shape category of a flowchart step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Terminal or pass-through step with no predecessor or no successor
    Connector,
    /// Ordinary step with one way in and one way out
    Process,
    /// Branching step with more than one successor
    Decision,
}

impl NodeKind {
    /// Classify a step from its degrees.
    pub fn from_degrees(in_degree: usize, out_degree: usize) -> Self {
        if out_degree > 1 {
            Self::Decision
        } else if in_degree == 0 || out_degree == 0 {
            Self::Connector
        } else {
            Self::Process
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connector => write!(f, "connector"),
            Self::Process => write!(f, "process"),
            Self::Decision => write!(f, "decision"),
        }
    }
}

/// Steps partitioned by shape category, each list in node order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Steps with no predecessor or no successor
    pub connector: Vec<String>,
    /// Steps with a single predecessor role and a single successor
    pub process: Vec<String>,
    /// Steps with more than one successor
    pub decision: Vec<String>,
}

impl Classification {
    /// The category a label was placed in, if it was classified at all.
    pub fn kind_of(&self, label: &str) -> Option<NodeKind> {
        if self.decision.iter().any(|l| l == label) {
            Some(NodeKind::Decision)
        } else if self.connector.iter().any(|l| l == label) {
            Some(NodeKind::Connector)
        } else if self.process.iter().any(|l| l == label) {
            Some(NodeKind::Process)
        } else {
            None
        }
    }

    /// Total number of classified steps.
    pub fn len(&self) -> usize {
        self.connector.len() + self.process.len() + self.decision.len()
    }

    /// Whether nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels of one category.
    pub fn of_kind(&self, kind: NodeKind) -> &[String] {
        match kind {
            NodeKind::Connector => &self.connector,
            NodeKind::Process => &self.process,
            NodeKind::Decision => &self.decision,
        }
    }
}

pub(super) fn classify(flowchart: &Flowchart) -> Classification {
    let mut classification = Classification::default();

    for node in flowchart.graph.node_indices() {
        let label = flowchart.graph[node].clone();
        let kind = NodeKind::from_degrees(
            flowchart.degree_of(node, Direction::Incoming),
            flowchart.degree_of(node, Direction::Outgoing),
        );
        match kind {
            NodeKind::Connector => classification.connector.push(label),
            NodeKind::Process => classification.process.push(label),
            NodeKind::Decision => classification.decision.push(label),
        }
    }

    tracing::debug!(
        connector = classification.connector.len(),
        process = classification.process.len(),
        decision = classification.decision.len(),
        "Classified flowchart steps"
    );
    classification
}
