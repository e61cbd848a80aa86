//! Dependency graphs.
//!
//! A [`DependencyGraph`] is an edge list plus a root token. [`builder`] turns
//! a constituency tree into the basic graph by head percolation;
//! [`rewrite`] post-processes the edge list, collapsing function-word-mediated
//! structural relations into single semantic edges.

pub mod builder;
pub mod rewrite;

pub use builder::GraphBuilder;
pub use rewrite::{DependencyMode, GraphRewriter};

use serde::{Deserialize, Serialize};

use crate::token::TokenNode;

/// One typed dependency edge: governor, dependent, relation short name.
///
/// The relation is a `String` rather than a registry reference because
/// rewriting produces derived names (e.g. `prep:with`) that are not
/// registry entries.
#[derive(Clone, Debug)]
pub struct DependencyEdge {
    /// Head side of the edge.
    pub governor: TokenNode,
    /// Modifier/argument side of the edge.
    pub dependent: TokenNode,
    /// Relation short name.
    pub relation: String,
}

impl DependencyEdge {
    /// Create an edge.
    pub fn new<S: Into<String>>(governor: TokenNode, dependent: TokenNode, relation: S) -> Self {
        DependencyEdge {
            governor,
            dependent,
            relation: relation.into(),
        }
    }
}

/// Options for the plain-text rendering, passed explicitly into the render
/// call (never a process-wide switch).
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Include one-based token indices in node names (`develops-3`).
    pub show_indices: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { show_indices: true }
    }
}

/// A serializable flat view of one edge, for JSON interchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Relation short name.
    pub relation: String,
    /// Governor word.
    pub governor: String,
    /// Governor one-based token index, if known.
    pub governor_index: Option<usize>,
    /// Governor copy index (0 = not a copy).
    pub governor_copy: usize,
    /// Dependent word.
    pub dependent: String,
    /// Dependent one-based token index, if known.
    pub dependent_index: Option<usize>,
    /// Dependent copy index (0 = not a copy).
    pub dependent_copy: usize,
}

/// A typed dependency graph: edge list plus root.
#[derive(Clone, Debug)]
pub struct DependencyGraph {
    root: TokenNode,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Create a graph from a root and an edge list.
    pub fn new(root: TokenNode, edges: Vec<DependencyEdge>) -> Self {
        DependencyGraph { root, edges }
    }

    /// The root token.
    pub fn root(&self) -> &TokenNode {
        &self.root
    }

    /// Edges, in build order.
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges whose governor is `node`.
    pub fn dependents_of<'g>(&'g self, node: &TokenNode) -> Vec<&'g DependencyEdge> {
        self.edges.iter().filter(|e| &e.governor == node).collect()
    }

    /// Edges whose dependent is `node`.
    pub fn governors_of<'g>(&'g self, node: &TokenNode) -> Vec<&'g DependencyEdge> {
        self.edges.iter().filter(|e| &e.dependent == node).collect()
    }

    /// Flat serializable edge records, in edge order.
    pub fn to_records(&self) -> Vec<EdgeRecord> {
        self.edges
            .iter()
            .map(|edge| EdgeRecord {
                relation: edge.relation.clone(),
                governor: edge.governor.word(),
                governor_index: edge.governor.token_index(),
                governor_copy: edge.governor.copy_index(),
                dependent: edge.dependent.word(),
                dependent_index: edge.dependent.token_index(),
                dependent_copy: edge.dependent.copy_index(),
            })
            .collect()
    }

    /// Render as the stable interchange format: one
    /// `relation(governor, dependent)` per line, in edge order.
    pub fn render(&self, options: &RenderOptions) -> String {
        let name = |node: &TokenNode| {
            if options.show_indices {
                node.render_name()
            } else {
                let marks = "'".repeat(node.copy_index());
                format!("{}{marks}", node.word())
            }
        };
        let mut out = String::new();
        for edge in &self.edges {
            out.push_str(&edge.relation);
            out.push('(');
            out.push_str(&name(&edge.governor));
            out.push_str(", ");
            out.push_str(&name(&edge.dependent));
            out.push_str(")\n");
        }
        out
    }
}

impl std::fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&RenderOptions::default()))
    }
}
