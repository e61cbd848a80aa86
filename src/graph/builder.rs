//! Graph building.
//!
//! The builder recursively combines head finding and relation classification
//! into a flat edge list. Each constituent's representative token is its head
//! child's representative (head percolation); every non-head child contributes
//! one edge from the constituent's representative to the child's. Traversal
//! order is fixed - children left to right, edges emitted after the subtree
//! recursion - so repeated runs over the same tree produce byte-identical
//! edge lists.

use std::sync::Arc;

use crate::error::{ArborError, Result};
use crate::graph::{DependencyEdge, DependencyGraph};
use crate::head::HeadFinder;
use crate::relation::RelationClassifier;
use crate::token::TokenNode;
use crate::tree::Tree;

/// Builds basic dependency graphs from constituency trees.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    head_finder: Arc<HeadFinder>,
    classifier: RelationClassifier,
}

impl GraphBuilder {
    /// Create a builder from a head finder and a classifier.
    pub fn new(head_finder: Arc<HeadFinder>, classifier: RelationClassifier) -> GraphBuilder {
        GraphBuilder {
            head_finder,
            classifier,
        }
    }

    /// Build the dependency graph of `tree`.
    ///
    /// Degenerate single-token trees yield a lone root and zero edges. A
    /// childless interior node is a contract violation and raises
    /// [`ArborError::TreeContract`].
    pub fn build(&self, tree: &Tree) -> Result<DependencyGraph> {
        let mut edges = Vec::new();
        let root = self.walk(tree, &mut edges)?;
        Ok(DependencyGraph::new(root, edges))
    }

    fn walk(&self, node: &Tree, edges: &mut Vec<DependencyEdge>) -> Result<TokenNode> {
        if let Some(token) = node.token() {
            return Ok(token.clone());
        }
        if node.children().is_empty() {
            return Err(ArborError::tree_contract(format!(
                "interior node '{}' has no children",
                node.label()
            )));
        }

        let head = self.head_finder.find_head(node)?;
        let mut representatives = Vec::with_capacity(node.children().len());
        for child in node.children() {
            representatives.push(self.walk(child, edges)?);
        }

        let representative = representatives[head].clone();
        for (index, child_representative) in representatives.into_iter().enumerate() {
            if index == head {
                continue;
            }
            let relation = self.classifier.classify(node, index);
            edges.push(DependencyEdge::new(
                representative.clone(),
                child_representative,
                relation.short_name,
            ));
        }
        Ok(representative)
    }
}
