//! The conversion pipeline facade.
//!
//! [`DependencyConverter`] wires the head finder, relation classifier, graph
//! builder, and rewriter together behind one call:
//! [`DependencyConverter::convert`]. All rule tables are validated when the
//! converter is created; conversion itself is pure computation over an
//! immutable tree, invoked once per sentence. A failed sentence returns an
//! error without poisoning the converter, so batch callers catch at the
//! sentence boundary and continue.
//!
//! # Examples
//!
//! ```
//! use arbor::convert::DependencyConverter;
//! use arbor::graph::DependencyMode;
//! use arbor::tree::Tree;
//!
//! let converter = DependencyConverter::chinese().unwrap();
//! let tree = Tree::parse("(IP (NP (NR Shanghai) (NR Pudong)) (VP (VV develops)))").unwrap();
//! let graph = converter.convert(&tree, DependencyMode::Basic).unwrap();
//!
//! assert_eq!(graph.root().word(), "develops");
//! assert_eq!(graph.len(), 2);
//! ```

use std::sync::Arc;

use crate::error::Result;
use crate::graph::rewrite::{GraphRewriter, collapse_rules, distribute_conjuncts};
use crate::graph::{DependencyGraph, DependencyMode, GraphBuilder};
use crate::head::{HeadFinder, HeadTable, chinese_head_table};
use crate::relation::{RelationClassifier, RelationRegistry, chinese_relation_registry};
use crate::tree::Tree;

/// Relations distributed over conjuncts in
/// [`DependencyMode::CcProcessed`].
const DISTRIBUTED_RELATIONS: &[&str] = &["nsubj", "dobj"];

/// End-to-end constituency-to-dependency converter.
#[derive(Clone, Debug)]
pub struct DependencyConverter {
    registry: Arc<RelationRegistry>,
    builder: GraphBuilder,
    rewriter: GraphRewriter,
}

impl DependencyConverter {
    /// Build a converter from a head table and a relation registry. Table
    /// validation failures surface here, before any sentence is processed.
    pub fn new(head_table: HeadTable, registry: RelationRegistry) -> Result<DependencyConverter> {
        let head_finder = Arc::new(HeadFinder::new(head_table, None)?);
        let registry = Arc::new(registry);
        let builder = GraphBuilder::new(head_finder, RelationClassifier::new(registry.clone()));
        let rewriter = GraphRewriter::new(collapse_rules()?);
        Ok(DependencyConverter {
            registry,
            builder,
            rewriter,
        })
    }

    /// Build the ready-made Chinese converter.
    pub fn chinese() -> Result<DependencyConverter> {
        DependencyConverter::new(chinese_head_table(), chinese_relation_registry()?)
    }

    /// The relation registry, for downstream short-name lookup.
    pub fn registry(&self) -> &RelationRegistry {
        &self.registry
    }

    /// Convert one tree into a dependency graph under the given mode.
    pub fn convert(&self, tree: &Tree, mode: DependencyMode) -> Result<DependencyGraph> {
        let basic = self.builder.build(tree)?;
        Ok(match mode {
            DependencyMode::Basic => basic,
            DependencyMode::Collapsed => self.rewriter.rewrite(&basic),
            DependencyMode::CcProcessed => {
                let collapsed = self.rewriter.rewrite(&basic);
                distribute_conjuncts(&collapsed, DISTRIBUTED_RELATIONS)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_share_one_builder_pass() {
        let converter = DependencyConverter::chinese().unwrap();
        let tree = Tree::parse(
            "(IP (NP (NR Pudong)) (VP (VV cooperates) (PP (P with) (NP (NR Shanghai)))))",
        )
        .unwrap();

        let basic = converter.convert(&tree, DependencyMode::Basic).unwrap();
        assert!(basic
            .edges()
            .iter()
            .any(|edge| edge.relation == "prep"));

        let collapsed = converter.convert(&tree, DependencyMode::Collapsed).unwrap();
        assert!(collapsed
            .edges()
            .iter()
            .any(|edge| edge.relation == "prep:with"));
        assert!(!collapsed.edges().iter().any(|edge| edge.relation == "prep"));
    }

    #[test]
    fn test_failed_sentence_does_not_poison_converter() {
        let converter = DependencyConverter::chinese().unwrap();
        let bad = Tree::interior("IP", vec![]);
        assert!(converter.convert(&bad, DependencyMode::Basic).is_err());

        let good = Tree::parse("(IP (NP (NR Pudong)) (VP (VV develops)))").unwrap();
        assert!(converter.convert(&good, DependencyMode::Basic).is_ok());
    }
}
