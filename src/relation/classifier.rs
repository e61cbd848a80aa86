//! Relation classification.
//!
//! Given a governor local tree and one of its non-head children, the
//! classifier finds the grammatical relation between them. Classification is
//! eager, not globally optimal: relations are tried in registry declaration
//! order (filtered by governor-category scope), each relation's rules are
//! tried in listed order, and the first rule whose target capture resolves to
//! the queried dependent wins. A dependent no rule covers silently gets the
//! generic relation - grammar coverage is intentionally partial.

use std::sync::Arc;

use crate::pattern::NodeCtx;
use crate::relation::registry::{Relation, RelationRegistry};
use crate::tree::Tree;

/// Rule-driven relation classifier over a shared registry.
#[derive(Clone, Debug)]
pub struct RelationClassifier {
    registry: Arc<RelationRegistry>,
}

impl RelationClassifier {
    /// Create a classifier over the given registry.
    pub fn new(registry: Arc<RelationRegistry>) -> RelationClassifier {
        RelationClassifier { registry }
    }

    /// The registry backing this classifier.
    pub fn registry(&self) -> &RelationRegistry {
        &self.registry
    }

    /// Classify the relation between `governor` and its child at
    /// `dependent_index`. Always succeeds; the generic relation is the
    /// fallback.
    pub fn classify(&self, governor: &Tree, dependent_index: usize) -> &Relation {
        let dependent = &governor.children()[dependent_index];
        let governor_category = governor.basic_category();
        let ctx = NodeCtx::root(governor);

        for relation in self.registry.iter() {
            if !relation.in_scope(governor_category) {
                continue;
            }
            for rule in &relation.rules {
                if rule.pattern.matches_binding(ctx, rule.target, dependent) {
                    return relation;
                }
            }
        }
        self.registry.generic()
    }
}
