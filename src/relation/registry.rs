//! The relation registry.
//!
//! Registries are built once at startup and shared read-only afterwards.
//! Validation happens at build time: duplicate short names, dangling parent
//! links, or a missing/ambiguous hierarchy root are configuration errors and
//! fail fast, before any sentence is processed.

use ahash::AHashMap;
use regex::Regex;

use crate::error::{ArborError, Result};
use crate::pattern::ShapePattern;

/// One tree-shape rule of a relation. The pattern is evaluated at the
/// governor's local tree; the rule applies to a dependent when some match
/// binds the `target` capture to that dependent.
#[derive(Clone, Debug)]
pub struct ShapeRule {
    /// Pattern rooted at the governor node.
    pub pattern: ShapePattern,
    /// Name of the capture that must resolve to the queried dependent.
    pub target: &'static str,
}

impl ShapeRule {
    /// Wrap a dependent-side pattern into the standard rule shape: a child of
    /// the governor matching `dependent_pattern`, captured as `target`.
    pub fn on_dependent(dependent_pattern: ShapePattern) -> ShapeRule {
        ShapeRule {
            pattern: ShapePattern::child(ShapePattern::capture("target", dependent_pattern)),
            target: "target",
        }
    }
}

/// One grammatical relation definition.
#[derive(Clone, Debug)]
pub struct Relation {
    /// Short name used on edges and in rendered output, e.g. `nsubj`.
    pub short_name: &'static str,
    /// Human-readable name, e.g. `nominal subject`.
    pub long_name: &'static str,
    /// Short name of the parent relation; `None` only for the hierarchy root.
    pub parent: Option<&'static str>,
    /// Governor basic-category scope; `None` scopes to every category.
    pub scope: Option<Regex>,
    /// Ordered shape rules.
    pub rules: Vec<ShapeRule>,
}

impl Relation {
    /// Build a relation, compiling and anchoring the scope regex.
    pub fn new(
        short_name: &'static str,
        long_name: &'static str,
        parent: Option<&'static str>,
        scope: Option<&str>,
        rules: Vec<ShapeRule>,
    ) -> Result<Relation> {
        let scope = match scope {
            Some(pattern) => Some(Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                ArborError::config(format!(
                    "bad scope pattern /{pattern}/ for relation '{short_name}': {e}"
                ))
            })?),
            None => None,
        };
        Ok(Relation {
            short_name,
            long_name,
            parent,
            scope,
            rules,
        })
    }

    /// Check whether this relation applies to governors of the given basic
    /// category.
    pub fn in_scope(&self, governor_category: &str) -> bool {
        match &self.scope {
            Some(regex) => regex.is_match(governor_category),
            None => true,
        }
    }
}

/// Registry of relations, in declaration order, forming a single-rooted
/// hierarchy.
#[derive(Clone, Debug)]
pub struct RelationRegistry {
    relations: Vec<Relation>,
    by_short_name: AHashMap<&'static str, usize>,
    root: usize,
}

impl RelationRegistry {
    /// Build and validate a registry from relations in declaration order.
    pub fn build(relations: Vec<Relation>) -> Result<RelationRegistry> {
        let mut by_short_name = AHashMap::with_capacity(relations.len());
        for (index, relation) in relations.iter().enumerate() {
            if by_short_name.insert(relation.short_name, index).is_some() {
                return Err(ArborError::config(format!(
                    "duplicate relation short name '{}'",
                    relation.short_name
                )));
            }
        }

        let mut root = None;
        for relation in &relations {
            match relation.parent {
                None => {
                    if let Some(existing) = root {
                        let existing: &Relation = &relations[existing];
                        return Err(ArborError::config(format!(
                            "two hierarchy roots: '{}' and '{}'",
                            existing.short_name, relation.short_name
                        )));
                    }
                    root = Some(by_short_name[relation.short_name]);
                }
                Some(parent) => {
                    if !by_short_name.contains_key(parent) {
                        return Err(ArborError::config(format!(
                            "relation '{}' names unknown parent '{}'",
                            relation.short_name, parent
                        )));
                    }
                }
            }
        }
        let root = root.ok_or_else(|| ArborError::config("relation hierarchy has no root"))?;

        Ok(RelationRegistry {
            relations,
            by_short_name,
            root,
        })
    }

    /// Relations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    /// Look up a relation by short name.
    pub fn by_short_name(&self, short_name: &str) -> Option<&Relation> {
        self.by_short_name
            .get(short_name)
            .map(|&index| &self.relations[index])
    }

    /// The generic root relation (`dep`).
    pub fn generic(&self) -> &Relation {
        &self.relations[self.root]
    }

    /// Check whether `ancestor` is `descendant` or one of its ancestors in
    /// the specialization hierarchy.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        let mut current = match self.by_short_name.get(descendant) {
            Some(&index) => &self.relations[index],
            None => return false,
        };
        loop {
            if current.short_name == ancestor {
                return true;
            }
            match current.parent.and_then(|p| self.by_short_name.get(p)) {
                Some(&index) => current = &self.relations[index],
                None => return false,
            }
        }
    }

    /// Number of declared relations.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
