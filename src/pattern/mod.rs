//! Tree-shape patterns.
//!
//! The relation classifier expresses its rules as small structural patterns
//! over a governor's local neighborhood. A [`ShapePattern`] is a closed
//! combinator tree - category and word tests, boolean composition, child and
//! dominance steps, sibling precedence and adjacency steps, and named
//! captures. Matching a pattern at a node yields every [`ShapeMatch`]
//! (capture assignment) that satisfies it.
//!
//! There is deliberately no string-pattern language here: rules are built
//! from these combinators directly, so malformed patterns are impossible to
//! construct and the only build-time failure is a bad embedded regex.
//!
//! # Examples
//!
//! A pattern for "an NP child that precedes a VP sibling", capturing the NP:
//!
//! ```
//! use arbor::pattern::{NodeCtx, ShapePattern};
//! use arbor::tree::Tree;
//!
//! let pattern = ShapePattern::child(ShapePattern::capture(
//!     "target",
//!     ShapePattern::all(vec![
//!         ShapePattern::category("NP").unwrap(),
//!         ShapePattern::precedes_sibling(ShapePattern::category("VP").unwrap()),
//!     ]),
//! ));
//!
//! let tree = Tree::parse("(IP (NP (NR Pudong)) (VP (VV develops)))").unwrap();
//! let matches = pattern.matches(NodeCtx::root(&tree));
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].capture("target").unwrap().category(), "NP");
//! ```

use ahash::AHashMap;
use regex::Regex;

use crate::error::{ArborError, Result};
use crate::tree::Tree;

/// A node under consideration, together with its sibling context when known.
#[derive(Clone, Copy)]
pub struct NodeCtx<'t> {
    /// The node the pattern is evaluated at.
    pub node: &'t Tree,
    /// The siblings slice containing the node and its index within it.
    /// `None` at the root of a pattern evaluation.
    pub parent: Option<(&'t [Tree], usize)>,
}

impl<'t> NodeCtx<'t> {
    /// Context for a pattern's root node (no sibling information).
    pub fn root(node: &'t Tree) -> Self {
        NodeCtx { node, parent: None }
    }

    fn child(&self, index: usize) -> NodeCtx<'t> {
        NodeCtx {
            node: &self.node.children()[index],
            parent: Some((self.node.children(), index)),
        }
    }

    fn sibling(&self, index: usize) -> Option<NodeCtx<'t>> {
        let (siblings, _) = self.parent?;
        Some(NodeCtx {
            node: &siblings[index],
            parent: Some((siblings, index)),
        })
    }
}

/// One capture assignment produced by a successful match.
#[derive(Clone, Debug, Default)]
pub struct ShapeMatch<'t> {
    captures: AHashMap<&'static str, &'t Tree>,
}

impl<'t> ShapeMatch<'t> {
    /// Look up a captured node by name.
    pub fn capture(&self, name: &str) -> Option<&'t Tree> {
        self.captures.get(name).copied()
    }

    fn merged(&self, other: &ShapeMatch<'t>) -> Option<ShapeMatch<'t>> {
        let mut captures = self.captures.clone();
        for (&name, &node) in other.captures.iter() {
            match captures.get(name) {
                Some(&existing) if !std::ptr::eq(existing, node) => return None,
                _ => {
                    captures.insert(name, node);
                }
            }
        }
        Some(ShapeMatch { captures })
    }

    fn with(&self, name: &'static str, node: &'t Tree) -> Option<ShapeMatch<'t>> {
        match self.captures.get(name) {
            Some(existing) if !std::ptr::eq(*existing, node) => None,
            _ => {
                let mut captures = self.captures.clone();
                captures.insert(name, node);
                Some(ShapeMatch { captures })
            }
        }
    }
}

/// A structural pattern over a local tree neighborhood.
#[derive(Clone, Debug)]
pub enum ShapePattern {
    /// The node's basic category matches the regex (fully anchored).
    Category(Regex),
    /// The node's terminal word (leaf or preterminal) matches the regex.
    Word(Regex),
    /// All sub-patterns hold, with compatible captures.
    All(Vec<ShapePattern>),
    /// At least one sub-pattern holds.
    Any(Vec<ShapePattern>),
    /// The sub-pattern does not hold. Captures inside are discarded.
    Not(Box<ShapePattern>),
    /// Some child matches the sub-pattern.
    Child(Box<ShapePattern>),
    /// Some proper descendant matches the sub-pattern (dominance).
    Descendant(Box<ShapePattern>),
    /// Some earlier sibling matches the sub-pattern.
    FollowsSibling(Box<ShapePattern>),
    /// Some later sibling matches the sub-pattern.
    PrecedesSibling(Box<ShapePattern>),
    /// The immediately preceding sibling matches the sub-pattern.
    ImmediatelyFollows(Box<ShapePattern>),
    /// The immediately following sibling matches the sub-pattern.
    ImmediatelyPrecedes(Box<ShapePattern>),
    /// Bind the current node under the given name while matching the
    /// sub-pattern.
    Capture(&'static str, Box<ShapePattern>),
}

impl ShapePattern {
    /// Category test. The regex is anchored to the whole basic category.
    pub fn category(pattern: &str) -> Result<ShapePattern> {
        Ok(ShapePattern::Category(anchored(pattern)?))
    }

    /// Terminal-word test. The regex is anchored to the whole word.
    pub fn word(pattern: &str) -> Result<ShapePattern> {
        Ok(ShapePattern::Word(anchored(pattern)?))
    }

    /// Conjunction of sub-patterns.
    pub fn all(patterns: Vec<ShapePattern>) -> ShapePattern {
        ShapePattern::All(patterns)
    }

    /// Disjunction of sub-patterns.
    pub fn any(patterns: Vec<ShapePattern>) -> ShapePattern {
        ShapePattern::Any(patterns)
    }

    /// Negation.
    pub fn not(pattern: ShapePattern) -> ShapePattern {
        ShapePattern::Not(Box::new(pattern))
    }

    /// Child step.
    pub fn child(pattern: ShapePattern) -> ShapePattern {
        ShapePattern::Child(Box::new(pattern))
    }

    /// Dominance step (proper descendant).
    pub fn descendant(pattern: ShapePattern) -> ShapePattern {
        ShapePattern::Descendant(Box::new(pattern))
    }

    /// Some earlier sibling matches.
    pub fn follows_sibling(pattern: ShapePattern) -> ShapePattern {
        ShapePattern::FollowsSibling(Box::new(pattern))
    }

    /// Some later sibling matches.
    pub fn precedes_sibling(pattern: ShapePattern) -> ShapePattern {
        ShapePattern::PrecedesSibling(Box::new(pattern))
    }

    /// The immediately preceding sibling matches.
    pub fn immediately_follows(pattern: ShapePattern) -> ShapePattern {
        ShapePattern::ImmediatelyFollows(Box::new(pattern))
    }

    /// The immediately following sibling matches.
    pub fn immediately_precedes(pattern: ShapePattern) -> ShapePattern {
        ShapePattern::ImmediatelyPrecedes(Box::new(pattern))
    }

    /// Named capture of the current node.
    pub fn capture(name: &'static str, pattern: ShapePattern) -> ShapePattern {
        ShapePattern::Capture(name, Box::new(pattern))
    }

    /// All capture assignments under which this pattern matches at `ctx`.
    pub fn matches<'t>(&self, ctx: NodeCtx<'t>) -> Vec<ShapeMatch<'t>> {
        match self {
            ShapePattern::Category(re) => {
                boolean(re.is_match(ctx.node.basic_category()))
            }
            ShapePattern::Word(re) => boolean(
                ctx.node
                    .terminal_word()
                    .map(|word| re.is_match(&word))
                    .unwrap_or(false),
            ),
            ShapePattern::All(patterns) => {
                let mut acc = vec![ShapeMatch::default()];
                for pattern in patterns {
                    let sub = pattern.matches(ctx);
                    let mut next = Vec::new();
                    for left in &acc {
                        for right in &sub {
                            if let Some(merged) = left.merged(right) {
                                next.push(merged);
                            }
                        }
                    }
                    if next.is_empty() {
                        return Vec::new();
                    }
                    acc = next;
                }
                acc
            }
            ShapePattern::Any(patterns) => patterns
                .iter()
                .flat_map(|pattern| pattern.matches(ctx))
                .collect(),
            ShapePattern::Not(pattern) => boolean(pattern.matches(ctx).is_empty()),
            ShapePattern::Child(pattern) => (0..ctx.node.children().len())
                .flat_map(|index| pattern.matches(ctx.child(index)))
                .collect(),
            ShapePattern::Descendant(pattern) => {
                let mut out = Vec::new();
                collect_descendant_matches(pattern, ctx, &mut out);
                out
            }
            ShapePattern::FollowsSibling(pattern) => match ctx.parent {
                Some((_, index)) => (0..index)
                    .filter_map(|sibling| ctx.sibling(sibling))
                    .flat_map(|sibling| pattern.matches(sibling))
                    .collect(),
                None => Vec::new(),
            },
            ShapePattern::PrecedesSibling(pattern) => match ctx.parent {
                Some((siblings, index)) => (index + 1..siblings.len())
                    .filter_map(|sibling| ctx.sibling(sibling))
                    .flat_map(|sibling| pattern.matches(sibling))
                    .collect(),
                None => Vec::new(),
            },
            ShapePattern::ImmediatelyFollows(pattern) => match ctx.parent {
                Some((_, index)) if index > 0 => ctx
                    .sibling(index - 1)
                    .map(|sibling| pattern.matches(sibling))
                    .unwrap_or_default(),
                _ => Vec::new(),
            },
            ShapePattern::ImmediatelyPrecedes(pattern) => match ctx.parent {
                Some((siblings, index)) if index + 1 < siblings.len() => ctx
                    .sibling(index + 1)
                    .map(|sibling| pattern.matches(sibling))
                    .unwrap_or_default(),
                _ => Vec::new(),
            },
            ShapePattern::Capture(name, pattern) => pattern
                .matches(ctx)
                .iter()
                .filter_map(|m| m.with(*name, ctx.node))
                .collect(),
        }
    }

    /// Check whether some match at `ctx` binds `name` to exactly `node`
    /// (node identity, not equality).
    pub fn matches_binding(&self, ctx: NodeCtx<'_>, name: &str, node: &Tree) -> bool {
        self.matches(ctx).iter().any(|m| {
            m.capture(name)
                .map(|bound| std::ptr::eq(bound, node))
                .unwrap_or(false)
        })
    }
}

fn boolean<'t>(held: bool) -> Vec<ShapeMatch<'t>> {
    if held {
        vec![ShapeMatch::default()]
    } else {
        Vec::new()
    }
}

fn collect_descendant_matches<'t>(
    pattern: &ShapePattern,
    ctx: NodeCtx<'t>,
    out: &mut Vec<ShapeMatch<'t>>,
) {
    for index in 0..ctx.node.children().len() {
        let child = ctx.child(index);
        out.extend(pattern.matches(child));
        collect_descendant_matches(pattern, child, out);
    }
}

fn anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| ArborError::config(format!("bad shape pattern /{pattern}/: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::parse("(IP (NP (NR Shanghai) (NR Pudong)) (VP (VV develops)))").unwrap()
    }

    #[test]
    fn test_category_is_anchored() {
        let tree = sample();
        // "P" must not match "IP".
        assert!(ShapePattern::category("P")
            .unwrap()
            .matches(NodeCtx::root(&tree))
            .is_empty());
        assert!(!ShapePattern::category("IP")
            .unwrap()
            .matches(NodeCtx::root(&tree))
            .is_empty());
    }

    #[test]
    fn test_child_and_word() {
        let tree = sample();
        let pattern = ShapePattern::child(ShapePattern::all(vec![
            ShapePattern::category("VP").unwrap(),
            ShapePattern::descendant(ShapePattern::word("develops").unwrap()),
        ]));
        assert_eq!(pattern.matches(NodeCtx::root(&tree)).len(), 1);
    }

    #[test]
    fn test_sibling_adjacency() {
        let tree = sample();
        let np = &tree.children()[0];

        // Shanghai (NR) immediately precedes Pudong (NR).
        let pattern = ShapePattern::child(ShapePattern::all(vec![
            ShapePattern::word("Shanghai").unwrap(),
            ShapePattern::immediately_precedes(ShapePattern::word("Pudong").unwrap()),
        ]));
        assert_eq!(pattern.matches(NodeCtx::root(np)).len(), 1);

        let reversed = ShapePattern::child(ShapePattern::all(vec![
            ShapePattern::word("Pudong").unwrap(),
            ShapePattern::immediately_precedes(ShapePattern::word("Shanghai").unwrap()),
        ]));
        assert!(reversed.matches(NodeCtx::root(np)).is_empty());
    }

    #[test]
    fn test_precedence_vs_adjacency() {
        let tree = Tree::parse("(NP (NR a) (ADJP (JJ x)) (NR b))").unwrap();
        let precedes = ShapePattern::child(ShapePattern::all(vec![
            ShapePattern::word("a").unwrap(),
            ShapePattern::precedes_sibling(ShapePattern::word("b").unwrap()),
        ]));
        assert_eq!(precedes.matches(NodeCtx::root(&tree)).len(), 1);

        let adjacent = ShapePattern::child(ShapePattern::all(vec![
            ShapePattern::word("a").unwrap(),
            ShapePattern::immediately_precedes(ShapePattern::word("b").unwrap()),
        ]));
        assert!(adjacent.matches(NodeCtx::root(&tree)).is_empty());
    }

    #[test]
    fn test_capture_resolves_to_specific_node() {
        let tree = sample();
        let pattern = ShapePattern::child(ShapePattern::capture(
            "target",
            ShapePattern::all(vec![
                ShapePattern::category("NP").unwrap(),
                ShapePattern::precedes_sibling(ShapePattern::category("VP").unwrap()),
            ]),
        ));

        let np = &tree.children()[0];
        let vp = &tree.children()[1];
        assert!(pattern.matches_binding(NodeCtx::root(&tree), "target", np));
        assert!(!pattern.matches_binding(NodeCtx::root(&tree), "target", vp));
    }

    #[test]
    fn test_negation() {
        let tree = sample();
        let no_pp_child = ShapePattern::not(ShapePattern::child(
            ShapePattern::category("PP").unwrap(),
        ));
        assert_eq!(no_pp_child.matches(NodeCtx::root(&tree)).len(), 1);
    }

    #[test]
    fn test_bad_regex_is_config_error() {
        let result = ShapePattern::category("(unclosed");
        assert!(matches!(result, Err(crate::error::ArborError::Config(_))));
    }
}
