//! Head finding.
//!
//! For each local tree (a node plus its immediate children), the
//! [`HeadFinder`] picks the child that lexically anchors the constituent. The
//! decision is driven entirely by a per-category rule table: an ordered list
//! of alternatives, each a scan direction plus a candidate category list,
//! followed by a direction-only fallback that skips punctuation.
//!
//! Tables are plain data validated when the finder is built; a category the
//! table does not cover (and no catch-all default exists for) raises
//! [`ArborError::HeadRule`](crate::error::ArborError) rather than guessing.
//! Head finding never mutates the tree and has no hidden state, so repeated
//! calls on the same local tree return the same index.

pub mod tables;

pub use tables::{chinese_head_table, chinese_semantic_head_table};

use ahash::AHashMap;

use crate::error::{ArborError, Result};
use crate::tree::Tree;

/// Scan strategy for one head-rule alternative.
///
/// `Left`/`Right` give priority to the candidate list: each candidate
/// category is tried in turn against every child. `LeftDis`/`RightDis` give
/// priority to child position: each child is tried in turn against the whole
/// candidate set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Candidate priority, scanning children left to right.
    Left,
    /// Candidate priority, scanning children right to left.
    Right,
    /// Position priority, scanning children left to right.
    LeftDis,
    /// Position priority, scanning children right to left.
    RightDis,
}

impl Direction {
    fn leftward(self) -> bool {
        matches!(self, Direction::Left | Direction::LeftDis)
    }
}

/// One alternative in a category's rule list.
#[derive(Clone, Debug)]
pub struct HeadRule {
    /// Scan direction for this alternative.
    pub direction: Direction,
    /// Candidate head categories, in priority order for `Left`/`Right`.
    pub categories: Vec<String>,
}

impl HeadRule {
    /// Build a rule from a direction and candidate categories.
    pub fn new(direction: Direction, categories: &[&str]) -> HeadRule {
        HeadRule {
            direction,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// The rule entry for one category.
#[derive(Clone, Debug)]
pub struct CategoryRules {
    /// Fallback scan direction when no alternative matches.
    pub default_direction: Direction,
    /// Ordered alternatives.
    pub alternatives: Vec<HeadRule>,
}

/// Category-keyed head-rule table.
pub type HeadTable = AHashMap<String, CategoryRules>;

/// Rule-table-driven head finder.
#[derive(Clone, Debug)]
pub struct HeadFinder {
    table: HeadTable,
    /// Applied when a category has no entry; `None` makes unknown categories
    /// a hard error.
    default: Option<Direction>,
}

impl HeadFinder {
    /// Build a finder over a validated table. Empty candidate lists are a
    /// configuration error, reported here rather than mid-sentence.
    pub fn new(table: HeadTable, default: Option<Direction>) -> Result<HeadFinder> {
        for (category, rules) in &table {
            for (position, rule) in rules.alternatives.iter().enumerate() {
                if rule.categories.is_empty() {
                    return Err(ArborError::config(format!(
                        "head rule {position} for category '{category}' has an \
                         empty candidate list"
                    )));
                }
            }
        }
        Ok(HeadFinder { table, default })
    }

    /// Find the head child of a local tree, returning its index.
    ///
    /// Unary nodes trivially return child 0. A node with no children is a
    /// contract violation.
    pub fn find_head(&self, local_tree: &Tree) -> Result<usize> {
        let children = local_tree.children();
        if children.is_empty() {
            return Err(ArborError::tree_contract(format!(
                "cannot find the head of '{}': node has no children",
                local_tree.label()
            )));
        }
        if children.len() == 1 {
            return Ok(0);
        }

        let category = local_tree.basic_category();
        let rules = match self.table.get(category) {
            Some(rules) => rules,
            None => {
                let direction = self.default.ok_or_else(|| {
                    ArborError::head_rule(format!(
                        "no head rule for category '{category}' and no default \
                         direction configured"
                    ))
                })?;
                return Ok(default_scan(children, direction));
            }
        };

        for rule in &rules.alternatives {
            if let Some(index) = scan(children, rule) {
                return Ok(index);
            }
        }
        Ok(default_scan(children, rules.default_direction))
    }
}

fn scan(children: &[Tree], rule: &HeadRule) -> Option<usize> {
    let indices: Vec<usize> = if rule.direction.leftward() {
        (0..children.len()).collect()
    } else {
        (0..children.len()).rev().collect()
    };
    match rule.direction {
        Direction::Left | Direction::Right => {
            for candidate in &rule.categories {
                for &index in &indices {
                    if children[index].basic_category() == candidate {
                        return Some(index);
                    }
                }
            }
            None
        }
        Direction::LeftDis | Direction::RightDis => {
            for &index in &indices {
                let category = children[index].basic_category();
                if rule.categories.iter().any(|c| c == category) {
                    return Some(index);
                }
            }
            None
        }
    }
}

/// Direction-only fallback: the outermost non-punctuation child, or the
/// outermost child when everything is punctuation.
fn default_scan(children: &[Tree], direction: Direction) -> usize {
    let indices: Vec<usize> = if direction.leftward() {
        (0..children.len()).collect()
    } else {
        (0..children.len()).rev().collect()
    };
    for &index in &indices {
        if !is_punctuation(children[index].basic_category()) {
            return index;
        }
    }
    indices[0]
}

fn is_punctuation(category: &str) -> bool {
    matches!(category, "PU" | "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    fn finder() -> HeadFinder {
        HeadFinder::new(chinese_head_table(), None).unwrap()
    }

    #[test]
    fn test_unary_returns_sole_child() {
        let tree = Tree::parse("(VP (VV develops))").unwrap();
        assert_eq!(finder().find_head(&tree).unwrap(), 0);
    }

    #[test]
    fn test_np_head_is_rightmost_noun() {
        let tree = Tree::parse("(NP (NR Shanghai) (NR Pudong))").unwrap();
        assert_eq!(finder().find_head(&tree).unwrap(), 1);

        let with_modifier = Tree::parse("(NP (ADJP (JJ new)) (NN airport) (PU ,))").unwrap();
        assert_eq!(finder().find_head(&with_modifier).unwrap(), 1);
    }

    #[test]
    fn test_ip_head_is_vp() {
        let tree =
            Tree::parse("(IP (NP (NR Shanghai)) (VP (VV develops) (NP (NN industry))))").unwrap();
        assert_eq!(finder().find_head(&tree).unwrap(), 1);
    }

    #[test]
    fn test_candidate_priority_vs_position_priority() {
        // Candidate priority: VE outranks VV even when VV comes first.
        let table = chinese_head_table();
        let finder = HeadFinder::new(table, None).unwrap();
        let vp = Tree::parse("(VP (ADVP (AD just)) (VV develop))").unwrap();
        assert_eq!(finder.find_head(&vp).unwrap(), 1);
    }

    #[test]
    fn test_unknown_category_without_default_errors() {
        let tree = Tree::parse("(XYZZY (NN a) (NN b))").unwrap();
        let result = finder().find_head(&tree);
        assert!(matches!(result, Err(ArborError::HeadRule(_))));
    }

    #[test]
    fn test_unknown_category_with_default() {
        let finder = HeadFinder::new(chinese_head_table(), Some(Direction::Right)).unwrap();
        let tree = Tree::parse("(XYZZY (NN a) (NN b) (PU .))").unwrap();
        // Rightmost non-punctuation child.
        assert_eq!(finder.find_head(&tree).unwrap(), 1);
    }

    #[test]
    fn test_childless_node_is_contract_error() {
        let bad = Tree::interior("NP", vec![]);
        assert!(matches!(
            finder().find_head(&bad),
            Err(ArborError::TreeContract(_))
        ));
    }

    #[test]
    fn test_empty_candidate_list_rejected_at_build() {
        let mut table = HeadTable::new();
        table.insert(
            "NP".to_string(),
            CategoryRules {
                default_direction: Direction::Right,
                alternatives: vec![HeadRule {
                    direction: Direction::Right,
                    categories: vec![],
                }],
            },
        );
        assert!(matches!(
            HeadFinder::new(table, None),
            Err(ArborError::Config(_))
        ));
    }

    #[test]
    fn test_find_head_is_pure() {
        let finder = finder();
        let tree = Tree::parse("(NP (NR Shanghai) (NR Pudong))").unwrap();
        let first = finder.find_head(&tree).unwrap();
        for _ in 0..10 {
            assert_eq!(finder.find_head(&tree).unwrap(), first);
        }
    }
}
