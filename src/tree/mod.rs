//! Constituency trees.
//!
//! [`Tree`] is an ordered, rooted, labeled tree: interior nodes carry category
//! labels, leaves carry [`TokenNode`]s. The dependency pipeline consumes trees
//! through this interface; [`reader`] provides the bracketed-text reader used
//! by the CLI and tests.

pub mod reader;

pub use reader::TreeReader;

use std::fmt;

use crate::error::{ArborError, Result};
use crate::token::TokenNode;

/// An ordered, rooted, labeled constituency tree.
///
/// Three shapes occur:
/// - *leaf*: a terminal token, no children;
/// - *preterminal*: a part-of-speech label over exactly one leaf;
/// - *interior*: a category label over one or more children.
#[derive(Clone, Debug)]
pub struct Tree {
    label: String,
    token: Option<TokenNode>,
    children: Vec<Tree>,
}

impl Tree {
    /// Create an interior node.
    pub fn interior<S: Into<String>>(label: S, children: Vec<Tree>) -> Tree {
        Tree {
            label: label.into(),
            token: None,
            children,
        }
    }

    /// Create a leaf node holding the given token.
    pub fn leaf(token: TokenNode) -> Tree {
        Tree {
            label: token.word(),
            token: Some(token),
            children: Vec::new(),
        }
    }

    /// Parse a single bracketed tree with default reader settings.
    pub fn parse(text: &str) -> Result<Tree> {
        TreeReader::new().read_tree(text)
    }

    /// The raw label: category for interior nodes, word for leaves.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The category label. For leaves this is the token's word; callers
    /// normally guard with [`Tree::is_leaf`].
    pub fn category(&self) -> &str {
        &self.label
    }

    /// The basic category: the label with any functional-tag suffix stripped,
    /// e.g. `NP-SBJ` and `NP=1` both reduce to `NP`.
    pub fn basic_category(&self) -> &str {
        basic_category_of(&self.label)
    }

    /// Children, in surface order.
    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    /// The token at a leaf.
    pub fn token(&self) -> Option<&TokenNode> {
        self.token.as_ref()
    }

    /// Check whether this node is a terminal leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.token.is_some()
    }

    /// Check whether this node is a preterminal (a tag over a single leaf).
    pub fn is_preterminal(&self) -> bool {
        self.children.len() == 1 && self.children[0].is_leaf()
    }

    /// The terminal word under a leaf or preterminal, if any.
    pub fn terminal_word(&self) -> Option<String> {
        if self.is_leaf() {
            self.token.as_ref().map(|t| t.word())
        } else if self.is_preterminal() {
            self.children[0].token().map(|t| t.word())
        } else {
            None
        }
    }

    /// All leaf tokens, left to right.
    pub fn tokens(&self) -> Vec<&TokenNode> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'t>(&'t self, out: &mut Vec<&'t TokenNode>) {
        if let Some(token) = &self.token {
            out.push(token);
        }
        for child in &self.children {
            child.collect_tokens(out);
        }
    }

    /// Check whether `other` is a node of this subtree (by node identity,
    /// not label equality). Proper dominance excludes the node itself.
    pub fn dominates(&self, other: &Tree) -> bool {
        self.children
            .iter()
            .any(|child| std::ptr::eq(child, other) || child.dominates(other))
    }

    /// Validate the structural contract: every interior (non-leaf) node has
    /// at least one child.
    pub fn check_contract(&self) -> Result<()> {
        if self.token.is_none() && self.children.is_empty() {
            return Err(ArborError::tree_contract(format!(
                "interior node '{}' has no children",
                self.label
            )));
        }
        for child in &self.children {
            child.check_contract()?;
        }
        Ok(())
    }
}

/// Strip a functional-tag suffix from a label: everything from the first
/// `-`, `=`, or `|` on, unless the label itself starts with `-` (as the
/// punctuation tags `-LRB-`/`-RRB-` do).
pub fn basic_category_of(label: &str) -> &str {
    if label.starts_with('-') {
        return label;
    }
    match label.find(['-', '=', '|']) {
        Some(position) => &label[..position],
        None => label,
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return write!(f, "{}", self.label);
        }
        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}
