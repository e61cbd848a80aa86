//! Bracketed-tree reading.
//!
//! [`TreeReader`] turns Penn-style bracketed text like
//! `(IP (NP (NR Shanghai)) (VP (VV develops)))` into a [`Tree`], creating one
//! [`TokenNode`] per terminal. Leaf tokens get a one-based token index, their
//! preterminal tag, and (when configured on the reader) a document id and
//! sentence index, so the resulting nodes carry full positional identity.
//!
//! Label conversion is an explicit hook on the reader: a converter closure
//! maps every raw interior label before it is stored, which is where callers
//! strip corpus-specific decorations they do not want downstream.

use crate::error::{ArborError, Result};
use crate::token::TokenNode;
use crate::tree::Tree;

/// Converts a raw label from the bracketed text into the label stored on the
/// tree.
pub type LabelConverter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Reader for Penn-style bracketed trees.
///
/// # Examples
///
/// ```
/// use arbor::tree::TreeReader;
///
/// let reader = TreeReader::new().with_doc_id("doc1").with_sentence_index(0);
/// let tree = reader.read_tree("(NP (NR Shanghai))").unwrap();
/// let token = tree.tokens()[0];
/// assert_eq!(token.word(), "Shanghai");
/// assert_eq!(token.tag(), "NR");
/// assert_eq!(token.token_index(), Some(1));
/// assert_eq!(token.doc_id(), "doc1");
/// ```
#[derive(Default)]
pub struct TreeReader {
    doc_id: Option<String>,
    sentence_index: Option<usize>,
    converter: Option<LabelConverter>,
}

impl TreeReader {
    /// Create a reader with default settings.
    pub fn new() -> Self {
        TreeReader::default()
    }

    /// Set the document id stamped onto every token.
    pub fn with_doc_id<S: Into<String>>(mut self, doc_id: S) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    /// Set the sentence index stamped onto every token.
    pub fn with_sentence_index(mut self, index: usize) -> Self {
        self.sentence_index = Some(index);
        self
    }

    /// Set the label converter applied to every interior label.
    pub fn with_label_converter(mut self, converter: LabelConverter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Read exactly one tree from `text`.
    pub fn read_tree(&self, text: &str) -> Result<Tree> {
        let mut trees = self.read_trees(text)?;
        match trees.len() {
            1 => Ok(trees.remove(0)),
            0 => Err(ArborError::tree_syntax("no tree found in input")),
            n => Err(ArborError::tree_syntax(format!(
                "expected one tree, found {n}"
            ))),
        }
    }

    /// Read all trees from `text`, in order.
    pub fn read_trees(&self, text: &str) -> Result<Vec<Tree>> {
        let tokens = lex(text)?;
        let mut cursor = 0;
        let mut trees = Vec::new();
        while cursor < tokens.len() {
            let (tree, next) = self.parse_node(&tokens, cursor)?;
            trees.push(tree);
            cursor = next;
        }
        for (sentence_offset, tree) in trees.iter().enumerate() {
            self.stamp_tokens(tree, sentence_offset);
        }
        Ok(trees)
    }

    fn parse_node(&self, tokens: &[Lexeme], at: usize) -> Result<(Tree, usize)> {
        match tokens.get(at) {
            Some(Lexeme::Open) => {}
            Some(Lexeme::Atom(text)) => {
                // A bare atom outside brackets is a single-token tree.
                return Ok((Tree::leaf(TokenNode::from_word(text.clone())), at + 1));
            }
            Some(Lexeme::Close) => {
                return Err(ArborError::tree_syntax("unexpected ')'"));
            }
            None => return Err(ArborError::tree_syntax("unexpected end of input")),
        }

        let label = match tokens.get(at + 1) {
            Some(Lexeme::Atom(text)) => self.convert_label(text),
            _ => {
                return Err(ArborError::tree_syntax(
                    "expected a label after '('".to_string(),
                ));
            }
        };

        let mut children = Vec::new();
        let mut cursor = at + 2;
        loop {
            match tokens.get(cursor) {
                Some(Lexeme::Close) => {
                    cursor += 1;
                    break;
                }
                Some(Lexeme::Open) => {
                    let (child, next) = self.parse_node(tokens, cursor)?;
                    children.push(child);
                    cursor = next;
                }
                Some(Lexeme::Atom(text)) => {
                    let token = TokenNode::from_word(text.clone());
                    token.set_tag(&label);
                    children.push(Tree::leaf(token));
                    cursor += 1;
                }
                None => {
                    return Err(ArborError::tree_syntax(format!(
                        "unbalanced brackets in constituent '{label}'"
                    )));
                }
            }
        }

        if children.is_empty() {
            return Err(ArborError::tree_syntax(format!(
                "constituent '{label}' has no children"
            )));
        }
        Ok((Tree::interior(label, children), cursor))
    }

    fn convert_label(&self, raw: &str) -> String {
        match &self.converter {
            Some(converter) => converter(raw),
            None => raw.to_string(),
        }
    }

    fn stamp_tokens(&self, tree: &Tree, sentence_offset: usize) {
        for (position, token) in tree.tokens().into_iter().enumerate() {
            token.set_token_index(position + 1);
            if let Some(doc_id) = &self.doc_id {
                token.set_doc_id(doc_id.clone());
            }
            if let Some(base) = self.sentence_index {
                token.set_sentence_index(base + sentence_offset);
            }
        }
    }
}

enum Lexeme {
    Open,
    Close,
    Atom(String),
}

fn lex(text: &str) -> Result<Vec<Lexeme>> {
    let mut lexemes = Vec::new();
    let mut atom = String::new();
    let mut depth: i64 = 0;
    for ch in text.chars() {
        if ch == '(' || ch == ')' || ch.is_whitespace() {
            if !atom.is_empty() {
                lexemes.push(Lexeme::Atom(std::mem::take(&mut atom)));
            }
            if ch == '(' {
                depth += 1;
                lexemes.push(Lexeme::Open);
            } else if ch == ')' {
                depth -= 1;
                if depth < 0 {
                    return Err(ArborError::tree_syntax("unbalanced ')'"));
                }
                lexemes.push(Lexeme::Close);
            }
        } else {
            atom.push(ch);
        }
    }
    if !atom.is_empty() {
        lexemes.push(Lexeme::Atom(atom));
    }
    if depth != 0 {
        return Err(ArborError::tree_syntax("unbalanced '('"));
    }
    Ok(lexemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_simple_tree() {
        let tree = TreeReader::new()
            .read_tree("(IP (NP (NR Shanghai) (NR Pudong)) (VP (VV develops)))")
            .unwrap();
        assert_eq!(tree.category(), "IP");
        assert_eq!(tree.tokens().len(), 3);
    }

    #[test]
    fn test_token_indices_one_based() {
        let tree = TreeReader::new()
            .read_tree("(NP (NR Shanghai) (NR Pudong))")
            .unwrap();
        let indices: Vec<_> = tree.tokens().iter().map(|t| t.token_index()).collect();
        assert_eq!(indices, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_tags_from_preterminals() {
        let tree = TreeReader::new().read_tree("(VP (VV develops))").unwrap();
        assert_eq!(tree.tokens()[0].tag(), "VV");
    }

    #[test]
    fn test_multiple_trees_get_sentence_indices() {
        let trees = TreeReader::new()
            .with_sentence_index(4)
            .read_trees("(NP (NR a)) (NP (NR b))")
            .unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].tokens()[0].sentence_index(), Some(4));
        assert_eq!(trees[1].tokens()[0].sentence_index(), Some(5));
    }

    #[test]
    fn test_label_converter() {
        let tree = TreeReader::new()
            .with_label_converter(Box::new(|raw: &str| {
                crate::tree::basic_category_of(raw).to_string()
            }))
            .read_tree("(NP-SBJ (NR a))")
            .unwrap();
        assert_eq!(tree.category(), "NP");
    }

    #[test]
    fn test_syntax_errors() {
        assert!(TreeReader::new().read_tree("(NP (NR a)").is_err());
        assert!(TreeReader::new().read_tree("(NP)").is_err());
        assert!(TreeReader::new().read_tree("NP) (").is_err());
        assert!(TreeReader::new().read_tree("").is_err());
    }
}
