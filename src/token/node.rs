//! Token identity nodes.
//!
//! # Identity
//!
//! Two nodes are equal iff their (document id, sentence index, token index,
//! copy index) all match; when either side carries a pseudo-position it must
//! match as well. Hashes are derived from (document id, sentence index, token
//! index) only and cached once, which is sound because identity fields are
//! immutable after construction. Ordering is total: the sentinel
//! [`TokenNode::no_word`] node sorts before everything else, pseudo-positions
//! (when set on either side) take precedence over positional fields, and
//! otherwise nodes order by document id, then sentence index, token index,
//! and copy index.
//!
//! # Copies
//!
//! - [`TokenNode::make_copy`] produces a *hard* copy with an independently
//!   cloned store; later edits diverge.
//! - [`TokenNode::make_soft_copy_indexed`] produces a *soft* copy sharing the
//!   source's store and remembering the true original; edits stay mirrored.
//! - [`TokenNode::make_soft_copy`] draws the next copy index from a counter
//!   owned by the true original, so indices are dense per original starting
//!   at 1 no matter how many hops of soft-copying happened in between.
//!
//! A copy index of 0 means "not a copy".
//!
//! # Examples
//!
//! ```
//! use arbor::token::TokenNode;
//!
//! let original = TokenNode::from_word("bank");
//! let first = original.make_soft_copy();
//! let second = first.make_soft_copy();
//!
//! assert_eq!(first.copy_index(), 1);
//! assert_eq!(second.copy_index(), 2);
//! assert_eq!(second.original().unwrap(), &original);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use parking_lot::RwLock;
use tracing::warn;

use crate::annotation::key::{
    AnnotationKey, CharOffsetBeginKey, CharOffsetEndKey, DocIdKey, LemmaKey, NamedEntityKey,
    SentenceIndexKey, TagKey, TokenIndexKey, WordKey,
};
use crate::annotation::store::AnnotationStore;

/// Hash value used when a node carries none of the identity fields. Hashing
/// such a node is documented-unreliable and logged.
const UNRELIABLE_HASH: u64 = 0x7f77_7f77_7f77_7f77;

/// Hash value reserved for the sentinel no-word node.
const NO_WORD_HASH: u64 = 0;

/// A token with position-based identity, wrapping one annotation store.
///
/// Cloning a `TokenNode` produces an alias of the same node (shared store,
/// same identity), not a copy node; use [`TokenNode::make_copy`] or the
/// soft-copy constructors for those.
#[derive(Clone, Debug)]
pub struct TokenNode {
    store: Arc<RwLock<AnnotationStore>>,
    copy_index: usize,
    pseudo_position: Option<f64>,
    /// Set only on soft copies; always points at the true original.
    original: Option<Box<TokenNode>>,
    /// Next soft-copy index, shared between an original and its soft copies.
    copy_counter: Arc<AtomicUsize>,
    cached_hash: Arc<OnceLock<u64>>,
    no_word: bool,
}

impl TokenNode {
    /// Create a node with an empty store.
    pub fn new() -> Self {
        TokenNode {
            store: Arc::new(RwLock::new(AnnotationStore::new())),
            copy_index: 0,
            pseudo_position: None,
            original: None,
            copy_counter: Arc::new(AtomicUsize::new(1)),
            cached_hash: Arc::new(OnceLock::new()),
            no_word: false,
        }
    }

    /// Create a node carrying just a surface word.
    pub fn from_word<S: Into<String>>(word: S) -> Self {
        let node = TokenNode::new();
        node.store.write().set::<WordKey>(word.into());
        node
    }

    /// The sentinel node: sorts before every other node and equals only
    /// other sentinels.
    pub fn no_word() -> Self {
        let mut node = TokenNode::new();
        node.no_word = true;
        node
    }

    /// Check whether this is the sentinel no-word node.
    pub fn is_no_word(&self) -> bool {
        self.no_word
    }

    // --- store access -----------------------------------------------------

    /// Read an annotation value (cloned out of the shared store).
    pub fn annotation<K: AnnotationKey>(&self) -> Option<K::Value> {
        self.store.read().get_cloned::<K>()
    }

    /// Write an annotation value, returning the previous one if any.
    pub fn set_annotation<K: AnnotationKey>(&self, value: K::Value) -> Option<K::Value> {
        self.store.write().set::<K>(value)
    }

    /// Run a closure against the underlying store (read lock held).
    pub fn with_store<R>(&self, f: impl FnOnce(&AnnotationStore) -> R) -> R {
        f(&self.store.read())
    }

    // --- convenience accessors --------------------------------------------

    /// Surface word, or the empty string when unset.
    pub fn word(&self) -> String {
        self.store.read().get_string::<WordKey>()
    }

    /// Part-of-speech tag, or the empty string when unset.
    pub fn tag(&self) -> String {
        self.store.read().get_string::<TagKey>()
    }

    /// Lemma, or the empty string when unset.
    pub fn lemma(&self) -> String {
        self.store.read().get_string::<LemmaKey>()
    }

    /// Named-entity tag, or the empty string when unset.
    pub fn ner(&self) -> String {
        self.store.read().get_string::<NamedEntityKey>()
    }

    /// Document id, or the empty string when unset.
    pub fn doc_id(&self) -> String {
        self.store.read().get_string::<DocIdKey>()
    }

    /// Zero-based sentence index within the document.
    pub fn sentence_index(&self) -> Option<usize> {
        self.annotation::<SentenceIndexKey>()
    }

    /// One-based token index within the sentence.
    pub fn token_index(&self) -> Option<usize> {
        self.annotation::<TokenIndexKey>()
    }

    /// Character offsets (begin, end) within the document.
    pub fn char_offsets(&self) -> (Option<usize>, Option<usize>) {
        let store = self.store.read();
        (
            store.get_cloned::<CharOffsetBeginKey>(),
            store.get_cloned::<CharOffsetEndKey>(),
        )
    }

    /// Set the surface word.
    pub fn set_word<S: Into<String>>(&self, word: S) {
        self.set_annotation::<WordKey>(word.into());
    }

    /// Set the part-of-speech tag.
    pub fn set_tag<S: Into<String>>(&self, tag: S) {
        self.set_annotation::<TagKey>(tag.into());
    }

    /// Set the lemma.
    pub fn set_lemma<S: Into<String>>(&self, lemma: S) {
        self.set_annotation::<LemmaKey>(lemma.into());
    }

    /// Set the named-entity tag.
    pub fn set_ner<S: Into<String>>(&self, ner: S) {
        self.set_annotation::<NamedEntityKey>(ner.into());
    }

    /// Set the document id. Identity field: set once, before the node is
    /// hashed or compared.
    pub fn set_doc_id<S: Into<String>>(&self, doc_id: S) {
        self.assert_hash_not_cached();
        self.set_annotation::<DocIdKey>(doc_id.into());
    }

    /// Set the sentence index. Identity field: set once, before the node is
    /// hashed or compared.
    pub fn set_sentence_index(&self, index: usize) {
        self.assert_hash_not_cached();
        self.set_annotation::<SentenceIndexKey>(index);
    }

    /// Set the one-based token index. Identity field: set once, before the
    /// node is hashed or compared.
    pub fn set_token_index(&self, index: usize) {
        self.assert_hash_not_cached();
        self.set_annotation::<TokenIndexKey>(index);
    }

    fn assert_hash_not_cached(&self) {
        debug_assert!(
            self.cached_hash.get().is_none(),
            "identity fields must be set before the node is hashed"
        );
    }

    /// Set character offsets within the document.
    pub fn set_char_offsets(&self, begin: usize, end: usize) {
        let mut store = self.store.write();
        store.set::<CharOffsetBeginKey>(begin);
        store.set::<CharOffsetEndKey>(end);
    }

    // --- copy model -------------------------------------------------------

    /// Copy index of this node; 0 means "not a copy".
    pub fn copy_index(&self) -> usize {
        self.copy_index
    }

    /// The true original of a soft copy, or `None` for originals and hard
    /// copies.
    pub fn original(&self) -> Option<&TokenNode> {
        self.original.as_deref()
    }

    fn true_original(&self) -> &TokenNode {
        self.original.as_deref().unwrap_or(self)
    }

    /// Make a *hard* copy: an independent clone of the store with the given
    /// copy index. Later edits to either node are not reflected on the other.
    pub fn make_copy(&self, copy_index: usize) -> TokenNode {
        TokenNode {
            store: Arc::new(RwLock::new(self.store.read().clone())),
            copy_index,
            pseudo_position: self.pseudo_position,
            original: None,
            copy_counter: Arc::new(AtomicUsize::new(1)),
            cached_hash: Arc::new(OnceLock::new()),
            no_word: self.no_word,
        }
    }

    /// Make a *soft* copy with the given copy index: shares this node's store
    /// and records the true original, so repeated soft-copying never chains.
    pub fn make_soft_copy_indexed(&self, copy_index: usize) -> TokenNode {
        TokenNode {
            store: self.store.clone(),
            copy_index,
            pseudo_position: self.pseudo_position,
            original: Some(Box::new(self.true_original().clone())),
            copy_counter: self.copy_counter.clone(),
            cached_hash: Arc::new(OnceLock::new()),
            no_word: self.no_word,
        }
    }

    /// Make a soft copy with the next free index for this node's true
    /// original. Indices are dense per original, starting at 1.
    pub fn make_soft_copy(&self) -> TokenNode {
        if let Some(original) = self.original.as_deref() {
            return original.make_soft_copy();
        }
        let index = self.copy_counter.fetch_add(1, AtomicOrdering::SeqCst);
        self.make_soft_copy_indexed(index)
    }

    // --- pseudo-position --------------------------------------------------

    /// Fractional position overriding natural ordering, used when splicing
    /// nodes between existing token positions.
    pub fn pseudo_position(&self) -> Option<f64> {
        self.pseudo_position
    }

    /// Set the pseudo-position.
    pub fn set_pseudo_position(&mut self, position: f64) {
        self.pseudo_position = Some(position);
    }

    /// Position used when at least one side of a comparison has a
    /// pseudo-position: the pseudo-position if set, else the token index
    /// widened to f64.
    fn effective_position(&self) -> f64 {
        self.pseudo_position
            .unwrap_or_else(|| self.token_index().unwrap_or(0) as f64)
    }

    // --- identity ---------------------------------------------------------

    fn identity_hash(&self) -> u64 {
        *self.cached_hash.get_or_init(|| {
            if self.no_word {
                return NO_WORD_HASH;
            }
            let doc_id = self.doc_id();
            let sentence = self.sentence_index();
            let token = self.token_index();
            if doc_id.is_empty() && sentence.is_none() && token.is_none() {
                warn!(
                    word = %self.word(),
                    "hashing a token node with no document id, sentence index, \
                     or token index; the hash is unreliable"
                );
                return UNRELIABLE_HASH;
            }
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            doc_id.hash(&mut hasher);
            sentence.hash(&mut hasher);
            token.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// Render as `word-index`, with one `'` per copy index, e.g. `bank-3''`
    /// for copy 2 of token 3.
    pub fn render_name(&self) -> String {
        if self.no_word {
            return "NO_WORD".to_string();
        }
        let word = self.word();
        let marks = "'".repeat(self.copy_index);
        match self.token_index() {
            Some(index) => format!("{word}-{index}{marks}"),
            None => format!("{word}{marks}"),
        }
    }
}

impl Default for TokenNode {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TokenNode {
    fn eq(&self, other: &Self) -> bool {
        if self.no_word || other.no_word {
            return self.no_word && other.no_word;
        }
        if self.pseudo_position.is_some() || other.pseudo_position.is_some() {
            match (self.pseudo_position, other.pseudo_position) {
                (Some(a), Some(b)) if a.total_cmp(&b) == Ordering::Equal => {}
                _ => return false,
            }
        }
        self.copy_index == other.copy_index
            && self.doc_id() == other.doc_id()
            && self.sentence_index() == other.sentence_index()
            && self.token_index() == other.token_index()
    }
}

impl Eq for TokenNode {}

impl Hash for TokenNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity_hash());
    }
}

impl PartialOrd for TokenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.no_word, other.no_word) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        if self.pseudo_position.is_some() || other.pseudo_position.is_some() {
            // Pseudo-positions win over positional fields; the trailing
            // tie-breaks only keep Ord consistent with Eq, including the
            // one-sided case where a pseudo-position numerically equals the
            // other side's token index.
            return self
                .effective_position()
                .total_cmp(&other.effective_position())
                .then_with(|| self.positional_cmp(other))
                .then_with(|| {
                    self.pseudo_position
                        .is_some()
                        .cmp(&other.pseudo_position.is_some())
                });
        }
        self.positional_cmp(other)
    }
}

impl TokenNode {
    fn positional_cmp(&self, other: &Self) -> Ordering {
        self.doc_id()
            .cmp(&other.doc_id())
            .then_with(|| self.sentence_index().cmp(&other.sentence_index()))
            .then_with(|| self.token_index().cmp(&other.token_index()))
            .then_with(|| self.copy_index.cmp(&other.copy_index))
    }
}

impl fmt::Display for TokenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_name())
    }
}
