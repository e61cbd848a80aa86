//! Annotation key declarations.
//!
//! Every feature a token can carry is identified by a zero-sized marker type
//! implementing [`AnnotationKey`]. The key fixes the value type at compile
//! time, so a store access through a key can never yield a value of the wrong
//! type.
//!
//! Alongside the marker types, one static table ([`KEY_TABLE`]) records the
//! (canonical name, legacy short name, value-type name) triple for every key.
//! The legacy short names are the identifiers used by older annotation
//! catalogs and in serialized output; [`lookup_legacy_name`] resolves them
//! without any reflection.
//!
//! # Examples
//!
//! ```
//! use arbor::annotation::key::{AnnotationKey, LemmaKey, lookup_legacy_name};
//!
//! assert_eq!(LemmaKey::NAME, "lemma");
//! let info = lookup_legacy_name("Lemma").unwrap();
//! assert_eq!(info.name, "lemma");
//! ```

use ahash::AHashMap;
use lazy_static::lazy_static;

/// A typed feature identifier.
///
/// Implementors are zero-sized marker types; the associated `Value` type is
/// what an [`AnnotationStore`](super::AnnotationStore) holds under this key.
pub trait AnnotationKey: 'static {
    /// The runtime value type stored under this key.
    type Value: Clone + Send + Sync + std::fmt::Debug + 'static;

    /// Canonical key name.
    const NAME: &'static str;

    /// Legacy short name, as used by older annotation catalogs.
    const LEGACY_NAME: &'static str;
}

/// Metadata for one declared key: canonical name, legacy short name, and the
/// name of the value type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    /// Canonical key name.
    pub name: &'static str,
    /// Legacy short name.
    pub legacy_name: &'static str,
    /// Name of the runtime value type.
    pub value_type: &'static str,
}

macro_rules! annotation_keys {
    ($( $(#[$doc:meta])* $key:ident => ($name:literal, $legacy:literal, $value:ty); )+) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct $key;

            impl AnnotationKey for $key {
                type Value = $value;
                const NAME: &'static str = $name;
                const LEGACY_NAME: &'static str = $legacy;
            }
        )+

        lazy_static! {
            /// The single metadata table for all declared keys, in declaration
            /// order. Built once on first use.
            pub static ref KEY_TABLE: Vec<KeyInfo> = vec![
                $(
                    KeyInfo {
                        name: $name,
                        legacy_name: $legacy,
                        value_type: std::any::type_name::<$value>(),
                    },
                )+
            ];

            static ref BY_LEGACY_NAME: AHashMap<&'static str, KeyInfo> = {
                let mut map = AHashMap::with_capacity(KEY_TABLE.len());
                for info in KEY_TABLE.iter() {
                    map.insert(info.legacy_name, *info);
                }
                map
            };
        }
    };
}

annotation_keys! {
    /// Surface form of the token.
    WordKey => ("word", "Text", String);
    /// Part-of-speech tag.
    TagKey => ("tag", "PartOfSpeech", String);
    /// Constituent category (interior tree labels).
    CategoryKey => ("category", "Category", String);
    /// Lemma (base form).
    LemmaKey => ("lemma", "Lemma", String);
    /// Named-entity tag.
    NamedEntityKey => ("ner", "NamedEntityTag", String);
    /// Character offset of the first character, within the document.
    CharOffsetBeginKey => ("char_offset_begin", "CharacterOffsetBegin", usize);
    /// Character offset one past the last character, within the document.
    CharOffsetEndKey => ("char_offset_end", "CharacterOffsetEnd", usize);
    /// Identifier of the containing document.
    DocIdKey => ("doc_id", "DocID", String);
    /// Zero-based index of the containing sentence within the document.
    SentenceIndexKey => ("sentence_index", "SentenceIndex", usize);
    /// One-based index of the token within its sentence.
    TokenIndexKey => ("token_index", "Index", usize);
    /// Generic string value, used for labels with no richer key.
    ValueKey => ("value", "Value", String);
}

/// Resolve a legacy short name to its key metadata, if declared.
pub fn lookup_legacy_name(legacy: &str) -> Option<KeyInfo> {
    BY_LEGACY_NAME.get(legacy).copied()
}
