//! Heterogeneous annotation storage.
//!
//! An [`AnnotationStore`] maps [`AnnotationKey`] types to values of the key's
//! declared value type. Keys are unique, iteration order is not meaningful,
//! and access is amortized O(1).
//!
//! The invariant "the stored value always has the key's declared type" is
//! enforced by construction: there is no untyped insertion path.
//!
//! # Examples
//!
//! ```
//! use arbor::annotation::key::{LemmaKey, WordKey};
//! use arbor::annotation::store::AnnotationStore;
//!
//! let mut store = AnnotationStore::new();
//! store.set::<WordKey>("develops".to_string());
//!
//! assert_eq!(store.get::<WordKey>(), Some(&"develops".to_string()));
//! // Missing string-typed keys read as empty, never as a null-like value.
//! assert_eq!(store.get_string::<LemmaKey>(), "");
//! ```

use std::any::{Any, TypeId};

use ahash::AHashMap;

use crate::annotation::key::AnnotationKey;

/// Object-safe wrapper over stored values so the map can hold mixed types
/// while staying clonable.
trait AnnotationValue: Any + Send + Sync + std::fmt::Debug {
    fn clone_box(&self) -> Box<dyn AnnotationValue>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> AnnotationValue for T
where
    T: Any + Clone + Send + Sync + std::fmt::Debug,
{
    fn clone_box(&self) -> Box<dyn AnnotationValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[derive(Debug)]
struct Entry {
    name: &'static str,
    value: Box<dyn AnnotationValue>,
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        Entry {
            name: self.name,
            value: self.value.clone_box(),
        }
    }
}

/// A typesafe heterogeneous map from annotation keys to values.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    entries: AHashMap<TypeId, Entry>,
}

impl AnnotationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        AnnotationStore {
            entries: AHashMap::new(),
        }
    }

    /// Get a reference to the value under key `K`, if present.
    pub fn get<K: AnnotationKey>(&self) -> Option<&K::Value> {
        self.entries
            .get(&TypeId::of::<K>())
            .and_then(|entry| entry.value.as_any().downcast_ref::<K::Value>())
    }

    /// Get a mutable reference to the value under key `K`, if present.
    pub fn get_mut<K: AnnotationKey>(&mut self) -> Option<&mut K::Value> {
        self.entries
            .get_mut(&TypeId::of::<K>())
            .and_then(|entry| entry.value.as_any_mut().downcast_mut::<K::Value>())
    }

    /// Get a clone of the value under key `K`, if present.
    pub fn get_cloned<K: AnnotationKey>(&self) -> Option<K::Value> {
        self.get::<K>().cloned()
    }

    /// Get the string value under key `K`, or the empty string when absent.
    pub fn get_string<K>(&self) -> String
    where
        K: AnnotationKey<Value = String>,
    {
        self.get::<K>().cloned().unwrap_or_default()
    }

    /// Set the value under key `K`, returning the previous value if any.
    pub fn set<K: AnnotationKey>(&mut self, value: K::Value) -> Option<K::Value> {
        let entry = Entry {
            name: K::NAME,
            value: Box::new(value),
        };
        self.entries
            .insert(TypeId::of::<K>(), entry)
            .and_then(|old| old.value.into_any().downcast::<K::Value>().ok())
            .map(|boxed| *boxed)
    }

    /// Remove the value under key `K`, returning it if present.
    pub fn remove<K: AnnotationKey>(&mut self) -> Option<K::Value> {
        self.entries
            .remove(&TypeId::of::<K>())
            .and_then(|old| old.value.into_any().downcast::<K::Value>().ok())
            .map(|boxed| *boxed)
    }

    /// Check whether key `K` is present.
    pub fn contains<K: AnnotationKey>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<K>())
    }

    /// Iterate over the canonical names of the keys present.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().map(|entry| entry.name)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
