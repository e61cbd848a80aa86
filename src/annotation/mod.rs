//! Typed annotations attached to tokens.
//!
//! This module provides the two building blocks every token in the pipeline is
//! made of:
//!
//! - [`AnnotationKey`] - a typed feature identifier (a zero-sized marker type
//!   carrying its value type, canonical name, and legacy short name)
//! - [`AnnotationStore`] - a heterogeneous map from keys to values, with the
//!   value type statically tied to the key type
//!
//! Keys are declared once in [`key`], together with a single static metadata
//! table mapping legacy short names to key names and value-type names. There
//! is no runtime reflection: when the key is known at compile time, access is
//! fully typed.

pub mod key;
pub mod store;

pub use key::{AnnotationKey, KeyInfo, lookup_legacy_name};
pub use store::AnnotationStore;
