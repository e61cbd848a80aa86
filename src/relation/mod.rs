//! Grammatical relations.
//!
//! A [`Relation`] names one grammatical role (subject, object, modifier, ...)
//! and carries the machinery to recognize it: a governor category scope and
//! an ordered list of tree-shape rules. Relations live in a
//! [`RelationRegistry`], a single-rooted specialization hierarchy under the
//! generic `dep` relation, held in declaration order - which is also the
//! classifier's precedence order.

pub mod classifier;
pub mod definitions;
pub mod registry;

pub use classifier::RelationClassifier;
pub use definitions::chinese_relation_registry;
pub use registry::{Relation, RelationRegistry, ShapeRule};
