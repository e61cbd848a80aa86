//! Token nodes and the copy model.
//!
//! A [`TokenNode`] wraps one [`AnnotationStore`](crate::annotation::AnnotationStore)
//! and gives it an identity: equality, ordering, and hashing are based on the
//! token's position (document, sentence, token index, copy index), never on
//! its feature content. Copy nodes let one surface token play several roles in
//! a dependency graph, for example under coordination distribution.

pub mod node;

pub use node::TokenNode;
