//! # Arbor
//!
//! Converts constituency (phrase-structure) parse trees into directed, typed
//! dependency graphs.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Rule-table-driven head finding
//! - Ordered tree-shape rules for relation classification
//! - Graph rewriting that collapses function-word relations
//! - Copy-node identity model for coordination distribution
//!
//! ## Pipeline
//!
//! ```
//! use arbor::prelude::*;
//!
//! let converter = DependencyConverter::chinese().unwrap();
//! let tree = Tree::parse("(IP (NP (NR Shanghai) (NR Pudong)) (VP (VV develops)))").unwrap();
//! let graph = converter.convert(&tree, DependencyMode::Basic).unwrap();
//! assert_eq!(graph.root().word(), "develops");
//! ```

pub mod annotation;
pub mod convert;
pub mod error;
pub mod graph;
pub mod head;
pub mod pattern;
pub mod relation;
pub mod token;
pub mod tree;

pub mod prelude {
    //! Commonly used types, re-exported.
    pub use crate::convert::DependencyConverter;
    pub use crate::error::{ArborError, Result};
    pub use crate::graph::{DependencyGraph, DependencyMode, RenderOptions};
    pub use crate::token::TokenNode;
    pub use crate::tree::{Tree, TreeReader};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
