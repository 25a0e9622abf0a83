//! # Lexnet
//!
//! Relatedness queries over a controlled vocabulary organized as a hierarchy
//! of synonym sets (synsets).
//!
//! ## Features
//!
//! - Load synset and hypernym relations and validate them as a rooted DAG
//! - Shortest ancestral path (SAP) queries between vertices or vertex sets
//! - Term distance and common-ancestor explanations
//! - Outcast detection over groups of terms

pub mod cli;
pub mod error;
pub mod graph;
pub mod outlier;
pub mod sap;
pub mod vocabulary;

pub mod prelude {
    pub use crate::error::{LexnetError, Result};
    pub use crate::graph::Digraph;
    pub use crate::outlier::{DistanceOracle, OutlierFinder};
    pub use crate::sap::{AncestralPath, Sap};
    pub use crate::vocabulary::{VocabularyConfig, VocabularyGraph};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
