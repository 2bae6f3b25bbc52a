//! # reasongraph
//!
//! Builds a causal graph from reason/result pairs and merges texts that say
//! roughly the same thing.
//!
//! Each text is reduced to the basic forms of its content words. Texts whose
//! feature sets have a Jaccard index of at least 0.4 are linked; every
//! connected group of linked texts becomes one vertex of a [`MergedGraph`],
//! and the input relations are re-projected onto those vertices.
//!
//! ## Features
//!
//! - **Pluggable analysis**: any [`MorphAnalyzer`] can feed features; a
//!   dictionary-free script analyzer and a CSV dictionary analyzer ship
//!   with the crate
//! - **Deterministic**: vertex ids, member order and edge order depend only
//!   on the input row order, also when the pairwise scan runs in parallel
//! - **Layout boundary**: export a layout request and render SVG from an
//!   externally computed layout

pub mod data;
pub mod errors;
pub mod graph;
pub mod layout;
pub mod nlp;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod similarity;
pub mod types;

// Re-export commonly used types
pub use errors::{GraphError, Result};
pub use types::{
    DuplicatePolicy, FeatureSet, GraphConfig, PosTag, Reachability, Row, TextEntry, Word,
};

// Re-export main functionality
pub use data::{load_rows, read_rows};
pub use graph::{
    connected_components, ComponentMerger, Components, MergedGraph, MergedVertex,
    SimilarityGraph, SimilarityGraphBuilder,
};
pub use layout::{Layout, LayoutHints, LayoutRequest, Layouter};
pub use nlp::{DictionaryAnalyzer, FeatureExtractor, MorphAnalyzer, PretokenizedAnalyzer, ScriptAnalyzer};
pub use pipeline::{Pipeline, PipelineOutput, PipelineStats};
pub use registry::TextRegistry;
pub use render::{render_svg, SvgStyle};
pub use similarity::jaccard;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
