//! Graph construction and merging
//!
//! - [`similarity_graph`]: arena-backed directed graph over distinct texts
//! - [`builder`]: pairwise similarity scan producing that graph
//! - [`components`]: component detection (out-edge or undirected)
//! - [`merged`] / [`merge`]: the collapsed graph and relation re-projection

pub mod builder;
pub mod components;
pub mod merge;
pub mod merged;
pub mod similarity_graph;

pub use builder::SimilarityGraphBuilder;
pub use components::{connected_components, Components};
pub use merge::ComponentMerger;
pub use merged::{MergedGraph, MergedVertex};
pub use similarity_graph::{SimilarityGraph, SimilarityVertex};
