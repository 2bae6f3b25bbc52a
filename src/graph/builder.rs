//! Similarity graph construction
//!
//! Every ordered pair of distinct texts is scored; a directed edge is added
//! whenever the Jaccard index of their feature sets reaches the threshold.
//! Because the score is symmetric, both directions of a similar pair end up
//! in the graph.
//!
//! The scan is O(n²) in the number of distinct texts. Above
//! `parallel_threshold` texts the rows of the pair matrix are scored with
//! rayon; edges are still inserted in row-major order, so the result is
//! identical to the sequential scan.

use super::similarity_graph::SimilarityGraph;
use crate::errors::{GraphError, Result};
use crate::registry::TextRegistry;
use crate::similarity::is_similar;
use crate::types::{FeatureSet, GraphConfig, DEFAULT_SIMILARITY_THRESHOLD};
use rayon::prelude::*;

/// Builds a [`SimilarityGraph`] from registered texts and their features
#[derive(Debug, Clone)]
pub struct SimilarityGraphBuilder {
    threshold: f64,
    parallel_threshold: usize,
    max_texts: Option<usize>,
}

impl Default for SimilarityGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityGraphBuilder {
    /// Create a builder with the default threshold
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            parallel_threshold: GraphConfig::default().parallel_threshold,
            max_texts: None,
        }
    }

    /// Create a builder from a graph config
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            threshold: config.similarity_threshold,
            parallel_threshold: config.parallel_threshold,
            max_texts: config.max_texts,
        }
    }

    /// Set the similarity threshold (inclusive)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of texts from which the scan runs in parallel
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold.max(1);
        self
    }

    /// The similarity threshold in use
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Build the graph.
    ///
    /// `features[i]` must be the feature set of the registry entry with id `i`.
    pub fn build(&self, registry: &TextRegistry, features: &[FeatureSet]) -> Result<SimilarityGraph> {
        if features.len() != registry.len() {
            return Err(GraphError::internal(format!(
                "{} feature sets for {} texts",
                features.len(),
                registry.len()
            )));
        }
        if let Some(max) = self.max_texts {
            if registry.len() > max {
                return Err(GraphError::invalid_config(format!(
                    "{} distinct texts exceed max_texts = {max}",
                    registry.len()
                )));
            }
        }

        let mut graph = SimilarityGraph::with_capacity(registry.len());
        for (entry, words) in registry.entries().iter().zip(features) {
            graph.add_vertex(entry.clone(), words.clone());
        }

        let targets = if features.len() >= self.parallel_threshold {
            self.scan_parallel(features)
        } else {
            self.scan_sequential(features)
        };

        for (from, tos) in targets.into_iter().enumerate() {
            for to in tos {
                graph.add_edge(from as u32, to);
            }
        }

        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            threshold = self.threshold,
            "similarity graph built"
        );
        Ok(graph)
    }

    /// Similar targets of one source, in target order
    fn scan_row(&self, features: &[FeatureSet], from: usize) -> Vec<u32> {
        let words = &features[from];
        features
            .iter()
            .enumerate()
            .filter(|&(to, other)| to != from && is_similar(words, other, self.threshold))
            .map(|(to, _)| to as u32)
            .collect()
    }

    fn scan_sequential(&self, features: &[FeatureSet]) -> Vec<Vec<u32>> {
        (0..features.len())
            .map(|from| self.scan_row(features, from))
            .collect()
    }

    fn scan_parallel(&self, features: &[FeatureSet]) -> Vec<Vec<u32>> {
        (0..features.len())
            .into_par_iter()
            .map(|from| self.scan_row(features, from))
            .collect()
    }
}
