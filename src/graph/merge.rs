//! Component merging and relation re-projection
//!
//! Process:
//! 1. Find the components of the similarity graph
//! 2. Create one merged vertex per component, labelled with its members
//! 3. Re-project every input relation (reason → result) onto components,
//!    dropping relations inside one component and duplicate pairs

use super::components::{connected_components, Components};
use super::merged::MergedGraph;
use super::similarity_graph::SimilarityGraph;
use crate::errors::{GraphError, Result};
use crate::types::{GraphConfig, Reachability, Row};

/// Collapses a similarity graph into a [`MergedGraph`]
#[derive(Debug, Clone, Default)]
pub struct ComponentMerger {
    reachability: Reachability,
}

impl ComponentMerger {
    /// Create a merger with the default reachability
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger from a graph config
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            reachability: config.reachability,
        }
    }

    /// Set the reachability used for component detection
    pub fn with_reachability(mut self, reachability: Reachability) -> Self {
        self.reachability = reachability;
        self
    }

    /// Find components and collapse the graph in one step.
    pub fn merge(&self, graph: &SimilarityGraph, relations: &[Row]) -> Result<MergedGraph> {
        let components = self.components(graph);
        self.collapse(graph, &components, relations)
    }

    /// Find the components of `graph` with this merger's reachability.
    pub fn components(&self, graph: &SimilarityGraph) -> Components {
        connected_components(graph, self.reachability)
    }

    /// Collapse `graph` along precomputed `components`.
    ///
    /// Fails with [`GraphError::MissingComponent`] if a relation names a text
    /// that is not a vertex of `graph`.
    pub fn collapse(
        &self,
        graph: &SimilarityGraph,
        components: &Components,
        relations: &[Row],
    ) -> Result<MergedGraph> {
        let mut merged = MergedGraph::new();

        for members in components.iter() {
            let texts = members
                .iter()
                .map(|&id| {
                    graph
                        .vertex(id)
                        .map(|v| v.entry.label())
                        .ok_or_else(|| GraphError::internal(format!("component member {id} is not a vertex")))
                })
                .collect::<Result<Vec<_>>>()?;
            merged.add_vertex(texts);
        }

        let mut internal = 0usize;
        for relation in relations {
            let u = Self::component_of_text(graph, components, &relation.reason)?;
            let v = Self::component_of_text(graph, components, &relation.result)?;
            if u == v {
                internal += 1;
                continue;
            }
            merged.add_edge(u, v);
        }

        tracing::debug!(
            components = merged.vertex_count(),
            edges = merged.edge_count(),
            internal_relations = internal,
            "graph merged"
        );
        Ok(merged)
    }

    fn component_of_text(
        graph: &SimilarityGraph,
        components: &Components,
        text: &str,
    ) -> Result<usize> {
        graph
            .vertex_id(text)
            .and_then(|id| components.component_of(id))
            .ok_or_else(|| GraphError::missing_component(text))
    }
}
