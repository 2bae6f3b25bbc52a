//! Arena-backed directed similarity graph
//!
//! Vertices live in a `Vec` and are addressed by `u32` id; the text string
//! maps to its id. Each vertex keeps its out- and in-neighbours in insertion
//! order so traversals are deterministic.

use crate::types::{FeatureSet, TextEntry};
use rustc_hash::{FxHashMap, FxHashSet};

/// A vertex of the similarity graph
#[derive(Debug, Clone)]
pub struct SimilarityVertex {
    /// The text and the row position it was taken from
    pub entry: TextEntry,
    /// Features of the text
    pub words: FeatureSet,
    out_edges: Vec<u32>,
    in_edges: Vec<u32>,
}

impl SimilarityVertex {
    fn new(entry: TextEntry, words: FeatureSet) -> Self {
        Self {
            entry,
            words,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }

    /// The vertex text
    pub fn text(&self) -> &str {
        &self.entry.text
    }
}

/// Directed graph over distinct texts with payload-free edges
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    vertices: Vec<SimilarityVertex>,
    text_to_id: FxHashMap<String, u32>,
    edge_set: FxHashSet<(u32, u32)>,
}

impl SimilarityGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with pre-allocated vertex capacity
    pub fn with_capacity(vertex_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            text_to_id: FxHashMap::with_capacity_and_hasher(vertex_capacity, Default::default()),
            edge_set: FxHashSet::default(),
        }
    }

    /// Add a vertex keyed by its text, returning its id.
    ///
    /// Adding a text that is already present replaces its payload and keeps
    /// its id and edges.
    pub fn add_vertex(&mut self, entry: TextEntry, words: FeatureSet) -> u32 {
        if let Some(&id) = self.text_to_id.get(&entry.text) {
            let vertex = &mut self.vertices[id as usize];
            vertex.entry = entry;
            vertex.words = words;
            return id;
        }

        let id = self.vertices.len() as u32;
        self.text_to_id.insert(entry.text.clone(), id);
        self.vertices.push(SimilarityVertex::new(entry, words));
        id
    }

    /// Add a directed edge `from -> to`.
    ///
    /// Returns `false` (and changes nothing) for self-loops, duplicates and
    /// unknown ids.
    pub fn add_edge(&mut self, from: u32, to: u32) -> bool {
        if from == to {
            return false;
        }
        let n = self.vertices.len() as u32;
        if from >= n || to >= n {
            return false;
        }
        if !self.edge_set.insert((from, to)) {
            return false;
        }
        self.vertices[from as usize].out_edges.push(to);
        self.vertices[to as usize].in_edges.push(from);
        true
    }

    /// Check if the directed edge `from -> to` exists
    pub fn has_edge(&self, from: u32, to: u32) -> bool {
        self.edge_set.contains(&(from, to))
    }

    /// Get a vertex by id
    pub fn vertex(&self, id: u32) -> Option<&SimilarityVertex> {
        self.vertices.get(id as usize)
    }

    /// Get a vertex id by text
    pub fn vertex_id(&self, text: &str) -> Option<u32> {
        self.text_to_id.get(text).copied()
    }

    /// Vertex ids in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = u32> + '_ {
        0..self.vertices.len() as u32
    }

    /// Targets of the out-edges of `id`, in insertion order
    pub fn out_vertices(&self, id: u32) -> &[u32] {
        self.vertices
            .get(id as usize)
            .map(|v| v.out_edges.as_slice())
            .unwrap_or(&[])
    }

    /// Sources of the in-edges of `id`, in insertion order
    pub fn in_vertices(&self, id: u32) -> &[u32] {
        self.vertices
            .get(id as usize)
            .map(|v| v.in_edges.as_slice())
            .unwrap_or(&[])
    }

    /// All edges, grouped by source in vertex order
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .flat_map(|(i, v)| v.out_edges.iter().map(move |&to| (i as u32, to)))
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.edge_set.len()
    }

    /// Check if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> TextEntry {
        TextEntry {
            text: text.to_string(),
            orig_index: "0".to_string(),
            index: "0".to_string(),
        }
    }

    #[test]
    fn test_add_vertex_by_text() {
        let mut graph = SimilarityGraph::new();
        let a = graph.add_vertex(entry("a"), FeatureSet::default());
        let b = graph.add_vertex(entry("b"), FeatureSet::default());
        let a2 = graph.add_vertex(entry("a"), FeatureSet::default());
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.vertex_id("b"), Some(b));
        assert_eq!(graph.vertex(a).unwrap().text(), "a");
    }

    #[test]
    fn test_edges_directed_no_dupes_no_loops() {
        let mut graph = SimilarityGraph::new();
        let a = graph.add_vertex(entry("a"), FeatureSet::default());
        let b = graph.add_vertex(entry("b"), FeatureSet::default());

        assert!(graph.add_edge(a, b));
        assert!(!graph.add_edge(a, b));
        assert!(!graph.add_edge(a, a));
        assert!(!graph.add_edge(a, 7));
        assert!(graph.has_edge(a, b));
        assert!(!graph.has_edge(b, a));
        assert_eq!(graph.out_vertices(a), &[b]);
        assert_eq!(graph.in_vertices(b), &[a]);
        assert!(graph.out_vertices(b).is_empty());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(a, b)]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = SimilarityGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.vertices().count(), 0);
        assert!(graph.out_vertices(0).is_empty());
    }
}
