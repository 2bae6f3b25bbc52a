//! The collapsed graph handed to layout and rendering
//!
//! Vertices are components (ids `0..k`), each carrying the display labels of
//! its member texts. Edges are re-projected relations: at most one per
//! unordered pair of components and never a self-loop.

use rustc_hash::FxHashSet;
use serde::Serialize;

/// Payload of a merged vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedVertex {
    /// `<origIndex><index> <text>` for every member, in discovery order
    pub texts: Vec<String>,
}

/// Graph of components with deduplicated relation edges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedGraph {
    vertices: Vec<MergedVertex>,
    edges: Vec<(usize, usize)>,
    #[serde(skip)]
    pairs: FxHashSet<(usize, usize)>,
}

impl MergedGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, returning its id
    pub fn add_vertex(&mut self, texts: Vec<String>) -> usize {
        self.vertices.push(MergedVertex { texts });
        self.vertices.len() - 1
    }

    /// Add the edge `u -> v`.
    ///
    /// Returns `false` without changing anything if `u == v`, either id is
    /// unknown, or the pair is already connected in either direction.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || u >= self.vertices.len() || v >= self.vertices.len() {
            return false;
        }
        if !self.pairs.insert((u.min(v), u.max(v))) {
            return false;
        }
        self.edges.push((u, v));
        true
    }

    /// Vertex ids
    pub fn vertices(&self) -> impl Iterator<Item = usize> {
        0..self.vertices.len()
    }

    /// Payload of a vertex
    pub fn vertex(&self, id: usize) -> Option<&MergedVertex> {
        self.vertices.get(id)
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Check if `u` and `v` are connected (in either direction)
    pub fn edge(&self, u: usize, v: usize) -> bool {
        self.pairs.contains(&(u.min(v), u.max(v)))
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
