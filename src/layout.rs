//! Boundary with the external layout collaborator
//!
//! The core does not place vertices. It hands a [`LayoutRequest`] (the
//! merged graph plus box sizes) to a layered layouter and gets back a
//! [`Layout`]: one box per vertex and one polyline per edge.

use crate::errors::{GraphError, Result};
use crate::graph::{MergedGraph, MergedVertex};
use serde::{Deserialize, Serialize};

/// Size hints passed to the layouter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutHints {
    /// Width of every vertex box
    pub vertex_width: f64,
    /// Height of one text line; a box is one line per member text
    pub text_height: f64,
    /// Vertical gap between layers
    pub layer_margin: f64,
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            vertex_width: 1000.0,
            text_height: 20.0,
            layer_margin: 200.0,
        }
    }
}

impl LayoutHints {
    /// Width and height of the box for `vertex`
    pub fn vertex_size(&self, vertex: &MergedVertex) -> (f64, f64) {
        (
            self.vertex_width,
            self.text_height * vertex.texts.len() as f64,
        )
    }
}

/// One vertex of a [`LayoutRequest`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestVertex {
    pub id: usize,
    pub texts: Vec<String>,
    pub width: f64,
    pub height: f64,
}

/// What an external layouter needs to place the merged graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRequest {
    pub vertices: Vec<RequestVertex>,
    pub edges: Vec<(usize, usize)>,
    pub layer_margin: f64,
}

impl LayoutRequest {
    /// Describe `graph` for a layouter
    pub fn new(graph: &MergedGraph, hints: &LayoutHints) -> Self {
        let vertices = graph
            .vertices()
            .filter_map(|id| {
                let vertex = graph.vertex(id)?;
                let (width, height) = hints.vertex_size(vertex);
                Some(RequestVertex {
                    id,
                    texts: vertex.texts.clone(),
                    width,
                    height,
                })
            })
            .collect();
        Self {
            vertices,
            edges: graph.edges().to_vec(),
            layer_margin: hints.layer_margin,
        }
    }
}

/// A placed vertex; `(x, y)` is the centre of the box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl VertexBox {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// A routed edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePath {
    pub source: usize,
    pub target: usize,
    pub points: Vec<(f64, f64)>,
}

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Geometry produced by a layouter: `vertices[id]` is the box of vertex `id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub vertices: Vec<VertexBox>,
    #[serde(default)]
    pub edges: Vec<EdgePath>,
}

impl Layout {
    /// Parse a layout produced by an external tool
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Box of a vertex
    pub fn vertex_box(&self, id: usize) -> Option<&VertexBox> {
        self.vertices.get(id)
    }

    /// Polyline of the edge between `u` and `v`, routed in either direction
    pub fn edge_path(&self, u: usize, v: usize) -> Option<&EdgePath> {
        self.edges
            .iter()
            .find(|e| e.source == u && e.target == v)
            .or_else(|| self.edges.iter().find(|e| e.source == v && e.target == u))
    }

    /// Verify that every vertex has a box and every edge a polyline.
    pub fn check(&self, graph: &MergedGraph) -> Result<()> {
        if self.vertices.len() != graph.vertex_count() {
            return Err(GraphError::layout(format!(
                "{} boxes for {} vertices",
                self.vertices.len(),
                graph.vertex_count()
            )));
        }
        for &(u, v) in graph.edges() {
            if self.edge_path(u, v).is_none() {
                return Err(GraphError::layout(format!("no polyline for edge {u} -> {v}")));
            }
        }
        Ok(())
    }

    /// Bounding rectangle of all boxes, or `None` for an empty layout
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?;
        let init = Bounds {
            left: first.left(),
            top: first.top(),
            right: first.right(),
            bottom: first.bottom(),
        };
        Some(self.vertices.iter().skip(1).fold(init, |b, v| Bounds {
            left: b.left.min(v.left()),
            top: b.top.min(v.top()),
            right: b.right.max(v.right()),
            bottom: b.bottom.max(v.bottom()),
        }))
    }
}

/// An external layout algorithm
pub trait Layouter {
    /// Place the vertices and route the edges of `graph`.
    fn layout(&self, graph: &MergedGraph, hints: &LayoutHints) -> Result<Layout>;
}
