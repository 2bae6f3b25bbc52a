//! Component detection over the similarity graph
//!
//! Vertices are scanned in id order; each unassigned vertex seeds a
//! breadth-first traversal. The order in which vertices are discovered
//! fixes both the component ids and the member order inside each component.

use super::similarity_graph::SimilarityGraph;
use crate::types::Reachability;
use std::collections::VecDeque;

/// A partition of the graph's vertices into components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    /// Members of each component, in discovery order
    components: Vec<Vec<u32>>,
    /// Component id of each vertex
    membership: Vec<usize>,
}

impl Components {
    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if there are no components (empty graph)
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component id of a vertex
    pub fn component_of(&self, vertex: u32) -> Option<usize> {
        self.membership.get(vertex as usize).copied()
    }

    /// Members of a component
    pub fn members(&self, component: usize) -> Option<&[u32]> {
        self.components.get(component).map(Vec::as_slice)
    }

    /// Iterate over components in id order
    pub fn iter(&self) -> impl Iterator<Item = &[u32]> {
        self.components.iter().map(Vec::as_slice)
    }

    /// Size of the largest component
    pub fn largest(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Find the components of `graph`.
///
/// With [`Reachability::OutEdges`] a component is everything reachable from
/// its seed along out-edges. On a graph with one-way edges this is not a
/// true connectivity relation: a vertex that only points into an earlier
/// component seeds a component of its own. With [`Reachability::Undirected`]
/// the traversal also follows in-edges and the result is the
/// weakly-connected components.
pub fn connected_components(graph: &SimilarityGraph, reachability: Reachability) -> Components {
    const UNASSIGNED: usize = usize::MAX;

    let n = graph.vertex_count();
    let mut membership = vec![UNASSIGNED; n];
    let mut components: Vec<Vec<u32>> = Vec::new();
    let mut queue = VecDeque::new();

    for seed in graph.vertices() {
        if membership[seed as usize] != UNASSIGNED {
            continue;
        }

        let key = components.len();
        let mut component = Vec::new();
        membership[seed as usize] = key;
        queue.push_back(seed);

        while let Some(v) = queue.pop_front() {
            component.push(v);

            let neighbours = graph.out_vertices(v).iter();
            let reverse = match reachability {
                Reachability::Undirected => graph.in_vertices(v),
                Reachability::OutEdges => &[][..],
            };
            for &w in neighbours.chain(reverse) {
                if membership[w as usize] == UNASSIGNED {
                    membership[w as usize] = key;
                    queue.push_back(w);
                }
            }
        }

        components.push(component);
    }

    Components {
        components,
        membership,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeatureSet, TextEntry};

    fn graph(n: usize, edges: &[(u32, u32)]) -> SimilarityGraph {
        let mut graph = SimilarityGraph::new();
        for i in 0..n {
            graph.add_vertex(
                TextEntry {
                    text: format!("t{i}"),
                    orig_index: i.to_string(),
                    index: "0".to_string(),
                },
                FeatureSet::default(),
            );
        }
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    #[test]
    fn test_symmetric_chain() {
        let g = graph(4, &[(0, 1), (1, 0), (1, 2), (2, 1)]);
        for reachability in [Reachability::Undirected, Reachability::OutEdges] {
            let comps = connected_components(&g, reachability);
            assert_eq!(comps.len(), 2);
            assert_eq!(comps.members(0), Some(&[0, 1, 2][..]));
            assert_eq!(comps.members(1), Some(&[3][..]));
            assert_eq!(comps.component_of(2), Some(0));
            assert_eq!(comps.largest(), 3);
        }
    }

    #[test]
    fn test_one_way_edge_into_earlier_vertex() {
        // 1 -> 0 only: out-edge traversal from seed 0 cannot reach 1
        let g = graph(2, &[(1, 0)]);

        let out = connected_components(&g, Reachability::OutEdges);
        assert_eq!(out.len(), 2);

        let undirected = connected_components(&g, Reachability::Undirected);
        assert_eq!(undirected.len(), 1);
        assert_eq!(undirected.members(0), Some(&[0, 1][..]));
    }

    #[test]
    fn test_bfs_discovery_order() {
        let g = graph(5, &[(0, 3), (0, 1), (3, 4), (1, 2)]);
        let comps = connected_components(&g, Reachability::OutEdges);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps.members(0), Some(&[0, 3, 1, 4, 2][..]));
    }

    #[test]
    fn test_partition() {
        let g = graph(6, &[(0, 2), (2, 0), (4, 5)]);
        let comps = connected_components(&g, Reachability::Undirected);
        let mut seen: Vec<u32> = comps.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
        for (id, members) in comps.iter().enumerate() {
            for &v in members {
                assert_eq!(comps.component_of(v), Some(id));
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let comps = connected_components(&SimilarityGraph::new(), Reachability::default());
        assert!(comps.is_empty());
        assert_eq!(comps.largest(), 0);
    }
}
