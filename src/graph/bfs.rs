//! Multi-source breadth-first search over a digraph.

use std::collections::VecDeque;

use bit_vec::BitVec;

use crate::error::{LexnetError, Result};
use crate::graph::digraph::Digraph;

/// Shortest directed paths (fewest edges) from a set of source vertices.
///
/// All sources sit at depth zero, so `dist_to(v)` is the distance from the
/// nearest source. The scratch arrays belong to this value alone and are
/// dropped with it.
#[derive(Debug, Clone)]
pub struct BreadthFirstPaths {
    marked: BitVec,
    edge_to: Vec<usize>,
    dist_to: Vec<usize>,
}

impl BreadthFirstPaths {
    /// Run a BFS from a single source vertex.
    pub fn new(graph: &Digraph, source: usize) -> Result<Self> {
        Self::from_sources(graph, [source])
    }

    /// Run a BFS from every vertex in `sources` simultaneously.
    ///
    /// Fails if `sources` is empty or names a vertex outside the graph.
    pub fn from_sources<I>(graph: &Digraph, sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let n = graph.vertex_count();
        let mut paths = BreadthFirstPaths {
            marked: BitVec::from_elem(n, false),
            edge_to: vec![usize::MAX; n],
            dist_to: vec![usize::MAX; n],
        };

        let mut queue = VecDeque::new();
        for s in sources {
            graph.validate_vertex(s)?;
            if !paths.marked[s] {
                paths.marked.set(s, true);
                paths.dist_to[s] = 0;
                queue.push_back(s);
            }
        }
        if queue.is_empty() {
            return Err(LexnetError::invalid_argument(
                "breadth-first search needs at least one source vertex",
            ));
        }

        while let Some(v) = queue.pop_front() {
            for &w in graph.adj(v) {
                if !paths.marked[w] {
                    paths.marked.set(w, true);
                    paths.edge_to[w] = v;
                    paths.dist_to[w] = paths.dist_to[v] + 1;
                    queue.push_back(w);
                }
            }
        }

        Ok(paths)
    }

    /// Whether some source reaches `v`.
    pub fn has_path_to(&self, v: usize) -> bool {
        self.marked.get(v).unwrap_or(false)
    }

    /// Number of edges on a shortest path from the nearest source to `v`.
    pub fn dist_to(&self, v: usize) -> Option<usize> {
        self.has_path_to(v).then(|| self.dist_to[v])
    }

    /// A shortest path from the nearest source to `v`, source first.
    pub fn path_to(&self, v: usize) -> Option<Vec<usize>> {
        if !self.has_path_to(v) {
            return None;
        }
        let mut path = vec![v];
        let mut x = v;
        while self.dist_to[x] != 0 {
            x = self.edge_to[x];
            path.push(x);
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Digraph {
        let mut g = Digraph::new(n);
        for &(v, w) in edges {
            g.add_edge(v, w).unwrap();
        }
        g
    }

    #[test]
    fn test_single_source() {
        let g = graph(5, &[(0, 1), (1, 2), (0, 3), (3, 2), (4, 0)]);
        let paths = BreadthFirstPaths::new(&g, 0).unwrap();

        assert_eq!(paths.dist_to(0), Some(0));
        assert_eq!(paths.dist_to(2), Some(2));
        assert_eq!(paths.dist_to(4), None);
        assert!(!paths.has_path_to(4));
        assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(paths.path_to(4), None);
    }

    #[test]
    fn test_follows_edge_direction() {
        let g = graph(3, &[(0, 1), (2, 1)]);
        let paths = BreadthFirstPaths::new(&g, 1).unwrap();
        assert_eq!(paths.dist_to(1), Some(0));
        assert!(!paths.has_path_to(0));
        assert!(!paths.has_path_to(2));
    }

    #[test]
    fn test_multi_source_uses_nearest() {
        // 0 -> 1 -> 2 -> 3, 4 -> 3
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (4, 3)]);
        let paths = BreadthFirstPaths::from_sources(&g, [0, 4]).unwrap();
        assert_eq!(paths.dist_to(3), Some(1));
        assert_eq!(paths.path_to(3), Some(vec![4, 3]));
        assert_eq!(paths.dist_to(2), Some(2));
    }

    #[test]
    fn test_duplicate_sources() {
        let g = graph(2, &[(0, 1)]);
        let paths = BreadthFirstPaths::from_sources(&g, [0, 0, 0]).unwrap();
        assert_eq!(paths.dist_to(1), Some(1));
    }

    #[test]
    fn test_invalid_sources() {
        let g = graph(2, &[(0, 1)]);
        assert!(BreadthFirstPaths::new(&g, 2).unwrap_err().is_invalid_argument());
        assert!(
            BreadthFirstPaths::from_sources(&g, Vec::<usize>::new())
                .unwrap_err()
                .is_invalid_argument()
        );
    }
}
