//! Shortest ancestral path queries.
//!
//! An ancestral path between vertex sets `V` and `W` is a pair of directed
//! paths, one from a member of `V` and one from a member of `W`, that end at
//! the same vertex, the common ancestor. Its length is the sum of the two path
//! lengths. [`Sap`] answers the shortest such path with two multi-source
//! breadth-first searches followed by one ascending scan over every vertex, so
//! each query costs `O(V + E)`.
//!
//! When several ancestors tie for the minimum the scan keeps the lowest vertex
//! id. That is a reproducible choice, not a semantically preferred ancestor.
//!
//! # Examples
//!
//! ```
//! use lexnet::graph::Digraph;
//! use lexnet::sap::Sap;
//!
//! let mut g = Digraph::new(4);
//! g.add_edge(0, 2).unwrap();
//! g.add_edge(1, 2).unwrap();
//! g.add_edge(2, 3).unwrap();
//!
//! let sap = Sap::new(g).unwrap();
//! assert_eq!(sap.length(0, 1).unwrap(), Some(2));
//! assert_eq!(sap.ancestor(0, 1).unwrap(), Some(2));
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LexnetError, Result};
use crate::graph::{BreadthFirstPaths, Digraph, DirectedCycle};

/// Length and common ancestor of a shortest ancestral path.
///
/// Both fields are `None` when the two source sets share no ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestralPath {
    pub length: Option<usize>,
    pub ancestor: Option<usize>,
}

impl AncestralPath {
    /// The "no path" result.
    pub const NONE: AncestralPath = AncestralPath {
        length: None,
        ancestor: None,
    };

    /// Whether a common ancestor exists.
    pub fn exists(&self) -> bool {
        self.ancestor.is_some()
    }

    /// The length, or `-1` when no common ancestor exists.
    pub fn length_or_sentinel(&self) -> i64 {
        self.length.map_or(-1, |l| l as i64)
    }

    /// The ancestor, or `-1` when no common ancestor exists.
    pub fn ancestor_or_sentinel(&self) -> i64 {
        self.ancestor.map_or(-1, |a| a as i64)
    }
}

/// A shortest ancestral path spelled out vertex by vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestralRoute {
    pub length: usize,
    pub ancestor: usize,
    /// From the nearest member of the first set up to the ancestor.
    pub from_v: Vec<usize>,
    /// From the nearest member of the second set up to the ancestor.
    pub from_w: Vec<usize>,
}

/// Shortest-ancestral-path engine over an immutable acyclic digraph.
///
/// Queries take `&self` and allocate their own search state, so one engine can
/// serve any number of threads at once.
#[derive(Debug, Clone)]
pub struct Sap {
    graph: Digraph,
}

impl Sap {
    /// Create an engine over `graph`, which must be acyclic.
    pub fn new(graph: Digraph) -> Result<Self> {
        if let Some(cycle) = DirectedCycle::new(&graph).cycle() {
            return Err(LexnetError::invalid_argument(format!(
                "digraph contains a cycle: {cycle:?}"
            )));
        }
        Ok(Sap { graph })
    }

    /// The underlying digraph.
    pub fn digraph(&self) -> &Digraph {
        &self.graph
    }

    /// Shortest ancestral path between two single vertices.
    pub fn query(&self, v: usize, w: usize) -> Result<AncestralPath> {
        self.query_sets([v], [w])
    }

    /// Shortest ancestral path between two vertex sets.
    pub fn query_sets<V, W>(&self, v: V, w: W) -> Result<AncestralPath>
    where
        V: IntoIterator<Item = usize>,
        W: IntoIterator<Item = usize>,
    {
        let (paths_v, paths_w) = self.search(v, w)?;
        Ok(self.scan(&paths_v, &paths_w))
    }

    /// Length of a shortest ancestral path between `v` and `w`.
    pub fn length(&self, v: usize, w: usize) -> Result<Option<usize>> {
        Ok(self.query(v, w)?.length)
    }

    /// A common ancestor of `v` and `w` on a shortest ancestral path.
    pub fn ancestor(&self, v: usize, w: usize) -> Result<Option<usize>> {
        Ok(self.query(v, w)?.ancestor)
    }

    /// Length of a shortest ancestral path between any vertex of `v` and any
    /// vertex of `w`.
    pub fn length_sets<V, W>(&self, v: V, w: W) -> Result<Option<usize>>
    where
        V: IntoIterator<Item = usize>,
        W: IntoIterator<Item = usize>,
    {
        Ok(self.query_sets(v, w)?.length)
    }

    /// A common ancestor on a shortest ancestral path between the two sets.
    pub fn ancestor_sets<V, W>(&self, v: V, w: W) -> Result<Option<usize>>
    where
        V: IntoIterator<Item = usize>,
        W: IntoIterator<Item = usize>,
    {
        Ok(self.query_sets(v, w)?.ancestor)
    }

    /// The shortest ancestral path between the two sets, with both legs.
    pub fn route_sets<V, W>(&self, v: V, w: W) -> Result<Option<AncestralRoute>>
    where
        V: IntoIterator<Item = usize>,
        W: IntoIterator<Item = usize>,
    {
        let (paths_v, paths_w) = self.search(v, w)?;
        let found = self.scan(&paths_v, &paths_w);
        let (Some(length), Some(ancestor)) = (found.length, found.ancestor) else {
            return Ok(None);
        };

        let (Some(from_v), Some(from_w)) = (paths_v.path_to(ancestor), paths_w.path_to(ancestor))
        else {
            return Err(LexnetError::internal(format!(
                "ancestor {ancestor} is not reachable from both sides"
            )));
        };

        Ok(Some(AncestralRoute {
            length,
            ancestor,
            from_v,
            from_w,
        }))
    }

    /// Answer many single-vertex length queries in parallel.
    pub fn lengths(&self, pairs: &[(usize, usize)]) -> Result<Vec<Option<usize>>> {
        pairs
            .par_iter()
            .map(|&(v, w)| self.length(v, w))
            .collect()
    }

    fn search<V, W>(&self, v: V, w: W) -> Result<(BreadthFirstPaths, BreadthFirstPaths)>
    where
        V: IntoIterator<Item = usize>,
        W: IntoIterator<Item = usize>,
    {
        let paths_v = BreadthFirstPaths::from_sources(&self.graph, v)?;
        let paths_w = BreadthFirstPaths::from_sources(&self.graph, w)?;
        Ok((paths_v, paths_w))
    }

    fn scan(&self, paths_v: &BreadthFirstPaths, paths_w: &BreadthFirstPaths) -> AncestralPath {
        let mut best = AncestralPath::NONE;
        for x in 0..self.graph.vertex_count() {
            let (Some(dv), Some(dw)) = (paths_v.dist_to(x), paths_w.dist_to(x)) else {
                continue;
            };
            let length = dv + dw;
            if best.length.is_none_or(|shortest| length < shortest) {
                best = AncestralPath {
                    length: Some(length),
                    ancestor: Some(x),
                };
            }
        }
        best
    }
}
