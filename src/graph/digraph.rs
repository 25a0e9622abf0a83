//! Adjacency-list digraph over dense vertex ids.

use std::io::BufRead;

use crate::error::{LexnetError, Result};

/// A directed graph with a fixed number of vertices `0..V`.
///
/// Edges are stored as adjacency lists in insertion order. Parallel edges are
/// kept; they do not change any shortest-path answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digraph {
    adj: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Digraph {
    /// Create an empty digraph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Digraph {
            adj: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Like [`Digraph::new`], but fails instead of aborting when the
    /// adjacency table cannot be allocated.
    pub fn try_new(vertex_count: usize) -> Result<Self> {
        let mut adj = Vec::new();
        adj.try_reserve_exact(vertex_count).map_err(|e| {
            LexnetError::invalid_argument(format!(
                "cannot allocate a digraph with {vertex_count} vertices: {e}"
            ))
        })?;
        adj.resize_with(vertex_count, Vec::new);
        Ok(Digraph { adj, edge_count: 0 })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add the directed edge `v -> w`.
    pub fn add_edge(&mut self, v: usize, w: usize) -> Result<()> {
        self.validate_vertex(v)?;
        self.validate_vertex(w)?;
        self.adj[v].push(w);
        self.edge_count += 1;
        Ok(())
    }

    /// Vertices adjacent from `v`.
    ///
    /// Panics if `v` is out of range; callers validate ids at their boundary.
    pub fn adj(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    /// Number of edges leaving `v`.
    pub fn outdegree(&self, v: usize) -> Result<usize> {
        self.validate_vertex(v)?;
        Ok(self.adj[v].len())
    }

    /// Vertices with no outgoing edge, in ascending id order.
    pub fn sinks(&self) -> Vec<usize> {
        (0..self.vertex_count())
            .filter(|&v| self.adj[v].is_empty())
            .collect()
    }

    /// Check that `v` names a vertex of this graph.
    pub fn validate_vertex(&self, v: usize) -> Result<()> {
        if v >= self.vertex_count() {
            return Err(LexnetError::invalid_argument(format!(
                "vertex {v} is not between 0 and {}",
                self.vertex_count().saturating_sub(1)
            )));
        }
        Ok(())
    }

    /// Read a digraph from the edge-list text format.
    ///
    /// The first token is the vertex count, the second the edge count, followed
    /// by that many `v w` pairs. Tokens may be split across lines arbitrarily.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut tokens = Vec::new();
        for line in reader.lines() {
            let line = line?;
            for token in line.split_whitespace() {
                tokens.push(parse_count(token)?);
            }
        }

        let mut tokens = tokens.into_iter();
        let vertex_count = tokens
            .next()
            .ok_or_else(|| LexnetError::config("digraph input is empty"))?;
        let edge_count = tokens
            .next()
            .ok_or_else(|| LexnetError::config("digraph input is missing the edge count"))?;

        let mut graph = Digraph::try_new(vertex_count)
            .map_err(|e| LexnetError::config(format!("digraph input: {e}")))?;
        for i in 0..edge_count {
            let (Some(v), Some(w)) = (tokens.next(), tokens.next()) else {
                return Err(LexnetError::config(format!(
                    "digraph input declares {edge_count} edges but ends after {i}"
                )));
            };
            graph
                .add_edge(v, w)
                .map_err(|e| LexnetError::config(format!("edge {i}: {e}")))?;
        }
        if tokens.next().is_some() {
            return Err(LexnetError::config(
                "digraph input has trailing tokens after the declared edges",
            ));
        }

        Ok(graph)
    }
}

fn parse_count(token: &str) -> Result<usize> {
    token.parse::<usize>().map_err(|_| {
        LexnetError::config(format!("expected a non-negative integer, got {token:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_and_degrees() {
        let mut g = Digraph::new(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 2).unwrap();

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.adj(0), &[1, 2]);
        assert_eq!(g.outdegree(0).unwrap(), 2);
        assert_eq!(g.outdegree(2).unwrap(), 0);
        assert_eq!(g.sinks(), vec![2]);
    }

    #[test]
    fn test_out_of_range_edge() {
        let mut g = Digraph::new(2);
        let err = g.add_edge(0, 2).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(g.edge_count(), 0);
        assert!(g.outdegree(5).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_try_new() {
        let g = Digraph::try_new(4).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.sinks(), vec![0, 1, 2, 3]);
        assert!(Digraph::try_new(usize::MAX).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_from_reader() {
        let input = "4\n3\n0 1\n1 2\n3 2\n";
        let g = Digraph::from_reader(input.as_bytes()).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.adj(3), &[2]);
    }

    #[test]
    fn test_from_reader_rejects_bad_input() {
        assert!(Digraph::from_reader("".as_bytes()).unwrap_err().is_config());
        assert!(Digraph::from_reader("3 2\n0 1\n".as_bytes()).unwrap_err().is_config());
        assert!(Digraph::from_reader("2 1\n0 7\n".as_bytes()).unwrap_err().is_config());
        assert!(Digraph::from_reader("2 1\n0 x\n".as_bytes()).unwrap_err().is_config());
        assert!(Digraph::from_reader("2 1\n0 1 1\n".as_bytes()).unwrap_err().is_config());
    }

    #[test]
    fn test_from_reader_rejects_unallocatable_vertex_count() {
        let input = format!("{} 0\n", usize::MAX);
        assert!(Digraph::from_reader(input.as_bytes()).unwrap_err().is_config());

        let input = format!("{} 0\n", 1usize << 48);
        assert!(Digraph::from_reader(input.as_bytes()).unwrap_err().is_config());
    }
}
