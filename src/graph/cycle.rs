//! Directed cycle detection.
//!
//! A depth-first search colours each vertex white (unvisited), grey (on the
//! current DFS path) or black (finished). An edge into a grey vertex closes a
//! cycle. The search is iterative so deep hierarchies cannot overflow the
//! call stack.

use bit_vec::BitVec;

use crate::graph::digraph::Digraph;

/// Result of searching a digraph for a directed cycle.
#[derive(Debug, Clone)]
pub struct DirectedCycle {
    cycle: Option<Vec<usize>>,
}

impl DirectedCycle {
    /// Search `graph` for a directed cycle.
    pub fn new(graph: &Digraph) -> Self {
        let n = graph.vertex_count();
        let mut marked = BitVec::from_elem(n, false);
        let mut on_stack = BitVec::from_elem(n, false);
        let mut edge_to = vec![usize::MAX; n];

        for source in 0..n {
            if marked[source] {
                continue;
            }
            if let Some(cycle) =
                Self::search(graph, source, &mut marked, &mut on_stack, &mut edge_to)
            {
                return DirectedCycle { cycle: Some(cycle) };
            }
        }

        DirectedCycle { cycle: None }
    }

    fn search(
        graph: &Digraph,
        source: usize,
        marked: &mut BitVec,
        on_stack: &mut BitVec,
        edge_to: &mut [usize],
    ) -> Option<Vec<usize>> {
        // (vertex, index of the next neighbour to explore)
        let mut stack: Vec<(usize, usize)> = vec![(source, 0)];
        marked.set(source, true);
        on_stack.set(source, true);

        while let Some(frame) = stack.last_mut() {
            let (v, next) = *frame;
            let neighbours = graph.adj(v);

            if next == neighbours.len() {
                on_stack.set(v, false);
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let w = neighbours[next];
            if !marked[w] {
                edge_to[w] = v;
                marked.set(w, true);
                on_stack.set(w, true);
                stack.push((w, 0));
            } else if on_stack[w] {
                let mut cycle = vec![w];
                let mut x = v;
                while x != w {
                    cycle.push(x);
                    x = edge_to[x];
                }
                cycle.push(w);
                cycle.reverse();
                return Some(cycle);
            }
        }

        None
    }

    /// Whether the graph has a directed cycle.
    pub fn has_cycle(&self) -> bool {
        self.cycle.is_some()
    }

    /// A directed cycle, if one exists, as a closed vertex sequence whose first
    /// and last entries are the same vertex.
    pub fn cycle(&self) -> Option<&[usize]> {
        self.cycle.as_deref()
    }
}
