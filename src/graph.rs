//! Directed graph storage and the traversals built on top of it.

pub mod bfs;
pub mod cycle;
pub mod digraph;

pub use bfs::BreadthFirstPaths;
pub use cycle::DirectedCycle;
pub use digraph::Digraph;
