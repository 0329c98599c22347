//! Gridpath
//!
//! A weighted, directed graph engine backed by a dense adjacency matrix,
//! with cached single-source shortest-path queries (Dijkstra) and a
//! mergeable Fibonacci-heap priority queue used by the heap-backed
//! frontier strategy.

pub mod error;
pub mod graph;
pub mod heap;
pub mod logging;

pub use error::{GraphError, Result};
pub use graph::{shortest_paths, EdgeSource, PathEntry, Strategy, WeightedGraph};
pub use heap::{FibHeap, HeapHandle};
