//! Dense weighted graph and shortest-path operations
//!
//! Provides the caller-facing graph engine:
//! - `weighted`: label-addressed adjacency matrix with a per-source path cache
//! - `engine`: single-source Dijkstra over an interchangeable frontier
//! - `types`: shared value types and the adjacency seam trait

pub mod engine;
pub mod types;
pub mod weighted;

pub use engine::{reconstruct, shortest_paths, shortest_paths_to};
pub use types::{EdgeSource, PathEntry, Strategy};
pub use weighted::WeightedGraph;
