//! Label-addressed weighted graph over a dense adjacency matrix
//!
//! Vertices carry caller-chosen labels; internally every vertex is a dense
//! index into a row-major weight matrix. Single-source shortest-path
//! tables are memoized per source index and discarded wholesale on any
//! mutation — graphs here are expected to be queried far more often than
//! modified, so correctness-by-blanket-invalidation wins over partial
//! cache surgery. Invalidation is O(cached tables); `remove` is an O(V^2)
//! matrix rebuild, the price of keeping indices dense.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{GraphError, Result};
use crate::graph::engine;
use crate::graph::types::{EdgeSource, PathEntry, Strategy};

/// Weighted directed graph with cached shortest-path queries.
///
/// Edge weights are strictly positive `u64`s; a weight of 0 passed to
/// [`set`](WeightedGraph::set) is coerced to 1 rather than rejected.
/// Absence of an edge is `None`, never weight 0.
#[derive(Debug, Clone)]
pub struct WeightedGraph<L> {
    vertices: Vec<L>,
    index_of: HashMap<L, usize>,
    /// Row-major `n*n`; row = source vertex, column = destination
    matrix: Vec<Option<u64>>,
    /// Source index -> full shortest-path table for the current matrix
    cache: HashMap<usize, Vec<PathEntry>>,
    strategy: Strategy,
}

impl<L: Eq + Hash + Clone + fmt::Debug> Default for WeightedGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Eq + Hash + Clone + fmt::Debug> WeightedGraph<L> {
    /// Create an empty graph using the default (heap) frontier strategy
    pub fn new() -> Self {
        Self::with_strategy(Strategy::default())
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        WeightedGraph {
            vertices: Vec::new(),
            index_of: HashMap::new(),
            matrix: Vec::new(),
            cache: HashMap::new(),
            strategy,
        }
    }

    /// Build a graph from `(source, destinations, weights)` triples.
    ///
    /// Labels are added in order of first appearance. A destination
    /// without a paired weight gets weight 1.
    pub fn from_edges(triples: impl IntoIterator<Item = (L, Vec<L>, Vec<u64>)>) -> Self {
        let mut graph = Self::new();
        for (source, destinations, weights) in triples {
            let from = graph.ensure_vertex(source);
            for (i, destination) in destinations.into_iter().enumerate() {
                let to = graph.ensure_vertex(destination);
                let weight = weights.get(i).copied().unwrap_or(1).max(1);
                let n = graph.vertices.len();
                graph.matrix[from * n + to] = Some(weight);
            }
        }
        graph
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, label: &L) -> bool {
        self.index_of.contains_key(label)
    }

    /// Iterate over the vertex labels in index order
    pub fn vertices(&self) -> impl Iterator<Item = &L> {
        self.vertices.iter()
    }

    /// Edge weight from `from` to `to`; `None` for an absent edge or an
    /// unknown label (absence is not an error here)
    pub fn get(&self, from: &L, to: &L) -> Option<u64> {
        let from = self.index(from)?;
        let to = self.index(to)?;
        self.matrix[from * self.vertices.len() + to]
    }

    /// Set the edge weight from `from` to `to`, returning the previous
    /// weight. A weight of 0 is coerced to 1. Unknown labels make the call
    /// a no-op returning `None`. A successful write invalidates every
    /// cached shortest-path table.
    pub fn set(&mut self, from: &L, to: &L, weight: u64) -> Option<u64> {
        let from = self.index(from)?;
        let to = self.index(to)?;
        let previous = self.matrix[from * self.vertices.len() + to].replace(weight.max(1));
        self.invalidate_cache();
        previous
    }

    /// Append new vertices with fresh indices and no edges.
    ///
    /// The whole batch is validated first: a label already present, or
    /// repeated within the batch, fails with
    /// [`GraphError::DuplicateVertex`] and nothing is added.
    pub fn add(&mut self, labels: impl IntoIterator<Item = L>) -> Result<()> {
        let batch: Vec<L> = labels.into_iter().collect();
        if batch.is_empty() {
            return Ok(());
        }
        let mut seen: HashSet<&L> = HashSet::new();
        for label in &batch {
            if self.index_of.contains_key(label) || !seen.insert(label) {
                return Err(GraphError::duplicate_vertex(label));
            }
        }

        let old = self.vertices.len();
        let new = old + batch.len();
        self.matrix = Self::regrow(&self.matrix, old, new);
        for label in batch {
            self.index_of.insert(label.clone(), self.vertices.len());
            self.vertices.push(label);
        }
        self.invalidate_cache();
        Ok(())
    }

    /// Remove the named vertices, compacting the remaining indices so they
    /// stay dense. Unknown labels are ignored. Rebuilds the matrix without
    /// the removed rows and columns.
    pub fn remove(&mut self, labels: &[L]) {
        let doomed: HashSet<usize> = labels.iter().filter_map(|l| self.index(l)).collect();
        if doomed.is_empty() {
            return;
        }

        let old = self.vertices.len();
        let kept: Vec<usize> = (0..old).filter(|i| !doomed.contains(i)).collect();
        let new = kept.len();

        let mut matrix = vec![None; new * new];
        for (ni, &oi) in kept.iter().enumerate() {
            for (nj, &oj) in kept.iter().enumerate() {
                matrix[ni * new + nj] = self.matrix[oi * old + oj];
            }
        }

        let vertices: Vec<L> = kept.iter().map(|&i| self.vertices[i].clone()).collect();
        self.index_of = vertices
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        self.vertices = vertices;
        self.matrix = matrix;
        self.invalidate_cache();
    }

    /// Clear every edge, keeping the vertex set
    pub fn clear_edges(&mut self) {
        self.matrix.fill(None);
        self.invalidate_cache();
    }

    /// Re-roll the whole matrix: every ordered pair gets an edge with
    /// probability `density`, weighted uniformly in `1..=max_weight`, and
    /// is cleared otherwise. Deterministic for a given seed.
    #[tracing::instrument(skip(self), fields(vertices = self.vertices.len()))]
    pub fn randomize(&mut self, seed: u64, max_weight: u64, density: f64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let max_weight = max_weight.max(1);
        let density = density.clamp(0.0, 1.0);
        for cell in self.matrix.iter_mut() {
            *cell = if rng.random_bool(density) {
                Some(rng.random_range(1..=max_weight))
            } else {
                None
            };
        }
        self.invalidate_cache();
    }

    /// Shortest path from `from` to `to`, inclusive of both endpoints.
    ///
    /// Returns an empty path when `to` is unreachable, and
    /// [`GraphError::UnknownVertex`] when either label is not in the
    /// graph. Populates the path cache for `from` as a byproduct.
    #[tracing::instrument(skip(self), fields(from = ?from, to = ?to))]
    pub fn path(&mut self, from: &L, to: &L) -> Result<Vec<L>> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        let table = self.table_for(source);
        let indices = engine::reconstruct(table, source, target);
        Ok(indices
            .into_iter()
            .map(|i| self.vertices[i].clone())
            .collect())
    }

    /// Total weight of the shortest path from `from` to `to`; `Ok(None)`
    /// when `to` is unreachable. Populates the path cache for `from`.
    #[tracing::instrument(skip(self), fields(from = ?from, to = ?to))]
    pub fn distance(&mut self, from: &L, to: &L) -> Result<Option<u64>> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        Ok(self.table_for(source)[target].distance)
    }

    fn index(&self, label: &L) -> Option<usize> {
        self.index_of.get(label).copied()
    }

    fn require(&self, label: &L) -> Result<usize> {
        self.index(label)
            .ok_or_else(|| GraphError::unknown_vertex(label))
    }

    /// Add a label if absent, returning its index either way. Only used by
    /// the builder; `add` is the validating public surface.
    fn ensure_vertex(&mut self, label: L) -> usize {
        if let Some(i) = self.index(&label) {
            return i;
        }
        let old = self.vertices.len();
        self.matrix = Self::regrow(&self.matrix, old, old + 1);
        self.index_of.insert(label.clone(), old);
        self.vertices.push(label);
        old
    }

    /// Copy an `old`x`old` matrix into the top-left of a `new`x`new` one
    fn regrow(matrix: &[Option<u64>], old: usize, new: usize) -> Vec<Option<u64>> {
        let mut grown = vec![None; new * new];
        for i in 0..old {
            grown[i * new..i * new + old].copy_from_slice(&matrix[i * old..(i + 1) * old]);
        }
        grown
    }

    /// Cached full table for `source`, computing it on a miss. Always a
    /// full-table run: an early-exited table is incomplete and must never
    /// be observable through the cache.
    fn table_for(&mut self, source: usize) -> &[PathEntry] {
        if self.cache.contains_key(&source) {
            tracing::debug!(source, "path cache hit");
        } else {
            tracing::debug!(source, strategy = ?self.strategy, "path cache miss");
            let table = engine::shortest_paths(&*self, source, self.strategy);
            self.cache.insert(source, table);
        }
        &self.cache[&source]
    }

    fn invalidate_cache(&mut self) {
        if !self.cache.is_empty() {
            tracing::debug!(tables = self.cache.len(), "path cache invalidated");
            self.cache.clear();
        }
    }

    #[cfg(test)]
    pub(crate) fn cached_sources(&self) -> usize {
        self.cache.len()
    }
}

impl<L: Eq + Hash + Clone + fmt::Debug> EdgeSource for WeightedGraph<L> {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn weight(&self, from: usize, to: usize) -> Option<u64> {
        self.matrix[from * self.vertices.len() + to]
    }
}

/// Textual weight-matrix dump: rows = source vertex, columns =
/// destination, blank cell = no edge
impl<L: Eq + Hash + Clone + fmt::Debug + fmt::Display> fmt::Display for WeightedGraph<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.vertices.len();
        let labels: Vec<String> = self.vertices.iter().map(|l| l.to_string()).collect();
        let cells: Vec<String> = self
            .matrix
            .iter()
            .map(|w| w.map(|w| w.to_string()).unwrap_or_default())
            .collect();
        let width = labels
            .iter()
            .chain(cells.iter())
            .map(|s| s.len())
            .max()
            .unwrap_or(1);

        write!(f, "{:>width$}", "")?;
        for label in &labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;
        for (i, label) in labels.iter().enumerate() {
            write!(f, "{label:>width$}")?;
            for cell in &cells[i * n..(i + 1) * n] {
                write!(f, " {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
