//! Single-source shortest paths (Dijkstra)
//!
//! One engine loop parameterized over a frontier abstraction. The frontier
//! owns vertex selection; the loop owns relaxation and the output table.
//! `Strategy::Linear` scans all vertices each iteration, `Strategy::Heap`
//! keeps the frontier in a [`FibHeap`] and reorders via decrease-key. Both
//! produce identical `(predecessor, distance)` tables.

use crate::graph::types::{EdgeSource, PathEntry, Strategy};
use crate::heap::{FibHeap, HeapHandle};

/// Internal sentinel for "not yet reached". A tentative distance can never
/// legitimately reach this value: relaxation uses `checked_add` and a
/// candidate equal to the sentinel loses the strict comparison, so a
/// saturated path behaves as unreachable instead of wrapping.
const INFINITY: u64 = u64::MAX;

/// Compute the full shortest-path table for one source vertex.
///
/// Entry `i` of the result holds the predecessor index and total distance
/// of the shortest path from `source` to vertex `i`; unreachable vertices
/// get [`PathEntry::UNREACHABLE`]. An out-of-range `source` yields an
/// all-unreachable table.
#[tracing::instrument(skip(edges), fields(vertices = edges.vertex_count()))]
pub fn shortest_paths(edges: &impl EdgeSource, source: usize, strategy: Strategy) -> Vec<PathEntry> {
    run(edges, source, None, strategy)
}

/// Like [`shortest_paths`], but stops as soon as `target` is settled.
///
/// Only the entries along already-settled vertices (the target included)
/// are reliable; the rest of the table is left incomplete. Callers that
/// cache tables must use [`shortest_paths`] instead.
#[tracing::instrument(skip(edges), fields(vertices = edges.vertex_count()))]
pub fn shortest_paths_to(
    edges: &impl EdgeSource,
    source: usize,
    target: usize,
    strategy: Strategy,
) -> Vec<PathEntry> {
    run(edges, source, Some(target), strategy)
}

/// Walk predecessors backward from `target` to `source`.
///
/// Returns the index path inclusive of both endpoints, or an empty vector
/// when the walk hits a missing predecessor before reaching the source.
pub fn reconstruct(table: &[PathEntry], source: usize, target: usize) -> Vec<usize> {
    if source >= table.len() || target >= table.len() || !table[target].is_reachable() {
        return Vec::new();
    }
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match table[current].predecessor {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

fn run(
    edges: &impl EdgeSource,
    source: usize,
    target: Option<usize>,
    strategy: Strategy,
) -> Vec<PathEntry> {
    let n = edges.vertex_count();
    match strategy {
        Strategy::Linear => run_with(edges, source, target, LinearFrontier::new(n, source)),
        Strategy::Heap => run_with(edges, source, target, HeapFrontier::new(n, source)),
    }
}

fn run_with<F: Frontier>(
    edges: &impl EdgeSource,
    source: usize,
    target: Option<usize>,
    mut frontier: F,
) -> Vec<PathEntry> {
    let n = edges.vertex_count();
    let mut dist = vec![INFINITY; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut settled = 0usize;

    if source < n {
        dist[source] = 0;
    }

    while let Some((u, dist_u)) = frontier.pop_min() {
        visited[u] = true;
        settled += 1;
        if target == Some(u) {
            break;
        }
        for v in 0..n {
            if visited[v] {
                continue;
            }
            let Some(w) = edges.weight(u, v) else { continue };
            let Some(candidate) = dist_u.checked_add(w) else {
                continue;
            };
            if candidate < dist[v] {
                dist[v] = candidate;
                pred[v] = Some(u);
                frontier.decrease(v, candidate);
            }
        }
    }

    tracing::debug!(settled, vertices = n, "shortest-path table computed");

    (0..n)
        .map(|i| PathEntry {
            predecessor: pred[i],
            distance: (dist[i] != INFINITY).then_some(dist[i]),
        })
        .collect()
}

/// Vertex-selection half of the engine: tracks unvisited tentative
/// distances and hands back the closest unvisited vertex each round
trait Frontier {
    fn new(n: usize, source: usize) -> Self;
    /// Remove and return the unvisited vertex with minimum tentative
    /// distance, or `None` when no reachable vertex remains
    fn pop_min(&mut self) -> Option<(usize, u64)>;
    /// Record an improved tentative distance; only ever called with a
    /// strictly smaller value for an unsettled vertex
    fn decrease(&mut self, vertex: usize, dist: u64);
}

/// O(V) scan per extraction; O(V^2) total, no allocations past setup
struct LinearFrontier {
    dist: Vec<u64>,
    settled: Vec<bool>,
}

impl Frontier for LinearFrontier {
    fn new(n: usize, source: usize) -> Self {
        let mut dist = vec![INFINITY; n];
        if source < n {
            dist[source] = 0;
        }
        LinearFrontier {
            dist,
            settled: vec![false; n],
        }
    }

    fn pop_min(&mut self) -> Option<(usize, u64)> {
        let mut best: Option<usize> = None;
        for v in 0..self.dist.len() {
            if self.settled[v] || self.dist[v] == INFINITY {
                continue;
            }
            if best.is_none_or(|b| self.dist[v] < self.dist[b]) {
                best = Some(v);
            }
        }
        let v = best?;
        self.settled[v] = true;
        Some((v, self.dist[v]))
    }

    fn decrease(&mut self, vertex: usize, dist: u64) {
        self.dist[vertex] = dist;
    }
}

/// Ordered by distance first so the heap surfaces the closest vertex;
/// vertex index breaks ties deterministically
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct DistEntry {
    dist: u64,
    vertex: usize,
}

/// Fibonacci-heap frontier: vertices are inserted on first discovery and
/// reordered in place through their handles, O(E + V log V) amortized
struct HeapFrontier {
    heap: FibHeap<DistEntry>,
    handles: Vec<Option<HeapHandle>>,
}

impl Frontier for HeapFrontier {
    fn new(n: usize, source: usize) -> Self {
        let mut heap = FibHeap::new();
        let mut handles = vec![None; n];
        if source < n {
            handles[source] = Some(heap.insert(DistEntry {
                dist: 0,
                vertex: source,
            }));
        }
        HeapFrontier { heap, handles }
    }

    fn pop_min(&mut self) -> Option<(usize, u64)> {
        let entry = self.heap.extract_min()?;
        self.handles[entry.vertex] = None;
        Some((entry.vertex, entry.dist))
    }

    fn decrease(&mut self, vertex: usize, dist: u64) {
        let entry = DistEntry { dist, vertex };
        match self.handles[vertex] {
            Some(ref handle) => {
                self.heap
                    .decrease_key(handle, entry)
                    .expect("frontier keys only decrease");
            }
            None => {
                self.handles[vertex] = Some(self.heap.insert(entry));
            }
        }
    }
}
