use serde::Serialize;

/// One row of a single-source shortest-path table.
///
/// `distance: None` is the "unreachable" sentinel; the source itself has
/// distance `Some(0)` and no predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predecessor: Option<usize>,
    pub distance: Option<u64>,
}

impl PathEntry {
    pub const UNREACHABLE: PathEntry = PathEntry {
        predecessor: None,
        distance: None,
    };

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

/// Frontier strategy for the shortest-path engine.
///
/// Both strategies produce identical tables; they differ only in cost:
/// `Linear` scans every vertex per iteration (O(V^2), no allocation per
/// edge), `Heap` keeps the frontier in a Fibonacci heap with decrease-key
/// (O(E + V log V) amortized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Strategy {
    Linear,
    #[default]
    Heap,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Strategy::Linear),
            "heap" => Ok(Strategy::Heap),
            other => Err(format!(
                "unknown strategy '{}' (expected: linear, heap)",
                other
            )),
        }
    }
}

/// Trait for providing dense adjacency to the shortest-path engine.
///
/// Vertices are the dense indices `0..vertex_count()`; `weight` returns
/// `None` where no edge exists. Stored weights are strictly positive.
pub trait EdgeSource {
    fn vertex_count(&self) -> usize;
    fn weight(&self, from: usize, to: usize) -> Option<u64>;
}

/// Adjacency backed by a borrowed row-major matrix, mainly for tests and
/// ad-hoc queries without a full `WeightedGraph`
pub struct MatrixSource<'a> {
    matrix: &'a [Option<u64>],
    size: usize,
}

impl<'a> MatrixSource<'a> {
    /// `matrix` must be row-major with `size * size` entries
    pub fn new(matrix: &'a [Option<u64>], size: usize) -> Self {
        debug_assert_eq!(matrix.len(), size * size);
        MatrixSource { matrix, size }
    }
}

impl EdgeSource for MatrixSource<'_> {
    fn vertex_count(&self) -> usize {
        self.size
    }

    fn weight(&self, from: usize, to: usize) -> Option<u64> {
        self.matrix[from * self.size + to]
    }
}
