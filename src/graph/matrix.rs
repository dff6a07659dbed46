//! Dense square matrices and the validated adjacency matrix.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ValidationError;
use super::weight::Weight;

/// Row-major n×n storage.
///
/// Deserialization checks that `cells` holds exactly `size * size` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawSquareMatrix<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct SquareMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

#[derive(Deserialize)]
struct RawSquareMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawSquareMatrix<T>> for SquareMatrix<T> {
    type Error = ValidationError;

    fn try_from(raw: RawSquareMatrix<T>) -> Result<Self, Self::Error> {
        if raw.size.checked_mul(raw.size) != Some(raw.cells.len()) {
            return Err(ValidationError::CellCount {
                size: raw.size,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl<T: Clone> SquareMatrix<T> {
    /// Creates an n×n matrix filled with `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> SquareMatrix<T> {
    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true for a 0×0 matrix.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Entry at (row, col). Panics when out of range, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.size + col]
    }

    /// Entry at (row, col), or `None` when out of range.
    pub fn try_get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.size && col < self.size {
            Some(self.get(row, col))
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[row * self.size + col] = value;
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Iterates rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics, so an empty matrix yields no rows explicitly
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

impl<T> std::ops::Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.get(row, col)
    }
}

/// Shortest-path costs produced by the engine.
pub type DistanceMatrix = SquareMatrix<Weight>;

/// `pred[i][j]`: node preceding `j` on the best known route from `i`.
pub type PredecessorMatrix = SquareMatrix<Option<usize>>;

/// Validated graph weights. The diagonal is always zero and missing edges
/// are [`Weight::Infinite`].
///
/// Deserialized matrices go through the same checks as the constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAdjacencyMatrix")]
pub struct AdjacencyMatrix {
    weights: SquareMatrix<Weight>,
}

#[derive(Deserialize)]
struct RawAdjacencyMatrix {
    weights: SquareMatrix<Weight>,
}

impl TryFrom<RawAdjacencyMatrix> for AdjacencyMatrix {
    type Error = ValidationError;

    fn try_from(raw: RawAdjacencyMatrix) -> Result<Self, Self::Error> {
        let weights = raw.weights;
        for i in 0..weights.size() {
            for j in 0..weights.size() {
                let weight = *weights.get(i, j);
                if i == j && weight != Weight::ZERO {
                    return Err(ValidationError::NonZeroDiagonal { node: i, weight });
                }
                if let Weight::Finite(v) = weight {
                    if !v.is_finite() {
                        return Err(ValidationError::InvalidWeight {
                            from: i,
                            to: j,
                            weight: v,
                        });
                    }
                }
            }
        }
        Ok(Self { weights })
    }
}

impl AdjacencyMatrix {
    /// Builds a matrix for `node_count` nodes from (source, target, weight)
    /// triples. A later triple for the same pair replaces an earlier one.
    pub fn from_edges(
        node_count: usize,
        edges: &[(usize, usize, f64)],
    ) -> Result<Self, ValidationError> {
        let mut weights = SquareMatrix::filled(node_count, Weight::Infinite);

        for &(from, to, raw) in edges {
            if from >= node_count || to >= node_count {
                return Err(ValidationError::IndexOutOfRange {
                    from,
                    to,
                    node_count,
                });
            }
            let weight = Weight::try_from_f64(raw).ok_or(ValidationError::InvalidWeight {
                from,
                to,
                weight: raw,
            })?;

            if from == to {
                debug!("Ignoring self-loop on node {} (weight {})", from, raw);
                continue;
            }
            weights.set(from, to, weight);
        }

        for i in 0..node_count {
            weights.set(i, i, Weight::ZERO);
        }

        Ok(Self { weights })
    }

    /// Builds a matrix from a declared node set, as found in a graph
    /// description. The ids must be exactly `0..nodes.len()` in any order.
    pub fn from_node_set(
        nodes: &[usize],
        edges: &[(usize, usize, f64)],
    ) -> Result<Self, ValidationError> {
        let node_count = nodes.len();
        let mut seen = vec![false; node_count];

        for &id in nodes {
            if id >= node_count {
                return Err(ValidationError::NodeSetMismatch {
                    node_count,
                    reason: format!("node id {} is outside 0..{}", id, node_count),
                });
            }
            if seen[id] {
                return Err(ValidationError::NodeSetMismatch {
                    node_count,
                    reason: format!("node id {} is declared twice", id),
                });
            }
            seen[id] = true;
        }

        Self::from_edges(node_count, edges)
    }

    /// Builds a matrix from explicit rows, `f64::INFINITY` meaning "no edge".
    /// Diagonal entries are overwritten with zero.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ValidationError> {
        let node_count = rows.len();
        let mut weights = SquareMatrix::filled(node_count, Weight::Infinite);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != node_count {
                return Err(ValidationError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: node_count,
                });
            }
            for (j, &raw) in row.iter().enumerate() {
                if i == j {
                    weights.set(i, j, Weight::ZERO);
                    continue;
                }
                let weight = Weight::try_from_f64(raw).ok_or(ValidationError::InvalidWeight {
                    from: i,
                    to: j,
                    weight: raw,
                })?;
                weights.set(i, j, weight);
            }
        }

        Ok(Self { weights })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.weights.size()
    }

    /// Weight of the edge `from -> to`, `None` when either index is unknown.
    pub fn weight(&self, from: usize, to: usize) -> Option<Weight> {
        self.weights.try_get(from, to).copied()
    }

    /// Whether a direct edge exists (the diagonal does not count).
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from != to && self.weight(from, to).is_some_and(|w| w.is_finite())
    }

    /// Number of direct edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Iterates direct edges as (from, to, weight).
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.weights.rows().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(move |(j, _)| *j != i)
                .filter_map(move |(j, w)| w.value().map(|v| (i, j, v)))
        })
    }

    /// One row of weights.
    pub fn row(&self, from: usize) -> &[Weight] {
        self.weights.row(from)
    }

    /// Borrow the underlying matrix.
    pub fn as_matrix(&self) -> &SquareMatrix<Weight> {
        &self.weights
    }
}
