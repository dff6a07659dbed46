//! Path reconstruction from a predecessor matrix.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PathReconstructionError;
use super::matrix::{AdjacencyMatrix, PredecessorMatrix};
use super::weight::Weight;

/// A concrete route, source to target inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Node indices in travel order.
    pub nodes: Vec<usize>,
}

impl Path {
    /// Creates a path from an ordered node list.
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// The "no path recorded" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A path that starts and ends at `node`.
    pub fn single(node: usize) -> Self {
        Self { nodes: vec![node] }
    }

    /// Gets the source node.
    pub fn source(&self) -> Option<usize> {
        self.nodes.first().copied()
    }

    /// Gets the target node.
    pub fn target(&self) -> Option<usize> {
        self.nodes.last().copied()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consecutive (from, to) pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Sum of the edge weights along the path in `matrix`.
    ///
    /// `None` for an empty path or when a hop has no direct edge.
    pub fn cost(&self, matrix: &AdjacencyMatrix) -> Option<Weight> {
        if self.is_empty() {
            return None;
        }
        self.edges().try_fold(Weight::ZERO, |total, (from, to)| {
            if matrix.has_edge(from, to) {
                matrix.weight(from, to).map(|w| total + w)
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join(" → "))
    }
}

/// Walks predecessor chains back from the target.
pub struct PathReconstructor;

impl PathReconstructor {
    /// Materializes the route `from -> to`.
    ///
    /// An unset `pred[from][to]` gives an empty path; this includes
    /// `from == to` unless a negative cycle runs through `from`. The walk is
    /// bounded by the node count, and a chain that does not reach `from`
    /// within that bound is reported instead of followed.
    pub fn reconstruct(
        pred: &PredecessorMatrix,
        from: usize,
        to: usize,
    ) -> Result<Path, PathReconstructionError> {
        let node_count = pred.size();
        for node in [from, to] {
            if node >= node_count {
                return Err(PathReconstructionError::OutOfRange { node, node_count });
            }
        }

        let Some(mut current) = *pred.get(from, to) else {
            return Ok(Path::empty());
        };

        let mut nodes = vec![to];
        let mut steps = 0;
        loop {
            if current >= node_count {
                return Err(PathReconstructionError::OutOfRange {
                    node: current,
                    node_count,
                });
            }
            nodes.push(current);
            steps += 1;
            if current == from {
                break;
            }
            if steps >= node_count {
                return Err(PathReconstructionError::Unterminated { from, to, steps });
            }
            current = match *pred.get(from, current) {
                Some(prev) => prev,
                None => {
                    return Err(PathReconstructionError::BrokenChain {
                        from,
                        to,
                        at: current,
                    })
                }
            };
        }

        nodes.reverse();
        Ok(Path::new(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::matrix::SquareMatrix;

    fn pred_from(rows: &[&[Option<usize>]]) -> PredecessorMatrix {
        let n = rows.len();
        let mut pred = SquareMatrix::filled(n, None);
        for (i, row) in rows.iter().enumerate() {
            for (j, p) in row.iter().enumerate() {
                pred.set(i, j, *p);
            }
        }
        pred
    }

    #[test]
    fn test_reconstruct_chain() {
        // 0 -> 1 -> 2
        let pred = pred_from(&[
            &[None, Some(0), Some(1)],
            &[None, None, Some(1)],
            &[None, None, None],
        ]);

        let path = PathReconstructor::reconstruct(&pred, 0, 2).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2]);
        assert_eq!(path.source(), Some(0));
        assert_eq!(path.target(), Some(2));
        assert_eq!(path.hop_count(), 2);
    }

    #[test]
    fn test_no_predecessor_is_empty() {
        let pred = pred_from(&[&[None, None], &[None, None]]);

        assert!(PathReconstructor::reconstruct(&pred, 0, 1).unwrap().is_empty());
        // diagonal
        assert!(PathReconstructor::reconstruct(&pred, 1, 1).unwrap().is_empty());
    }

    #[test]
    fn test_cycle_is_bounded() {
        // pred[0][2] = 1, pred[0][1] = 2: never reaches 0
        let pred = pred_from(&[
            &[None, Some(2), Some(1)],
            &[None, None, None],
            &[None, None, None],
        ]);

        let err = PathReconstructor::reconstruct(&pred, 0, 2).unwrap_err();
        assert_eq!(
            err,
            PathReconstructionError::Unterminated {
                from: 0,
                to: 2,
                steps: 3
            }
        );
    }

    #[test]
    fn test_broken_chain() {
        let pred = pred_from(&[
            &[None, None, Some(1)],
            &[None, None, None],
            &[None, None, None],
        ]);

        let err = PathReconstructor::reconstruct(&pred, 0, 2).unwrap_err();
        assert_eq!(
            err,
            PathReconstructionError::BrokenChain {
                from: 0,
                to: 2,
                at: 1
            }
        );
    }

    #[test]
    fn test_out_of_range() {
        let pred = pred_from(&[&[None]]);
        let err = PathReconstructor::reconstruct(&pred, 0, 3).unwrap_err();
        assert_eq!(
            err,
            PathReconstructionError::OutOfRange {
                node: 3,
                node_count: 1
            }
        );
    }

    #[test]
    fn test_path_cost() {
        let m = AdjacencyMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, -2.0)]).unwrap();

        assert_eq!(Path::new(vec![0, 1, 2]).cost(&m), Some(Weight::Finite(-1.0)));
        assert_eq!(Path::single(1).cost(&m), Some(Weight::ZERO));
        assert_eq!(Path::new(vec![0, 2]).cost(&m), None);
        assert_eq!(Path::empty().cost(&m), None);
    }

    #[test]
    fn test_path_display() {
        assert_eq!(Path::new(vec![0, 1, 2]).to_string(), "0 → 1 → 2");
        assert_eq!(Path::single(4).to_string(), "4");
        assert_eq!(Path::empty().to_string(), "");
    }
}
