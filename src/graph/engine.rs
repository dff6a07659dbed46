//! All-pairs shortest paths with Floyd–Warshall.
//!
//! The engine relaxes every pair `(i, j)` through each intermediate vertex
//! `k` in turn. Sweeps over `k` are strictly sequential; the `(i, j)` sweep
//! for one `k` only reads row `k` and column `k`, so it runs row-parallel on
//! rayon when the graph is large enough.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::EngineConfig;
use super::error::{EngineError, PathReconstructionError, ValidationError};
use super::matrix::{AdjacencyMatrix, DistanceMatrix, PredecessorMatrix, SquareMatrix};
use super::reconstruct::{Path, PathReconstructor};
use super::weight::Weight;

/// Output of one engine run. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawApspResult")]
pub struct ApspResult {
    /// Shortest distances between every ordered pair.
    pub dist: DistanceMatrix,
    /// Predecessor of the target on each shortest route.
    pub pred: PredecessorMatrix,
    /// Whether the row-parallel sweep was used.
    pub parallel: bool,
    /// Time taken in milliseconds.
    pub time_ms: u64,
}

#[derive(Deserialize)]
struct RawApspResult {
    dist: DistanceMatrix,
    pred: PredecessorMatrix,
    parallel: bool,
    time_ms: u64,
}

impl TryFrom<RawApspResult> for ApspResult {
    type Error = ValidationError;

    fn try_from(raw: RawApspResult) -> Result<Self, Self::Error> {
        if raw.dist.size() != raw.pred.size() {
            return Err(ValidationError::ShapeMismatch {
                dist: raw.dist.size(),
                pred: raw.pred.size(),
            });
        }
        Ok(Self {
            dist: raw.dist,
            pred: raw.pred,
            parallel: raw.parallel,
            time_ms: raw.time_ms,
        })
    }
}

impl ApspResult {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.dist.size()
    }

    /// Shortest distance `from -> to`, `None` for unknown nodes.
    pub fn distance(&self, from: usize, to: usize) -> Option<Weight> {
        self.dist.try_get(from, to).copied()
    }

    /// Whether a finite-cost route exists.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.distance(from, to).is_some_and(|d| d.is_finite())
    }

    /// Reconstructs the path from the predecessor matrix.
    pub fn reconstruct_path(&self, from: usize, to: usize) -> Result<Path, PathReconstructionError> {
        PathReconstructor::reconstruct(&self.pred, from, to)
    }

    /// Nodes whose distance to themselves went negative.
    pub fn negative_cycle_nodes(&self) -> Vec<usize> {
        (0..self.node_count())
            .filter(|&i| self.dist.get(i, i).is_negative())
            .collect()
    }

    /// Splits into `(dist, pred)`.
    pub fn into_parts(self) -> (DistanceMatrix, PredecessorMatrix) {
        (self.dist, self.pred)
    }
}

/// Floyd–Warshall engine.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathEngine {
    config: EngineConfig,
}

impl ShortestPathEngine {
    /// Creates a new engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes shortest distances and predecessors for every pair.
    ///
    /// The input is not modified. With negative-cycle detection enabled a
    /// negative diagonal entry after relaxation fails the whole run.
    pub fn compute(&self, matrix: &AdjacencyMatrix) -> Result<ApspResult, EngineError> {
        let start = Instant::now();
        let n = matrix.node_count();
        let parallel = self.config.use_parallel_for(n);

        info!(
            "Computing all-pairs shortest paths for {} nodes ({} sweep)",
            n,
            if parallel { "parallel" } else { "sequential" }
        );

        let mut dist = matrix.as_matrix().clone();
        let mut pred = initial_predecessors(&dist);
        debug!("Initialized predecessors for {} direct edges", matrix.edge_count());

        for k in 0..n {
            relax_through(k, n, dist.cells_mut(), pred.cells_mut(), parallel);
        }

        let result = ApspResult {
            dist,
            pred,
            parallel,
            time_ms: start.elapsed().as_millis() as u64,
        };

        if self.config.detect_negative_cycles {
            let nodes = result.negative_cycle_nodes();
            if !nodes.is_empty() {
                warn!("Negative cycle detected through {} node(s): {:?}", nodes.len(), nodes);
                return Err(EngineError::NegativeCycleDetected { nodes });
            }
        }

        info!("All-pairs shortest paths ready in {}ms", result.time_ms);
        Ok(result)
    }
}

/// `pred[i][j] = i` for every direct edge, `None` elsewhere (diagonal included).
fn initial_predecessors(dist: &DistanceMatrix) -> PredecessorMatrix {
    let n = dist.size();
    let mut pred = SquareMatrix::filled(n, None);
    for i in 0..n {
        for j in 0..n {
            if i != j && dist.get(i, j).is_finite() {
                pred.set(i, j, Some(i));
            }
        }
    }
    pred
}

/// One sweep over all `(i, j)` with `k` as the intermediate.
///
/// Row `k` and each row's `dist[i][k]` are read from values fixed before the
/// sweep, so rows are independent and the result does not depend on the
/// order in which they are processed.
fn relax_through(
    k: usize,
    n: usize,
    dist: &mut [Weight],
    pred: &mut [Option<usize>],
    parallel: bool,
) {
    let via_dist: Vec<Weight> = dist[k * n..(k + 1) * n].to_vec();
    let via_pred: Vec<Option<usize>> = pred[k * n..(k + 1) * n].to_vec();

    let relax_row = |(dist_row, pred_row): (&mut [Weight], &mut [Option<usize>])| {
        let to_k = dist_row[k];
        if to_k.is_infinite() {
            return;
        }
        for j in 0..n {
            let candidate = to_k + via_dist[j];
            if candidate < dist_row[j] {
                dist_row[j] = candidate;
                pred_row[j] = via_pred[j];
            }
        }
    };

    if parallel {
        dist.par_chunks_mut(n)
            .zip(pred.par_chunks_mut(n))
            .for_each(relax_row);
    } else {
        dist.chunks_mut(n).zip(pred.chunks_mut(n)).for_each(relax_row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_graph() -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(
            4,
            &[
                (0, 1, 3.0),
                (0, 3, 5.0),
                (1, 0, 2.0),
                (1, 3, 4.0),
                (2, 1, 1.0),
                (3, 2, 2.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_known_distances() {
        let result = ShortestPathEngine::with_defaults()
            .compute(&scenario_graph())
            .unwrap();

        assert_eq!(result.distance(0, 2), Some(Weight::Finite(7.0)));
        assert_eq!(result.distance(1, 3), Some(Weight::Finite(4.0)));
        assert_eq!(result.distance(2, 0), Some(Weight::Finite(3.0)));
        assert_eq!(result.distance(3, 0), Some(Weight::Finite(5.0)));
    }

    #[test]
    fn test_predecessors_follow_best_route() {
        let result = ShortestPathEngine::with_defaults()
            .compute(&scenario_graph())
            .unwrap();

        // 0 -> 3 -> 2 (7) beats 0 -> 1 -> 3 -> 2 (9)
        assert_eq!(result.pred[(0, 2)], Some(3));
        // 2 -> 1 -> 0
        assert_eq!(result.pred[(2, 0)], Some(1));
        // Direct edge keeps its source as predecessor
        assert_eq!(result.pred[(1, 3)], Some(1));
        for i in 0..4 {
            assert_eq!(result.pred[(i, i)], None);
        }
    }

    #[test]
    fn test_diagonal_is_zero() {
        let result = ShortestPathEngine::with_defaults()
            .compute(&scenario_graph())
            .unwrap();
        for i in 0..4 {
            assert_eq!(result.distance(i, i), Some(Weight::ZERO));
        }
    }

    #[test]
    fn test_unreachable_pairs() {
        let m = AdjacencyMatrix::from_edges(3, &[(0, 1, 1.0)]).unwrap();
        let result = ShortestPathEngine::with_defaults().compute(&m).unwrap();

        assert_eq!(result.distance(0, 2), Some(Weight::Infinite));
        assert_eq!(result.distance(1, 2), Some(Weight::Infinite));
        assert_eq!(result.distance(2, 0), Some(Weight::Infinite));
        assert!(!result.is_reachable(2, 0));
        assert!(result.is_reachable(0, 1));
        assert_eq!(result.pred[(0, 2)], None);
    }

    #[test]
    fn test_negative_edge_without_cycle() {
        let m = AdjacencyMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, -2.0)]).unwrap();
        let result = ShortestPathEngine::with_defaults().compute(&m).unwrap();

        assert_eq!(result.distance(0, 2), Some(Weight::Finite(-1.0)));
        assert_eq!(result.pred[(0, 2)], Some(1));
    }

    #[test]
    fn test_negative_cycle_detected() {
        let m = AdjacencyMatrix::from_edges(3, &[(0, 1, 1.0), (1, 0, -3.0), (1, 2, 1.0)]).unwrap();
        let err = ShortestPathEngine::with_defaults().compute(&m).unwrap_err();

        assert_eq!(err, EngineError::NegativeCycleDetected { nodes: vec![0, 1] });
    }

    #[test]
    fn test_negative_cycle_passthrough_when_disabled() {
        let m = AdjacencyMatrix::from_edges(2, &[(0, 1, 1.0), (1, 0, -3.0)]).unwrap();
        let engine = ShortestPathEngine::new(
            EngineConfig::sequential().with_negative_cycle_detection(false),
        );
        let result = engine.compute(&m).unwrap();

        assert!(result.distance(0, 0).unwrap().is_negative());
        assert_eq!(result.negative_cycle_nodes(), vec![0, 1]);
    }

    #[test]
    fn test_empty_and_single_node() {
        let engine = ShortestPathEngine::with_defaults();

        let empty = engine.compute(&AdjacencyMatrix::from_edges(0, &[]).unwrap()).unwrap();
        assert_eq!(empty.node_count(), 0);

        let single = engine.compute(&AdjacencyMatrix::from_edges(1, &[]).unwrap()).unwrap();
        assert_eq!(single.distance(0, 0), Some(Weight::ZERO));
        assert_eq!(single.pred[(0, 0)], None);
    }

    #[test]
    fn test_input_not_mutated() {
        let m = scenario_graph();
        let before = m.clone();
        ShortestPathEngine::with_defaults().compute(&m).unwrap();
        assert_eq!(m, before);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let m = scenario_graph();
        let sequential = ShortestPathEngine::new(EngineConfig::sequential())
            .compute(&m)
            .unwrap();
        let parallel = ShortestPathEngine::new(EngineConfig::new().with_parallel_threshold(1))
            .compute(&m)
            .unwrap();

        assert!(!sequential.parallel);
        assert!(parallel.parallel);
        assert_eq!(sequential.dist, parallel.dist);
        assert_eq!(sequential.pred, parallel.pred);
    }

    #[test]
    fn test_result_deserialization_checks_shapes() {
        let result = ShortestPathEngine::with_defaults()
            .compute(&scenario_graph())
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: ApspResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);

        let mismatched = r#"{
            "dist": {"size": 1, "cells": [{"finite": 0.0}]},
            "pred": {"size": 2, "cells": [null, null, null, null]},
            "parallel": false,
            "time_ms": 0
        }"#;
        let err = serde_json::from_str::<ApspResult>(mismatched).unwrap_err();
        assert!(err.to_string().contains("predecessor matrix has size 2"));

        let short = r#"{
            "dist": {"size": 2, "cells": [{"finite": 0.0}]},
            "pred": {"size": 2, "cells": [null, null, null, null]},
            "parallel": false,
            "time_ms": 0
        }"#;
        assert!(serde_json::from_str::<ApspResult>(short).is_err());
    }

    #[test]
    fn test_into_parts() {
        let result = ShortestPathEngine::with_defaults()
            .compute(&scenario_graph())
            .unwrap();
        let (dist, pred) = result.into_parts();
        assert_eq!(dist.size(), 4);
        assert_eq!(pred.size(), 4);
    }
}
