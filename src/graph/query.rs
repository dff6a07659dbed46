//! Read-only shortest-path queries over a computed [`ApspResult`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::ApspResult;
use super::error::QueryError;
use super::reconstruct::{Path, PathReconstructor};
use super::weight::Weight;

/// Result of a valid query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryOutcome {
    /// A finite-cost route exists.
    Found { path: Path, distance: Weight },
    /// No route exists. Not an error.
    Unreachable,
}

impl QueryOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, QueryOutcome::Found { .. })
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, QueryOutcome::Unreachable)
    }

    /// The route, if found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            QueryOutcome::Found { path, .. } => Some(path),
            QueryOutcome::Unreachable => None,
        }
    }

    /// The route cost, if found.
    pub fn distance(&self) -> Option<Weight> {
        match self {
            QueryOutcome::Found { distance, .. } => Some(*distance),
            QueryOutcome::Unreachable => None,
        }
    }
}

/// Answers (source, target) queries against one engine result.
#[derive(Debug, Clone)]
pub struct QueryService {
    result: ApspResult,
}

impl QueryService {
    /// Wraps a computed result.
    pub fn new(result: ApspResult) -> Self {
        Self { result }
    }

    /// The underlying result.
    pub fn result(&self) -> &ApspResult {
        &self.result
    }

    /// Number of known nodes.
    pub fn node_count(&self) -> usize {
        self.result.node_count()
    }

    /// Whether `node` is a known node index.
    pub fn contains(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Looks up the shortest route `from -> to`.
    ///
    /// A query from a node to itself yields the single-node path with the
    /// diagonal distance.
    pub fn query(&self, from: usize, to: usize) -> Result<QueryOutcome, QueryError> {
        self.check_node(from)?;
        self.check_node(to)?;

        let distance = *self.result.dist.get(from, to);
        if distance.is_infinite() {
            debug!("No path from {} to {}", from, to);
            return Ok(QueryOutcome::Unreachable);
        }

        let path = if from == to {
            Path::single(from)
        } else {
            PathReconstructor::reconstruct(&self.result.pred, from, to)?
        };

        debug!("Path {} -> {}: {} (distance {})", from, to, path, distance);
        Ok(QueryOutcome::Found { path, distance })
    }

    /// Runs one query per target from the same source.
    pub fn query_many(
        &self,
        from: usize,
        targets: &[usize],
    ) -> Vec<Result<QueryOutcome, QueryError>> {
        targets.iter().map(|&to| self.query(from, to)).collect()
    }

    /// The `k` closest reachable nodes from `from`, nearest first.
    ///
    /// The source itself is not included. Ties are broken by node index.
    pub fn nearest(&self, from: usize, k: usize) -> Result<Vec<(usize, Weight)>, QueryError> {
        self.check_node(from)?;

        let mut reachable: Vec<(usize, Weight)> = self
            .result
            .dist
            .row(from)
            .iter()
            .enumerate()
            .filter(|(to, d)| *to != from && d.is_finite())
            .map(|(to, d)| (to, *d))
            .collect();

        reachable.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        reachable.truncate(k);
        Ok(reachable)
    }

    fn check_node(&self, node: usize) -> Result<(), QueryError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(QueryError::NodeNotFound {
                node,
                node_count: self.node_count(),
            })
        }
    }
}
