//! Error types for the shortest-path core.

use thiserror::Error;

use super::weight::Weight;

/// Malformed adjacency-matrix input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Edge {from} -> {to} references a node outside [0, {node_count})")]
    IndexOutOfRange {
        from: usize,
        to: usize,
        node_count: usize,
    },

    #[error("Declared node set does not match 0..{node_count}: {reason}")]
    NodeSetMismatch { node_count: usize, reason: String },

    #[error("Matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight {
        from: usize,
        to: usize,
        weight: f64,
    },

    #[error("Matrix of size {size} cannot hold {found} cells")]
    CellCount { size: usize, found: usize },

    #[error("Diagonal entry for node {node} is {weight}, expected 0")]
    NonZeroDiagonal { node: usize, weight: Weight },

    #[error("Distance matrix has size {dist} but predecessor matrix has size {pred}")]
    ShapeMismatch { dist: usize, pred: usize },
}

/// Failure raised by the engine after relaxation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Negative cycle detected through node(s) {nodes:?}")]
    NegativeCycleDetected { nodes: Vec<usize> },
}

/// A predecessor walk that could not produce a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathReconstructionError {
    #[error("Predecessor chain {from} -> {to} did not reach the source within {steps} steps")]
    Unterminated {
        from: usize,
        to: usize,
        steps: usize,
    },

    #[error("Predecessor chain {from} -> {to} is broken at node {at}")]
    BrokenChain {
        from: usize,
        to: usize,
        at: usize,
    },

    #[error("Node {node} is outside the predecessor matrix (size {node_count})")]
    OutOfRange { node: usize, node_count: usize },
}

/// Query rejected before any path work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Node {node} not found (graph has {node_count} nodes)")]
    NodeNotFound { node: usize, node_count: usize },

    #[error(transparent)]
    Reconstruction(#[from] PathReconstructionError),
}

/// Umbrella error for callers that want a single type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Path reconstruction error: {0}")]
    Reconstruction(#[from] PathReconstructionError),
}

/// Result alias for the core.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::IndexOutOfRange {
            from: 0,
            to: 7,
            node_count: 3,
        };
        assert!(err.to_string().contains("outside [0, 3)"));

        let err = EngineError::NegativeCycleDetected { nodes: vec![0, 1] };
        assert!(err.to_string().contains("[0, 1]"));

        let err = QueryError::NodeNotFound {
            node: 9,
            node_count: 4,
        };
        assert!(err.to_string().contains("Node 9 not found"));
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: GraphError = PathReconstructionError::Unterminated {
            from: 0,
            to: 2,
            steps: 3,
        }
        .into();
        assert!(matches!(err, GraphError::Reconstruction(_)));
        assert!(err.to_string().starts_with("Path reconstruction error"));
    }
}
