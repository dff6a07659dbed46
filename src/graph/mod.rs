//! Shortest-path core.
//!
//! This module provides:
//! - **AdjacencyMatrix**: validated dense weight matrix
//! - **ShortestPathEngine**: Floyd–Warshall all-pairs shortest paths
//! - **PathReconstructor**: predecessor-chain walks
//! - **QueryService**: validated (source, target) lookups
//!
//! # Example
//!
//! ```
//! use floydpath::graph::{AdjacencyMatrix, QueryService, ShortestPathEngine, Weight};
//!
//! let matrix = AdjacencyMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, -2.0)]).unwrap();
//! let result = ShortestPathEngine::with_defaults().compute(&matrix).unwrap();
//!
//! let service = QueryService::new(result);
//! let outcome = service.query(0, 2).unwrap();
//! assert_eq!(outcome.path().unwrap().nodes, vec![0, 1, 2]);
//! assert_eq!(outcome.distance(), Some(Weight::Finite(-1.0)));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod query;
pub mod reconstruct;
pub mod weight;

// Re-exports
pub use config::{ConfigError, EngineConfig};
pub use engine::{ApspResult, ShortestPathEngine};
pub use error::{
    EngineError, GraphError, GraphResult, PathReconstructionError, QueryError, ValidationError,
};
pub use matrix::{AdjacencyMatrix, DistanceMatrix, PredecessorMatrix, SquareMatrix};
pub use query::{QueryOutcome, QueryService};
pub use reconstruct::{Path, PathReconstructor};
pub use weight::Weight;
