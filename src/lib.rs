//! floydpath: all-pairs shortest paths with Floyd–Warshall
//!
//! This crate exposes the shortest-path core and the thin collaborators
//! around it: a JSON graph loader, text reports and an interactive query
//! session.

pub mod graph;
pub mod loader;
pub mod report;
pub mod session;

// Re-export core types
pub use graph::{
    AdjacencyMatrix, ApspResult, DistanceMatrix, EngineConfig, EngineError, GraphError,
    GraphResult, Path, PathReconstructionError, PathReconstructor, PredecessorMatrix, QueryError,
    QueryOutcome, QueryService, ShortestPathEngine, ValidationError, Weight,
};

// Collaborator exports
pub use loader::{load_graph, load_matrix, sample_graph, save_graph, GraphDocument};
pub use session::{run_session, QuerySession, SessionConfig, SessionEvent, SessionState};
