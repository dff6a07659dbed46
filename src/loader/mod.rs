//! JSON graph descriptions.
//!
//! A graph file declares its node ids and a list of `[source, target, weight]`
//! edges:
//!
//! ```json
//! { "nodes": [0, 1, 2], "edges": [[0, 1, 3.0], [1, 2, 2.0]] }
//! ```
//!
//! The loader only translates this into an [`AdjacencyMatrix`]; all
//! validation of indices and weights happens in the matrix constructor.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::graph::AdjacencyMatrix;

/// Default graph file used by the binary.
pub const DEFAULT_GRAPH_PATH: &str = "data/sample_graph.json";

/// A persisted graph description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Declared node ids, expected to be `0..n`.
    pub nodes: Vec<usize>,
    /// Directed weighted edges.
    pub edges: Vec<(usize, usize, f64)>,
}

impl GraphDocument {
    /// Creates a document with nodes `0..node_count`.
    pub fn new(node_count: usize, edges: Vec<(usize, usize, f64)>) -> Self {
        Self {
            nodes: (0..node_count).collect(),
            edges,
        }
    }

    /// Parses a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse graph JSON")
    }

    /// Serializes to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize graph JSON")
    }

    /// Number of declared nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Validates the document and builds the weight matrix.
    pub fn to_matrix(&self) -> Result<AdjacencyMatrix> {
        let matrix = AdjacencyMatrix::from_node_set(&self.nodes, &self.edges)
            .context("Graph description failed validation")?;
        debug!(
            "Built {}x{} adjacency matrix with {} edges",
            matrix.node_count(),
            matrix.node_count(),
            matrix.edge_count()
        );
        Ok(matrix)
    }
}

/// Reads a graph description from disk.
pub fn load_graph(path: impl AsRef<Path>) -> Result<GraphDocument> {
    let path = path.as_ref();
    info!("Loading graph from {}", path.display());

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file: {}", path.display()))?;
    let document = GraphDocument::from_json_str(&json)
        .with_context(|| format!("Invalid graph file: {}", path.display()))?;

    info!(
        "Loaded graph with {} nodes and {} edges",
        document.node_count(),
        document.edges.len()
    );
    Ok(document)
}

/// Reads a graph description and builds its weight matrix.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<AdjacencyMatrix> {
    load_graph(path)?.to_matrix()
}

/// Writes a graph description to disk, creating parent directories.
pub fn save_graph(path: impl AsRef<Path>, document: &GraphDocument) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, document.to_json_string()?)
        .with_context(|| format!("Failed to write graph file: {}", path.display()))?;
    info!("Saved graph to {}", path.display());
    Ok(())
}

/// The four-node demonstration graph.
pub fn sample_graph() -> GraphDocument {
    GraphDocument::new(
        4,
        vec![
            (0, 1, 3.0),
            (0, 3, 6.0),
            (1, 2, 2.0),
            (2, 3, 1.0),
            (3, 0, 4.0),
            (3, 1, 7.0),
            (3, 2, 9.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Weight;

    #[test]
    fn test_parse_document() {
        let doc = GraphDocument::from_json_str(
            r#"{"nodes": [0, 1, 2], "edges": [[0, 1, 3], [1, 2, 2.5]]}"#,
        )
        .unwrap();

        assert_eq!(doc.node_count(), 3);
        assert_eq!(doc.edges, vec![(0, 1, 3.0), (1, 2, 2.5)]);

        let matrix = doc.to_matrix().unwrap();
        assert_eq!(matrix.weight(1, 2), Some(Weight::Finite(2.5)));
        assert_eq!(matrix.weight(2, 0), Some(Weight::Infinite));
    }

    #[test]
    fn test_parse_error() {
        let err = GraphDocument::from_json_str(r#"{"nodes": [0]}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse graph JSON"));
    }

    #[test]
    fn test_invalid_edge_surfaces_validation_error() {
        let doc = GraphDocument::new(2, vec![(0, 5, 1.0)]);
        let err = doc.to_matrix().unwrap_err();

        assert!(err.to_string().contains("failed validation"));
        assert!(err
            .chain()
            .any(|cause| cause.to_string().contains("outside [0, 2)")));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphs").join("sample.json");

        save_graph(&path, &sample_graph()).unwrap();
        let loaded = load_graph(&path).unwrap();

        assert_eq!(loaded, sample_graph());
        assert_eq!(load_matrix(&path).unwrap().edge_count(), 7);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_graph(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read graph file"));
    }
}
