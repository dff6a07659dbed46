//! Shortest-path engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`ShortestPathEngine`](super::engine::ShortestPathEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Run the per-intermediate row sweep on the rayon thread pool.
    pub parallel: bool,

    /// Minimum node count before the parallel sweep is used.
    pub parallel_threshold: usize,

    /// Reject results whose diagonal went negative.
    pub detect_negative_cycles: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 128,
            detect_negative_cycles: true,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-threaded configuration.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Builder: enable/disable the parallel sweep.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Builder: set the parallel threshold.
    pub fn with_parallel_threshold(mut self, nodes: usize) -> Self {
        self.parallel_threshold = nodes.max(1);
        self
    }

    /// Builder: enable/disable the negative-cycle post-pass.
    pub fn with_negative_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_negative_cycles = enabled;
        self
    }

    /// Whether a graph of `node_count` nodes gets the parallel sweep.
    pub fn use_parallel_for(&self, node_count: usize) -> bool {
        self.parallel && node_count >= self.parallel_threshold
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_threshold == 0 {
            return Err(ConfigError::InvalidParallelThreshold);
        }
        Ok(())
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let parallel = std::env::var("FLOYDPATH_PARALLEL")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(defaults.parallel);

        let parallel_threshold = std::env::var("FLOYDPATH_PARALLEL_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.parallel_threshold);

        let detect_negative_cycles = std::env::var("FLOYDPATH_DETECT_NEGATIVE_CYCLES")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(defaults.detect_negative_cycles);

        Self {
            parallel,
            parallel_threshold,
            detect_negative_cycles,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidParallelThreshold,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParallelThreshold => {
                write!(f, "Parallel threshold must be at least 1 node")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
