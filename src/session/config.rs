//! Configuration for the interactive query session.

use serde::{Deserialize, Serialize};

/// Configuration for [`QuerySession`](super::state::QuerySession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Offer to print the distance matrix after a path is found.
    pub show_matrix_prompt: bool,

    /// Print the welcome banner when the session starts.
    pub show_banner: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            show_matrix_prompt: true,
            show_banner: true,
        }
    }
}

impl SessionConfig {
    /// Creates a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: enable/disable the matrix prompt.
    pub fn with_matrix_prompt(mut self, enabled: bool) -> Self {
        self.show_matrix_prompt = enabled;
        self
    }

    /// Builder: enable/disable the banner.
    pub fn with_banner(mut self, enabled: bool) -> Self {
        self.show_banner = enabled;
        self
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let show_matrix_prompt = std::env::var("FLOYDPATH_SHOW_MATRIX_PROMPT")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true);

        Self {
            show_matrix_prompt,
            ..Default::default()
        }
    }
}
