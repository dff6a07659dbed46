//! Query session state machine.
//!
//! The session never reads or writes a terminal itself. Each input line is
//! fed in as a [`SessionEvent`] and the resulting messages and state are
//! returned, so the same machine drives stdin, scripted input and tests.

use tracing::debug;

use crate::graph::{QueryOutcome, QueryService};
use crate::report::{render_distance_matrix, render_outcome};

use super::config::SessionConfig;

const HELP_LINES: &[&str] = &[
    "Help:",
    "  Enter source and target node numbers to query the shortest path",
    "  Commands:",
    "    q - Quit the query interface",
    "    h - Show this help message",
    "  After a path is found you can choose to print the distance matrix",
];

const INVALID_INPUT: &str = "Please enter valid node numbers or commands.";
const GOODBYE: &str = "Exiting query interface. Goodbye!";

/// Where the conversation currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Waiting for a source node or a command.
    AwaitingSource,
    /// Source entered, waiting for the target node. The source is kept as
    /// typed and checked against the graph together with the target.
    AwaitingTarget { source: i64 },
    /// A path was found; waiting for y/n on printing the distance matrix.
    AwaitingMatrixChoice {
        source: usize,
        target: usize,
        outcome: QueryOutcome,
    },
    /// The last query completed.
    Resolved {
        source: usize,
        target: usize,
        outcome: QueryOutcome,
    },
    /// The last input was rejected.
    Error { message: String },
    /// The session has ended.
    Finished,
}

impl SessionState {
    /// Prompt to show before reading the next input, if any.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            SessionState::AwaitingSource
            | SessionState::Resolved { .. }
            | SessionState::Error { .. } => Some("Enter source node (or command): "),
            SessionState::AwaitingTarget { .. } => Some("Enter target node: "),
            SessionState::AwaitingMatrixChoice { .. } => Some("Show distance matrix? (y/n): "),
            SessionState::Finished => None,
        }
    }

    /// Whether a new query can be started from this state.
    fn accepts_source(&self) -> bool {
        matches!(
            self,
            SessionState::AwaitingSource | SessionState::Resolved { .. } | SessionState::Error { .. }
        )
    }
}

/// Discrete input to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// One line of user input.
    Input(String),
    /// Interrupt or end of input.
    Interrupt,
}

/// What one event produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutput {
    /// Lines to show the user.
    pub messages: Vec<String>,
    /// State after the event.
    pub state: SessionState,
}

/// Interactive shortest-path query session.
pub struct QuerySession {
    service: QueryService,
    config: SessionConfig,
    state: SessionState,
}

impl QuerySession {
    /// Creates a session over a query service.
    pub fn new(service: QueryService, config: SessionConfig) -> Self {
        Self {
            service,
            config,
            state: SessionState::AwaitingSource,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The query service.
    pub fn service(&self) -> &QueryService {
        &self.service
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Lines shown once when the session starts.
    pub fn banner(&self) -> Vec<String> {
        if !self.config.show_banner {
            return Vec::new();
        }
        vec![
            "=".repeat(50),
            "Interactive Shortest Path Query".to_string(),
            format!(
                "Graph has {} nodes. Enter 'q' to quit, 'h' for help",
                self.service.node_count()
            ),
            "=".repeat(50),
        ]
    }

    /// Applies one event and returns what it produced.
    pub fn handle(&mut self, event: SessionEvent) -> SessionOutput {
        let (next, messages) = match event {
            SessionEvent::Interrupt => self.finish(),
            SessionEvent::Input(line) => self.handle_input(line.trim()),
        };

        debug!("Session transition: {:?} -> {:?}", self.state, next);
        self.state = next;

        SessionOutput {
            messages,
            state: self.state.clone(),
        }
    }

    fn finish(&self) -> (SessionState, Vec<String>) {
        if self.state == SessionState::Finished {
            (SessionState::Finished, Vec::new())
        } else {
            (SessionState::Finished, vec![GOODBYE.to_string()])
        }
    }

    fn handle_input(&self, input: &str) -> (SessionState, Vec<String>) {
        if self.state == SessionState::Finished {
            return (SessionState::Finished, Vec::new());
        }

        // Commands are only recognised at the source prompt
        match &self.state {
            SessionState::AwaitingTarget { source } => self.handle_target(*source, input),
            SessionState::AwaitingMatrixChoice {
                source,
                target,
                outcome,
            } => {
                let resolved = SessionState::Resolved {
                    source: *source,
                    target: *target,
                    outcome: outcome.clone(),
                };
                if input.eq_ignore_ascii_case("y") {
                    let table = render_distance_matrix(&self.service.result().dist);
                    (resolved, vec![table])
                } else {
                    (resolved, Vec::new())
                }
            }
            state if state.accepts_source() => self.handle_source(input),
            _ => (self.state.clone(), Vec::new()),
        }
    }

    fn handle_source(&self, input: &str) -> (SessionState, Vec<String>) {
        if input.eq_ignore_ascii_case("q") {
            return self.finish();
        }
        if input.eq_ignore_ascii_case("h") {
            let help = HELP_LINES.iter().map(|l| l.to_string()).collect();
            return (SessionState::AwaitingSource, help);
        }

        match input.parse::<i64>() {
            Ok(source) => (SessionState::AwaitingTarget { source }, Vec::new()),
            Err(_) => invalid_input(),
        }
    }

    fn handle_target(&self, source: i64, input: &str) -> (SessionState, Vec<String>) {
        let target = match input.parse::<i64>() {
            Ok(target) => target,
            Err(_) => return invalid_input(),
        };

        let (source, target) = match (usize::try_from(source), usize::try_from(target)) {
            (Ok(source), Ok(target)) => (source, target),
            _ => {
                let node = if source < 0 { source } else { target };
                return query_error(format!(
                    "Node {} not found (graph has {} nodes)",
                    node,
                    self.service.node_count()
                ));
            }
        };

        match self.service.query(source, target) {
            Ok(outcome) => {
                let messages = vec![render_outcome(source, target, &outcome)];
                let next = if outcome.is_found() && self.config.show_matrix_prompt {
                    SessionState::AwaitingMatrixChoice {
                        source,
                        target,
                        outcome,
                    }
                } else {
                    SessionState::Resolved {
                        source,
                        target,
                        outcome,
                    }
                };
                (next, messages)
            }
            Err(e) => query_error(e.to_string()),
        }
    }
}

fn query_error(detail: String) -> (SessionState, Vec<String>) {
    let message = format!("Error: {}", detail);
    (
        SessionState::Error {
            message: message.clone(),
        },
        vec![message],
    )
}

fn invalid_input() -> (SessionState, Vec<String>) {
    (
        SessionState::Error {
            message: INVALID_INPUT.to_string(),
        },
        vec![INVALID_INPUT.to_string()],
    )
}
