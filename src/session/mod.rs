//! Interactive query session.
//!
//! The session is a small state machine
//! (`AwaitingSource → AwaitingTarget → Resolved/Error`) decoupled from the
//! engine. [`run_session`] drives it over any line-oriented reader/writer
//! pair.
//!
//! # Example
//!
//! ```rust,ignore
//! use floydpath::session::{run_session, QuerySession, SessionConfig};
//!
//! let mut session = QuerySession::new(service, SessionConfig::from_env());
//! let stdin = std::io::stdin();
//! run_session(&mut session, stdin.lock(), std::io::stdout())?;
//! ```

pub mod config;
pub mod state;

use std::io::{self, BufRead, Write};

use tracing::info;

// Re-exports
pub use config::SessionConfig;
pub use state::{QuerySession, SessionEvent, SessionOutput, SessionState};

/// Runs the session until it finishes or the input ends.
///
/// End of input is treated like an interrupt.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut QuerySession,
    mut reader: R,
    mut writer: W,
) -> io::Result<()> {
    info!("Starting interactive query session");

    for line in session.banner() {
        writeln!(writer, "{}", line)?;
    }

    let mut line = String::new();
    while let Some(prompt) = session.state().prompt() {
        write!(writer, "\n{}", prompt)?;
        writer.flush()?;

        line.clear();
        let event = if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            SessionEvent::Interrupt
        } else {
            SessionEvent::Input(line.clone())
        };

        for message in session.handle(event).messages {
            writeln!(writer, "{}", message)?;
        }
    }

    info!("Query session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjacencyMatrix, QueryService, ShortestPathEngine};

    fn session() -> QuerySession {
        let matrix = AdjacencyMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, -2.0)]).unwrap();
        let result = ShortestPathEngine::with_defaults().compute(&matrix).unwrap();
        QuerySession::new(QueryService::new(result), SessionConfig::default())
    }

    #[test]
    fn test_scripted_session() {
        let mut s = session();
        let input = b"h\n0\n2\nn\nq\n";
        let mut output = Vec::new();

        run_session(&mut s, &input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Interactive Shortest Path Query"));
        assert!(text.contains("Help:"));
        assert!(text.contains("Path: 0 → 1 → 2"));
        assert!(text.contains("Distance: -1"));
        assert!(text.contains("Show distance matrix? (y/n): "));
        assert!(text.contains("Goodbye!"));
        assert!(s.is_finished());
    }

    #[test]
    fn test_end_of_input_finishes() {
        let mut s = session();
        let mut output = Vec::new();

        run_session(&mut s, &b"0\n"[..], &mut output).unwrap();

        assert!(s.is_finished());
        assert!(String::from_utf8(output).unwrap().contains("Goodbye!"));
    }
}
