use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use floydpath::graph::{EngineConfig, QueryService, ShortestPathEngine};
use floydpath::loader::{self, GraphDocument, DEFAULT_GRAPH_PATH};
use floydpath::session::{run_session, QuerySession, SessionConfig};

fn main() -> Result<()> {
    // Environment overrides from .env, if present
    dotenv().ok();

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floydpath=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting floydpath all-pairs shortest path query interface");

    let document = resolve_graph()?;
    let matrix = document.to_matrix()?;

    let engine_config = EngineConfig::from_env();
    engine_config
        .validate()
        .context("Invalid engine configuration")?;

    let engine = ShortestPathEngine::new(engine_config);
    let result = engine
        .compute(&matrix)
        .context("Failed to compute all-pairs shortest paths")?;

    info!(
        "Ready for queries ({} nodes, {} edges, {}ms)",
        matrix.node_count(),
        matrix.edge_count(),
        result.time_ms
    );

    let mut session = QuerySession::new(QueryService::new(result), SessionConfig::from_env());
    let stdin = std::io::stdin();
    run_session(&mut session, stdin.lock(), std::io::stdout())
        .context("Query session failed")?;

    Ok(())
}

/// Graph path from the first argument, then `FLOYDPATH_GRAPH`, then the
/// default data file. Falls back to the built-in sample graph when no file
/// was named and the default is missing.
fn resolve_graph() -> Result<GraphDocument> {
    let explicit = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FLOYDPATH_GRAPH").ok())
        .map(PathBuf::from);

    match explicit {
        Some(path) => loader::load_graph(&path),
        None if Path::new(DEFAULT_GRAPH_PATH).exists() => loader::load_graph(DEFAULT_GRAPH_PATH),
        None => {
            warn!(
                "No graph file specified and {} not found, using the built-in sample graph",
                DEFAULT_GRAPH_PATH
            );
            Ok(loader::sample_graph())
        }
    }
}
