// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments and
// dispatches to these handlers.

pub mod route;
pub mod simulate;
pub mod stars;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use starwander_lib::{load_document, IngestOptions, StarGraph, Traveler};

/// An edge to block before searching, written `A:B` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedEdge {
    pub a: String,
    pub b: String,
}

/// Parse an `A:B` pair for `--block`.
pub fn parse_blocked_edge(value: &str) -> std::result::Result<BlockedEdge, String> {
    match value.split_once(':') {
        Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok(BlockedEdge {
            a: a.to_string(),
            b: b.to_string(),
        }),
        _ => Err(format!("expected STAR:STAR, got '{value}'")),
    }
}

/// Load the star document and build both the graph and the traveler it describes.
pub fn load_world(path: &Path, blocked: &[BlockedEdge]) -> Result<(StarGraph, Traveler)> {
    let document = load_document(path)
        .with_context(|| format!("failed to load star document from {}", path.display()))?;
    let mut graph = document
        .build_graph(&IngestOptions::strict())
        .with_context(|| format!("invalid star document {}", path.display()))?;

    for edge in blocked {
        debug!(a = %edge.a, b = %edge.b, "blocking edge");
        graph.block_edge(&edge.a, &edge.b);
    }

    let traveler = Traveler::new(&document.traveler_params());
    Ok((graph, traveler))
}
