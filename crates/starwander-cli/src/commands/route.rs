//! Route command handler for planning a route through the star graph.

use std::path::Path;

use anyhow::{Context, Result};

use starwander_lib::{plan_route, RouteAlgorithm, RouteRequest, RouteSummary, SearchBudget};

use super::{load_world, BlockedEdge};
use crate::output::{render_route, OutputFormat};

/// Arguments shared by the route and simulate commands.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting star id.
    pub from: String,
    /// Destination star id, required by the shortest-path algorithm.
    pub to: Option<String>,
    pub algorithm: RouteAlgorithm,
    /// Edges to block before searching.
    pub block: Vec<BlockedEdge>,
    /// Expansion limit for the max-stars search.
    pub max_expansions: Option<usize>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            start: self.from.clone(),
            goal: self.to.clone(),
            algorithm: self.algorithm,
            budget: SearchBudget {
                max_expansions: self.max_expansions,
            },
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(file: &Path, format: OutputFormat, args: &RouteCommandArgs) -> Result<()> {
    let (graph, traveler) = load_world(file, &args.block)?;

    let plan = plan_route(&graph, &traveler, &args.to_request())
        .with_context(|| format!("failed to plan a {} route from {}", args.algorithm, args.from))?;
    let summary = RouteSummary::from_plan(&graph, &plan).context("failed to summarise route")?;

    render_route(&summary, format).context("failed to write route")?;
    Ok(())
}
