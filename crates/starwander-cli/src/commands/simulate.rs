//! Simulate command: plan a route, then replay it hop by hop.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use starwander_lib::{plan_route, simulate_journey};

use super::load_world;
use super::route::RouteCommandArgs;
use crate::output::{render_journey_output, OutputFormat};

/// Handle the simulate subcommand.
pub fn handle_simulate_command(
    file: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let (graph, traveler) = load_world(file, &args.block)?;

    let plan = plan_route(&graph, &traveler, &args.to_request())
        .with_context(|| format!("failed to plan a {} route from {}", args.algorithm, args.from))?;
    let journey = simulate_journey(&graph, &traveler, &plan.steps)
        .context("failed to replay the planned route")?;

    info!(
        stars = journey.stars_reached(),
        completed = journey.completed,
        "journey simulated"
    );
    render_journey_output(&journey, format).context("failed to write journey")?;
    Ok(())
}
