//! Stars command: list the stars of a document.

use std::path::Path;

use anyhow::{Context, Result};

use super::load_world;
use crate::output::{render_stars, OutputFormat};

/// Handle the stars subcommand.
pub fn handle_stars_command(
    file: &Path,
    format: OutputFormat,
    galaxy: Option<&str>,
    hypergiants_only: bool,
) -> Result<()> {
    let (graph, _) = load_world(file, &[])?;

    let stars = match (galaxy, hypergiants_only) {
        (galaxy, true) => graph.get_hypergiant_stars(galaxy),
        (Some(galaxy), false) => graph.get_stars_by_galaxy(galaxy),
        (None, false) => graph.get_all_stars(),
    };

    render_stars(&stars, format).context("failed to write star listing")?;
    Ok(())
}
