//! Output formatting for the CLI commands.
//!
//! Text and rich renderings delegate to the library's renderers; JSON output
//! serialises the library's structures directly.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use starwander_lib::{render_journey, Journey, RenderMode, RouteSummary, Star};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one line per star.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> RenderMode {
        match self {
            OutputFormat::Rich => RenderMode::RichText,
            OutputFormat::Text | OutputFormat::Json => RenderMode::PlainText,
        }
    }
}

/// Render a route summary in the requested format.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(summary),
        other => {
            print!("{}", summary.render(other.render_mode()));
            Ok(())
        }
    }
}

/// Render a replayed journey in the requested format.
pub fn render_journey_output(journey: &Journey, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(journey),
        other => {
            print!("{}", render_journey(journey, other.render_mode()));
            let palette = ColorPalette::detect();
            let state = journey.final_status.health_state;
            println!("Final health: {}{state}{}", palette.health(state), palette.reset);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct StarListing<'a> {
    id: &'a str,
    label: &'a str,
    galaxy: &'a str,
    x: f64,
    y: f64,
    hypergiant: bool,
    research_effect: f64,
    links: usize,
}

/// Render a star listing in the requested format.
pub fn render_stars(stars: &[&Star], format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        let listing: Vec<_> = stars
            .iter()
            .map(|star| StarListing {
                id: &star.id,
                label: &star.label,
                galaxy: &star.galaxy,
                x: star.coordinates.x,
                y: star.coordinates.y,
                hypergiant: star.hypergiant,
                research_effect: star.research_effect,
                links: star.linked_to.len(),
            })
            .collect();
        return render_json(&listing);
    }

    let palette = ColorPalette::detect();
    let mut stdout = io::stdout().lock();
    for star in stars {
        let marker = if star.hypergiant { " [hypergiant]" } else { "" };
        match format {
            OutputFormat::Rich => writeln!(
                stdout,
                "* **{}** (`{}`) in {}{marker}",
                star.label, star.id, star.galaxy
            )?,
            _ => writeln!(
                stdout,
                "{}{}{} ({}{}{}) {} ({:.1}, {:.1}){marker}",
                palette.white_bold,
                star.label,
                palette.reset,
                palette.gray,
                star.id,
                palette.reset,
                star.galaxy,
                star.coordinates.x,
                star.coordinates.y
            )?,
        }
    }
    writeln!(stdout, "{} stars", stars.len())?;
    Ok(())
}

/// Serialise any value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
