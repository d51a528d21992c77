use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starwander_cli::commands::route::{handle_route_command, RouteCommandArgs};
use starwander_cli::commands::simulate::handle_simulate_command;
use starwander_cli::commands::stars::handle_stars_command;
use starwander_cli::commands::{parse_blocked_edge, BlockedEdge};
use starwander_cli::output::OutputFormat;
use starwander_lib::RouteAlgorithm;

#[derive(Parser, Debug)]
#[command(author, version, about = "Starwander route planning and journey simulation")]
struct Cli {
    /// Star document to load.
    #[arg(long, global = true, default_value = "constellations.json")]
    file: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct RouteOptions {
    /// Starting star id.
    #[arg(long = "from")]
    from: String,
    /// Destination star id (required by `shortest`).
    #[arg(long = "to")]
    to: Option<String>,
    /// Search algorithm: max-stars, optimal or shortest.
    #[arg(long, default_value = "max-stars")]
    algorithm: RouteAlgorithm,
    /// Block the link between two stars, written `A:B`. Repeatable.
    #[arg(long = "block", value_parser = parse_blocked_edge)]
    block: Vec<BlockedEdge>,
    /// Stop the max-stars search after this many expansions.
    #[arg(long)]
    max_expansions: Option<usize>,
}

impl From<RouteOptions> for RouteCommandArgs {
    fn from(options: RouteOptions) -> Self {
        Self {
            from: options.from,
            to: options.to,
            algorithm: options.algorithm,
            block: options.block,
            max_expansions: options.max_expansions,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the stars of the document.
    Stars {
        /// Only list stars of this galaxy.
        #[arg(long)]
        galaxy: Option<String>,
        /// Only list hypergiants.
        #[arg(long)]
        hypergiants: bool,
    },
    /// Plan a route and print it.
    Route(RouteOptions),
    /// Plan a route and replay it, printing the traveler after every hop.
    Simulate(RouteOptions),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Stars {
            galaxy,
            hypergiants,
        } => handle_stars_command(&cli.file, cli.format, galaxy.as_deref(), hypergiants),
        Command::Route(options) => handle_route_command(&cli.file, cli.format, &options.into()),
        Command::Simulate(options) => {
            handle_simulate_command(&cli.file, cli.format, &options.into())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
