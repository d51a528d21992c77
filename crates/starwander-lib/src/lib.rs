//! Starwander library entry points.
//!
//! This crate loads star documents into an in-memory graph, simulates a
//! resource-constrained traveler, and runs the route searches on top of both.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod journey;
pub mod output;
pub mod path;
pub mod routing;
pub mod star;
pub mod traveler;

pub use config::{IngestOptions, SimulationConfig, StateTable, TravelerParams, WorldBounds};
pub use dataset::{load_document, load_graph, parse_document, Document};
pub use error::{Error, Result};
pub use graph::StarGraph;
pub use journey::{simulate_journey, Journey, JourneyStep};
pub use output::{render_journey, RenderMode, RouteSummary};
pub use path::{
    find_max_stars_route, find_optimal_route, find_route_to_destination, route_distance,
    SearchBudget,
};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RoutePlanner, RouteRequest};
pub use star::{Constellation, Coordinates, Link, Star, DEFAULT_GALAXY};
pub use traveler::{EffectKind, HealthState, ResearchRecord, Traveler, TravelerStatus};
