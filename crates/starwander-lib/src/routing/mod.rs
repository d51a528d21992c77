//! Route planning facade.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a planner implementing [`RoutePlanner`], so
//! the orchestration in [`plan_route`] does not change when an algorithm is
//! added.
//!
//! Unlike the raw functions in [`crate::path`], which answer an unknown start
//! with either a singleton or an empty route, the facade rejects unknown ids up
//! front with [`Error::UnknownStar`].
//!
//! # Example
//!
//! ```no_run
//! use starwander_lib::{load_document, plan_route, IngestOptions, RouteRequest, Traveler};
//!
//! let document = load_document(std::path::Path::new("constellations.json"))?;
//! let graph = document.build_graph(&IngestOptions::default())?;
//! let traveler = Traveler::new(&document.traveler_params());
//! let plan = plan_route(&graph, &traveler, &RouteRequest::max_stars("1"))?;
//! println!("Visited {} stars", plan.steps.len());
//! # Ok::<(), starwander_lib::Error>(())
//! ```

mod planner;

pub use planner::{
    select_planner, MaxStarsPlanner, OptimalPlanner, RoutePlanner, ShortestPathPlanner,
};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::StarGraph;
use crate::path::{route_distance, SearchBudget};
use crate::traveler::Traveler;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Exhaustive search maximizing the number of stars reached alive.
    #[default]
    MaxStars,
    /// Greedy resource-aware walk.
    Optimal,
    /// Dijkstra shortest path to a destination.
    Shortest,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::MaxStars => "max-stars",
            RouteAlgorithm::Optimal => "optimal",
            RouteAlgorithm::Shortest => "shortest",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "max-stars" | "max_stars" => Ok(Self::MaxStars),
            "optimal" | "greedy" => Ok(Self::Optimal),
            "shortest" | "dijkstra" => Ok(Self::Shortest),
            other => Err(format!("unknown route algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    /// Destination, required by [`RouteAlgorithm::Shortest`] and ignored otherwise.
    pub goal: Option<String>,
    pub algorithm: RouteAlgorithm,
    pub budget: SearchBudget,
}

impl RouteRequest {
    pub fn max_stars(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: None,
            algorithm: RouteAlgorithm::MaxStars,
            budget: SearchBudget::unlimited(),
        }
    }

    pub fn optimal(start: impl Into<String>) -> Self {
        Self {
            algorithm: RouteAlgorithm::Optimal,
            ..Self::max_stars(start)
        }
    }

    pub fn shortest(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            goal: Some(goal.into()),
            algorithm: RouteAlgorithm::Shortest,
            ..Self::max_stars(start)
        }
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub steps: Vec<String>,
    pub total_distance: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Last star of the route.
    pub fn destination(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }
}

/// Resolve a star id, returning an error with suggestions for unknown ids.
pub fn resolve_star(graph: &StarGraph, id: &str) -> Result<String> {
    if graph.contains(id) {
        return Ok(id.to_string());
    }
    Err(Error::UnknownStar {
        id: id.to_string(),
        suggestions: graph.fuzzy_star_matches(id, 3),
    })
}

/// Compute a route using the requested algorithm.
///
/// 1. Resolves the start (and goal, when given)
/// 2. Selects the planner strategy
/// 3. Runs the search against a copy of `traveler`
/// 4. Wraps the resulting steps with their total link distance
pub fn plan_route(
    graph: &StarGraph,
    traveler: &Traveler,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let start = resolve_star(graph, &request.start)?;
    let goal = request
        .goal
        .as_deref()
        .map(|goal| resolve_star(graph, goal))
        .transpose()?;

    let planner = select_planner(request);
    debug!(algorithm = %planner.algorithm(), start = %start, "planning route");

    let steps = planner.find_path(graph, traveler, &start, goal.as_deref())?;
    if steps.is_empty() {
        return Err(Error::EmptyRoutePlan);
    }

    let total_distance = route_distance(graph, &steps).unwrap_or_default();

    Ok(RoutePlan {
        algorithm: request.algorithm,
        start,
        goal,
        steps,
        total_distance,
    })
}
