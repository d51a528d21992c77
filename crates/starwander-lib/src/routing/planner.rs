//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! search algorithm (exhaustive max-stars, greedy optimal, Dijkstra shortest).

use crate::error::{Error, Result};
use crate::graph::StarGraph;
use crate::path::{
    find_max_stars_route, find_optimal_route, find_route_to_destination, SearchBudget,
};
use crate::traveler::Traveler;

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
///
/// `start` and `goal` have already been resolved against the graph.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search. The traveler is never mutated; planners simulate
    /// against their own copies.
    fn find_path(
        &self,
        graph: &StarGraph,
        traveler: &Traveler,
        start: &str,
        goal: Option<&str>,
    ) -> Result<Vec<String>>;
}

/// Exhaustive breadth-first search for the longest survivable route.
#[derive(Debug, Clone, Default)]
pub struct MaxStarsPlanner {
    budget: SearchBudget,
}

impl MaxStarsPlanner {
    pub fn new(budget: SearchBudget) -> Self {
        Self { budget }
    }
}

impl RoutePlanner for MaxStarsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::MaxStars
    }

    fn find_path(
        &self,
        graph: &StarGraph,
        traveler: &Traveler,
        start: &str,
        _goal: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(find_max_stars_route(graph, start, traveler, self.budget))
    }
}

/// Greedy single-traveler walk.
#[derive(Debug, Clone, Default)]
pub struct OptimalPlanner;

impl RoutePlanner for OptimalPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Optimal
    }

    fn find_path(
        &self,
        graph: &StarGraph,
        traveler: &Traveler,
        start: &str,
        _goal: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(find_optimal_route(graph, start, traveler))
    }
}

/// Dijkstra shortest path; ignores the traveler's resources.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathPlanner;

impl RoutePlanner for ShortestPathPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Shortest
    }

    fn find_path(
        &self,
        graph: &StarGraph,
        _traveler: &Traveler,
        start: &str,
        goal: Option<&str>,
    ) -> Result<Vec<String>> {
        let goal = goal.ok_or_else(|| Error::MissingGoal {
            algorithm: self.algorithm().to_string(),
        })?;

        let route = find_route_to_destination(graph, start, goal);
        if route.is_empty() {
            return Err(Error::RouteNotFound {
                start: start.to_string(),
                goal: goal.to_string(),
            });
        }
        Ok(route)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::MaxStars => Box::new(MaxStarsPlanner::new(request.budget)),
        RouteAlgorithm::Optimal => Box::new(OptimalPlanner),
        RouteAlgorithm::Shortest => Box::new(ShortestPathPlanner),
    }
}
