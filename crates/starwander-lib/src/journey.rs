//! Step-by-step replay of a route against a traveler.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::StarGraph;
use crate::path::{hop_distance, RESEARCH_TIME_RATIO};
use crate::routing::resolve_star;
use crate::traveler::{Traveler, TravelerStatus};

/// Traveler state after reaching (or failing to reach) one star of the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyStep {
    pub index: usize,
    pub star: String,
    pub label: String,
    /// Length of the hop that led here; zero for the first star.
    pub distance: f64,
    /// `false` when the traveler died on the way or during the visit.
    pub survived: bool,
    pub status: TravelerStatus,
}

/// Outcome of a replayed route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    pub steps: Vec<JourneyStep>,
    /// Whether every star of the route was reached alive.
    pub completed: bool,
    pub final_status: TravelerStatus,
}

impl Journey {
    /// Stars reached alive, start included.
    pub fn stars_reached(&self) -> usize {
        self.steps.iter().filter(|step| step.survived).count()
    }
}

/// Replay `route` on a copy of `traveler`.
///
/// Each hop runs `travel` followed by `visit` with research for half the
/// star's eating time, the same sequence the searches simulate. The replay
/// stops at the first step the traveler does not survive.
pub fn simulate_journey(graph: &StarGraph, traveler: &Traveler, route: &[String]) -> Result<Journey> {
    let Some(first) = route.first() else {
        return Err(Error::EmptyRoutePlan);
    };
    for id in route {
        resolve_star(graph, id)?;
    }

    let mut traveler = traveler.clone();
    let mut steps = Vec::with_capacity(route.len());

    let start = graph.get_by_id(first).ok_or_else(|| unknown(first))?;
    if start.galaxy != traveler.current_galaxy() {
        traveler = traveler.in_galaxy(start.galaxy.clone());
    }
    steps.push(JourneyStep {
        index: 0,
        star: start.id.clone(),
        label: start.label.clone(),
        distance: 0.0,
        survived: !traveler.is_dead(),
        status: traveler.status(),
    });

    let mut completed = !traveler.is_dead();
    for (offset, pair) in route.windows(2).enumerate() {
        if !completed {
            break;
        }
        let (from, to) = (&pair[0], &pair[1]);
        let distance = hop_distance(graph, from, to).ok_or_else(|| Error::RouteNotFound {
            start: from.clone(),
            goal: to.clone(),
        })?;
        let star = graph.get_by_id(to).ok_or_else(|| unknown(to))?;

        let survived = traveler.travel(distance, Some(star.galaxy.as_str()))
            && traveler.visit(star, star.time_to_eat * RESEARCH_TIME_RATIO, None);

        debug!(star = %star.id, distance, survived, energy = traveler.energy(), "journey step");
        steps.push(JourneyStep {
            index: offset + 1,
            star: star.id.clone(),
            label: star.label.clone(),
            distance,
            survived,
            status: traveler.status(),
        });
        completed = survived;
    }

    Ok(Journey {
        steps,
        completed,
        final_status: traveler.status(),
    })
}

fn unknown(id: &str) -> Error {
    Error::UnknownStar {
        id: id.to_string(),
        suggestions: Vec::new(),
    }
}
