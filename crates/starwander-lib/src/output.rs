use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::StarGraph;
use crate::journey::Journey;
use crate::path::hop_distance;
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: String,
    pub label: String,
}

/// Star reached while following a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
    pub galaxy: String,
    /// Length of the hop leading to this star; `None` for the first star.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub cumulative_distance: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub total_distance: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with star labels and hop distances.
    pub fn from_plan(graph: &StarGraph, plan: &RoutePlan) -> Result<Self> {
        let mut steps = Vec::with_capacity(plan.steps.len());
        let mut cumulative = 0.0;
        for (index, id) in plan.steps.iter().enumerate() {
            let star = graph.get_by_id(id).ok_or_else(|| Error::UnknownStar {
                id: id.clone(),
                suggestions: graph.fuzzy_star_matches(id, 3),
            })?;
            let distance = match index {
                0 => None,
                _ => hop_distance(graph, &plan.steps[index - 1], id),
            };
            cumulative += distance.unwrap_or_default();
            steps.push(RouteStep {
                index,
                id: id.clone(),
                label: star.label.clone(),
                constellation: graph.get_constellation_for(id).map(|c| c.name.clone()),
                galaxy: star.galaxy.clone(),
                distance,
                cumulative_distance: cumulative,
            });
        }

        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };
        let start = RouteEndpoint {
            id: first.id.clone(),
            label: first.label.clone(),
        };
        let goal = RouteEndpoint {
            id: last.id.clone(),
            label: last.label.clone(),
        };

        Ok(Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            start,
            goal,
            total_distance: plan.total_distance,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.1} units, algorithm: {})",
            self.start.label, self.goal.label, self.hops, self.total_distance, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) [{}]",
                step.index, step.label, step.id, step.galaxy
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} to {}_ ({} hops, {:.1} units, algorithm: `{}`)",
            self.start.label, self.goal.label, self.hops, self.total_distance, self.algorithm
        );
        for step in &self.steps {
            let hop = step
                .distance
                .map(|d| format!(" +{d:.1}"))
                .unwrap_or_default();
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`){hop}, {}",
                step.index,
                step.label,
                step.id,
                step.constellation.as_deref().unwrap_or("<no constellation>")
            );
        }
        buffer
    }
}

/// Render a replayed journey, one line per step.
pub fn render_journey(journey: &Journey, mode: RenderMode) -> String {
    let mut buffer = String::new();
    let outcome = if journey.completed {
        "completed"
    } else {
        "ended early"
    };
    let _ = match mode {
        RenderMode::PlainText => writeln!(
            buffer,
            "Journey {outcome}: {} of {} stars reached",
            journey.stars_reached(),
            journey.steps.len()
        ),
        RenderMode::RichText => writeln!(
            buffer,
            "**Journey {outcome}**: {} of {} stars reached",
            journey.stars_reached(),
            journey.steps.len()
        ),
    };

    for step in &journey.steps {
        let status = &step.status;
        let marker = if step.survived { "" } else { " (died)" };
        let _ = writeln!(
            buffer,
            "{:>3}: {} ({}) energy {:.1} [{}], grass {:.1}, life {:.1}{marker}",
            step.index,
            step.label,
            step.star,
            status.current_energy,
            status.health_state,
            status.grass,
            status.remaining_life
        );
    }

    let last = &journey.final_status;
    let _ = writeln!(
        buffer,
        "Total: {:.1} units travelled, {:.1} kg eaten, {:.1} research time",
        last.total_distance, last.total_food_consumed, last.total_research_time
    );
    buffer
}
