//! Star and constellation records held by the [`StarGraph`](crate::graph::StarGraph).

use serde::Serialize;

/// Galaxy assigned to stars whose document does not name one.
pub const DEFAULT_GALAXY: &str = "home";

/// Planar position of a star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Directed link stored on its origin star.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub star_id: String,
    pub distance: f64,
}

impl Link {
    pub fn new(star_id: impl Into<String>, distance: f64) -> Self {
        Self {
            star_id: star_id.into(),
            distance,
        }
    }
}

/// A node of the star graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub id: String,
    pub label: String,
    pub coordinates: Coordinates,
    /// Rendering hint only.
    pub radius: f64,
    /// Upper bound on how long the traveler may feed here.
    pub time_to_eat: f64,
    pub amount_of_energy: f64,
    /// Lifespan delta applied when the traveler researches at this star.
    pub research_effect: f64,
    pub hypergiant: bool,
    pub galaxy: String,
    pub linked_to: Vec<Link>,
}

impl Star {
    /// Create a star at the origin of the home galaxy with no links.
    ///
    /// Intended as a starting point for the builder-style setters below.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            coordinates: Coordinates::new(0.0, 0.0),
            radius: 1.0,
            time_to_eat: 0.0,
            amount_of_energy: 0.0,
            research_effect: 0.0,
            hypergiant: false,
            galaxy: DEFAULT_GALAXY.to_string(),
            linked_to: Vec::new(),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Coordinates::new(x, y);
        self
    }

    pub fn time_to_eat(mut self, time_to_eat: f64) -> Self {
        self.time_to_eat = time_to_eat;
        self
    }

    pub fn research_effect(mut self, effect: f64) -> Self {
        self.research_effect = effect;
        self
    }

    pub fn hypergiant(mut self, hypergiant: bool) -> Self {
        self.hypergiant = hypergiant;
        self
    }

    pub fn galaxy(mut self, galaxy: impl Into<String>) -> Self {
        self.galaxy = galaxy.into();
        self
    }

    pub fn link(mut self, star_id: impl Into<String>, distance: f64) -> Self {
        self.linked_to.push(Link::new(star_id, distance));
        self
    }

    /// Whether this star stores a link towards `star_id`.
    pub fn links_to(&self, star_id: &str) -> bool {
        self.linked_to.iter().any(|link| link.star_id == star_id)
    }
}

/// Named grouping of stars. Carries no routing state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constellation {
    pub name: String,
    pub stars: Vec<Star>,
}

impl Constellation {
    pub fn with_stars(name: impl Into<String>, stars: Vec<Star>) -> Self {
        Self {
            name: name.into(),
            stars,
        }
    }
}
