//! JSON star document ingestion.
//!
//! A document carries required top-level `constellations` (home galaxy), optional
//! `galaxies[]` with their own constellations, and the traveler's starting
//! parameters. [`Document::build_graph`] validates the records and turns them
//! into a [`StarGraph`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{IngestOptions, TravelerParams};
use crate::error::{Error, Result};
use crate::graph::StarGraph;
use crate::star::{Constellation, Coordinates, Link, Star, DEFAULT_GALAXY};

/// Star identifier as written in the document: either a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct CoordinatesRecord {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkRecord {
    star_id: RawId,
    distance: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StarRecord {
    id: RawId,
    label: String,
    coordinates: CoordinatesRecord,
    radius: f64,
    time_to_eat: f64,
    amount_of_energy: f64,
    #[serde(default)]
    research_effect: f64,
    #[serde(default)]
    hypergiant: bool,
    linked_to: Vec<LinkRecord>,
}

/// Constellation entry of a star document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstellationRecord {
    pub name: String,
    stars: Vec<StarRecord>,
}

/// Named galaxy grouping its own constellations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GalaxyRecord {
    pub name: String,
    #[serde(default)]
    pub constellations: Vec<ConstellationRecord>,
}

/// Parsed star document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub constellations: Vec<ConstellationRecord>,
    #[serde(default)]
    pub galaxies: Vec<GalaxyRecord>,
    #[serde(flatten)]
    traveler: TravelerParams,
}

impl Document {
    /// Starting parameters for the traveler, defaulted where absent.
    pub fn traveler_params(&self) -> TravelerParams {
        self.traveler.clone()
    }

    /// Constellations paired with the galaxy they belong to, in document order:
    /// top-level entries first, then each galaxy's entries.
    fn grouped_constellations(&self) -> impl Iterator<Item = (&str, &ConstellationRecord)> {
        let home = self
            .constellations
            .iter()
            .map(|constellation| (DEFAULT_GALAXY, constellation));
        let galaxies = self.galaxies.iter().flat_map(|galaxy| {
            galaxy
                .constellations
                .iter()
                .map(move |constellation| (galaxy.name.as_str(), constellation))
        });
        home.chain(galaxies)
    }

    /// Validate every record and build the graph.
    pub fn build_graph(&self, options: &IngestOptions) -> Result<StarGraph> {
        self.traveler.validate()?;

        let mut constellations = Vec::new();
        for (galaxy, record) in self.grouped_constellations() {
            let stars = record
                .stars
                .iter()
                .map(|star| convert_star(star, galaxy, options))
                .collect::<Result<Vec<_>>>()?;
            constellations.push(Constellation::with_stars(record.name.clone(), stars));
        }

        if options.mirror_links {
            mirror_links(&mut constellations);
        }

        let mut graph = StarGraph::new();
        for constellation in constellations {
            graph.add_cluster(constellation);
        }

        for star in graph.stars() {
            for link in &star.linked_to {
                if !graph.contains(&link.star_id) {
                    warn!(from = %star.id, to = %link.star_id, "link points to an unknown star and will be skipped");
                }
            }
        }

        debug!(
            stars = graph.len(),
            constellations = graph.constellations().len(),
            "built star graph"
        );
        Ok(graph)
    }
}

fn convert_star(record: &StarRecord, galaxy: &str, options: &IngestOptions) -> Result<Star> {
    let id = record.id.clone().into_string();
    let (x, y) = (record.coordinates.x, record.coordinates.y);

    if !x.is_finite() || !y.is_finite() || options.bounds.is_some_and(|b| !b.contains(x, y)) {
        return Err(Error::CoordinatesOutOfBounds { id, x, y });
    }

    let mut linked_to = Vec::with_capacity(record.linked_to.len());
    for link in &record.linked_to {
        let to = link.star_id.clone().into_string();
        if !link.distance.is_finite() || link.distance < 0.0 {
            return Err(Error::InvalidDistance {
                from: id,
                to,
                distance: link.distance,
            });
        }
        linked_to.push(Link::new(to, link.distance));
    }

    Ok(Star {
        id,
        label: record.label.clone(),
        coordinates: Coordinates::new(x, y),
        radius: record.radius,
        time_to_eat: record.time_to_eat,
        amount_of_energy: record.amount_of_energy,
        research_effect: record.research_effect,
        hypergiant: record.hypergiant,
        galaxy: galaxy.to_string(),
        linked_to,
    })
}

/// Add the reverse of every one-way link. Ids resolve to their first
/// occurrence, matching the graph's collision rule.
fn mirror_links(constellations: &mut [Constellation]) {
    let mut first_occurrence: HashMap<String, (usize, usize)> = HashMap::new();
    for (c, constellation) in constellations.iter().enumerate() {
        for (m, star) in constellation.stars.iter().enumerate() {
            first_occurrence.entry(star.id.clone()).or_insert((c, m));
        }
    }

    let mut reverse = Vec::new();
    for constellation in constellations.iter() {
        for star in &constellation.stars {
            for link in &star.linked_to {
                if let Some(&slot) = first_occurrence.get(&link.star_id) {
                    reverse.push((slot, star.id.clone(), link.distance));
                }
            }
        }
    }

    for ((c, m), from, distance) in reverse {
        let target = &mut constellations[c].stars[m];
        if !target.links_to(&from) {
            debug!(from = %target.id, to = %from, "mirrored one-way link");
            target.linked_to.push(Link::new(from, distance));
        }
    }
}

/// Parse a star document from JSON text.
pub fn parse_document(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a star document from disk.
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::DocumentNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "loading star document");
    let json = fs::read_to_string(path)?;
    parse_document(&json)
}

/// Load a document and build its graph in one step.
pub fn load_graph(path: &Path, options: &IngestOptions) -> Result<StarGraph> {
    load_document(path)?.build_graph(options)
}
