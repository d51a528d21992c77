//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use starwander_lib::{load_document, Document, IngestOptions, StarGraph, Traveler};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the checked-in star document.
pub fn fixture_path() -> PathBuf {
    fixtures_dir().join("constellations.json")
}

pub fn fixture_document() -> Document {
    load_document(&fixture_path()).expect("fixture document loads")
}

/// Fixture graph built with default ingestion options.
#[allow(dead_code)]
pub fn fixture_graph() -> StarGraph {
    fixture_document()
        .build_graph(&IngestOptions::default())
        .expect("fixture graph builds")
}

/// Traveler configured from the fixture's top-level parameters.
#[allow(dead_code)]
pub fn fixture_traveler() -> Traveler {
    Traveler::new(&fixture_document().traveler_params())
}

#[allow(dead_code)]
pub fn ids(route: &[&str]) -> Vec<String> {
    route.iter().map(|id| id.to_string()).collect()
}
