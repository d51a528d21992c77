use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Starwander library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Star document could not be found at the given path.
    #[error("star document not found at {path}")]
    DocumentNotFound { path: PathBuf },

    /// Raised when the star document is malformed or misses a required field.
    #[error("malformed star document: {0}")]
    Ingestion(#[from] serde_json::Error),

    /// Raised when a link carries a negative or non-finite distance.
    #[error("invalid distance {distance} on link {from} -> {to}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    /// Raised when a star lies outside the configured world bounds.
    #[error("star {id} at ({x}, {y}) lies outside the world bounds")]
    CoordinatesOutOfBounds { id: String, x: f64, y: f64 },

    /// Raised when simulation or ingestion settings fail validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when a star id could not be found in the graph.
    #[error("unknown star id: {id}{}", format_suggestions(.suggestions))]
    UnknownStar { id: String, suggestions: Vec<String> },

    /// Raised when a destination search is requested without a goal.
    #[error("algorithm {algorithm} requires a destination star")]
    MissingGoal { algorithm: String },

    /// Raised when no route could be found between two stars.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any stars.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
