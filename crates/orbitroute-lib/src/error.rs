use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the orbitroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node's coordinates fall outside the supported ranges.
    #[error("invalid coordinates for node {id}: {message}")]
    InvalidCoordinate { id: String, message: String },

    /// Raised when two nodes registered with the same network share an id.
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    /// Raised when a node index does not address a node of the graph.
    #[error("node index {index} is out of range for a graph of {len} nodes")]
    NodeIndexOutOfRange { index: usize, len: usize },

    /// Raised when a node name could not be found in the graph.
    #[error("unknown node name: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when a scenario file does not contain a ROUTE record.
    #[error("scenario {source_name} has no ROUTE record")]
    MissingRoute { source_name: String },

    /// Raised when a scenario file contains more than one ROUTE record.
    #[error("scenario {source_name} has a second ROUTE record on line {line}")]
    DuplicateRoute { source_name: String, line: u64 },

    /// Raised when a scenario record cannot be parsed.
    #[error("malformed scenario record on line {line}: {message}")]
    ScenarioRecord { line: u64, message: String },

    /// Raised when a scenario file could not be opened.
    #[error("failed to open scenario file {path}")]
    ScenarioOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
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
