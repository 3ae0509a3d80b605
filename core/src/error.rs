use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeKey;

/// Errors raised while building a graph or starting a search.
///
/// An unreachable goal is not an error: see `SearchResult::NotFound`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A map entry is missing a field or has one of the wrong shape.
    #[error("invalid entry '{key}': {reason}")]
    Validation { key: String, reason: String },

    /// A neighbor list names a key that has no entry of its own.
    #[error("node {key} lists neighbor {neighbor}, which is not in the map")]
    Reference { key: NodeKey, neighbor: NodeKey },

    #[error("node {0} not found")]
    NotFound(NodeKey),

    /// The search stopped at its expansion cap before discovering the goal.
    #[error("search gave up after expanding {limit} nodes")]
    ExpansionLimit { limit: usize },

    #[error("malformed map: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    pub(crate) fn validation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        GraphError::Validation {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
