//! Map loading: JSON map file → `Graph`.
//!
//! The map is a single JSON object keyed by string-encoded integers:
//!
//! ```json
//! {
//!     "1": { "name": "Arad", "neighbors": [2, 3] },
//!     "2": { "name": "Zerind", "neighbors": [1] }
//! }
//! ```
//!
//! Entry order in the file is kept, so `Graph::nodes()` lists nodes in the
//! order they were written.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, GraphBuilder, NodeKey, NodeRecord};

/// Raw shape of one map entry. Both fields are optional here so that a
/// missing field is reported with the entry's key instead of a serde position.
#[derive(Debug, Deserialize)]
struct MapEntry {
    name: Option<String>,
    neighbors: Option<Vec<NodeKey>>,
}

/// Parse a JSON map document and build the graph.
pub fn parse_map(json: &str) -> GraphResult<Graph> {
    let root: Value = serde_json::from_str(json)?;
    let entries = root
        .as_object()
        .ok_or_else(|| GraphError::validation("<root>", "map must be a JSON object"))?;

    let mut builder = GraphBuilder::with_capacity(entries.len());
    for (raw_key, value) in entries {
        let record = parse_entry(raw_key, value)?;
        builder.add_node(record.key, record.label, record.neighbors);
    }

    let graph = builder.build()?;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "map parsed"
    );
    Ok(graph)
}

/// Read and parse a map file.
pub fn load_map_file(path: impl AsRef<Path>) -> GraphResult<Graph> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_map(&json)?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "map loaded"
    );
    Ok(graph)
}

fn parse_entry(raw_key: &str, value: &Value) -> GraphResult<NodeRecord> {
    let key: NodeKey = raw_key
        .trim()
        .parse()
        .map_err(|_| GraphError::validation(raw_key, "key is not an integer"))?;

    if !value.is_object() {
        return Err(GraphError::validation(raw_key, "entry must be an object"));
    }
    let entry = MapEntry::deserialize(value)
        .map_err(|e| GraphError::validation(raw_key, e.to_string()))?;

    let label = entry
        .name
        .ok_or_else(|| GraphError::validation(raw_key, "missing 'name'"))?;
    let neighbors = entry
        .neighbors
        .ok_or_else(|| GraphError::validation(raw_key, "missing 'neighbors'"))?;

    Ok(NodeRecord {
        key,
        label,
        neighbors,
    })
}
