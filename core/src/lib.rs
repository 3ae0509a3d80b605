//! mapsearch-core: In-memory map graph and breadth-first shortest path.
//!
//! A pure Rust library that builds an immutable graph from keyed node
//! records (or a JSON map file) and answers fewest-hops path queries
//! between two nodes. Rendering and process setup live in the CLI crate.

mod error;
mod graph;
mod load;
mod traversal;

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphBuilder, NodeInfo, NodeKey, NodeRecord};
pub use load::{load_map_file, parse_map};
pub use traversal::{
    search, search_with, PathResult, PathStep, SearchOptions, SearchOutcome, SearchResult,
    SearchStats,
};
