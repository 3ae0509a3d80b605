use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeInfo, NodeKey};

/// A single step in a shortest path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub key: NodeKey,
    pub label: String,
}

/// A reconstructed path from start to goal, both endpoints included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    pub steps: Vec<PathStep>,
    /// Number of edges on the path (`steps.len() - 1`).
    pub cost: u32,
}

/// Outcome of a search. An unreachable goal is `NotFound`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResult {
    Found(PathResult),
    NotFound,
}

impl SearchResult {
    pub fn path(&self) -> Option<&PathResult> {
        match self {
            SearchResult::Found(p) => Some(p),
            SearchResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

/// Tuning knobs for `search_with`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Stop after expanding this many nodes. `None` = run until the goal is
    /// dequeued or the frontier is exhausted.
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes dequeued and expanded.
    pub nodes_expanded: usize,
    /// Nodes that ever entered the frontier, start included.
    pub nodes_discovered: usize,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub stats: SearchStats,
}

/// One node's position in the shortest-path tree. `parent` is an index into
/// the owning `PathTree`; `None` marks the root (the start node).
#[derive(Debug)]
struct PathTreeNode<'g> {
    key: NodeKey,
    label: &'g str,
    parent: Option<usize>,
}

/// Arena of parent pointers, keyed by node. Parent links only point toward
/// the root, so the tree is acyclic by construction.
struct PathTree<'g> {
    entries: Vec<PathTreeNode<'g>>,
    by_key: HashMap<NodeKey, usize>,
}

impl<'g> PathTree<'g> {
    fn rooted_at(root: &'g NodeInfo) -> Self {
        let mut tree = Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
        };
        tree.insert(root, None);
        tree
    }

    fn insert(&mut self, node: &'g NodeInfo, parent: Option<usize>) {
        self.by_key.insert(node.key, self.entries.len());
        self.entries.push(PathTreeNode {
            key: node.key,
            label: &node.label,
            parent,
        });
    }

    /// Record `node` as reached from `via`. Returns false if it was already
    /// discovered; the first parent always wins.
    fn discover(&mut self, node: &'g NodeInfo, via: NodeKey) -> bool {
        if self.by_key.contains_key(&node.key) {
            return false;
        }
        let parent = self.by_key.get(&via).copied();
        self.insert(node, parent);
        true
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Walk parent pointers from `key` back to the root.
    fn path_to(&self, key: NodeKey) -> Option<PathResult> {
        let mut slot = *self.by_key.get(&key)?;
        let mut steps = Vec::new();
        let mut cost = 0u32;

        loop {
            let entry = &self.entries[slot];
            steps.push(PathStep {
                key: entry.key,
                label: entry.label.to_string(),
            });
            match entry.parent {
                Some(parent) => {
                    cost += 1;
                    slot = parent;
                }
                None => break,
            }
        }

        steps.reverse();
        Some(PathResult { steps, cost })
    }
}

/// Shortest (fewest edges) path from `start` to `goal` using BFS.
///
/// Fails only if `start` is not in the graph. A goal that cannot be reached,
/// including one that is not in the graph at all, yields
/// `SearchResult::NotFound`.
pub fn search(graph: &Graph, start: NodeKey, goal: NodeKey) -> GraphResult<SearchResult> {
    search_with(graph, start, goal, &SearchOptions::default()).map(|o| o.result)
}

/// BFS shortest path with options and traversal statistics.
///
/// The goal is detected when it is dequeued, not when it is discovered.
/// Neighbors are examined in declared order, so among equally short paths the
/// one through the earliest-declared neighbor wins.
///
/// If `max_expansions` stops the search before the goal was discovered, this
/// fails with `ExpansionLimit`. A goal discovered before the cap is still
/// returned; its parent was fixed at discovery, so the path is shortest.
pub fn search_with(
    graph: &Graph,
    start: NodeKey,
    goal: NodeKey,
    options: &SearchOptions,
) -> GraphResult<SearchOutcome> {
    let start_node = graph.node(start)?;

    let mut visited: HashSet<NodeKey> = HashSet::new();
    let mut discovered = PathTree::rooted_at(start_node);
    let mut frontier: VecDeque<&NodeInfo> = VecDeque::new();
    frontier.push_back(start_node);

    let mut stopped_at: Option<usize> = None;

    while let Some(current) = frontier.pop_front() {
        if current.key == goal {
            break;
        }

        if let Some(limit) = options.max_expansions {
            if visited.len() >= limit {
                stopped_at = Some(limit);
                break;
            }
        }

        if !visited.insert(current.key) {
            continue;
        }

        for neighbor in graph.neighbors(current.key) {
            if discovered.discover(neighbor, current.key) {
                frontier.push_back(neighbor);
            }
        }
    }

    let stats = SearchStats {
        nodes_expanded: visited.len(),
        nodes_discovered: discovered.len(),
    };

    let result = match (discovered.path_to(goal), stopped_at) {
        (Some(path), _) => SearchResult::Found(path),
        (None, Some(limit)) => {
            warn!(start, goal, limit, "search stopped at expansion cap");
            return Err(GraphError::ExpansionLimit { limit });
        }
        (None, None) => SearchResult::NotFound,
    };

    debug!(
        start,
        goal,
        found = result.is_found(),
        cost = result.path().map(|p| p.cost),
        expanded = stats.nodes_expanded,
        discovered = stats.nodes_discovered,
        "BFS complete"
    );

    Ok(SearchOutcome { result, stats })
}
