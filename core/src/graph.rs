use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};

/// Node identity as declared in the map (the string-encoded integer key).
pub type NodeKey = i64;

/// Metadata about a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub key: NodeKey,
    pub label: String,
}

/// One builder input: a node and the keys of its neighbors, in declared order.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub key: NodeKey,
    pub label: String,
    pub neighbors: Vec<NodeKey>,
}

/// Immutable in-memory graph: node metadata + adjacency lists.
///
/// Nodes are kept in declaration order. `adjacency[i]` holds the resolved
/// neighbors of `nodes[i]` as slots into `nodes`, in the order they were
/// declared. Every neighbor is guaranteed to exist; `GraphBuilder::build`
/// refuses dangling references.
#[derive(Debug)]
pub struct Graph {
    nodes: Vec<NodeInfo>,
    adjacency: Vec<Vec<usize>>,
    index: HashMap<NodeKey, usize>,
}

impl Graph {
    /// Build directly from records. Equivalent to feeding a `GraphBuilder`.
    pub fn from_records<I>(records: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = NodeRecord>,
    {
        let mut builder = GraphBuilder::new();
        for r in records {
            builder.add_node(r.key, r.label, r.neighbors);
        }
        builder.build()
    }

    /// Look up a node, failing with `NotFound` if the key was never declared.
    pub fn node(&self, key: NodeKey) -> GraphResult<&NodeInfo> {
        self.get(key).ok_or(GraphError::NotFound(key))
    }

    pub fn get(&self, key: NodeKey) -> Option<&NodeInfo> {
        self.index.get(&key).map(|&slot| &self.nodes[slot])
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Neighbors of `key` in declared order. Empty for unknown keys.
    pub fn neighbors(&self, key: NodeKey) -> impl Iterator<Item = &NodeInfo> {
        let slots: &[usize] = self
            .index
            .get(&key)
            .map(|&slot| self.adjacency[slot].as_slice())
            .unwrap_or(&[]);
        slots.iter().map(move |&s| &self.nodes[s])
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|v| v.len()).sum()
    }
}

/// Collects node records and resolves them into a `Graph` in one step.
///
/// Nothing is validated until `build`, so records may be added in any order
/// and may reference nodes that are added later.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    records: Vec<NodeRecord>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            records: Vec::with_capacity(node_count),
        }
    }

    pub fn add_node(
        &mut self,
        key: NodeKey,
        label: impl Into<String>,
        neighbors: Vec<NodeKey>,
    ) -> &mut Self {
        self.records.push(NodeRecord {
            key,
            label: label.into(),
            neighbors,
        });
        self
    }

    /// Resolve every neighbor key and freeze the graph.
    ///
    /// Fails on the first duplicate key (`Validation`) or dangling neighbor
    /// (`Reference`). No partial graph is returned.
    pub fn build(self) -> GraphResult<Graph> {
        let mut index = HashMap::with_capacity(self.records.len());
        for (slot, r) in self.records.iter().enumerate() {
            if index.insert(r.key, slot).is_some() {
                return Err(GraphError::validation(
                    r.key.to_string(),
                    "key is declared more than once",
                ));
            }
        }

        let mut nodes = Vec::with_capacity(self.records.len());
        let mut adjacency = Vec::with_capacity(self.records.len());
        for r in self.records {
            let resolved = r
                .neighbors
                .iter()
                .map(|n| {
                    index.get(n).copied().ok_or(GraphError::Reference {
                        key: r.key,
                        neighbor: *n,
                    })
                })
                .collect::<GraphResult<Vec<usize>>>()?;
            adjacency.push(resolved);
            nodes.push(NodeInfo {
                key: r.key,
                label: r.label,
            });
        }

        Ok(Graph {
            nodes,
            adjacency,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_node(1, "A", vec![2, 3])
            .add_node(2, "B", vec![3])
            .add_node(3, "C", vec![1]);
        b.build().unwrap()
    }

    #[test]
    fn test_lookup_by_key() {
        let g = triangle();
        assert_eq!(g.node(2).unwrap().label, "B");
        assert!(g.contains(3));
        assert!(g.get(4).is_none());
    }

    #[test]
    fn test_missing_node_is_not_found() {
        let g = triangle();
        assert!(matches!(g.node(42), Err(GraphError::NotFound(42))));
    }

    #[test]
    fn test_neighbors_keep_declared_order() {
        let g = triangle();
        let keys: Vec<NodeKey> = g.neighbors(1).map(|n| n.key).collect();
        assert_eq!(keys, vec![2, 3]);
        assert_eq!(g.neighbors(99).count(), 0);
    }

    #[test]
    fn test_nodes_in_declaration_order() {
        let mut b = GraphBuilder::new();
        b.add_node(30, "Z", vec![]).add_node(10, "X", vec![30]);
        let g = b.build().unwrap();
        let keys: Vec<NodeKey> = g.nodes().map(|n| n.key).collect();
        assert_eq!(keys, vec![30, 10]);
    }

    #[test]
    fn test_forward_reference_resolves() {
        let mut b = GraphBuilder::new();
        b.add_node(1, "A", vec![2]).add_node(2, "B", vec![]);
        let g = b.build().unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_dangling_neighbor_rejected() {
        let mut b = GraphBuilder::new();
        b.add_node(1, "A", vec![2, 7]).add_node(2, "B", vec![]);
        match b.build() {
            Err(GraphError::Reference { key, neighbor }) => {
                assert_eq!(key, 1);
                assert_eq!(neighbor, 7);
            }
            other => panic!("expected Reference error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut b = GraphBuilder::new();
        b.add_node(1, "A", vec![]).add_node(1, "A again", vec![]);
        assert!(matches!(b.build(), Err(GraphError::Validation { .. })));
    }

    #[test]
    fn test_self_loop_and_isolated_node() {
        let g = Graph::from_records(vec![
            NodeRecord {
                key: 1,
                label: "Loop".into(),
                neighbors: vec![1],
            },
            NodeRecord {
                key: 2,
                label: "Alone".into(),
                neighbors: vec![],
            },
        ])
        .unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(2).count(), 0);
    }

    #[test]
    fn test_graph_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Graph>();
    }
}
