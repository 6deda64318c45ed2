use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geo::GeoNode;

/// Minimum Jaro-Winkler similarity for a node id to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Dense index of a node inside a [`VisibilityGraph`] or [`NetworkBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only node set collected before the visibility relation is computed.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    nodes: Vec<GeoNode>,
    index_by_id: HashMap<String, NodeIndex>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return its index.
    ///
    /// Node ids must be unique and coordinates must pass [`GeoNode::validate`].
    pub fn add_node(&mut self, node: GeoNode) -> Result<NodeIndex> {
        node.validate()?;
        self.add_node_unchecked(node)
    }

    /// Register a node without checking its coordinate ranges.
    ///
    /// Out-of-range latitudes and longitudes are fed straight into the
    /// spherical trigonometry. Ids must still be unique.
    pub fn add_node_unchecked(&mut self, node: GeoNode) -> Result<NodeIndex> {
        if self.index_by_id.contains_key(node.id()) {
            return Err(Error::DuplicateNode {
                id: node.id().to_string(),
            });
        }

        let index = NodeIndex(self.nodes.len());
        self.index_by_id.insert(node.id().to_string(), index);
        self.nodes.push(node);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index_by_id.get(id).copied()
    }

    /// Compute the neighbour relation for every registered node.
    ///
    /// Every ordered pair of distinct nodes is tested once. The builder is
    /// left untouched, so building again over the same node set yields an
    /// identical graph.
    pub fn build(&self) -> VisibilityGraph {
        let mut adjacency: Vec<Vec<NodeIndex>> = vec![Vec::new(); self.nodes.len()];
        let mut edge_count = 0usize;

        for (i, current) in self.nodes.iter().enumerate() {
            for (j, candidate) in self.nodes.iter().enumerate() {
                if i == j || !current.can_see(candidate) {
                    continue;
                }
                trace!(
                    node = current.id(),
                    neighbour = candidate.id(),
                    distance = current.angular_distance(candidate),
                    "added neighbour"
                );
                adjacency[i].push(NodeIndex(j));
                edge_count += 1;
            }
        }

        debug!(
            nodes = self.nodes.len(),
            links = edge_count / 2,
            "visibility graph built"
        );

        VisibilityGraph {
            nodes: Arc::from(self.nodes.clone()),
            index_by_id: Arc::new(self.index_by_id.clone()),
            adjacency: Arc::new(adjacency),
        }
    }
}

/// Immutable node set together with its symmetric visibility relation.
#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    nodes: Arc<[GeoNode]>,
    index_by_id: Arc<HashMap<String, NodeIndex>>,
    adjacency: Arc<Vec<Vec<NodeIndex>>>,
}

impl VisibilityGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the node stored at `index`, if any.
    pub fn node(&self, index: NodeIndex) -> Option<&GeoNode> {
        self.nodes.get(index.0)
    }

    pub fn nodes(&self) -> &[GeoNode] {
        &self.nodes
    }

    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    /// Lookup a node index by its case-sensitive id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index_by_id.get(id).copied()
    }

    /// Node ids similar to `name`, most similar first.
    pub fn fuzzy_node_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let query = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .iter()
            .map(|node| {
                let score = strsim::jaro_winkler(&query, &node.id().to_lowercase());
                (score, node.id())
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    /// Return the visible neighbours of a node, ordered by index.
    pub fn neighbours(&self, index: NodeIndex) -> &[NodeIndex] {
        self.adjacency
            .get(index.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of the visible neighbours of a node.
    pub fn neighbour_ids(&self, index: NodeIndex) -> Vec<&str> {
        self.neighbours(index)
            .iter()
            .filter_map(|neighbour| self.node(*neighbour))
            .map(GeoNode::id)
            .collect()
    }

    pub fn can_see(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.neighbours(a).binary_search(&b).is_ok()
    }

    /// Number of undirected visibility links.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Angular distance between two nodes of the graph, in degrees.
    pub fn distance(&self, a: NodeIndex, b: NodeIndex) -> Option<f64> {
        Some(self.node(a)?.angular_distance(self.node(b)?))
    }

    /// Reopen the node set so more nodes can be added before rebuilding.
    pub fn into_builder(self) -> NetworkBuilder {
        NetworkBuilder {
            nodes: self.nodes.to_vec(),
            index_by_id: (*self.index_by_id).clone(),
        }
    }
}
