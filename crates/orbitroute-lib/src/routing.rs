use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{NodeIndex, VisibilityGraph};
use crate::path::{HitSelection, PathSearch};

/// High-level route planning request naming both endpoints by id.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub selection: HitSelection,
}

impl RouteRequest {
    /// Convenience constructor using the default selection policy.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            selection: HitSelection::default(),
        }
    }

    pub fn with_selection(mut self, selection: HitSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub selection: HitSelection,
    pub start: NodeIndex,
    pub goal: NodeIndex,
    /// Every node on the route, endpoints included.
    pub steps: Vec<NodeIndex>,
    /// Ids matching `steps`.
    pub step_ids: Vec<String>,
    /// Cumulative angular length score in degrees, see [`crate::SiblingLength`].
    pub length: f64,
    /// Number of candidate routes that reached the goal.
    pub candidates: usize,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Ids of the relays between the two endpoints.
    pub fn relay_ids(&self) -> &[String] {
        match self.step_ids.len() {
            0..=2 => &[],
            len => &self.step_ids[1..len - 1],
        }
    }

    /// Relay ids joined with commas, or an empty string for a direct link.
    pub fn relay_string(&self) -> String {
        self.relay_ids().join(",")
    }
}

/// Compute a route between two named nodes.
///
/// Unlike the search engine, this treats an unreachable goal as an error
/// because the caller asked for a plan.
pub fn plan_route(graph: &VisibilityGraph, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_node(graph, &request.start)?;
    let goal = resolve_node(graph, &request.goal)?;

    let outcome = PathSearch::new(graph, start, goal)?
        .with_selection(request.selection)
        .run();
    let candidates = outcome.hits.len();

    let Some(route) = outcome.into_best() else {
        return Err(Error::RouteNotFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        });
    };

    let step_ids = route
        .nodes
        .iter()
        .filter_map(|index| graph.node(*index))
        .map(|node| node.id().to_string())
        .collect();

    debug!(
        start = %request.start,
        goal = %request.goal,
        hops = route.hops,
        candidates,
        "route planned"
    );

    Ok(RoutePlan {
        selection: request.selection,
        start,
        goal,
        steps: route.nodes,
        step_ids,
        length: route.length,
        candidates,
    })
}

/// Resolve a node id to its index, returning an error for unknown ids.
fn resolve_node(graph: &VisibilityGraph, name: &str) -> Result<NodeIndex> {
    graph.index_of(name).ok_or_else(|| {
        let suggestions = graph.fuzzy_node_matches(name, 3);
        Error::UnknownNode {
            name: name.to_string(),
            suggestions,
        }
    })
}
