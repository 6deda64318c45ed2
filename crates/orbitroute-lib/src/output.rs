use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::VisibilityGraph;
use crate::path::HitSelection;
use crate::routing::RoutePlan;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header line plus one line per hop with coordinates.
    PlainText,
    /// `+`/`|`/`-` prefixed node ids only.
    Basic,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Node visited by a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Angular distance from the previous step; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Structured representation of a planned route that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub selection: HitSelection,
    pub hops: usize,
    pub length: f64,
    pub candidates: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub relays: Vec<String>,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved node details.
    pub fn from_plan(graph: &VisibilityGraph, plan: &RoutePlan) -> Result<Self> {
        let mut steps = Vec::with_capacity(plan.steps.len());
        let mut previous = None;
        for (index, node_index) in plan.steps.iter().enumerate() {
            let Some(node) = graph.node(*node_index) else {
                continue;
            };
            steps.push(RouteStep {
                index,
                id: node.id().to_string(),
                latitude: node.latitude(),
                longitude: node.longitude(),
                altitude: node.altitude(),
                distance: previous.map(|prev| graph.distance(prev, *node_index).unwrap_or(0.0)),
            });
            previous = Some(*node_index);
        }

        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };
        let endpoint = |step: &RouteStep| RouteEndpoint {
            id: step.id.clone(),
            latitude: step.latitude,
            longitude: step.longitude,
        };
        let start = endpoint(first);
        let goal = endpoint(last);

        Ok(Self {
            selection: plan.selection,
            hops: plan.hop_count(),
            length: plan.length,
            candidates: plan.candidates,
            start,
            goal,
            relays: plan.relay_ids().to_vec(),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Basic => self.render_basic(),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.2}° total, selection: {})",
            self.start.id, self.goal.id, self.hops, self.length, self.selection
        );
        for step in &self.steps {
            let _ = write!(
                buffer,
                "{:>3}: {} lat {:.4} long {:.4} alt {:.1}",
                step.index, step.id, step.latitude, step.longitude, step.altitude
            );
            if let Some(distance) = step.distance {
                let _ = write!(buffer, " (+{:.2}°)", distance);
            }
            buffer.push('\n');
        }
        let relays = if self.relays.is_empty() {
            "(direct)".to_string()
        } else {
            self.relays.join(",")
        };
        let _ = writeln!(buffer, "Relays: {relays}");
        buffer
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        let len = self.steps.len();
        for (i, step) in self.steps.iter().enumerate() {
            let prefix = if i == 0 {
                '+'
            } else if i + 1 == len {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(buffer, "{} {}", prefix, step.id);
        }
        let _ = writeln!(buffer, "via {} hops", self.hops);
        buffer
    }
}

/// One line of the neighbour listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighbourEntry {
    pub id: String,
    pub coverage: f64,
    pub neighbours: Vec<String>,
}

impl NeighbourEntry {
    /// `"<id>: <n> neighbours:<a>:<b>"`.
    pub fn render(&self) -> String {
        let mut line = format!("{}: {} neighbours", self.id, self.neighbours.len());
        for neighbour in &self.neighbours {
            line.push(':');
            line.push_str(neighbour);
        }
        line
    }
}

/// Visibility relation of a whole graph, one entry per node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighbourReport {
    pub nodes: usize,
    pub links: usize,
    pub entries: Vec<NeighbourEntry>,
}

impl NeighbourReport {
    pub fn from_graph(graph: &VisibilityGraph) -> Self {
        let entries = graph
            .indices()
            .filter_map(|index| {
                let node = graph.node(index)?;
                Some(NeighbourEntry {
                    id: node.id().to_string(),
                    coverage: node.coverage(),
                    neighbours: graph
                        .neighbour_ids(index)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                })
            })
            .collect();

        Self {
            nodes: graph.len(),
            links: graph.edge_count(),
            entries,
        }
    }

    pub fn render(&self) -> String {
        let mut buffer = String::new();
        for entry in &self.entries {
            let _ = writeln!(buffer, "{}", entry.render());
        }
        let _ = writeln!(buffer, "{} nodes, {} links", self.nodes, self.links);
        buffer
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
