//! Route command handler for computing relay chains between two nodes.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use orbitroute_lib::{
    plan_route, Error as RouteError, GroundStationLabels, HitSelection, RouteRequest,
    RouteSummary,
};

use crate::commands::load_graph;
use orbitroute_cli::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Id of the starting node.
    pub from: String,
    /// Id of the destination node.
    pub to: String,
    /// How the best candidate route is chosen.
    pub selection: HitSelection,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.as_str(), self.to.as_str()).with_selection(self.selection)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    data: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let graph = load_graph(data, &GroundStationLabels::default())?;
    let request = args.to_request();

    let plan = match plan_route(&graph, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(err)),
    };
    info!(
        hops = plan.hop_count(),
        relays = %plan.relay_string(),
        "route found"
    );

    let summary = RouteSummary::from_plan(&graph, &plan)
        .context("failed to build route summary for display")?;
    format.print_route(&summary)
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::RouteNotFound { start, goal } => anyhow::anyhow!(
            "No route found between {start} and {goal}: no chain of visible satellites links them."
        ),
        other => anyhow::Error::new(other),
    }
}
