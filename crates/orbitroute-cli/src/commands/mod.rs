// Subcommand handlers. main.rs parses arguments and dispatches here.

pub mod neighbours;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use orbitroute_lib::{GroundStationLabels, Scenario, VisibilityGraph};

/// Load a scenario file and build its visibility graph.
pub fn load_graph(path: &Path, labels: &GroundStationLabels) -> Result<VisibilityGraph> {
    let scenario = Scenario::from_path(path)
        .with_context(|| format!("failed to load scenario from {}", path.display()))?;
    let network = scenario
        .network(labels)
        .with_context(|| format!("invalid node in scenario {}", path.display()))?;

    let graph = network.builder.build();
    debug!(
        nodes = graph.len(),
        links = graph.edge_count(),
        seed = ?scenario.seed,
        "scenario graph ready"
    );
    Ok(graph)
}
