//! Neighbours command handler listing the visibility relation.

use std::path::Path;

use anyhow::Result;

use orbitroute_lib::{GroundStationLabels, NeighbourReport};

use crate::commands::load_graph;
use orbitroute_cli::output::OutputFormat;

pub fn handle_neighbours_command(data: &Path, format: OutputFormat) -> Result<()> {
    let graph = load_graph(data, &GroundStationLabels::default())?;
    let report = NeighbourReport::from_graph(&graph);
    format.print_neighbours(&report)
}
