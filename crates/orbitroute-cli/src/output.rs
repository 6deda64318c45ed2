//! Output formatting for route and neighbour reports.

use std::io::{self, Write};

use clap::ValueEnum;
use orbitroute_lib::{NeighbourReport, RouteRenderMode, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Header plus one line per hop with coordinates.
    #[default]
    Text,
    /// Node ids only, marked `+`, `|` and `-`.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Render a route summary as the text this format prints.
    pub fn format_route(self, summary: &RouteSummary) -> orbitroute_lib::Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Basic => Ok(summary.render(RouteRenderMode::Basic)),
            OutputFormat::Json => summary.to_json().map(with_newline),
        }
    }

    /// Render a neighbour report. `basic` prints the same listing as `text`.
    pub fn format_neighbours(self, report: &NeighbourReport) -> orbitroute_lib::Result<String> {
        match self {
            OutputFormat::Text | OutputFormat::Basic => Ok(report.render()),
            OutputFormat::Json => report.to_json().map(with_newline),
        }
    }

    pub fn print_route(self, summary: &RouteSummary) -> anyhow::Result<()> {
        let rendered = self.format_route(summary)?;
        write_stdout(&rendered)?;
        Ok(())
    }

    pub fn print_neighbours(self, report: &NeighbourReport) -> anyhow::Result<()> {
        let rendered = self.format_neighbours(report)?;
        write_stdout(&rendered)?;
        Ok(())
    }
}

fn with_newline(mut text: String) -> String {
    text.push('\n');
    text
}

fn write_stdout(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
