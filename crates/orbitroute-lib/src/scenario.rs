//! Scenario file loading.
//!
//! A scenario lists relay satellites and one pair of ground endpoints:
//!
//! ```text
//! #SEED: 0.8523606394231319
//! SAT0,-34.99937012357928,-87.68599680426102,339.97580043812555
//! SAT1,59.31834101784047,-15.127591006458452,486.3412845567054
//! ROUTE,-60.95303432744017,164.61183061785722,75.79911917101574,14.931094221839318
//! ```
//!
//! `SAT*` records carry `id, latitude, longitude, altitude`; the single
//! `ROUTE` record carries the latitude/longitude of both endpoints, which are
//! placed on the surface.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::GeoNode;
use crate::graph::{NetworkBuilder, NodeIndex};

const SEED_PREFIX: &str = "#SEED:";

/// Ids given to the two ground endpoints when a scenario becomes a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundStationLabels {
    pub start: String,
    pub end: String,
}

impl Default for GroundStationLabels {
    fn default() -> Self {
        Self {
            start: "A".to_string(),
            end: "B".to_string(),
        }
    }
}

/// Surface location of a route endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Endpoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parsed scenario file.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub seed: Option<f64>,
    pub satellites: Vec<GeoNode>,
    pub origin: Endpoint,
    pub destination: Endpoint,
}

/// Network assembled from a scenario, with the resolved endpoint indices.
#[derive(Debug, Clone)]
pub struct ScenarioNetwork {
    pub builder: NetworkBuilder,
    pub start: NodeIndex,
    pub end: NodeIndex,
}

impl Scenario {
    /// Load a scenario from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::ScenarioOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_reader(file, &path.display().to_string())?;
        debug!(
            path = %path.display(),
            satellites = scenario.satellites.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    /// Load a scenario from a reader; `source_name` is used in error messages.
    pub fn from_reader<R: Read>(mut reader: R, source_name: &str) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let seed = text
            .lines()
            .filter_map(|line| line.trim().strip_prefix(SEED_PREFIX))
            .find_map(|value| value.trim().parse::<f64>().ok());

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut satellites = Vec::new();
        let mut route: Option<(Endpoint, Endpoint)> = None;

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            let Some(kind) = record.get(0) else {
                continue;
            };

            if kind.starts_with("SAT") {
                let [latitude, longitude, altitude] = parse_numbers::<3>(&record, line)?;
                satellites.push(GeoNode::new(kind, latitude, longitude, altitude));
            } else if kind.starts_with("ROUTE") {
                if route.is_some() {
                    return Err(Error::DuplicateRoute {
                        source_name: source_name.to_string(),
                        line,
                    });
                }
                let [lat_a, long_a, lat_b, long_b] = parse_numbers::<4>(&record, line)?;
                route = Some((
                    Endpoint {
                        latitude: lat_a,
                        longitude: long_a,
                    },
                    Endpoint {
                        latitude: lat_b,
                        longitude: long_b,
                    },
                ));
            } else if !kind.is_empty() {
                warn!(line, kind, "skipping unrecognised scenario record");
            }
        }

        let Some((origin, destination)) = route else {
            return Err(Error::MissingRoute {
                source_name: source_name.to_string(),
            });
        };

        Ok(Self {
            seed,
            satellites,
            origin,
            destination,
        })
    }

    /// Register every satellite followed by both ground endpoints.
    pub fn network(&self, labels: &GroundStationLabels) -> Result<ScenarioNetwork> {
        let mut builder = NetworkBuilder::new();
        for satellite in &self.satellites {
            builder.add_node(satellite.clone())?;
        }
        let start = builder.add_node(GeoNode::ground_station(
            labels.start.as_str(),
            self.origin.latitude,
            self.origin.longitude,
        ))?;
        let end = builder.add_node(GeoNode::ground_station(
            labels.end.as_str(),
            self.destination.latitude,
            self.destination.longitude,
        ))?;

        Ok(ScenarioNetwork {
            builder,
            start,
            end,
        })
    }
}

fn parse_numbers<const N: usize>(record: &StringRecord, line: u64) -> Result<[f64; N]> {
    let fields = record.len().saturating_sub(1);
    if fields != N {
        return Err(Error::ScenarioRecord {
            line,
            message: format!(
                "{} expects {} values, found {}",
                record.get(0).unwrap_or_default(),
                N,
                fields
            ),
        });
    }

    let mut values = [0.0; N];
    for (slot, raw) in values.iter_mut().zip(record.iter().skip(1)) {
        *slot = raw.parse::<f64>().map_err(|err| Error::ScenarioRecord {
            line,
            message: format!("invalid number '{raw}': {err}"),
        })?;
    }
    Ok(values)
}
