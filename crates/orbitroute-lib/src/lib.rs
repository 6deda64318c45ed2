//! orbitroute library entry points.
//!
//! This crate models satellites and ground stations as points on a sphere,
//! derives a visibility graph from their horizon coverage, and searches that
//! graph for the relay chain with the fewest hops between two ground stations.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod scenario;

pub use error::{Error, Result};
pub use geo::{coverage_angle, GeoNode, SurfacePoint, EARTH_RADIUS_KM};
pub use graph::{NetworkBuilder, NodeIndex, VisibilityGraph};
pub use output::{NeighbourEntry, NeighbourReport, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{
    find_route, HitSelection, PathSearch, Route, SearchOutcome, SearchSpace, SearchStats,
    SiblingLength,
};
pub use routing::{plan_route, RoutePlan, RouteRequest};
pub use scenario::{Endpoint, GroundStationLabels, Scenario, ScenarioNetwork};
