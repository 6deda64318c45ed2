//! Common test utilities and fixture helpers.
//!
//! The relay scenarios below describe real city pairs with hand-placed
//! satellites; each helper returns the built graph and the endpoint indices.
//! Nodes are registered without range checks because the polar relay sits
//! just past the pole.

use std::path::PathBuf;

use orbitroute_lib::{GeoNode, NetworkBuilder, NodeIndex, VisibilityGraph};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Graph plus the two ground endpoints of a relay scenario.
#[allow(dead_code)]
pub struct RelayScenario {
    pub graph: VisibilityGraph,
    pub start: NodeIndex,
    pub end: NodeIndex,
}

#[allow(dead_code)]
pub fn helsinki() -> GeoNode {
    GeoNode::ground_station("Helsinki", 60.192059, 24.945831)
}

#[allow(dead_code)]
pub fn tokyo() -> GeoNode {
    GeoNode::ground_station("Tokyo", 35.652832, 139.6917)
}

#[allow(dead_code)]
fn assemble(start: GeoNode, end: GeoNode, relays: Vec<GeoNode>) -> RelayScenario {
    let mut builder = NetworkBuilder::new();
    let start = builder.add_node_unchecked(start).expect("unique start");
    let end = builder.add_node_unchecked(end).expect("unique end");
    for relay in relays {
        builder.add_node_unchecked(relay).expect("unique relay");
    }
    RelayScenario {
        graph: builder.build(),
        start,
        end,
    }
}

#[allow(dead_code)]
fn pacific_relays() -> Vec<GeoNode> {
    vec![
        GeoNode::new("SAT1", 0.123, 130.123, 700.0),
        GeoNode::new("SAT2", 90.314, 60.123, 400.0),
        GeoNode::new("SAT3", 70.123, 30.123, 400.0),
        GeoNode::new("SAT4", 60.123, -175.123, 400.0),
        GeoNode::new("SAT5", 30.123, 175.123, 400.0),
        GeoNode::new("SAT6", -10.123, 160.323, 700.0),
        GeoNode::new("SAT7", 10.0, 140.323, 700.0),
    ]
}

/// Helsinki to London across five satellites at 700 km.
#[allow(dead_code)]
pub fn helsinki_london() -> RelayScenario {
    assemble(
        helsinki(),
        GeoNode::ground_station("London", 51.50853, -0.12574),
        vec![
            GeoNode::new("Sat 2", 54.3002, 25.998, 700.0),
            GeoNode::new("Sat 3", 15.0, 24.0, 700.0),
            GeoNode::new("Sat 4", 0.0, 0.0, 700.0),
            GeoNode::new("Sat 5", -10.0, 15.0, 700.0),
            GeoNode::new("Sat 6", 35.0, -10.0, 700.0),
        ],
    )
}

/// Helsinki to Tokyo with a single satellite that neither endpoint can reach.
#[allow(dead_code)]
pub fn helsinki_tokyo_isolated() -> RelayScenario {
    assemble(
        helsinki(),
        tokyo(),
        vec![GeoNode::new("SAT1", 50.123, 130.123, 700.0)],
    )
}

/// Helsinki to Tokyo over the pole and across the Pacific.
#[allow(dead_code)]
pub fn helsinki_tokyo() -> RelayScenario {
    assemble(helsinki(), tokyo(), pacific_relays())
}

/// Helsinki to New York the long way round.
#[allow(dead_code)]
pub fn helsinki_new_york() -> RelayScenario {
    let mut relays = pacific_relays();
    relays.extend([
        GeoNode::new("SAT8", -10.0, -177.323, 700.0),
        GeoNode::new("SAT9", -24.3, -140.323, 700.0),
        GeoNode::new("SAT10", -1.13, -95.323, 700.0),
        GeoNode::new("SAT11", 20.2312, -75.323, 700.0),
    ]);
    assemble(
        helsinki(),
        GeoNode::ground_station("New York", 40.7128, -74.0059),
        relays,
    )
}
