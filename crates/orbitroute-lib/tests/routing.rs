mod common;

use orbitroute_lib::{
    find_route, plan_route, Error, HitSelection, PathSearch, RouteRequest, RouteSummary,
    SiblingLength,
};

use common::{helsinki_london, helsinki_new_york, helsinki_tokyo, helsinki_tokyo_isolated};

#[test]
fn helsinki_to_london_takes_two_hops() {
    let scenario = helsinki_london();
    let route = find_route(&scenario.graph, scenario.start, scenario.end)
        .expect("valid indices")
        .expect("route exists");

    assert_eq!(route.hops, 2);
    assert_eq!(route.nodes.first(), Some(&scenario.start));
    assert_eq!(route.nodes.last(), Some(&scenario.end));
    assert!((route.length - 21.825).abs() < 1e-2);
}

#[test]
fn isolated_satellite_leaves_tokyo_unreachable() {
    let scenario = helsinki_tokyo_isolated();
    let outcome = PathSearch::new(&scenario.graph, scenario.start, scenario.end)
        .expect("valid indices")
        .run();

    assert!(!outcome.found());
    assert!(outcome.hits.is_empty());
    assert!(outcome.best().is_none());
    assert_eq!(outcome.best_hops(), 0);
}

#[test]
fn helsinki_to_tokyo_crosses_the_pole() {
    let scenario = helsinki_tokyo();
    let outcome = PathSearch::new(&scenario.graph, scenario.start, scenario.end)
        .expect("valid indices")
        .run();
    let best = outcome.best().expect("route exists");

    assert_eq!(best.hops, 6);
    let ids: Vec<&str> = best
        .nodes
        .iter()
        .filter_map(|index| scenario.graph.node(*index))
        .map(|node| node.id())
        .collect();
    assert_eq!(
        ids,
        vec!["Helsinki", "SAT3", "SAT2", "SAT4", "SAT5", "SAT7", "Tokyo"]
    );
}

#[test]
fn helsinki_to_new_york_takes_nine_hops() {
    let scenario = helsinki_new_york();
    let outcome = PathSearch::new(&scenario.graph, scenario.start, scenario.end)
        .expect("valid indices")
        .run();

    assert_eq!(outcome.best_hops(), 9);
    assert_eq!(outcome.hits.len(), 3);
    assert!(outcome.stats.cursors_spawned > 0);
}

#[test]
fn every_hit_is_a_simple_path_along_visible_links() {
    let scenario = helsinki_new_york();
    let graph = &scenario.graph;
    let outcome = PathSearch::new(graph, scenario.start, scenario.end)
        .expect("valid indices")
        .run();

    for hit in &outcome.hits {
        assert_eq!(hit.hops + 1, hit.nodes.len());
        let mut seen = std::collections::HashSet::new();
        assert!(hit.nodes.iter().all(|node| seen.insert(*node)));
        for pair in hit.nodes.windows(2) {
            assert!(graph.can_see(pair[0], pair[1]));
        }
    }
}

#[test]
fn measured_lengths_sum_the_track() {
    let scenario = helsinki_new_york();
    let graph = &scenario.graph;
    let outcome = PathSearch::new(graph, scenario.start, scenario.end)
        .expect("valid indices")
        .with_sibling_length(SiblingLength::Measured)
        .run();

    assert_eq!(outcome.hits.len(), 3);
    for hit in &outcome.hits {
        let length: f64 = hit
            .nodes
            .windows(2)
            .map(|pair| graph.distance(pair[0], pair[1]).expect("known nodes"))
            .sum();
        assert!((hit.length - length).abs() < 1e-9);
    }
}

#[test]
fn polar_relay_past_the_pole_still_routes() {
    let scenario = helsinki_tokyo();
    let polar = scenario.graph.index_of("SAT2").expect("registered");
    assert_eq!(scenario.graph.node(polar).map(|node| node.latitude()), Some(90.314));

    let route = find_route(&scenario.graph, scenario.start, scenario.end)
        .expect("valid indices")
        .expect("route exists");
    assert!(route.nodes.contains(&polar));
    assert!((route.length - 159.0619).abs() < 1e-3);
}

#[test]
fn selection_policies_agree_on_real_scenarios() {
    for scenario in [helsinki_london(), helsinki_tokyo(), helsinki_new_york()] {
        let fewest = PathSearch::new(&scenario.graph, scenario.start, scenario.end)
            .expect("valid indices")
            .run();
        let legacy = PathSearch::new(&scenario.graph, scenario.start, scenario.end)
            .expect("valid indices")
            .with_selection(HitSelection::Legacy)
            .run();
        assert_eq!(fewest.best(), legacy.best());
    }
}

#[test]
fn plan_route_resolves_ids_and_lists_relays() {
    let scenario = helsinki_london();
    let plan = plan_route(&scenario.graph, &RouteRequest::new("Helsinki", "London"))
        .expect("route exists");

    assert_eq!(plan.hop_count(), 2);
    assert_eq!(plan.step_ids, vec!["Helsinki", "Sat 2", "London"]);
    assert_eq!(plan.relay_ids(), &["Sat 2".to_string()]);
    assert_eq!(plan.relay_string(), "Sat 2");
    assert_eq!(plan.selection, HitSelection::FewestHops);
    assert_eq!(plan.candidates, 4);
}

#[test]
fn plan_route_reports_unreachable_goal() {
    let scenario = helsinki_tokyo_isolated();
    let error = plan_route(&scenario.graph, &RouteRequest::new("Helsinki", "Tokyo"))
        .expect_err("no route");
    assert!(matches!(
        error,
        Error::RouteNotFound { ref start, ref goal } if start == "Helsinki" && goal == "Tokyo"
    ));
}

#[test]
fn plan_route_suggests_similar_names() {
    let scenario = helsinki_tokyo();
    let error = plan_route(&scenario.graph, &RouteRequest::new("Helsinky", "Tokyo"))
        .expect_err("unknown start");
    match error {
        Error::UnknownNode { name, suggestions } => {
            assert_eq!(name, "Helsinky");
            assert_eq!(suggestions.first().map(String::as_str), Some("Helsinki"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn plan_to_self_has_no_relays() {
    let scenario = helsinki_london();
    let plan = plan_route(&scenario.graph, &RouteRequest::new("London", "London"))
        .expect("trivial route");
    assert_eq!(plan.hop_count(), 0);
    assert_eq!(plan.relay_string(), "");
    assert_eq!(plan.length, 0.0);
}

#[test]
fn summary_follows_plan() {
    let scenario = helsinki_tokyo();
    let plan = plan_route(
        &scenario.graph,
        &RouteRequest::new("Helsinki", "Tokyo").with_selection(HitSelection::Legacy),
    )
    .expect("route exists");
    let summary = RouteSummary::from_plan(&scenario.graph, &plan).expect("summary");

    assert_eq!(summary.hops, 6);
    assert_eq!(summary.selection, HitSelection::Legacy);
    assert_eq!(summary.relays, vec!["SAT3", "SAT2", "SAT4", "SAT5", "SAT7"]);
    assert_eq!(summary.steps.len(), 7);
}
