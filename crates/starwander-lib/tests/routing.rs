mod common;

use common::{fixture_document, fixture_graph, fixture_traveler, ids};
use starwander_lib::{
    plan_route, Error, RouteAlgorithm, RouteRequest, SearchBudget, Traveler, TravelerParams,
};

#[test]
fn max_stars_visits_the_whole_connected_component() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &fixture_traveler(), &RouteRequest::max_stars("1"))
        .expect("route exists");

    assert_eq!(plan.algorithm, RouteAlgorithm::MaxStars);
    assert_eq!(plan.steps, ids(&["1", "3", "2", "4", "5", "6", "7"]));
    assert_eq!(plan.total_distance, 195.0);
    assert!(plan.goal.is_none());
}

#[test]
fn max_stars_is_limited_by_remaining_life() {
    let graph = fixture_graph();
    let traveler = Traveler::new(&TravelerParams {
        start_age: 3500.0,
        ..fixture_document().traveler_params()
    });

    let plan = plan_route(&graph, &traveler, &RouteRequest::max_stars("1")).expect("route");
    assert_eq!(plan.steps, ids(&["1", "2", "3"]));
}

#[test]
fn max_stars_budget_returns_best_effort() {
    let graph = fixture_graph();
    let request = RouteRequest::max_stars("1").with_budget(SearchBudget::expansions(1));
    let plan = plan_route(&graph, &fixture_traveler(), &request).expect("best effort");
    assert_eq!(plan.steps, ids(&["1", "2"]));
}

#[test]
fn optimal_walk_never_backtracks() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &fixture_traveler(), &RouteRequest::optimal("1"))
        .expect("route exists");

    assert_eq!(plan.algorithm, RouteAlgorithm::Optimal);
    assert_eq!(plan.steps, ids(&["1", "2", "3", "5", "4"]));
    assert_eq!(plan.total_distance, 90.0);
}

#[test]
fn shortest_path_follows_cumulative_distance() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &fixture_traveler(), &RouteRequest::shortest("1", "7"))
        .expect("route exists");

    assert_eq!(plan.steps, ids(&["1", "2", "3", "5", "6", "7"]));
    assert_eq!(plan.total_distance, 140.0);
    assert_eq!(plan.hop_count(), 5);
}

#[test]
fn shortest_path_detours_around_blocked_edge() {
    let mut graph = fixture_graph();
    graph.block_edge("2", "3");

    let plan = plan_route(&graph, &fixture_traveler(), &RouteRequest::shortest("1", "7"))
        .expect("detour exists");
    assert_eq!(plan.steps, ids(&["1", "3", "5", "6", "7"]));
    assert_eq!(plan.total_distance, 145.0);
}

#[test]
fn shortest_path_to_self_is_singleton() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &fixture_traveler(), &RouteRequest::shortest("5", "5"))
        .expect("trivial route");
    assert_eq!(plan.steps, ids(&["5"]));
    assert_eq!(plan.total_distance, 0.0);
}

#[test]
fn unreachable_goal_is_route_not_found() {
    let graph = fixture_graph();
    let err = plan_route(&graph, &fixture_traveler(), &RouteRequest::shortest("1", "8"))
        .expect_err("Polaris is isolated");
    assert!(matches!(err, Error::RouteNotFound { ref start, ref goal } if start == "1" && goal == "8"));
}

#[test]
fn shortest_without_goal_is_rejected() {
    let graph = fixture_graph();
    let request = RouteRequest {
        goal: None,
        algorithm: RouteAlgorithm::Shortest,
        ..RouteRequest::max_stars("1")
    };
    let err = plan_route(&graph, &fixture_traveler(), &request).expect_err("goal required");
    assert!(matches!(err, Error::MissingGoal { .. }));
}

#[test]
fn unknown_start_lists_suggestions() {
    let graph = fixture_graph();
    let err = plan_route(&graph, &fixture_traveler(), &RouteRequest::optimal("Rigle"))
        .expect_err("unknown star");

    match &err {
        Error::UnknownStar { id, suggestions } => {
            assert_eq!(id, "Rigle");
            assert_eq!(suggestions, &ids(&["2"]));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "unknown star id: Rigle. Did you mean '2'?");
}

#[test]
fn unknown_goal_is_rejected_before_search() {
    let graph = fixture_graph();
    let err = plan_route(&graph, &fixture_traveler(), &RouteRequest::shortest("1", "99"))
        .expect_err("unknown goal");
    assert!(matches!(err, Error::UnknownStar { ref id, .. } if id == "99"));
}

#[test]
fn planning_does_not_mutate_the_traveler() {
    let graph = fixture_graph();
    let traveler = fixture_traveler();
    let before = traveler.status();
    plan_route(&graph, &traveler, &RouteRequest::max_stars("1")).expect("route");
    assert_eq!(traveler.status(), before);
}
