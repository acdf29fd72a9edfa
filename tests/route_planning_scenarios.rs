// Integration tests for end-to-end route planning through store layouts
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::time::Duration;

use store_route_planner::algorithms::optimizer::{best_order, listed_order};
use store_route_planner::algorithms::BreadthFirstFinder;
use store_route_planner::config::{OrderPolicy, StopLimitPolicy};
use store_route_planner::models::{AccessPoint, CellKind, Coordinate, Grid, ProductId};
use store_route_planner::utils::cancel::CancellationToken;
use store_route_planner::utils::init_map::demo_store;
use store_route_planner::{
    PlannerConfig, PlannerError, RoutePlan, RoutePlanner, ShoppingList, StoreMap, Strategy,
};

fn planner(strategy: Strategy) -> RoutePlanner {
    RoutePlanner::new(PlannerConfig {
        strategy,
        ..PlannerConfig::default()
    })
    .unwrap()
}

fn assert_route_is_walkable(plan: &RoutePlan, grid: &Grid, entrance: Coordinate) {
    let mut expected_start = entrance;
    for segment in &plan.segments {
        assert_eq!(segment.path.first(), Some(&expected_start));
        expected_start = *segment.path.last().unwrap();
    }
    if let Some(back) = &plan.return_leg {
        assert_eq!(back.first(), Some(&expected_start));
        assert_eq!(back.last(), Some(&entrance));
    }
    for cell in plan.cells() {
        assert!(grid.is_walkable_at(*cell), "route crosses blocked cell {cell}");
    }
}

#[test]
fn test_wall_row_is_crossed_only_through_the_gap() {
    let (map, catalog) = demo_store(1);
    let grid = map.build_grid(10, 10).unwrap();
    let entrance = map.entrance().unwrap();
    let list: ShoppingList = [(1, 1), (2, 1)].into_iter().collect();

    for strategy in [Strategy::AStar, Strategy::BreadthFirst, Strategy::DepthFirst] {
        let plan = planner(strategy).plan_route(&map, &list, &catalog).unwrap();

        println!("Strategy {}: cost {}", strategy, plan.total_cost);
        assert_eq!(plan.segments.len(), 2);
        assert_route_is_walkable(&plan, &grid, entrance);

        let crossings: Vec<_> = plan.cells().filter(|c| c.y == 5).collect();
        assert!(!crossings.is_empty());
        assert!(crossings.iter().all(|c| c.x == 5), "{strategy}: {crossings:?}");

        // both products sit below the wall
        let stops: Vec<_> = plan
            .segments
            .iter()
            .map(|s| *s.path.last().unwrap())
            .collect();
        assert!(stops.contains(&Coordinate::new(1, 6)));
        assert!(stops.contains(&Coordinate::new(7, 6)));
    }
}

#[test]
fn test_optimal_strategies_beat_depth_first() {
    let (map, catalog) = demo_store(1);
    let list: ShoppingList = [(1, 1), (2, 1), (3, 1)].into_iter().collect();

    let astar = planner(Strategy::AStar).plan_route(&map, &list, &catalog).unwrap();
    let bfs = planner(Strategy::BreadthFirst).plan_route(&map, &list, &catalog).unwrap();
    let dfs = planner(Strategy::DepthFirst).plan_route(&map, &list, &catalog).unwrap();

    println!(
        "Costs: astar {}, bfs {}, dfs {}",
        astar.total_cost, bfs.total_cost, dfs.total_cost
    );
    assert!(astar.total_cost <= bfs.total_cost);
    assert!(bfs.total_cost <= dfs.total_cost);
}

#[test]
fn test_walled_in_shelf_fails_the_request() {
    let map = StoreMap::new(2, 10, 10)
        .with_cell(0, 0, CellKind::Entrance)
        .with_cell(5, 5, CellKind::Shelf)
        .with_cell(5, 4, CellKind::Shelf)
        .with_cell(5, 6, CellKind::Fridge)
        .with_cell(4, 5, CellKind::Obstacle)
        .with_cell(6, 5, CellKind::Checkout);
    let catalog: HashMap<ProductId, Coordinate> =
        [(1, Coordinate::new(5, 5)), (2, Coordinate::new(1, 1))].into_iter().collect();
    let list: ShoppingList = [(2, 1), (1, 1)].into_iter().collect();

    let err = planner(Strategy::AStar).plan_route(&map, &list, &catalog).unwrap_err();
    assert!(matches!(err, PlannerError::NoAccessiblePoint { product_id: 1, .. }));
    assert_eq!(err.code(), "NO_ACCESSIBLE_POINT");
}

#[test]
fn test_store_without_entrance() {
    let map = StoreMap::new(3, 10, 10).with_cell(2, 2, CellKind::Shelf);
    let catalog: HashMap<ProductId, Coordinate> = [(1, Coordinate::new(2, 2))].into_iter().collect();
    let list: ShoppingList = [(1, 1)].into_iter().collect();

    let err = planner(Strategy::BreadthFirst).plan_route(&map, &list, &catalog).unwrap_err();
    assert!(matches!(err, PlannerError::NoEntrance { store_id: 3 }));

    let two = StoreMap::new(4, 10, 10)
        .with_cell(0, 0, CellKind::Entrance)
        .with_cell(9, 9, CellKind::Entrance);
    let err = planner(Strategy::BreadthFirst).plan_route(&two, &list, &catalog).unwrap_err();
    assert_eq!(err.code(), "MULTIPLE_ENTRANCES");
}

#[test]
fn test_unreachable_access_point_has_no_valid_route() {
    // the shelf at (8, 8) is fenced off by a ring of obstacles that still leaves
    // its own neighbours open
    let mut map = StoreMap::new(5, 10, 10).with_cell(0, 0, CellKind::Entrance);
    for i in 6..=9 {
        map.add_cell(i, 6, CellKind::Obstacle);
        map.add_cell(6, i, CellKind::Obstacle);
    }
    map.add_cell(8, 8, CellKind::Shelf);
    let catalog: HashMap<ProductId, Coordinate> = [(1, Coordinate::new(8, 8))].into_iter().collect();
    let list: ShoppingList = [(1, 1)].into_iter().collect();

    let err = planner(Strategy::AStar).plan_route(&map, &list, &catalog).unwrap_err();
    assert!(matches!(err, PlannerError::NoValidRoute));
}

#[test]
fn test_exhaustive_search_counts_and_never_loses_to_listed_order() {
    let mut rng = StdRng::seed_from_u64(11);
    let grid = Grid::new(10, 10).unwrap();
    let entrance = Coordinate::new(0, 0);
    let cancel = CancellationToken::new();

    for n in 1..=6 {
        let points: Vec<AccessPoint> = (0..n)
            .map(|i| {
                let at = Coordinate::new(rng.gen_range(0..10), rng.gen_range(0..10));
                AccessPoint::new(i as ProductId, at)
            })
            .collect();

        let best = best_order(&grid, &BreadthFirstFinder, entrance, &points, true, &cancel).unwrap();
        let listed =
            listed_order(&grid, &BreadthFirstFinder, entrance, &points, true, &cancel).unwrap();

        let factorial: usize = (1..=n).product();
        assert_eq!(best.evaluated, factorial);
        assert!(best.cost <= listed.cost);

        let mut ids: Vec<_> = best.stops.iter().map(|p| p.product_id).collect();
        ids.sort();
        assert_eq!(ids, (0..n as ProductId).collect::<Vec<_>>());
    }
}

#[test]
fn test_as_listed_policy_keeps_list_order() {
    let (map, catalog) = demo_store(1);
    let list: ShoppingList = [(2, 1), (3, 1), (1, 1)].into_iter().collect();

    let listed = RoutePlanner::new(PlannerConfig {
        order_policy: OrderPolicy::AsListed,
        ..PlannerConfig::default()
    })
    .unwrap()
    .plan_route(&map, &list, &catalog)
    .unwrap();
    let best = planner(Strategy::AStar).plan_route(&map, &list, &catalog).unwrap();

    assert_eq!(listed.visit_order(), vec![2, 3, 1]);
    assert!(best.total_cost <= listed.total_cost);
}

#[test]
fn test_stop_limit_policies() {
    let map = StoreMap::new(6, 10, 10).with_cell(0, 0, CellKind::Entrance);
    let catalog: HashMap<ProductId, Coordinate> = (1..=5)
        .map(|i| (i as ProductId, Coordinate::new(i, i)))
        .collect();
    let list: ShoppingList = (1..=5).map(|i| (i as ProductId, 1)).collect();

    let base = PlannerConfig {
        max_stops: 3,
        ..PlannerConfig::default()
    };
    let err = RoutePlanner::new(base.clone())
        .unwrap()
        .plan_route(&map, &list, &catalog)
        .unwrap_err();
    assert_eq!(err.code(), "TOO_MANY_STOPS");

    let plan = RoutePlanner::new(PlannerConfig {
        stop_limit_policy: StopLimitPolicy::Truncate,
        ..base
    })
    .unwrap()
    .plan_route(&map, &list, &catalog)
    .unwrap();
    assert_eq!(plan.segments.len(), 3);
    assert_eq!(plan.skipped, vec![4, 5]);
}

#[test]
fn test_plan_many_keeps_request_order() {
    let (map, catalog) = demo_store(1);
    let no_entrance = StoreMap::new(9, 10, 10);
    let list: ShoppingList = [(1, 1), (2, 1)].into_iter().collect();

    let requests = vec![
        (map.clone(), list.clone()),
        (no_entrance, list.clone()),
        (map, ShoppingList::new()),
    ];
    let results = planner(Strategy::AStar).plan_many(&requests, &catalog);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().segments.len(), 2);
    assert!(matches!(results[1], Err(PlannerError::NoEntrance { store_id: 9 })));
    assert!(results[2].as_ref().unwrap().is_empty());
}

#[test]
fn test_expired_deadline_aborts_planning() {
    let (map, catalog) = demo_store(1);
    let list: ShoppingList = [(1, 1), (2, 1), (3, 1)].into_iter().collect();
    let cancel = CancellationToken::with_timeout(Duration::ZERO);

    let err = planner(Strategy::AStar)
        .plan_route_with_cancel(&map, &list, &catalog, &cancel)
        .unwrap_err();
    assert!(matches!(err, PlannerError::DeadlineExceeded));
}
