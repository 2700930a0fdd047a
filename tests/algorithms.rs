use std::f64::consts::SQRT_2;

use approx::assert_relative_eq;
use gridpath::jps::expand_waypoints;
use gridpath::traits::ShortestPathSearch;
use gridpath::{AStar, Dijkstra, Graph, Jps, Node, NodeId, Outcome, SearchError, StopToken};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

struct Map {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Map {
    fn random(rng: &mut Pcg64) -> Map {
        let width = rng.gen_range(1..=24);
        let height = rng.gen_range(1..=24);
        let density = [0.0, 0.1, 0.2, 0.3, 0.4][rng.gen_range(0..5)];
        let blocked = (0..width * height).map(|_| rng.gen_bool(density)).collect();
        Map {
            width,
            height,
            blocked,
        }
    }

    fn graph(&self) -> Graph {
        Graph::new(self.width, self.height, |x, y| {
            self.blocked[(y * self.width + x) as usize]
        })
    }

    fn random_endpoints(&self, rng: &mut Pcg64) -> Option<(NodeId, NodeId)> {
        let free: Vec<usize> = (0..self.blocked.len())
            .filter(|&i| !self.blocked[i])
            .collect();
        if free.is_empty() {
            return None;
        }
        let start = free[rng.gen_range(0..free.len())];
        let end = free[rng.gen_range(0..free.len())];
        Some((NodeId::new(start), NodeId::new(end)))
    }
}

/// Runs `check` once per algorithm, each on a freshly built graph.
fn each_algorithm(
    make: impl Fn() -> Graph,
    mut check: impl FnMut(&'static str, &Graph, &mut dyn ShortestPathSearch),
) {
    let graph = make();
    check("dijkstra", &graph, &mut Dijkstra::new(&graph));
    let graph = make();
    check("astar", &graph, &mut AStar::new(&graph));
    let graph = make();
    check("jps", &graph, &mut Jps::new(&graph));
}

fn parse<'a>(rows: &'a [&'a str]) -> impl Fn() -> Graph + 'a {
    move || rows.join("\n").parse().unwrap()
}

fn step_cost(graph: &Graph, from: NodeId, to: NodeId) -> Option<f64> {
    graph
        .neighbors_with_costs(from)
        .find(|&(neighbor, _)| neighbor == to)
        .map(|(_, cost)| cost)
}

/// Cost of walking `cells` one move at a time; panics if two consecutive cells are not adjacent.
fn walk_cost(graph: &Graph, cells: &[NodeId]) -> f64 {
    cells
        .windows(2)
        .map(|pair| {
            step_cost(graph, pair[0], pair[1])
                .unwrap_or_else(|| panic!("{} -> {} is not a move", pair[0], pair[1]))
        })
        .sum()
}

#[test]
fn all_algorithms_agree_on_cost() {
    let mut rng = Pcg64::seed_from_u64(0x5eed);
    for _ in 0..300 {
        let map = Map::random(&mut rng);
        let Some((start, end)) = map.random_endpoints(&mut rng) else {
            continue;
        };

        let mut results = vec![];
        each_algorithm(
            || map.graph(),
            |name, _, search| {
                search.find_shortest_path(start, end).unwrap();
                results.push((name, search.is_path_found(), search.path_cost()));
            },
        );

        let (_, found, cost) = results[0];
        for &(name, other_found, other_cost) in &results[1..] {
            assert_eq!(found, other_found, "{name} disagrees on reachability");
            assert_relative_eq!(cost, other_cost, epsilon = 1e-9);
        }
    }
}

#[test]
fn paths_follow_moves_of_the_graph() {
    let mut rng = Pcg64::seed_from_u64(17);
    for _ in 0..200 {
        let map = Map::random(&mut rng);
        let Some((start, end)) = map.random_endpoints(&mut rng) else {
            continue;
        };

        each_algorithm(
            || map.graph(),
            |name, graph, search| {
                let path = search.find_shortest_path(start, end).unwrap();
                if !search.is_path_found() {
                    assert!(path.is_empty());
                    return;
                }
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                assert_eq!(path.len(), search.path_node_count());

                let cells = if name == "jps" {
                    expand_waypoints(graph, &path)
                } else {
                    path
                };
                assert_relative_eq!(walk_cost(graph, &cells), search.path_cost(), epsilon = 1e-9);
            },
        );
    }
}

#[test]
fn visited_count_matches_closed_set() {
    let mut rng = Pcg64::seed_from_u64(99);
    for _ in 0..100 {
        let map = Map::random(&mut rng);
        let Some((start, end)) = map.random_endpoints(&mut rng) else {
            continue;
        };

        let graph = map.graph();
        let mut dijkstra = Dijkstra::new(&graph);
        dijkstra.find_shortest_path(start, end).unwrap();
        let closed = graph.nodes().iter().filter(|node| node.is_visited()).count();
        assert_eq!(dijkstra.visited_node_count(), closed);

        let graph = map.graph();
        let mut astar = AStar::new(&graph);
        astar.find_shortest_path(start, end).unwrap();
        let closed = graph.nodes().iter().filter(|node| node.is_visited()).count();
        assert_eq!(astar.visited_node_count(), closed);
    }
}

#[test]
fn unreachable_goal() {
    let rows = ["..#..", "..#..", "..#.."];
    each_algorithm(parse(&rows), |name, graph, search| {
        let start = graph.node_id(1, 0).unwrap();
        let end = graph.node_id(1, 4).unwrap();
        let path = search.find_shortest_path(start, end).unwrap();
        assert!(path.is_empty(), "{name}");
        assert_eq!(search.outcome(), Outcome::NotFound, "{name}");
        assert_eq!(search.path_node_count(), 0);
        assert_eq!(search.path_cost(), 0.0);
    });
}

#[test]
fn blocked_corridor() {
    each_algorithm(parse(&["..#.."]), |name, graph, search| {
        let start = graph.node_id(0, 0).unwrap();
        let end = graph.node_id(0, 4).unwrap();
        assert!(search.find_shortest_path(start, end).unwrap().is_empty());
        assert!(!search.is_path_found(), "{name}");
        assert_eq!(search.visited_node_count(), 2, "{name}");
    });
}

#[test]
fn start_is_end() {
    each_algorithm(parse(&["...", "...", "..."]), |name, graph, search| {
        let cell = graph.node_id(1, 2).unwrap();
        assert_eq!(search.find_shortest_path(cell, cell).unwrap(), [cell], "{name}");
        assert_eq!(search.path_node_count(), 1);
        assert_eq!(search.path_cost(), 0.0);
        assert_eq!(search.outcome(), Outcome::Found);
    });
}

#[test]
fn open_five_by_five() {
    each_algorithm(
        || Graph::new(5, 5, |_, _| false),
        |name, graph, search| {
            let start = graph.node_id(0, 0).unwrap();
            let end = graph.node_id(4, 4).unwrap();
            let path = search.find_shortest_path(start, end).unwrap();
            assert_relative_eq!(search.path_cost(), 4.0 * SQRT_2);
            assert_eq!(search.rounded_path_cost(), 5.7);
            let expected_nodes = if name == "jps" { 2 } else { 5 };
            assert_eq!(search.path_node_count(), expected_nodes, "{name}");
            assert_eq!(expand_waypoints(graph, &path).len(), 5);
        },
    );
}

#[test]
fn detours() {
    each_algorithm(parse(&[".....", ".###.", "....."]), |name, graph, search| {
        let start = graph.node_id(0, 0).unwrap();
        let end = graph.node_id(2, 4).unwrap();
        search.find_shortest_path(start, end).unwrap();
        assert_relative_eq!(search.path_cost(), 4.0 + SQRT_2, epsilon = 1e-9);
        assert!(search.is_path_found(), "{name}");
    });
    each_algorithm(parse(&["....", ".#..", "....", "...."]), |_, graph, search| {
        let start = graph.node_id(0, 0).unwrap();
        let end = graph.node_id(3, 3).unwrap();
        search.find_shortest_path(start, end).unwrap();
        assert_relative_eq!(search.path_cost(), 2.0 + 2.0 * SQRT_2, epsilon = 1e-9);
    });
}

#[test]
fn cancel_at_first_expansion() {
    let graphs: Vec<Graph> = (0..3).map(|_| Graph::new(10, 10, |_, _| false)).collect();
    let stopping = || {
        let stop = StopToken::new();
        let hook_stop = stop.clone();
        (stop, move |_: &Node, _: &Node, _: &Node| hook_stop.request_stop())
    };

    let mut runs: Vec<Box<dyn ShortestPathSearch + '_>> = vec![];
    let (stop, hook) = stopping();
    runs.push(Box::new(
        Dijkstra::new(&graphs[0]).with_stop_token(stop).with_observer(hook),
    ));
    let (stop, hook) = stopping();
    runs.push(Box::new(
        AStar::new(&graphs[1]).with_stop_token(stop).with_observer(hook),
    ));
    let (stop, hook) = stopping();
    runs.push(Box::new(
        Jps::new(&graphs[2]).with_stop_token(stop).with_observer(hook),
    ));

    let start = graphs[0].node_id(0, 0).unwrap();
    let end = graphs[0].node_id(9, 9).unwrap();
    for search in &mut runs {
        assert_eq!(search.find_shortest_path(start, end), Ok(vec![]));
        assert_eq!(search.outcome(), Outcome::Cancelled);
        assert!(!search.is_path_found());
        assert!(!search.is_running());
        assert_eq!(search.visited_node_count(), 1);
    }
}

#[test]
fn stop_from_another_thread() {
    let graph = Graph::new(64, 64, |_, _| false);
    let start = graph.node_id(0, 0).unwrap();
    let end = graph.node_id(63, 63).unwrap();
    let stop = StopToken::new();
    let (tx, rx) = std::sync::mpsc::channel::<()>();

    let remote = stop.clone();
    let handle = std::thread::spawn(move || {
        rx.recv().unwrap();
        remote.request_stop();
    });

    // The hook hands control to the other thread and waits until the stop is visible.
    let mut tx = Some(tx);
    let hook_stop = stop.clone();
    let mut dijkstra = Dijkstra::new(&graph)
        .with_stop_token(stop)
        .with_observer(move |_: &Node, _: &Node, _: &Node| {
            if let Some(tx) = tx.take() {
                tx.send(()).unwrap();
                while hook_stop.is_running() {
                    std::thread::yield_now();
                }
            }
        });

    assert!(dijkstra.find_shortest_path(start, end).unwrap().is_empty());
    handle.join().unwrap();
    assert_eq!(dijkstra.outcome(), Outcome::Cancelled);
    assert_eq!(dijkstra.visited_node_count(), 1);
}

#[test]
fn second_run_needs_reset() {
    let graph = Graph::new(4, 4, |_, _| false);
    let start = graph.node_id(0, 0).unwrap();
    let end = graph.node_id(3, 3).unwrap();

    let mut dijkstra = Dijkstra::new(&graph);
    dijkstra.find_shortest_path(start, end).unwrap();
    let mut astar = AStar::new(&graph);
    assert_eq!(
        astar.find_shortest_path(start, end),
        Err(SearchError::GraphNotReset)
    );
    assert_eq!(astar.outcome(), Outcome::Idle);

    graph.reset().unwrap();
    astar.find_shortest_path(start, end).unwrap();
    assert_relative_eq!(astar.path_cost(), dijkstra.path_cost());
}

#[test]
fn one_instance_many_runs() {
    let make = || Graph::new(6, 6, |x, y| x == 3 && y < 4);
    each_algorithm(make, |name, graph, search| {
        let start = graph.node_id(0, 0).unwrap();
        let far = graph.node_id(1, 5).unwrap();
        let near = graph.node_id(2, 1).unwrap();

        search.find_shortest_path(start, far).unwrap();
        assert!(search.is_path_found(), "{name}");
        let far_cost = search.path_cost();

        graph.reset().unwrap();
        search.reset_stats();
        assert_eq!(search.outcome(), Outcome::Idle);
        search.find_shortest_path(start, near).unwrap();
        assert!(search.is_path_found(), "{name}");
        assert_relative_eq!(search.path_cost(), 1.0 + SQRT_2);

        graph.reset().unwrap();
        search.find_shortest_path(start, far).unwrap();
        assert_relative_eq!(search.path_cost(), far_cost);
    });
}

#[test]
fn reset_from_hook_is_refused() {
    let graph = Graph::new(3, 3, |_, _| false);
    let refused = std::cell::Cell::new(0);
    let mut astar = AStar::new(&graph).with_observer(|_: &Node, _: &Node, _: &Node| {
        if graph.reset() == Err(SearchError::SearchInProgress) {
            refused.set(refused.get() + 1);
        }
    });

    astar
        .find_shortest_path(graph.node_id(0, 0).unwrap(), graph.node_id(2, 2).unwrap())
        .unwrap();
    assert_eq!(refused.get(), astar.visited_node_count());
    assert!(astar.is_path_found());
    assert!(!graph.is_searching());
    assert!(graph.reset().is_ok());
}

#[test]
fn obstacle_and_out_of_bounds_endpoints() {
    let graph: Graph = ".#".parse().unwrap();
    assert!(matches!(
        graph.node_id(0, 5),
        Err(SearchError::OutOfBounds { row: 0, col: 5, .. })
    ));
    let mut jps = Jps::new(&graph);
    assert_eq!(
        jps.find_shortest_path(NodeId::new(0), NodeId::new(1)),
        Err(SearchError::Obstacle { row: 0, col: 1 })
    );
}
