use ahash::AHashMap;
use gridpath_core::traits::{Frontier, SearchObserver, ShortestPathSearch};
use gridpath_core::{
    reconstruct_path, Instrumentation, Node, NodeId, Outcome, SearchError, SearchStats, StopToken,
    TrackedFrontier,
};
use gridpath_grid::eight_connected::octile_distance;
use gridpath_grid::{Graph, Heuristic};
use log::trace;

use crate::{pruned_directions, travel_direction};

/// Jump point search over a [`Graph`].
///
/// Instead of relaxing every neighbor, each pruned direction is followed in a straight line
/// until it reaches the goal, a cell with a forced neighbor, or an obstacle. Only the cells where
/// a jump stops (jump points) enter the frontier, so the returned path consists of collinear
/// waypoints; use [`expand_waypoints`](crate::expand_waypoints) for the cell-by-cell path.
///
/// Every cell a jump steps onto counts as a visit and is reported to the progress hook, including
/// the cells probed while checking a diagonal step for forced neighbors. Jump points are marked
/// on the graph and can be listed with [`Graph::jump_points`] afterwards.
pub struct Jps<'a> {
    graph: &'a Graph,
    heuristic: Heuristic,
    instrumentation: Instrumentation<'a>,
}

impl<'a> Jps<'a> {
    /// Creates a searcher using the octile heuristic.
    pub fn new(graph: &'a Graph) -> Self {
        Jps {
            graph,
            heuristic: Heuristic::Octile,
            instrumentation: Instrumentation::new("jps"),
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Installs a progress hook called for every visited cell.
    pub fn with_observer(mut self, observer: impl SearchObserver + 'a) -> Self {
        self.instrumentation.set_observer(observer);
        self
    }

    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.instrumentation.set_stop_token(stop);
        self
    }

    /// Steps from `from` in direction `(dx, dy)` until a jump point is found.
    ///
    /// Returns `None` once a step is not a valid move.
    fn jump(
        &mut self,
        from: (i32, i32),
        (dx, dy): (i32, i32),
        start: &Node,
        end: &Node,
    ) -> Option<&'a Node> {
        let graph = self.graph;
        let (mut px, mut py) = from;
        loop {
            if !graph.can_step(px, py, dx, dy) {
                return None;
            }
            let (x, y) = (px + dx, py + dy);
            let node = graph.node_xy(x, y)?;
            self.instrumentation.visit(node, start, end);

            if node.id() == end.id() || self.has_forced_neighbor((x, y), (dx, dy), start, end) {
                return Some(node);
            }
            (px, py) = (x, y);
        }
    }

    /// Whether `(x, y)`, reached travelling `(dx, dy)`, must become a jump point.
    ///
    /// For diagonal travel this also probes both straight components, since a jump point found
    /// along either of them is only reachable optimally through `(x, y)`.
    fn has_forced_neighbor(
        &mut self,
        (x, y): (i32, i32),
        (dx, dy): (i32, i32),
        start: &Node,
        end: &Node,
    ) -> bool {
        let graph = self.graph;
        let free = |ox: i32, oy: i32| graph.is_traversable(x + ox, y + oy);

        if dx != 0 && dy != 0 {
            if (free(-dx, dy) && !free(-dx, 0)) || (free(dx, -dy) && !free(0, -dy)) {
                return true;
            }
            self.jump((x, y), (dx, 0), start, end).is_some()
                || self.jump((x, y), (0, dy), start, end).is_some()
        } else if dx != 0 {
            (free(dx, 1) && !free(0, 1)) || (free(dx, -1) && !free(0, -1))
        } else {
            (free(1, dy) && !free(1, 0)) || (free(-1, dy) && !free(-1, 0))
        }
    }
}

impl ShortestPathSearch for Jps<'_> {
    fn find_shortest_path(
        &mut self,
        start: NodeId,
        end: NodeId,
    ) -> Result<Vec<NodeId>, SearchError> {
        let graph = self.graph;
        let start = graph.validate_endpoint(start)?;
        let end = graph.validate_endpoint(end)?;
        let _search = graph.begin_search()?;
        self.instrumentation.begin();

        let goal = end.xy();
        let mut g: AHashMap<NodeId, f64> = AHashMap::new();
        let mut open = TrackedFrontier::new(graph.len());

        g.insert(start.id(), 0.0);
        start.set_cost(self.heuristic.estimate(start.xy(), goal));
        open.push(start.id(), start.cost());

        while self.instrumentation.is_running() {
            let Some(id) = open.pop() else {
                self.instrumentation.finish(Outcome::NotFound);
                return Ok(vec![]);
            };
            let current = graph.node(id);
            current.set_visited(true);
            self.instrumentation.visit(current, start, end);

            let g_current = g.get(&id).copied().unwrap_or(f64::INFINITY);
            if id == end.id() {
                let path = reconstruct_path(graph.nodes(), id)
                    .inspect_err(|_| self.instrumentation.finish(Outcome::Failed))?;
                self.instrumentation.finish_found(path.len(), g_current);
                return Ok(path);
            }

            let here = current.xy();
            let going = current
                .parent()
                .and_then(|parent| travel_direction(graph.node(parent).xy(), here));
            trace!("expanding {id} at {here:?}, g = {g_current:.3}, arrived {going:?}");

            for dir in pruned_directions(graph, here, going) {
                if !self.instrumentation.is_running() {
                    break;
                }
                let Some(jump_point) = self.jump(here, dir.offset(), start, end) else {
                    continue;
                };
                if jump_point.is_visited() {
                    continue;
                }

                let tentative = g_current + octile_distance(here, jump_point.xy());
                let known = g.get(&jump_point.id()).copied().unwrap_or(f64::INFINITY);
                if tentative < known {
                    g.insert(jump_point.id(), tentative);
                    jump_point.set_parent(Some(id));
                    jump_point.set_jump_point(true);
                    let f = tentative + self.heuristic.estimate(jump_point.xy(), goal);
                    jump_point.set_cost(f);
                    open.push(jump_point.id(), f);
                }
            }
        }

        self.instrumentation.finish(Outcome::Cancelled);
        Ok(vec![])
    }

    fn stats(&self) -> &SearchStats {
        self.instrumentation.stats()
    }

    fn stop_token(&self) -> &StopToken {
        self.instrumentation.stop_token()
    }

    fn reset_stats(&mut self) {
        self.instrumentation.reset();
    }
}
