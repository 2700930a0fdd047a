use ahash::AHashMap;
use gridpath_core::traits::{Frontier, SearchObserver, ShortestPathSearch};
use gridpath_core::{
    reconstruct_path, Instrumentation, LazyFrontier, NodeId, Outcome, SearchError, SearchStats,
    StopToken,
};
use gridpath_grid::{Graph, Heuristic};
use log::trace;

/// A* search.
///
/// The distance from the start is kept in a side table; node costs hold the estimated total cost
/// `f = g + h` that orders the frontier. With an admissible heuristic (all [`Heuristic`]s are)
/// the returned path is optimal.
pub struct AStar<'a> {
    graph: &'a Graph,
    heuristic: Heuristic,
    instrumentation: Instrumentation<'a>,
}

impl<'a> AStar<'a> {
    /// Creates a searcher using the Euclidean heuristic.
    pub fn new(graph: &'a Graph) -> Self {
        AStar {
            graph,
            heuristic: Heuristic::Euclidean,
            instrumentation: Instrumentation::new("astar"),
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_observer(mut self, observer: impl SearchObserver + 'a) -> Self {
        self.instrumentation.set_observer(observer);
        self
    }

    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.instrumentation.set_stop_token(stop);
        self
    }
}

impl ShortestPathSearch for AStar<'_> {
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
        let mut open = LazyFrontier::new();

        g.insert(start.id(), 0.0);
        start.set_cost(self.heuristic.estimate(start.xy(), goal));
        open.push(start.id(), start.cost());

        while self.instrumentation.is_running() {
            let Some(id) = open.pop() else {
                self.instrumentation.finish(Outcome::NotFound);
                return Ok(vec![]);
            };
            let current = graph.node(id);
            if current.is_visited() {
                continue;
            }
            current.set_visited(true);
            self.instrumentation.visit(current, start, end);

            let g_current = g.get(&id).copied().unwrap_or(f64::INFINITY);
            if id == end.id() {
                let path = reconstruct_path(graph.nodes(), id)
                    .inspect_err(|_| self.instrumentation.finish(Outcome::Failed))?;
                self.instrumentation.finish_found(path.len(), g_current);
                return Ok(path);
            }

            trace!("expanding {id}, g = {g_current:.3}, f = {:.3}", current.cost());
            for (neighbor, edge_cost) in graph.neighbors_with_costs(id) {
                if !self.instrumentation.is_running() {
                    break;
                }
                let neighbor = graph.node(neighbor);
                if neighbor.is_visited() {
                    continue;
                }
                let tentative = g_current + edge_cost;
                let known = g.get(&neighbor.id()).copied().unwrap_or(f64::INFINITY);
                if tentative < known {
                    g.insert(neighbor.id(), tentative);
                    neighbor.set_parent(Some(id));
                    let f = tentative + self.heuristic.estimate(neighbor.xy(), goal);
                    neighbor.set_cost(f);
                    open.push(neighbor.id(), f);
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
