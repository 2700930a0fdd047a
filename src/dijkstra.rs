use gridpath_core::traits::{Frontier, SearchObserver, ShortestPathSearch};
use gridpath_core::{
    reconstruct_path, Instrumentation, LazyFrontier, NodeId, Outcome, SearchError, SearchStats,
    StopToken,
};
use gridpath_grid::Graph;
use log::trace;

/// Uniform-cost search. Node costs hold the exact distance from the start.
pub struct Dijkstra<'a> {
    graph: &'a Graph,
    instrumentation: Instrumentation<'a>,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            graph,
            instrumentation: Instrumentation::new("dijkstra"),
        }
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

impl ShortestPathSearch for Dijkstra<'_> {
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

        let mut open = LazyFrontier::new();
        start.set_cost(0.0);
        open.push(start.id(), 0.0);

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

            if id == end.id() {
                let path = reconstruct_path(graph.nodes(), id)
                    .inspect_err(|_| self.instrumentation.finish(Outcome::Failed))?;
                self.instrumentation.finish_found(path.len(), end.cost());
                return Ok(path);
            }

            trace!("expanding {id}, cost {:.3}", current.cost());
            for (neighbor, edge_cost) in graph.neighbors_with_costs(id) {
                if !self.instrumentation.is_running() {
                    break;
                }
                let neighbor = graph.node(neighbor);
                if neighbor.is_visited() {
                    continue;
                }
                let candidate = current.cost() + edge_cost;
                if candidate < neighbor.cost() {
                    neighbor.set_cost(candidate);
                    neighbor.set_parent(Some(id));
                    open.push(neighbor.id(), candidate);
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
