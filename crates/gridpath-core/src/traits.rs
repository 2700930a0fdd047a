//! Seams between the search algorithms and their collaborators.

use crate::error::SearchError;
use crate::node::{Node, NodeId};
use crate::search::{Outcome, SearchStats, StopToken};

/// Priority-ordered set of pending nodes driving expansion order.
pub trait Frontier {
    /// Adds `node` with the given priority. Lower priorities are popped first.
    fn push(&mut self, node: NodeId, priority: f64);

    /// Removes and returns a node with minimal priority.
    fn pop(&mut self) -> Option<NodeId>;

    /// Number of pending entries.
    fn len(&self) -> usize;

    /// Whether no entries are pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every pending entry.
    fn clear(&mut self);
}

/// Progress hook invoked once for every node an algorithm finalizes or jumps over.
///
/// The hook runs inside the search and is included in its elapsed time, so it should be cheap.
pub trait SearchObserver {
    /// Called with the node just visited and the endpoints of the running search.
    fn on_visit(&mut self, current: &Node, start: &Node, end: &Node);
}

impl<F: FnMut(&Node, &Node, &Node)> SearchObserver for F {
    fn on_visit(&mut self, current: &Node, start: &Node, end: &Node) {
        self(current, start, end)
    }
}

/// Result and statistics contract shared by every search algorithm.
pub trait ShortestPathSearch {
    /// Searches for a shortest path from `start` to `end`.
    ///
    /// Returns the path from `start` to `end` inclusive, or an empty path if the goal is
    /// unreachable or the search was cancelled; [`outcome`](Self::outcome) tells the two apart.
    /// Errors are reported before any node state is touched, except for
    /// [`SearchError::BrokenParentChain`].
    fn find_shortest_path(&mut self, start: NodeId, end: NodeId)
        -> Result<Vec<NodeId>, SearchError>;

    /// Statistics of the most recent run.
    fn stats(&self) -> &SearchStats;

    /// The cancellation signal polled by this algorithm.
    fn stop_token(&self) -> &StopToken;

    /// Clears the statistics so the instance reads as idle again.
    ///
    /// This does not touch the graph; node state must be reset on the graph itself.
    fn reset_stats(&mut self);

    /// Number of visits recorded during the last run.
    fn visited_node_count(&self) -> usize {
        self.stats().visited()
    }

    /// Wall-clock duration of the last run in milliseconds.
    fn elapsed_milliseconds(&self) -> f64 {
        self.stats().elapsed().as_secs_f64() * 1000.0
    }

    /// How the last run ended.
    fn outcome(&self) -> Outcome {
        self.stats().outcome()
    }

    /// Whether the last run reached the goal.
    fn is_path_found(&self) -> bool {
        self.outcome() == Outcome::Found
    }

    /// Number of nodes in the returned path.
    fn path_node_count(&self) -> usize {
        self.stats().path_node_count()
    }

    /// Sum of edge costs along the returned path.
    fn path_cost(&self) -> f64 {
        self.stats().path_cost()
    }

    /// [`path_cost`](Self::path_cost) rounded to one decimal place, for display.
    fn rounded_path_cost(&self) -> f64 {
        (self.path_cost() * 10.0).round() / 10.0
    }

    /// Asks a running search to stop at its next check.
    fn request_stop(&self) {
        self.stop_token().request_stop();
    }

    /// Whether a search is currently running.
    fn is_running(&self) -> bool {
        self.stop_token().is_running()
    }
}
