use thiserror::Error;

use crate::node::NodeId;

/// Errors reported by a search before it starts, or when its own bookkeeping is inconsistent.
///
/// Failing to reach the goal is not an error: that is reported through
/// [`Outcome::NotFound`](crate::Outcome::NotFound) or [`Outcome::Cancelled`](crate::Outcome::Cancelled)
/// with an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A requested endpoint lies outside the grid.
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },
    /// A requested endpoint is an obstacle.
    #[error("cell ({row}, {col}) is an obstacle")]
    Obstacle {
        /// Row of the blocked cell.
        row: i32,
        /// Column of the blocked cell.
        col: i32,
    },
    /// The id does not refer to a node of the graph being searched.
    #[error("node {0} does not belong to this graph")]
    UnknownNode(NodeId),
    /// The graph still carries node state from an earlier search.
    #[error("graph carries state from a previous search; reset it before searching again")]
    GraphNotReset,
    /// The graph cannot be reset while a search over it is running.
    #[error("a search over this graph is still running")]
    SearchInProgress,
    /// Walking parent links did not reach the start within the node count.
    #[error("parent chain from node {from} did not terminate within {limit} nodes")]
    BrokenParentChain {
        /// Node the walk started from.
        from: NodeId,
        /// Maximum number of nodes a valid chain can hold.
        limit: usize,
    },
}
