use std::cell::Cell;

use enumset::EnumSet;
use gridpath_core::{Node, NodeId, SearchError};
use log::warn;

use crate::{Direction, Grid};

/// 8-connected grid graph owning one [`Node`] per cell.
///
/// Moves go to any of the eight neighboring cells that are in bounds and not obstacles. A diagonal
/// move is only allowed if at least one of the two orthogonal cells it passes between is open, so
/// paths may cut a corner but never squeeze between two diagonal obstacles. Orthogonal moves cost 1
/// and diagonal moves cost √2.
///
/// Searches write their state into the nodes. A graph can be searched once; after that
/// [`Graph::reset`] must be called before the next search, which otherwise fails with
/// [`SearchError::GraphNotReset`]. Resetting only needs a shared borrow, so a searcher can be
/// reused for several runs over the same graph.
pub struct Graph {
    nodes: Grid<Node>,
    // Set when a search claims the node state, cleared by `reset`.
    claimed: Cell<bool>,
    // Set while a `SearchGuard` is alive.
    searching: Cell<bool>,
}

/// Marks a search over a [`Graph`] as running until dropped.
///
/// While it is alive, [`Graph::reset`] fails with [`SearchError::SearchInProgress`].
#[must_use = "the search ends when the guard is dropped"]
pub struct SearchGuard<'a> {
    graph: &'a Graph,
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        self.graph.searching.set(false);
    }
}

impl Graph {
    /// Creates a `width` × `height` graph; `obstacle(x, y)` decides which cells are blocked.
    #[track_caller]
    pub fn new(width: i32, height: i32, mut obstacle: impl FnMut(i32, i32) -> bool) -> Self {
        let nodes = Grid::new(width, height, |x, y| {
            let id = NodeId::new(width as usize * y as usize + x as usize);
            Node::new(id, y, x, obstacle(x, y))
        });
        Graph {
            nodes,
            claimed: Cell::new(false),
            searching: Cell::new(false),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.nodes.width()
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.nodes.height()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.nodes.storage().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All nodes in row-major order; a node's [`NodeId`] is its index here.
    pub fn nodes(&self) -> &[Node] {
        self.nodes.storage()
    }

    /// Returns the node with the given id.
    ///
    /// Panics if the id does not belong to this graph.
    #[track_caller]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes.storage()[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.storage().get(id.index())
    }

    /// Returns the node at `(x, y)`, if in bounds.
    pub fn node_xy(&self, x: i32, y: i32) -> Option<&Node> {
        self.nodes.get(x, y)
    }

    /// Returns the node at `row`, `col`, if in bounds.
    pub fn node_at(&self, row: i32, col: i32) -> Option<&Node> {
        self.nodes.get(col, row)
    }

    /// Looks up the id of the cell at `row`, `col`.
    pub fn node_id(&self, row: i32, col: i32) -> Result<NodeId, SearchError> {
        self.node_at(row, col)
            .map(Node::id)
            .ok_or(SearchError::OutOfBounds {
                row,
                col,
                width: self.width(),
                height: self.height(),
            })
    }

    /// Whether `(x, y)` is in bounds and not an obstacle.
    #[inline]
    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        self.nodes.get(x, y).is_some_and(|node| !node.is_obstacle())
    }

    /// Whether a single step `(dx, dy)` from `(x, y)` is a move of this graph.
    ///
    /// This is the one validity rule shared by [`neighbors_with_costs`](Self::neighbors_with_costs)
    /// and jump point search, so both agree on bounds, obstacles and corner cutting.
    #[inline]
    pub fn can_step(&self, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        debug_assert!((-1..=1).contains(&dx) && (-1..=1).contains(&dy) && (dx, dy) != (0, 0));
        if !self.is_traversable(x + dx, y + dy) {
            return false;
        }
        if dx != 0 && dy != 0 {
            return self.is_traversable(x + dx, y) || self.is_traversable(x, y + dy);
        }
        true
    }

    /// The set of directions that are valid moves out of `(x, y)`.
    pub fn neighborhood(&self, x: i32, y: i32) -> EnumSet<Direction> {
        EnumSet::<Direction>::all()
            .iter()
            .filter(|dir| {
                let (dx, dy) = dir.offset();
                self.can_step(x, y, dx, dy)
            })
            .collect()
    }

    /// Adjacent nodes reachable from `id` in one move, with the cost of that move.
    #[track_caller]
    pub fn neighbors_with_costs(&self, id: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let (x, y) = self.node(id).xy();
        self.neighborhood(x, y).into_iter().map(move |dir| {
            let (dx, dy) = dir.offset();
            (self.nodes[(x + dx, y + dy)].id(), dir.cost())
        })
    }

    /// Checks that `id` is a node of this graph that a path can start or end on.
    pub fn validate_endpoint(&self, id: NodeId) -> Result<&Node, SearchError> {
        let node = self.get(id).ok_or_else(|| {
            warn!("rejected endpoint {id}: not a node of this graph");
            SearchError::UnknownNode(id)
        })?;
        if node.is_obstacle() {
            warn!("rejected endpoint ({}, {}): obstacle", node.row(), node.col());
            return Err(SearchError::Obstacle {
                row: node.row(),
                col: node.col(),
            });
        }
        Ok(node)
    }

    /// Claims the node state for a search, which runs until the returned guard is dropped.
    ///
    /// Fails with [`SearchError::GraphNotReset`] if an earlier search claimed it and
    /// [`reset`](Self::reset) has not been called since.
    pub fn begin_search(&self) -> Result<SearchGuard<'_>, SearchError> {
        if self.claimed.replace(true) {
            return Err(SearchError::GraphNotReset);
        }
        self.searching.set(true);
        Ok(SearchGuard { graph: self })
    }

    /// Whether a search over this graph is running.
    pub fn is_searching(&self) -> bool {
        self.searching.get()
    }

    /// Whether the graph is ready for a search.
    pub fn is_reset(&self) -> bool {
        !self.claimed.get()
    }

    /// Restores every node to its initial search state.
    ///
    /// Fails with [`SearchError::SearchInProgress`] when called during a search, e.g. from a
    /// progress hook.
    pub fn reset(&self) -> Result<(), SearchError> {
        if self.is_searching() {
            warn!("refusing to reset a graph while it is being searched");
            return Err(SearchError::SearchInProgress);
        }
        for node in self.nodes.storage() {
            node.reset();
        }
        self.claimed.set(false);
        Ok(())
    }

    /// Nodes that the last jump point search recorded as jump points.
    pub fn jump_points(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes().iter().filter(|node| node.is_jump_point())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::SQRT_2;

    use super::*;

    fn open(width: i32, height: i32) -> Graph {
        Graph::new(width, height, |_, _| false)
    }

    #[test]
    fn ids_are_row_major() {
        let graph = open(4, 3);
        let node = graph.node_at(2, 1).unwrap();
        assert_eq!(node.id(), NodeId::new(9));
        assert_eq!((node.row(), node.col()), (2, 1));
        assert_eq!(graph.node_id(2, 1), Ok(NodeId::new(9)));
        assert_eq!(graph.len(), 12);
    }

    #[test]
    fn interior_and_corner_neighbors() {
        let graph = open(3, 3);
        let center = graph.node_id(1, 1).unwrap();
        assert_eq!(graph.neighbors_with_costs(center).count(), 8);
        let corner = graph.node_id(0, 0).unwrap();
        let mut costs: Vec<f64> = graph.neighbors_with_costs(corner).map(|(_, c)| c).collect();
        costs.sort_by(f64::total_cmp);
        assert_eq!(costs, [1.0, 1.0, SQRT_2]);
    }

    #[test]
    fn obstacles_are_not_neighbors() {
        let graph = Graph::new(3, 1, |x, _| x == 1);
        let left = graph.node_id(0, 0).unwrap();
        assert_eq!(graph.neighbors_with_costs(left).count(), 0);
    }

    #[test]
    fn diagonal_needs_one_open_flank() {
        // .#
        // ..
        let one_flank = Graph::new(2, 2, |x, y| (x, y) == (1, 0));
        assert!(!one_flank.can_step(0, 1, 1, -1));
        assert!(one_flank.can_step(0, 0, 1, 1));

        // .#
        // #.
        let squeezed = Graph::new(2, 2, |x, y| x != y);
        assert!(!squeezed.can_step(0, 0, 1, 1));
        let start = squeezed.node_id(0, 0).unwrap();
        assert_eq!(squeezed.neighbors_with_costs(start).count(), 0);
    }

    #[test]
    fn endpoints_are_validated() {
        let graph = Graph::new(2, 2, |x, y| (x, y) == (1, 1));
        assert_eq!(
            graph.node_id(2, 0),
            Err(SearchError::OutOfBounds {
                row: 2,
                col: 0,
                width: 2,
                height: 2
            })
        );
        let blocked = graph.node_id(1, 1).unwrap();
        assert_eq!(
            graph.validate_endpoint(blocked).map(Node::id),
            Err(SearchError::Obstacle { row: 1, col: 1 })
        );
        assert_eq!(
            graph.validate_endpoint(NodeId::new(4)).map(Node::id),
            Err(SearchError::UnknownNode(NodeId::new(4)))
        );
    }

    #[test]
    fn second_search_requires_reset() {
        let graph = open(2, 2);
        assert!(graph.begin_search().is_ok());
        graph.node(NodeId::new(1)).set_cost(1.0);
        graph.node(NodeId::new(1)).set_jump_point(true);
        assert_eq!(graph.jump_points().count(), 1);
        assert_eq!(graph.begin_search().err(), Some(SearchError::GraphNotReset));

        graph.reset().unwrap();
        assert!(graph.is_reset());
        assert_eq!(graph.node(NodeId::new(1)).cost(), f64::INFINITY);
        assert_eq!(graph.jump_points().count(), 0);
        assert!(graph.begin_search().is_ok());
    }

    #[test]
    fn no_reset_while_searching() {
        let graph = open(2, 2);
        let search = graph.begin_search().unwrap();
        assert!(graph.is_searching());
        assert_eq!(graph.reset(), Err(SearchError::SearchInProgress));
        assert!(!graph.is_reset());

        drop(search);
        assert!(!graph.is_searching());
        assert_eq!(graph.reset(), Ok(()));
        assert!(graph.is_reset());
    }
}
