use std::cell::Cell;
use std::fmt;

/// Identity of a [`Node`]: its index within the storage that owns it.
///
/// Parent links are stored as `NodeId`s rather than references, so a node never owns or borrows
/// the node it was reached from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates an id referring to slot `index` of the owning storage.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the storage slot this id refers to.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grid cell together with the search state attached to it.
///
/// The coordinates and obstacle flag are fixed at construction. The remaining fields are
/// per-search state behind [`Cell`]s, so that an algorithm holding a shared reference to the
/// owning graph can update them. [`Node::reset`] restores that state.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    row: i32,
    col: i32,
    obstacle: bool,
    cost: Cell<f64>,
    parent: Cell<Option<NodeId>>,
    visited: Cell<bool>,
    jump_point: Cell<bool>,
}

impl Node {
    /// Creates a node in its initial search state.
    pub fn new(id: NodeId, row: i32, col: i32, obstacle: bool) -> Self {
        Node {
            id,
            row,
            col,
            obstacle,
            cost: Cell::new(f64::INFINITY),
            parent: Cell::new(None),
            visited: Cell::new(false),
            jump_point: Cell::new(false),
        }
    }

    /// Identity of this node within its graph.
    #[inline(always)]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Row (y coordinate) of the cell.
    #[inline(always)]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Column (x coordinate) of the cell.
    #[inline(always)]
    pub fn col(&self) -> i32 {
        self.col
    }

    /// The cell position as `(x, y)`, i.e. `(col, row)`.
    #[inline(always)]
    pub fn xy(&self) -> (i32, i32) {
        (self.col, self.row)
    }

    /// Whether the cell is blocked.
    #[inline(always)]
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Accumulated (Dijkstra) or heuristic-biased (A*, JPS) cost. `+inf` until reached.
    #[inline(always)]
    pub fn cost(&self) -> f64 {
        self.cost.get()
    }

    /// Sets the node cost.
    #[inline(always)]
    pub fn set_cost(&self, cost: f64) {
        self.cost.set(cost);
    }

    /// The node this one was reached from in the current search.
    #[inline(always)]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.get()
    }

    /// Sets the parent link.
    #[inline(always)]
    pub fn set_parent(&self, parent: Option<NodeId>) {
        debug_assert!(parent != Some(self.id), "node cannot be its own parent");
        self.parent.set(parent);
    }

    /// Whether the node has been finalized (closed) in the current search.
    #[inline(always)]
    pub fn is_visited(&self) -> bool {
        self.visited.get()
    }

    /// Sets the closed-set flag.
    #[inline(always)]
    pub fn set_visited(&self, visited: bool) {
        self.visited.set(visited);
    }

    /// Whether jump point search recorded this node as a jump point.
    #[inline(always)]
    pub fn is_jump_point(&self) -> bool {
        self.jump_point.get()
    }

    /// Sets the jump point annotation.
    #[inline(always)]
    pub fn set_jump_point(&self, jump_point: bool) {
        self.jump_point.set(jump_point);
    }

    /// Restores the initial search state. Coordinates and obstacle flag are untouched.
    pub fn reset(&self) {
        self.cost.set(f64::INFINITY);
        self.parent.set(None);
        self.visited.set(false);
        self.jump_point.set(false);
    }
}
