use enumset::EnumSet;
use gridpath_core::NodeId;
use gridpath_grid::{Direction, Graph};

mod jps;

pub use self::jps::*;

/// Direction of travel from `from` to `to`: the sign of each coordinate difference.
///
/// Jump point search links collinear jump points, so the result is the direction of the last
/// step taken to reach `to`.
pub fn travel_direction(from: (i32, i32), to: (i32, i32)) -> Option<Direction> {
    Direction::from_offset((to.0 - from.0).signum(), (to.1 - from.1).signum())
}

/// Directions worth exploring from `(x, y)` when it was reached travelling in `going`.
///
/// Without a travel direction (the start node) every valid move is kept. Otherwise only the
/// natural successors in the travel direction are kept, plus forced neighbors: cells that are
/// only reachable optimally through `(x, y)` because an obstacle next to it blocks the path that
/// would otherwise bypass it.
///
/// The returned directions are candidates only; [`Jps`] checks each first step against
/// [`Graph::can_step`].
pub fn pruned_directions(
    graph: &Graph,
    (x, y): (i32, i32),
    going: Option<Direction>,
) -> EnumSet<Direction> {
    let Some(going) = going else {
        return graph.neighborhood(x, y);
    };
    let (dx, dy) = going.offset();
    let free = |ox: i32, oy: i32| graph.is_traversable(x + ox, y + oy);

    let mut successors = EnumSet::empty();
    let mut keep = |ox: i32, oy: i32, condition: bool| {
        if condition {
            if let Some(dir) = Direction::from_offset(ox, oy) {
                successors |= dir;
            }
        }
    };

    if dx != 0 && dy != 0 {
        keep(0, dy, free(0, dy));
        keep(dx, 0, free(dx, 0));
        keep(dx, dy, free(dx, dy));
        keep(-dx, dy, !free(-dx, 0) && free(-dx, dy));
        keep(dx, -dy, !free(0, -dy) && free(dx, -dy));
    } else if dx == 0 {
        keep(0, dy, free(0, dy));
        keep(1, dy, !free(1, 0) && free(1, dy));
        keep(-1, dy, !free(-1, 0) && free(-1, dy));
    } else {
        keep(dx, 0, free(dx, 0));
        keep(dx, 1, !free(0, 1) && free(dx, 1));
        keep(dx, -1, !free(0, -1) && free(dx, -1));
    }

    successors
}

/// Expands a path of collinear waypoints into the cell-by-cell path it stands for.
///
/// Jump point search returns only jump points; renderers and step-wise consumers want every
/// traversed cell.
///
/// # Panics
///
/// Panics if a waypoint is not a node of `graph`.
#[track_caller]
pub fn expand_waypoints(graph: &Graph, waypoints: &[NodeId]) -> Vec<NodeId> {
    let mut cells = Vec::with_capacity(waypoints.len());
    let Some(&first) = waypoints.first() else {
        return cells;
    };
    cells.push(first);

    for pair in waypoints.windows(2) {
        let (mut x, mut y) = graph.node(pair[0]).xy();
        let (tx, ty) = graph.node(pair[1]).xy();
        debug_assert!(
            x == tx || y == ty || (tx - x).abs() == (ty - y).abs(),
            "waypoints must be collinear"
        );
        while (x, y) != (tx, ty) {
            x += (tx - x).signum();
            y += (ty - y).signum();
            if let Some(node) = graph.node_xy(x, y) {
                cells.push(node.id());
            }
        }
    }

    cells
}
