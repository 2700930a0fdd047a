mod direction;
mod graph;
mod grid;
mod map;

pub mod eight_connected;

pub use self::direction::*;
pub use self::eight_connected::Heuristic;
pub use self::graph::*;
pub use self::grid::*;
pub use self::map::*;
