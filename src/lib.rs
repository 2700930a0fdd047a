//! Shortest paths on 8-connected grid maps.
//!
//! Three algorithms share one result and statistics contract, [`traits::ShortestPathSearch`]:
//! [`Dijkstra`], [`AStar`] and jump point search ([`Jps`]). Each borrows a [`Graph`], writes its
//! search state into the graph's nodes, and reports the path, the number of visited nodes, the
//! elapsed time and how the run ended. Runs can be cancelled cooperatively through a
//! [`StopToken`] and observed through a progress hook.
//!
//! ```
//! use gridpath::traits::ShortestPathSearch;
//! use gridpath::{AStar, Graph};
//!
//! let graph: Graph = "....\n.##.\n....".parse().unwrap();
//! let start = graph.node_id(0, 0).unwrap();
//! let end = graph.node_id(2, 3).unwrap();
//!
//! let mut astar = AStar::new(&graph);
//! let path = astar.find_shortest_path(start, end).unwrap();
//! assert_eq!(path.len(), astar.path_node_count());
//! assert_eq!(astar.rounded_path_cost(), 4.4);
//! ```

mod astar;
mod dijkstra;

pub use gridpath_core::*;
pub use gridpath_grid as grid;
pub use gridpath_jps as jps;

pub use gridpath_grid::{Graph, Heuristic};
pub use gridpath_jps::Jps;

pub use self::astar::AStar;
pub use self::dijkstra::Dijkstra;
