use log::warn;

use crate::error::SearchError;
use crate::node::{Node, NodeId};

/// Follows parent links from `end` back to the parentless start node and returns the path from
/// start to end inclusive.
///
/// `nodes` is the storage the ids index into. The walk is bounded by `nodes.len()`, since a valid
/// chain cannot hold more nodes than exist; a longer chain means the parent links form a cycle and
/// is reported as [`SearchError::BrokenParentChain`].
pub fn reconstruct_path(nodes: &[Node], end: NodeId) -> Result<Vec<NodeId>, SearchError> {
    let limit = nodes.len();
    let mut path = vec![end];
    let mut current = end;

    loop {
        let node = nodes
            .get(current.index())
            .ok_or(SearchError::UnknownNode(current))?;
        let Some(parent) = node.parent() else {
            break;
        };
        if path.len() >= limit {
            warn!("parent chain from {end} exceeds {limit} nodes");
            return Err(SearchError::BrokenParentChain { from: end, limit });
        }
        path.push(parent);
        current = parent;
    }

    path.reverse();
    Ok(path)
}
