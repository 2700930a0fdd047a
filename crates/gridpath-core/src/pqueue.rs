use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::node::NodeId;
use crate::traits::Frontier;

#[derive(Clone, Copy, Debug)]
struct Entry {
    priority: f64,
    node: NodeId,
}

impl Entry {
    #[inline(always)]
    fn le(&self, other: &Entry) -> bool {
        self.priority.total_cmp(&other.priority).is_le()
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that `BinaryHeap`, a max-heap, yields the smallest priority first.
        other.priority.total_cmp(&self.priority)
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier that tolerates several pending entries for the same node.
///
/// There is no decrease-key: relaxing a node pushes a new entry and leaves the old one in place.
/// Consumers must discard popped nodes that are already closed. The order among equal priorities
/// is unspecified.
#[derive(Debug, Default)]
pub struct LazyFrontier {
    heap: BinaryHeap<Entry>,
}

impl LazyFrontier {
    /// Creates an empty frontier.
    pub fn new() -> Self {
        LazyFrontier::default()
    }
}

impl Frontier for LazyFrontier {
    fn push(&mut self, node: NodeId, priority: f64) {
        self.heap.push(Entry { priority, node });
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}

/// Min-priority frontier that knows which nodes are pending.
///
/// Each node is present at most once. Pushing a pending node again with a lower priority moves it
/// up in place; pushing it with an equal or higher priority is ignored.
#[derive(Debug, Default)]
pub struct TrackedFrontier {
    // Position of each node in `heap`, or usize::MAX if the node is not pending.
    index: Vec<usize>,
    heap: Vec<Entry>,
}

impl TrackedFrontier {
    /// Creates an empty frontier with room to track `nodes` node ids without reallocating.
    pub fn new(nodes: usize) -> Self {
        TrackedFrontier {
            index: vec![usize::MAX; nodes],
            heap: vec![],
        }
    }

    /// Whether `node` is currently pending.
    pub fn contains(&self, node: NodeId) -> bool {
        self.position(node).is_some()
    }

    /// The priority `node` is pending at, if it is pending.
    pub fn priority(&self, node: NodeId) -> Option<f64> {
        self.position(node).map(|index| self.heap[index].priority)
    }

    #[inline(always)]
    fn position(&self, node: NodeId) -> Option<usize> {
        match self.index.get(node.index()) {
            Some(&index) if index != usize::MAX => Some(index),
            _ => None,
        }
    }

    #[inline(always)]
    fn set_position(&mut self, node: NodeId, position: usize) {
        let slot = node.index();
        if slot >= self.index.len() {
            self.index.resize(slot + 1, usize::MAX);
        }
        self.index[slot] = position;
    }

    fn sift_up(&mut self, entry: Entry, mut index: usize) {
        while index > 0 {
            let parent_index = (index - 1) / 2;
            let parent = self.heap[parent_index];
            if parent.le(&entry) {
                break;
            }
            self.heap[index] = parent;
            self.set_position(parent.node, index);
            index = parent_index;
        }
        self.heap[index] = entry;
        self.set_position(entry.node, index);
    }

    fn sift_down(&mut self, entry: Entry, mut index: usize) {
        loop {
            let child_1_index = index * 2 + 1;
            if child_1_index >= self.heap.len() {
                break;
            }
            let child_1 = self.heap[child_1_index];

            let child_2_index = child_1_index + 1;
            let (child_index, child) = match self.heap.get(child_2_index) {
                Some(child_2) if !child_1.le(child_2) => (child_2_index, *child_2),
                _ => (child_1_index, child_1),
            };

            if entry.le(&child) {
                break;
            }

            self.heap[index] = child;
            self.set_position(child.node, index);
            index = child_index;
        }

        self.heap[index] = entry;
        self.set_position(entry.node, index);
    }
}

impl Frontier for TrackedFrontier {
    fn push(&mut self, node: NodeId, priority: f64) {
        let entry = Entry { priority, node };
        match self.position(node) {
            Some(index) => {
                if entry.le(&self.heap[index]) {
                    self.sift_up(entry, index);
                }
            }
            None => {
                self.heap.push(entry);
                self.sift_up(entry, self.heap.len() - 1);
            }
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        if self.heap.is_empty() {
            return None;
        }
        let ret = self.heap.swap_remove(0);
        self.index[ret.node.index()] = usize::MAX;
        if let Some(&entry) = self.heap.first() {
            self.sift_down(entry, 0);
        }
        Some(ret.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        for entry in self.heap.drain(..) {
            self.index[entry.node.index()] = usize::MAX;
        }
    }
}
