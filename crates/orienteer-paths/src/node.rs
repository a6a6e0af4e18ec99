use std::cmp::Ordering;

use orienteer_core::Cell;

// ---------------------------------------------------------------------------
// Per-search node record
// ---------------------------------------------------------------------------

/// What one search knows about a discovered cell. `g` and `f` only ever
/// decrease; `parent` follows the most favorable predecessor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: Option<Cell>,
    /// `true` while in the open set, `false` once closed.
    pub(crate) open: bool,
}

// ---------------------------------------------------------------------------
// Priority queue entry
// ---------------------------------------------------------------------------

/// Entry in a priority queue, ordered so that `BinaryHeap` (a max-heap)
/// pops the smallest `f` first and, among equal `f`, the earliest pushed.
///
/// Entries are never removed when a node improves: a fresh entry is pushed
/// and the outdated one is skipped when popped.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) cell: Cell,
    pub(crate) f: f64,
    pub(crate) seq: u64,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
