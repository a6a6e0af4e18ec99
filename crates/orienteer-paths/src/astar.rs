//! A* search over any [`AstarPather`].
//!
//! A [`Search`] owns all of its state (node table, open queue, parent
//! links), so every invocation starts clean and nothing is shared between
//! searches. The node table is a hash map keyed by [`Cell`]: most cells of a
//! large map are never discovered, so no grid-sized arrays are allocated.

use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use log::debug;
use orienteer_core::Cell;

use crate::cost::relax;
use crate::error::SearchError;
use crate::node::{Node, NodeRef};
use crate::traits::AstarPather;

/// When a search counts as having reached its goal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GoalTest {
    /// Stop as soon as the goal is generated as a neighbor.
    #[default]
    OnDiscovery,
    /// Stop when the goal is popped from the open set. Optimal whenever the
    /// heuristic never overestimates.
    OnExpansion,
}

/// Where a search stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchState {
    Expanding,
    GoalReached,
    Exhausted,
}

/// One A* run from `start` to `goal`.
pub struct Search<'p, P> {
    pather: &'p P,
    start: Cell,
    goal: Cell,
    goal_test: GoalTest,
    nodes: HashMap<Cell, Node>,
    open: BinaryHeap<NodeRef>,
    seq: u64,
    state: SearchState,
    expanded: usize,
    nbuf: Vec<Cell>,
}

impl<'p, P: AstarPather> Search<'p, P> {
    /// Initialize a search. The start cell is open with `g = 0`.
    pub fn new(pather: &'p P, start: Cell, goal: Cell, goal_test: GoalTest) -> Self {
        let f = pather.estimate(start, goal);
        let mut nodes = HashMap::new();
        nodes.insert(
            start,
            Node {
                g: 0.0,
                f,
                parent: None,
                open: true,
            },
        );
        let mut open = BinaryHeap::new();
        open.push(NodeRef {
            cell: start,
            f,
            seq: 0,
        });
        let state = if start == goal {
            SearchState::GoalReached
        } else {
            SearchState::Expanding
        };
        Self {
            pather,
            start,
            goal,
            goal_test,
            nodes,
            open,
            seq: 1,
            state,
            expanded: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Best known cost-to-reach of `c`, if discovered.
    #[inline]
    pub fn g(&self, c: Cell) -> Option<f64> {
        self.nodes.get(&c).map(|n| n.g)
    }

    /// Whether `c` has been expanded and closed.
    #[inline]
    pub fn is_closed(&self, c: Cell) -> bool {
        self.nodes.get(&c).is_some_and(|n| !n.open)
    }

    /// Every discovered cell with its current cost-to-reach.
    pub fn discovered(&self) -> impl Iterator<Item = (Cell, f64)> + '_ {
        self.nodes.iter().map(|(c, n)| (*c, n.g))
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn push(&mut self, cell: Cell, f: f64) {
        self.open.push(NodeRef {
            cell,
            f,
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Pop the open cell with the smallest `f`, skipping outdated entries.
    fn pop_open(&mut self) -> Option<Cell> {
        while let Some(entry) = self.open.pop() {
            match self.nodes.get(&entry.cell) {
                Some(n) if n.open && entry.f <= n.f => return Some(entry.cell),
                _ => continue,
            }
        }
        None
    }

    /// Expand one cell.
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Expanding {
            return self.state;
        }

        let Some(current) = self.pop_open() else {
            self.state = SearchState::Exhausted;
            return self.state;
        };

        let Some(node) = self.nodes.get_mut(&current) else {
            self.state = SearchState::Exhausted;
            return self.state;
        };
        node.open = false;
        let current_g = node.g;
        self.expanded += 1;

        if self.goal_test == GoalTest::OnExpansion && current == self.goal {
            self.state = SearchState::GoalReached;
            return self.state;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(current, &mut nbuf);

        for &np in &nbuf {
            let edge = self.pather.cost(current, np);
            let improved = match self.nodes.entry(np) {
                Entry::Vacant(slot) => {
                    let g = relax(current_g, edge, None);
                    let f = g + self.pather.estimate(np, self.goal);
                    slot.insert(Node {
                        g,
                        f,
                        parent: Some(current),
                        open: true,
                    });
                    Some(f)
                }
                // Closed cells are final.
                Entry::Occupied(slot) if !slot.get().open => None,
                Entry::Occupied(mut slot) => {
                    let n = slot.get_mut();
                    let g = relax(current_g, edge, Some(n.g));
                    if g < n.g {
                        n.f = g + (n.f - n.g);
                        n.g = g;
                        n.parent = Some(current);
                        Some(n.f)
                    } else {
                        None
                    }
                }
            };
            if let Some(f) = improved {
                self.push(np, f);
            }
            if self.goal_test == GoalTest::OnDiscovery && np == self.goal {
                self.state = SearchState::GoalReached;
                break;
            }
        }

        self.nbuf = nbuf;
        self.state
    }

    /// Step until the search terminates.
    pub fn run(&mut self) -> SearchState {
        while self.step() == SearchState::Expanding {}
        self.state
    }

    /// The start→goal path, once the goal has been reached.
    pub fn path(&self) -> Option<Vec<Cell>> {
        if self.state != SearchState::GoalReached {
            return None;
        }
        let mut path = vec![self.goal];
        let mut cur = self.goal;
        while let Some(parent) = self.nodes.get(&cur).and_then(|n| n.parent) {
            path.push(parent);
            cur = parent;
        }
        path.reverse();
        debug_assert_eq!(path.first(), Some(&self.start));
        Some(path)
    }
}

/// Compute the path from `from` to `to` with A*.
///
/// Returns the full path including both endpoints, or
/// [`SearchError::NoRoute`] if the open set empties first.
pub fn astar_path<P: AstarPather>(
    pather: &P,
    from: Cell,
    to: Cell,
    goal_test: GoalTest,
) -> Result<Vec<Cell>, SearchError> {
    let mut search = Search::new(pather, from, to, goal_test);
    let state = search.run();
    debug!(
        "A* {from} -> {to}: {state:?} after {} expansions, {} cells discovered",
        search.expanded(),
        search.nodes.len()
    );
    search.path().ok_or(SearchError::NoRoute { from, to })
}
