use orienteer_core::Cell;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the cells reachable in one step from `c` into `buf`. The
    /// caller clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to the adjacent `to`. Must be ≥ 0.
    fn cost(&self, from: Cell, to: Cell) -> f64;
}

/// Pather with a heuristic estimate of remaining cost, as used by A*.
pub trait AstarPather: WeightedPather {
    /// Estimated cost from `from` to `to`. Search results are optimal only
    /// when this never overestimates.
    fn estimate(&self, from: Cell, to: Cell) -> f64;
}
