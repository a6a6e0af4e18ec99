use std::collections::{BinaryHeap, HashMap};

use orienteer_core::Cell;

use crate::node::NodeRef;
use crate::traits::WeightedPather;

/// Exhaustive single-source Dijkstra: the exact minimal cost from `source`
/// to every reachable cell.
///
/// Expands the whole reachable component, so it is only practical on small
/// maps. It serves as the reference the A* results are checked against.
pub fn dijkstra_costs<P: WeightedPather>(pather: &P, source: Cell) -> HashMap<Cell, f64> {
    let mut best: HashMap<Cell, f64> = HashMap::new();
    let mut done: HashMap<Cell, f64> = HashMap::new();
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq = 0u64;

    best.insert(source, 0.0);
    open.push(NodeRef {
        cell: source,
        f: 0.0,
        seq,
    });

    let mut nbuf = Vec::with_capacity(4);

    while let Some(current) = open.pop() {
        if done.contains_key(&current.cell) {
            continue;
        }
        let g = current.f;
        done.insert(current.cell, g);

        nbuf.clear();
        pather.neighbors(current.cell, &mut nbuf);
        for &np in &nbuf {
            if done.contains_key(&np) {
                continue;
            }
            let tentative = g + pather.cost(current.cell, np);
            if best.get(&np).is_some_and(|&b| tentative >= b) {
                continue;
            }
            best.insert(np, tentative);
            seq += 1;
            open.push(NodeRef {
                cell: np,
                f: tentative,
                seq,
            });
        }
    }

    done
}

/// Sum of edge costs along `path`.
pub fn path_cost<P: WeightedPather>(pather: &P, path: &[Cell]) -> f64 {
    path.windows(2).map(|w| pather.cost(w[0], w[1])).sum()
}
