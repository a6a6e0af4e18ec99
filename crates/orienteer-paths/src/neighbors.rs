use orienteer_core::{Cell, Extent};

/// Cached neighbor computation helper.
///
/// Enumerates the 4-connected or 8-connected neighbors of a cell that lie
/// inside a fixed extent and satisfy a predicate.
pub struct Neighbors {
    bounds: Extent,
    buf: Vec<Cell>,
}

impl Neighbors {
    /// Create a helper restricted to `bounds`.
    pub fn new(bounds: Extent) -> Self {
        Self {
            bounds,
            buf: Vec::with_capacity(8),
        }
    }

    /// In-bounds 4-connected neighbors of `c` for which `keep` returns `true`.
    pub fn cardinal(&mut self, c: Cell, keep: impl Fn(Cell) -> bool) -> &[Cell] {
        self.buf.clear();
        for n in c.neighbors_4() {
            if self.bounds.contains(n) && keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// In-bounds 8-connected neighbors of `c` for which `keep` returns `true`.
    pub fn all(&mut self, c: Cell, keep: impl Fn(Cell) -> bool) -> &[Cell] {
        self.buf.clear();
        for n in c.neighbors_8() {
            if self.bounds.contains(n) && keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
