//! The [`Raster`] type: a dense 2D grid of values addressed by [`Cell`].
//!
//! Unlike a view type, a `Raster` owns its storage: the terrain map is
//! mutated by exactly one phase and afterwards shared read-only, so plain
//! ownership plus `&`/`&mut` borrows express the phase ordering.

use crate::geom::{Cell, Extent};

/// A row-major grid of `T` covering `[0, width) × [0, height)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Raster<T> {
    values: Vec<T>,
    bounds: Extent,
}

impl<T: Clone> Raster<T> {
    /// Create a raster of the given dimensions filled with `value`.
    pub fn filled(width: i32, height: i32, value: T) -> Self {
        let bounds = Extent::new(width, height);
        Self {
            values: vec![value; bounds.len()],
            bounds,
        }
    }
}

impl<T> Raster<T> {
    /// Build a raster by evaluating `f` at every cell, row by row.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Cell) -> T) -> Self {
        let bounds = Extent::new(width, height);
        let values = bounds.iter().map(&mut f).collect();
        Self { values, bounds }
    }

    /// Build a raster from row-major values. Returns `None` when the number
    /// of values does not match `width × height`.
    pub fn from_vec(width: i32, height: i32, values: Vec<T>) -> Option<Self> {
        let bounds = Extent::new(width, height);
        (values.len() == bounds.len()).then_some(Self { values, bounds })
    }

    /// The raster's extent.
    #[inline]
    pub fn bounds(&self) -> Extent {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height
    }

    /// Whether `c` is inside the raster.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    #[inline]
    fn index(&self, c: Cell) -> Option<usize> {
        self.bounds.offset(c)
    }

    /// Borrow the value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<&T> {
        self.index(c).map(|i| &self.values[i])
    }

    /// Overwrite the value at `c`. Returns the previous value, or `None`
    /// (and does nothing) if `c` is out of bounds.
    pub fn set(&mut self, c: Cell, value: T) -> Option<T> {
        let i = self.index(c)?;
        Some(std::mem::replace(&mut self.values[i], value))
    }

    /// Row-major iterator over `(cell, &value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.bounds.iter().zip(self.values.iter())
    }
}

impl<T: Copy> Raster<T> {
    /// Copy of the value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<T> {
        self.get(c).copied()
    }
}
