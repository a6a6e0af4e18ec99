//! **orienteer-core**: data model for seasonal orienteering route planning.
//!
//! This crate provides the foundational types shared by the planner and its
//! front ends: raster geometry, the terrain palette, the season selector and
//! the [`TerrainMap`] that pairs elevation with terrain categories.

pub mod error;
pub mod geom;
pub mod grid;
pub mod map;
pub mod season;
pub mod terrain;

pub use error::ConfigError;
pub use geom::{Axis, Cell, Extent};
pub use grid::Raster;
pub use map::{CellScale, TerrainMap};
pub use season::Season;
pub use terrain::{Rgb, Terrain};
