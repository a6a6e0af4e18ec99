//! The terrain map: co-indexed elevation and terrain rasters plus the
//! physical size of one cell.

use crate::error::ConfigError;
use crate::geom::{Axis, Cell, Extent};
use crate::grid::Raster;
use crate::terrain::Terrain;

/// Physical extent of one raster cell, in meters. The two axes differ, so
/// every distance computation goes through this type.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CellScale {
    pub x_m: f64,
    pub y_m: f64,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            x_m: 10.29,
            y_m: 7.55,
        }
    }
}

impl CellScale {
    /// Half the cell dimension crossed by a move along `axis`.
    #[inline]
    pub fn half_extent(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x_m / 2.0,
            Axis::Vertical => self.y_m / 2.0,
        }
    }

    /// The larger of the two half extents.
    #[inline]
    pub fn max_half_extent(self) -> f64 {
        self.x_m.max(self.y_m) / 2.0
    }

    /// 3-D straight-line distance between two cells at the given
    /// elevations. Elevation is already in meters and is not scaled.
    #[inline]
    pub fn distance(self, a: Cell, a_elevation: f64, b: Cell, b_elevation: f64) -> f64 {
        let dx = f64::from(a.x - b.x) * self.x_m;
        let dy = f64::from(a.y - b.y) * self.y_m;
        let dh = a_elevation - b_elevation;
        (dx * dx + dy * dy + dh * dh).sqrt()
    }
}

/// Elevation (meters) and terrain category for every cell of a rectangular
/// domain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainMap {
    elevation: Raster<f64>,
    terrain: Raster<Terrain>,
    scale: CellScale,
}

impl TerrainMap {
    /// Pair an elevation raster with a terrain raster of the same extent.
    pub fn new(
        elevation: Raster<f64>,
        terrain: Raster<Terrain>,
        scale: CellScale,
    ) -> Result<Self, ConfigError> {
        if elevation.bounds() != terrain.bounds() {
            return Err(ConfigError::ShapeMismatch {
                elevation: (elevation.width(), elevation.height()),
                terrain: (terrain.width(), terrain.height()),
            });
        }
        Ok(Self {
            elevation,
            terrain,
            scale,
        })
    }

    /// A flat map (elevation 0 everywhere) built from a terrain raster.
    pub fn flat(terrain: Raster<Terrain>, scale: CellScale) -> Self {
        let elevation = Raster::filled(terrain.width(), terrain.height(), 0.0);
        Self {
            elevation,
            terrain,
            scale,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Extent {
        self.terrain.bounds()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.terrain.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.terrain.height()
    }

    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.terrain.contains(c)
    }

    #[inline]
    pub fn scale(&self) -> CellScale {
        self.scale
    }

    #[inline]
    pub fn terrain(&self, c: Cell) -> Option<Terrain> {
        self.terrain.at(c)
    }

    #[inline]
    pub fn elevation(&self, c: Cell) -> Option<f64> {
        self.elevation.at(c)
    }

    /// The terrain raster, e.g. for recoloring after the seasonal pass.
    pub fn terrain_raster(&self) -> &Raster<Terrain> {
        &self.terrain
    }

    /// Change the category of `c`, returning the previous one.
    ///
    /// Only the seasonal transformer reclassifies cells, and it does so
    /// before any search reads the map.
    pub fn reclassify(&mut self, c: Cell, terrain: Terrain) -> Option<Terrain> {
        self.terrain.set(c, terrain)
    }

    /// 3-D straight-line distance between two in-bounds cells.
    pub fn distance(&self, a: Cell, b: Cell) -> Option<f64> {
        let ha = self.elevation(a)?;
        let hb = self.elevation(b)?;
        Some(self.scale.distance(a, ha, b, hb))
    }

    /// Check that a waypoint list describes a route on this map: at least
    /// two entries, every one in bounds.
    pub fn validate_waypoints(&self, waypoints: &[Cell]) -> Result<(), ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints(waypoints.len()));
        }
        if let Some((index, &cell)) = waypoints
            .iter()
            .enumerate()
            .find(|(_, c)| !self.contains(**c))
        {
            return Err(ConfigError::WaypointOutOfBounds {
                index,
                cell,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}
