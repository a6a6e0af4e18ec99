//! Input validation errors.

use thiserror::Error;

use crate::geom::Cell;

/// A run request that cannot be processed as given. Raised before any
/// terrain mutation or search takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown season {0:?} (expected summer, fall, winter or spring)")]
    UnknownSeason(String),
    #[error("a route needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("waypoint #{index} at {cell} lies outside the {width}x{height} map")]
    WaypointOutOfBounds {
        index: usize,
        cell: Cell,
        width: i32,
        height: i32,
    },
    #[error("elevation raster is {elevation:?} but terrain raster is {terrain:?}")]
    ShapeMismatch {
        elevation: (i32, i32),
        terrain: (i32, i32),
    },
}
