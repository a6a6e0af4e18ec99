//! Input loading failures.

use std::path::PathBuf;

use orienteer_core::ConfigError;
use thiserror::Error;

/// Why an input file could not be turned into planner input, or the output
/// image could not be written.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode terrain image: {0}")]
    Image(#[from] image::ImageError),
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("elevation line {line}: {token:?} is not a number")]
    BadElevation { line: usize, token: String },
    #[error("elevation line {line} has {found} values, the map is {width} wide")]
    ShortRow {
        line: usize,
        found: usize,
        width: usize,
    },
    #[error("elevation has {found} rows, the map is {height} high")]
    TooFewRows { found: usize, height: usize },
    #[error("waypoint coordinate {token:?} is not an integer")]
    BadWaypoint { token: String },
    #[error("waypoint list ends with an unpaired coordinate")]
    UnpairedWaypoint,
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
