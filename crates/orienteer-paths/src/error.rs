//! Search and planning failures.

use orienteer_core::{Cell, ConfigError, Season, Terrain};
use thiserror::Error;

/// Why a single start→goal search produced no path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The open set emptied before the goal was reached.
    #[error("no route from {from} to {to}")]
    NoRoute { from: Cell, to: Cell },
    /// An endpoint sits on terrain with no speed this season, so no search
    /// was attempted.
    #[error("{cell} is {terrain}, which is impassable in {season}")]
    ImpassableEndpoint {
        cell: Cell,
        terrain: Terrain,
        season: Season,
    },
}

impl SearchError {
    /// Whether this failure was detected before searching.
    pub fn is_impassable_endpoint(&self) -> bool {
        matches!(self, SearchError::ImpassableEndpoint { .. })
    }
}

/// Why a full multi-waypoint plan failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The waypoint pair `(leg, leg + 1)` could not be connected. No partial
    /// route is returned.
    #[error("leg {leg} from waypoint {from} to {to} failed: {source}")]
    Leg {
        leg: usize,
        from: Cell,
        to: Cell,
        source: SearchError,
    },
}
