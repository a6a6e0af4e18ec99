//! Terrain-aware route planning for orienteering maps.
//!
//! This crate holds the algorithms that run over an
//! [`orienteer_core::TerrainMap`]:
//!
//! - the season-dependent **cost model** ([`CostModel`]) timing every
//!   4-connected move from elevation and terrain speeds
//! - the **seasonal transformer** ([`apply_season`]) turning ground near
//!   water into mud in spring and ice in winter
//! - **A\*** search ([`Search`], [`astar_path`]) with lazy deletion and
//!   a configurable goal test
//! - the **route assembler** ([`assemble`]) chaining one search per
//!   waypoint pair
//! - a [`Planner`] running all of the above in order
//!
//! An exhaustive [`dijkstra_costs`] search is kept as the reference for
//! checking A* results on small maps.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra, path costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod cost;
mod dijkstra;
mod error;
mod neighbors;
mod node;
mod pather;
mod planner;
mod route;
mod seasonal;
mod traits;

pub use astar::{GoalTest, Search, SearchState, astar_path};
pub use cost::{CostModel, OPEN_LAND_SPEED, SpeedTable, relax};
pub use dijkstra::{dijkstra_costs, path_cost};
pub use error::{PlanError, SearchError};
pub use neighbors::Neighbors;
pub use pather::TerrainPather;
pub use planner::{Plan, PlanConfig, Planner, SearchConfig};
pub use route::{JoinMode, Leg, Route, assemble, highlights, path_length};
pub use seasonal::{
    FillRule, SeasonalConfig, apply_season, spread, spread_mud, spread_snow,
    water_adjacent_cells,
};
pub use traits::{AstarPather, Pather, WeightedPather};
