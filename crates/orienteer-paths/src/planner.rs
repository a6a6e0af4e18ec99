//! End-to-end route planning: seasonal pass, per-leg search, assembly.

use log::{info, warn};
use orienteer_core::{Cell, Season, TerrainMap};

use crate::astar::GoalTest;
use crate::cost::{CostModel, OPEN_LAND_SPEED};
use crate::error::PlanError;
use crate::route::{JoinMode, Route, assemble, highlights};
use crate::seasonal::{SeasonalConfig, apply_season};

/// Search tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Speed the heuristic assumes for the remaining distance.
    pub fastest_speed: f64,
    pub goal_test: GoalTest,
    pub join: JoinMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fastest_speed: OPEN_LAND_SPEED,
            goal_test: GoalTest::default(),
            join: JoinMode::default(),
        }
    }
}

/// Everything a [`Planner`] can be tuned with.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanConfig {
    pub search: SearchConfig,
    pub seasonal: SeasonalConfig,
}

/// The outcome of a successful [`Planner::plan`].
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub season: Season,
    pub route: Route,
    /// Cells the seasonal pass reclassified, in the order they changed.
    pub reclassified: Vec<Cell>,
    /// Cells around the waypoints to emphasize when rendering.
    pub highlights: Vec<Cell>,
}

impl Plan {
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.route.total_length
    }

    /// Total length rounded to the nearest meter.
    #[inline]
    pub fn rounded_length(&self) -> i64 {
        self.route.rounded_length()
    }
}

/// Runs the planning phases in order over a caller-owned map.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    config: PlanConfig,
}

impl Planner {
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// The cost model this planner uses for `season`.
    pub fn cost_model(&self, season: Season) -> CostModel {
        CostModel::new(season).with_fastest_speed(self.config.search.fastest_speed)
    }

    /// Plan a route through `waypoints` in `season`.
    ///
    /// Waypoints are checked before anything else, so a bad list leaves the
    /// map untouched. In spring and winter the map is reclassified in place
    /// before the first search.
    pub fn plan(
        &self,
        map: &mut TerrainMap,
        season: Season,
        waypoints: &[Cell],
    ) -> Result<Plan, PlanError> {
        map.validate_waypoints(waypoints)?;
        info!(
            "planning {} waypoints on a {}x{} map in {season}",
            waypoints.len(),
            map.width(),
            map.height()
        );

        let cost = self.cost_model(season);
        if !cost.heuristic_is_admissible() {
            warn!(
                "fastest speed {} is below the fastest terrain; routes may be suboptimal",
                cost.fastest_speed()
            );
        }

        let reclassified = apply_season(map, season, &self.config.seasonal);

        let search = &self.config.search;
        let route = assemble(map, &cost, waypoints, search.goal_test, search.join)?;
        let highlights = highlights(map, waypoints);

        Ok(Plan {
            season,
            route,
            reclassified,
            highlights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orienteer_core::{CellScale, ConfigError, Raster, Terrain};

    /// A lake in the middle column of a 9x5 open field.
    fn lake() -> TerrainMap {
        let raster = Raster::from_fn(9, 5, |c| {
            if c.x == 4 && c.y < 4 { Terrain::Water } else { Terrain::OpenLand }
        });
        TerrainMap::flat(raster, CellScale::default())
    }

    #[test]
    fn summer_plan_leaves_map_alone() {
        let mut map = lake();
        let before = map.clone();
        let plan = Planner::default()
            .plan(&mut map, Season::Summer, &[Cell::new(0, 0), Cell::new(8, 0)])
            .unwrap();
        assert_eq!(map, before);
        assert!(plan.reclassified.is_empty());
        assert_eq!(plan.route.cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(plan.route.cells.last(), Some(&Cell::new(8, 0)));
        // Around the lake through the open bottom row.
        assert!(plan.route.cells.contains(&Cell::new(4, 4)));
        assert_eq!(plan.rounded_length(), plan.total_length().round() as i64);
        assert_eq!(plan.highlights.len(), 6);
    }

    #[test]
    fn spring_plan_reclassifies_before_searching() {
        let mut map = lake();
        let plan = Planner::default()
            .plan(&mut map, Season::Spring, &[Cell::new(0, 0), Cell::new(8, 0)])
            .unwrap();
        assert!(!plan.reclassified.is_empty());
        for &c in &plan.reclassified {
            assert_eq!(map.terrain(c), Some(Terrain::Mud));
        }
        // The flat field is small enough to be entirely muddy.
        assert_eq!(map.terrain(Cell::new(0, 0)), Some(Terrain::Mud));

        let summer = Planner::default()
            .plan(&mut lake(), Season::Summer, &[Cell::new(0, 0), Cell::new(8, 0)])
            .unwrap();
        assert!(plan.route.total_time > summer.route.total_time);
    }

    #[test]
    fn bad_waypoints_fail_before_the_seasonal_pass() {
        let mut map = lake();
        let before = map.clone();
        let err = Planner::default()
            .plan(&mut map, Season::Spring, &[Cell::new(0, 0), Cell::new(9, 0)])
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Config(ConfigError::WaypointOutOfBounds { index: 1, .. })
        ));
        assert_eq!(map, before);
    }

    #[test]
    fn dedupe_is_configurable() {
        let config = PlanConfig {
            search: SearchConfig {
                join: JoinMode::Deduplicate,
                ..SearchConfig::default()
            },
            ..PlanConfig::default()
        };
        let waypoints = [Cell::new(0, 4), Cell::new(2, 4), Cell::new(6, 4)];
        let kept = Planner::default()
            .plan(&mut lake(), Season::Summer, &waypoints)
            .unwrap();
        let merged = Planner::new(config)
            .plan(&mut lake(), Season::Summer, &waypoints)
            .unwrap();
        assert_eq!(kept.route.cells.len(), merged.route.cells.len() + 1);
        assert_eq!(kept.rounded_length(), merged.rounded_length());
    }

    #[test]
    fn faster_terrain_than_assumed_still_plans() {
        let raster = Raster::filled(4, 1, Terrain::Footpath);
        let mut map = TerrainMap::flat(raster, CellScale::default());
        let planner = Planner::default();
        assert!(!planner.cost_model(Season::Summer).heuristic_is_admissible());
        let plan = planner
            .plan(&mut map, Season::Summer, &[Cell::new(0, 0), Cell::new(3, 0)])
            .unwrap();
        assert_eq!(plan.route.cells.len(), 4);
    }
}
