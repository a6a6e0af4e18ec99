//! Stitching per-leg searches into one route across a waypoint list.

use std::collections::BTreeSet;

use log::{debug, info};
use orienteer_core::{Cell, TerrainMap};

use crate::astar::GoalTest;
use crate::cost::CostModel;
use crate::dijkstra::path_cost;
use crate::error::PlanError;
use crate::pather::TerrainPather;

/// How consecutive legs are joined at their shared waypoint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JoinMode {
    /// Concatenate legs as found; each intermediate waypoint appears twice.
    #[default]
    KeepBoundaries,
    /// Drop the leading cell of every leg after the first.
    Deduplicate,
}

/// The path between two consecutive waypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub from: Cell,
    pub to: Cell,
    /// Both endpoints included.
    pub cells: Vec<Cell>,
    /// Traversal time in edge-time units.
    pub time: f64,
    /// Physical length in meters.
    pub length: f64,
}

/// A complete route through every waypoint, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub cells: Vec<Cell>,
    pub legs: Vec<Leg>,
    pub total_length: f64,
    pub total_time: f64,
}

impl Route {
    /// Total length rounded to the nearest meter.
    pub fn rounded_length(&self) -> i64 {
        self.total_length.round() as i64
    }
}

/// Sum of 3-D distances between consecutive cells of `path`. Out-of-bounds
/// cells contribute nothing.
pub fn path_length(map: &TerrainMap, path: &[Cell]) -> f64 {
    path.windows(2)
        .filter_map(|w| map.distance(w[0], w[1]))
        .sum()
}

/// Search every consecutive waypoint pair and concatenate the results.
///
/// Any leg that cannot be connected fails the whole assembly; no partial
/// route is returned.
pub fn assemble(
    map: &TerrainMap,
    cost: &CostModel,
    waypoints: &[Cell],
    goal_test: GoalTest,
    join: JoinMode,
) -> Result<Route, PlanError> {
    map.validate_waypoints(waypoints)?;
    let pather = TerrainPather::new(map, cost);

    let mut legs = Vec::with_capacity(waypoints.len() - 1);
    for (i, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let cells = pather
            .find_path(from, to, goal_test)
            .map_err(|source| PlanError::Leg {
                leg: i,
                from,
                to,
                source,
            })?;
        let leg = Leg {
            from,
            to,
            time: path_cost(&pather, &cells),
            length: path_length(map, &cells),
            cells,
        };
        debug!(
            "leg {i} {from} -> {to}: {} cells, {:.1} m",
            leg.cells.len(),
            leg.length
        );
        legs.push(leg);
    }

    let mut cells = Vec::with_capacity(legs.iter().map(|l| l.cells.len()).sum());
    for (i, leg) in legs.iter().enumerate() {
        let skip = usize::from(i > 0 && join == JoinMode::Deduplicate);
        cells.extend_from_slice(&leg.cells[skip..]);
    }

    let route = Route {
        total_length: path_length(map, &cells),
        total_time: legs.iter().map(|l| l.time).sum(),
        cells,
        legs,
    };
    info!(
        "assembled {} legs, {} cells, {:.1} m",
        route.legs.len(),
        route.cells.len(),
        route.total_length
    );
    Ok(route)
}

/// The 8-neighborhood of every waypoint, clipped to the map, without
/// duplicates and without the waypoints themselves.
pub fn highlights(map: &TerrainMap, waypoints: &[Cell]) -> Vec<Cell> {
    let own: BTreeSet<Cell> = waypoints.iter().copied().collect();
    let ring: BTreeSet<Cell> = waypoints
        .iter()
        .flat_map(|w| w.neighbors_8())
        .filter(|c| map.contains(*c) && !own.contains(c))
        .collect();
    ring.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use orienteer_core::{CellScale, ConfigError, Raster, Season, Terrain};

    fn strip(w: i32) -> TerrainMap {
        let elevation = Raster::from_fn(w, 1, |c| f64::from(c.x % 3));
        let terrain = Raster::filled(w, 1, Terrain::OpenLand);
        TerrainMap::new(elevation, terrain, CellScale::default()).unwrap()
    }

    #[test]
    fn legs_concatenate() {
        let map = strip(10);
        let cost = CostModel::new(Season::Summer);
        let (a, b, c) = (Cell::new(0, 0), Cell::new(4, 0), Cell::new(6, 0));

        let kept = assemble(&map, &cost, &[a, b, c], GoalTest::OnDiscovery, JoinMode::KeepBoundaries)
            .unwrap();
        assert_eq!(kept.legs[0].cells.len(), 5);
        assert_eq!(kept.legs[1].cells.len(), 3);
        assert_eq!(kept.cells.len(), 8);
        assert_eq!(kept.cells[4], b);
        assert_eq!(kept.cells[5], b);

        let merged = assemble(&map, &cost, &[a, b, c], GoalTest::OnDiscovery, JoinMode::Deduplicate)
            .unwrap();
        assert_eq!(merged.cells.len(), 7);
        assert_eq!(merged.cells.first(), Some(&a));
        assert_eq!(merged.cells.last(), Some(&c));

        let legs: f64 = kept.legs.iter().map(|l| l.length).sum();
        assert!((kept.total_length - legs).abs() < 1e-9);
        assert!((merged.total_length - legs).abs() < 1e-9);
        assert!((kept.total_time - merged.total_time).abs() < 1e-12);
    }

    #[test]
    fn length_includes_elevation() {
        let map = strip(3);
        let path = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
        let step = (10.29f64 * 10.29 + 1.0).sqrt();
        assert!((path_length(&map, &path) - 2.0 * step).abs() < 1e-9);
        assert_eq!(path_length(&map, &path[..1]), 0.0);
    }

    #[test]
    fn failed_leg_is_identified() {
        let raster = Raster::from_fn(5, 1, |c| {
            if c.x == 3 { Terrain::Water } else { Terrain::OpenLand }
        });
        let map = TerrainMap::flat(raster, CellScale::default());
        let cost = CostModel::new(Season::Summer);
        let waypoints = [Cell::new(0, 0), Cell::new(2, 0), Cell::new(4, 0)];
        let err = assemble(&map, &cost, &waypoints, GoalTest::OnDiscovery, JoinMode::KeepBoundaries)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::Leg {
                leg: 1,
                from: Cell::new(2, 0),
                to: Cell::new(4, 0),
                source: SearchError::NoRoute {
                    from: Cell::new(2, 0),
                    to: Cell::new(4, 0)
                },
            }
        );
    }

    #[test]
    fn waypoints_are_validated() {
        let map = strip(3);
        let cost = CostModel::new(Season::Summer);
        let err = assemble(&map, &cost, &[Cell::new(0, 0)], GoalTest::OnDiscovery, JoinMode::KeepBoundaries)
            .unwrap_err();
        assert_eq!(err, PlanError::Config(ConfigError::TooFewWaypoints(1)));
    }

    #[test]
    fn rounded_length() {
        let map = strip(3);
        let cost = CostModel::new(Season::Summer);
        let route = assemble(
            &map,
            &cost,
            &[Cell::new(0, 0), Cell::new(2, 0)],
            GoalTest::OnDiscovery,
            JoinMode::KeepBoundaries,
        )
        .unwrap();
        // 2 * sqrt(10.29^2 + 1) = 20.677...
        assert_eq!(route.rounded_length(), 21);
    }

    #[test]
    fn highlight_ring() {
        let map = TerrainMap::flat(Raster::filled(4, 4, Terrain::OpenLand), CellScale::default());
        let corner = highlights(&map, &[Cell::new(0, 0), Cell::new(3, 3)]);
        assert_eq!(corner.len(), 6);
        assert!(!corner.contains(&Cell::new(0, 0)));

        // Overlapping rings are merged and waypoints never highlight each other.
        let pair = highlights(&map, &[Cell::new(1, 1), Cell::new(2, 1)]);
        assert!(!pair.contains(&Cell::new(1, 1)));
        assert!(!pair.contains(&Cell::new(2, 1)));
        assert_eq!(pair.len(), 10);
    }
}
