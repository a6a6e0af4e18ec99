//! The [`CostModel`] over a [`TerrainMap`], seen through the pather traits.

use orienteer_core::{Cell, TerrainMap};

use crate::astar::{GoalTest, astar_path};
use crate::cost::CostModel;
use crate::error::SearchError;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// 4-connected movement over passable terrain, timed by a [`CostModel`].
#[derive(Clone, Copy)]
pub struct TerrainPather<'a> {
    map: &'a TerrainMap,
    cost: &'a CostModel,
}

impl<'a> TerrainPather<'a> {
    pub fn new(map: &'a TerrainMap, cost: &'a CostModel) -> Self {
        Self { map, cost }
    }

    /// Whether `c` is in bounds and its category has a configured speed.
    #[inline]
    pub fn passable(&self, c: Cell) -> bool {
        self.map
            .terrain(c)
            .is_some_and(|t| self.cost.is_passable(t))
    }

    fn check_endpoint(&self, c: Cell) -> Result<(), SearchError> {
        match self.map.terrain(c) {
            Some(terrain) if !self.cost.is_passable(terrain) => {
                Err(SearchError::ImpassableEndpoint {
                    cell: c,
                    terrain,
                    season: self.cost.season(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Minimum-time path from `from` to `to`. Impassable endpoints are
    /// reported without searching.
    pub fn find_path(
        &self,
        from: Cell,
        to: Cell,
        goal_test: GoalTest,
    ) -> Result<Vec<Cell>, SearchError> {
        if !self.map.contains(from) || !self.map.contains(to) {
            return Err(SearchError::NoRoute { from, to });
        }
        self.check_endpoint(from)?;
        self.check_endpoint(to)?;
        astar_path(self, from, to, goal_test)
    }
}

impl Pather for TerrainPather<'_> {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        buf.extend(c.neighbors_4().into_iter().filter(|&n| self.passable(n)));
    }
}

impl WeightedPather for TerrainPather<'_> {
    fn cost(&self, from: Cell, to: Cell) -> f64 {
        // neighbors() only yields passable cells, so this is always defined
        // during search.
        self.cost
            .edge_time(self.map, from, to)
            .unwrap_or(f64::INFINITY)
    }
}

impl AstarPather for TerrainPather<'_> {
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        self.cost.heuristic(self.map, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::{Search, SearchState};
    use crate::cost::SpeedTable;
    use crate::dijkstra::{dijkstra_costs, path_cost};
    use orienteer_core::{CellScale, Raster, Season, Terrain};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn open_map(w: i32, h: i32) -> TerrainMap {
        TerrainMap::flat(Raster::filled(w, h, Terrain::OpenLand), CellScale::default())
    }

    fn assert_4_connected(path: &[Cell]) {
        for w in path.windows(2) {
            assert!(w[0].axis_to(w[1]).is_some(), "{} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn trivial_three_by_three() {
        let map = open_map(3, 3);
        let cost = CostModel::new(Season::Summer);
        let pather = TerrainPather::new(&map, &cost);
        let path = pather
            .find_path(Cell::new(0, 0), Cell::new(2, 2), GoalTest::OnDiscovery)
            .unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Cell::new(0, 0));
        assert_eq!(path[4], Cell::new(2, 2));
        assert_4_connected(&path);
        // Every flat open-land edge takes 0.2 regardless of axis.
        assert!((path_cost(&pather, &path) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn impassable_band_means_no_route() {
        let raster = Raster::from_fn(7, 5, |c| {
            if c.x == 3 { Terrain::Water } else { Terrain::OpenLand }
        });
        let map = TerrainMap::flat(raster, CellScale::default());
        let cost = CostModel::new(Season::Summer);
        let pather = TerrainPather::new(&map, &cost);
        let err = pather
            .find_path(Cell::new(0, 2), Cell::new(6, 2), GoalTest::OnDiscovery)
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::NoRoute {
                from: Cell::new(0, 2),
                to: Cell::new(6, 2)
            }
        );
        assert!(!err.is_impassable_endpoint());
    }

    #[test]
    fn impassable_endpoint_is_reported_up_front() {
        let raster = Raster::from_fn(3, 1, |c| {
            if c.x == 2 { Terrain::Mud } else { Terrain::OpenLand }
        });
        let map = TerrainMap::flat(raster, CellScale::default());
        let summer = CostModel::new(Season::Summer);
        let err = TerrainPather::new(&map, &summer)
            .find_path(Cell::new(0, 0), Cell::new(2, 0), GoalTest::OnDiscovery)
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::ImpassableEndpoint {
                cell: Cell::new(2, 0),
                terrain: Terrain::Mud,
                season: Season::Summer,
            }
        );

        let err = TerrainPather::new(&map, &summer)
            .find_path(Cell::new(2, 0), Cell::new(0, 0), GoalTest::OnDiscovery)
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::ImpassableEndpoint {
                cell: Cell::new(2, 0),
                terrain: Terrain::Mud,
                season: Season::Summer,
            }
        );
        assert!(err.is_impassable_endpoint());

        // Mud has a speed in spring.
        let spring = CostModel::new(Season::Spring);
        assert!(
            TerrainPather::new(&map, &spring)
                .find_path(Cell::new(0, 0), Cell::new(2, 0), GoalTest::OnDiscovery)
                .is_ok()
        );
    }

    #[test]
    fn out_of_bounds_endpoint_is_no_route() {
        let map = open_map(2, 2);
        let cost = CostModel::new(Season::Summer);
        let err = TerrainPather::new(&map, &cost)
            .find_path(Cell::new(0, 0), Cell::new(5, 0), GoalTest::OnDiscovery)
            .unwrap_err();
        assert!(matches!(err, SearchError::NoRoute { .. }));
    }

    #[test]
    fn prefers_faster_terrain() {
        // Straight across meadow, or one row down along a footpath.
        let raster = Raster::from_fn(7, 2, |c| {
            if c.y == 0 && (1..6).contains(&c.x) {
                Terrain::RoughMeadow
            } else if c.y == 1 {
                Terrain::Footpath
            } else {
                Terrain::OpenLand
            }
        });
        let map = TerrainMap::flat(raster, CellScale::default());
        let cost = CostModel::new(Season::Summer).with_fastest_speed(24.0);
        assert!(cost.heuristic_is_admissible());
        let pather = TerrainPather::new(&map, &cost);
        let path = pather
            .find_path(Cell::new(0, 0), Cell::new(6, 0), GoalTest::OnExpansion)
            .unwrap();
        assert!(path.contains(&Cell::new(3, 1)));
        assert!(!path.contains(&Cell::new(3, 0)));
    }

    /// Categories no faster than open land, so the default heuristic never
    /// overestimates.
    fn admissible_fixture(rng: &mut StdRng, w: i32, h: i32) -> TerrainMap {
        const CHOICES: [Terrain; 6] = [
            Terrain::OpenLand,
            Terrain::RoughMeadow,
            Terrain::EasyMovementForest,
            Terrain::SlowRunForest,
            Terrain::WalkForest,
            Terrain::Water,
        ];
        let terrain = Raster::from_fn(w, h, |_| CHOICES[rng.random_range(0..CHOICES.len())]);
        let elevation = Raster::from_fn(w, h, |_| rng.random_range(0.0..6.0));
        TerrainMap::new(elevation, terrain, CellScale::default()).unwrap()
    }

    fn admissible_speeds() -> SpeedTable {
        SpeedTable::new()
            .with(Terrain::OpenLand, 20.0)
            .with(Terrain::RoughMeadow, 12.0)
            .with(Terrain::EasyMovementForest, 18.0)
            .with(Terrain::SlowRunForest, 16.0)
            .with(Terrain::WalkForest, 14.0)
    }

    #[test]
    fn admissible_heuristic_gives_optimal_paths() {
        let mut rng = StdRng::seed_from_u64(7);
        let cost = CostModel::with_speeds(Season::Summer, admissible_speeds());
        assert!(cost.heuristic_is_admissible());

        let mut compared = 0;
        for _ in 0..40 {
            let map = admissible_fixture(&mut rng, 12, 10);
            let pather = TerrainPather::new(&map, &cost);
            let start = Cell::new(rng.random_range(0..12), rng.random_range(0..10));
            let goal = Cell::new(rng.random_range(0..12), rng.random_range(0..10));
            if !pather.passable(start) || !pather.passable(goal) {
                continue;
            }

            // Heuristic never exceeds the exact remaining cost.
            let from_goal = dijkstra_costs(&pather, goal);
            let exact = dijkstra_costs(&pather, start);
            for (&c, &remaining) in &from_goal {
                assert!(pather.estimate(c, goal) <= remaining + 1e-9);
            }

            match pather.find_path(start, goal, GoalTest::OnExpansion) {
                Ok(path) => {
                    assert_4_connected(&path);
                    let best = exact[&goal];
                    assert!((path_cost(&pather, &path) - best).abs() < 1e-9);
                    compared += 1;
                }
                Err(SearchError::NoRoute { .. }) => assert!(!exact.contains_key(&goal)),
                Err(e) => panic!("unexpected {e}"),
            }
        }
        assert!(compared > 0);
    }

    #[test]
    fn cost_to_reach_never_increases() {
        let mut rng = StdRng::seed_from_u64(11);
        let cost = CostModel::with_speeds(Season::Summer, admissible_speeds());
        let map = admissible_fixture(&mut rng, 15, 15);
        let pather = TerrainPather::new(&map, &cost);
        let start = map.bounds().iter().find(|&c| pather.passable(c)).unwrap();
        let goal = map.bounds().iter().filter(|&c| pather.passable(c)).last().unwrap();

        let mut search = Search::new(&pather, start, goal, GoalTest::OnDiscovery);
        let mut seen: HashMap<Cell, f64> = HashMap::new();
        loop {
            let state = search.step();
            for (c, g) in search.discovered() {
                if let Some(&previous) = seen.get(&c) {
                    assert!(g <= previous, "{c}: {previous} -> {g}");
                }
                seen.insert(c, g);
            }
            if state != SearchState::Expanding {
                break;
            }
        }
    }

    #[test]
    fn mud_changes_edge_cost() {
        let map = open_map(3, 1);
        let spring = CostModel::new(Season::Spring);
        let dry = spring
            .edge_time(&map, Cell::new(0, 0), Cell::new(1, 0))
            .unwrap();

        let mut wet = map.clone();
        wet.reclassify(Cell::new(1, 0), Terrain::Mud);
        let muddy = spring
            .edge_time(&wet, Cell::new(0, 0), Cell::new(1, 0))
            .unwrap();
        assert!(muddy > dry);
        assert!((muddy - (2.0 / 20.0 + 2.0 / 6.0)).abs() < 1e-9);
    }
}
