//! Terrain-aware edge costs.
//!
//! Crossing one grid edge means leaving the source cell through half of its
//! extent and entering the destination through half of its extent. Each
//! half is timed at its own cell's speed:
//!
//! ```text
//! time = d / (half(axis) × speed(source)) + d / (half(axis) × speed(dest))
//! ```
//!
//! where `d` is the 3-D distance between the two cell centers and
//! `half(axis)` is half the cell size along the move's axis.

use std::collections::BTreeMap;

use orienteer_core::{Cell, Season, Terrain, TerrainMap};

/// Base speed of open land. Also the default heuristic divisor.
pub const OPEN_LAND_SPEED: f64 = 20.0;

const BASE_SPEEDS: [(Terrain, f64); 7] = [
    (Terrain::OpenLand, OPEN_LAND_SPEED),
    (Terrain::RoughMeadow, 12.0),
    (Terrain::EasyMovementForest, 18.0),
    (Terrain::SlowRunForest, 16.0),
    (Terrain::WalkForest, 14.0),
    (Terrain::PavedRoad, 22.0),
    (Terrain::Footpath, 24.0),
];

const ICE_SPEED: f64 = 14.0;
const MUD_SPEED: f64 = 6.0;

/// Leaf cover in fall slows every move that starts in this category.
const FALL_TRIGGER: Terrain = Terrain::EasyMovementForest;

const FALL_REDUCTIONS: [(Terrain, f64); 7] = [
    (Terrain::OpenLand, 2.0),
    (Terrain::RoughMeadow, 1.0),
    (Terrain::EasyMovementForest, 8.0),
    (Terrain::SlowRunForest, 2.0),
    (Terrain::WalkForest, 4.0),
    (Terrain::PavedRoad, 1.0),
    (Terrain::Footpath, 4.0),
];

/// Mapping from terrain category to speed. A category without an entry is
/// impassable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedTable {
    speeds: BTreeMap<Terrain, f64>,
}

impl SpeedTable {
    /// An empty table: nothing is passable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the speed of `terrain` (builder).
    pub fn with(mut self, terrain: Terrain, speed: f64) -> Self {
        self.speeds.insert(terrain, speed);
        self
    }

    /// The standard table for `season`. Ice is only configured in winter and
    /// mud only in spring.
    pub fn for_season(season: Season) -> Self {
        let mut table = BASE_SPEEDS
            .into_iter()
            .fold(Self::new(), |t, (terrain, speed)| t.with(terrain, speed));
        match season {
            Season::Winter => table = table.with(Terrain::Ice, ICE_SPEED),
            Season::Spring => table = table.with(Terrain::Mud, MUD_SPEED),
            Season::Summer | Season::Fall => {}
        }
        table
    }

    /// This table with the fall reductions applied.
    fn fall_reduced(&self) -> Self {
        let mut reduced = self.clone();
        for (terrain, delta) in FALL_REDUCTIONS {
            if let Some(speed) = reduced.speeds.get_mut(&terrain) {
                *speed -= delta;
            }
        }
        reduced
    }

    #[inline]
    pub fn get(&self, terrain: Terrain) -> Option<f64> {
        self.speeds.get(&terrain).copied()
    }

    /// Largest configured speed.
    pub fn fastest(&self) -> Option<f64> {
        self.speeds.values().copied().reduce(f64::max)
    }
}

/// Season-specific edge timing over a [`TerrainMap`].
#[derive(Clone, Debug)]
pub struct CostModel {
    season: Season,
    speeds: SpeedTable,
    /// Table used for edges whose source cell is [`FALL_TRIGGER`]; only
    /// present in fall.
    fall_entry: Option<SpeedTable>,
    fastest_speed: f64,
}

impl CostModel {
    /// The standard model for `season`, with open land as the heuristic's
    /// fastest speed.
    pub fn new(season: Season) -> Self {
        Self::with_speeds(season, SpeedTable::for_season(season))
    }

    /// A model over a custom speed table.
    pub fn with_speeds(season: Season, speeds: SpeedTable) -> Self {
        let fall_entry = (season == Season::Fall).then(|| speeds.fall_reduced());
        Self {
            season,
            speeds,
            fall_entry,
            fastest_speed: OPEN_LAND_SPEED,
        }
    }

    /// Override the speed the heuristic assumes for the remaining distance
    /// (builder).
    pub fn with_fastest_speed(mut self, speed: f64) -> Self {
        self.fastest_speed = speed;
        self
    }

    #[inline]
    pub fn season(&self) -> Season {
        self.season
    }

    #[inline]
    pub fn fastest_speed(&self) -> f64 {
        self.fastest_speed
    }

    /// The heuristic underestimates only if no configured speed is faster
    /// than the assumed fastest speed.
    pub fn heuristic_is_admissible(&self) -> bool {
        self.speeds
            .fastest()
            .is_none_or(|fastest| fastest <= self.fastest_speed)
    }

    /// Configured speed of `terrain` for ordinary traversal.
    #[inline]
    pub fn speed_of(&self, terrain: Terrain) -> Option<f64> {
        self.speeds.get(terrain)
    }

    /// Whether `terrain` has a configured speed.
    #[inline]
    pub fn is_passable(&self, terrain: Terrain) -> bool {
        self.speed_of(terrain).is_some()
    }

    fn table_for(&self, source: Terrain) -> &SpeedTable {
        match &self.fall_entry {
            Some(reduced) if source == FALL_TRIGGER => reduced,
            _ => &self.speeds,
        }
    }

    /// Time to cross the edge from `from` to the 4-adjacent `to`.
    ///
    /// Returns `None` if the cells are not 4-adjacent, either lies outside
    /// the map, or either category is impassable.
    pub fn edge_time(&self, map: &TerrainMap, from: Cell, to: Cell) -> Option<f64> {
        let axis = from.axis_to(to)?;
        let source = map.terrain(from)?;
        let dest = map.terrain(to)?;
        let d = map.distance(from, to)?;

        let table = self.table_for(source);
        let half = map.scale().half_extent(axis);
        let leave = d / (half * table.get(source)?);
        let enter = d / (half * table.get(dest)?);
        Some(leave + enter)
    }

    /// Lower bound (when admissible) on the time from `from` to `goal`: the
    /// straight-line distance covered at the fastest speed through the
    /// widest half cells, in the same units as [`edge_time`](Self::edge_time).
    pub fn heuristic(&self, map: &TerrainMap, from: Cell, goal: Cell) -> f64 {
        let per_meter = 2.0 / (map.scale().max_half_extent() * self.fastest_speed);
        map.distance(from, goal).map_or(0.0, |d| d * per_meter)
    }
}

/// Candidate cost-to-reach through an edge, never exceeding the destination's
/// best known cost.
#[inline]
pub fn relax(g_from: f64, edge: f64, best_known: Option<f64>) -> f64 {
    let candidate = g_from + edge;
    best_known.map_or(candidate, |best| best.min(candidate))
}
