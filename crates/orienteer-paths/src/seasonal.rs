//! Seasonal terrain transformation.
//!
//! In spring and winter the ground near water changes before anyone sets
//! out: a bounded multi-source breadth-first fill, seeded from every land
//! cell touching water, reclassifies the surrounding cells to mud or ice.
//! The fill writes straight into the [`TerrainMap`], so later levels and
//! every subsequent cost query see the new categories.

use std::collections::HashSet;

use log::{debug, info};
use orienteer_core::{Cell, Season, Terrain, TerrainMap};

use crate::neighbors::Neighbors;

/// Tunable parameters of the seasonal fills.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonalConfig {
    /// BFS levels of the spring mud fill.
    pub mud_levels: usize,
    /// A neighbor turns to mud only if its elevation differs from the
    /// frontier cell by strictly less than this many meters.
    pub mud_max_rise_m: f64,
    /// BFS levels of the winter ice fill.
    pub snow_levels: usize,
}

impl Default for SeasonalConfig {
    fn default() -> Self {
        Self {
            mud_levels: 15,
            mud_max_rise_m: 1.0,
            snow_levels: 7,
        }
    }
}

/// One bounded fill: what cells become, how far the fill reaches and which
/// cells it may not touch.
#[derive(Clone, Debug, PartialEq)]
pub struct FillRule {
    pub target: Terrain,
    pub levels: usize,
    pub max_rise_m: Option<f64>,
    pub protected: Vec<Terrain>,
}

impl FillRule {
    /// Spring: mud spreads over ground roughly level with the water.
    pub fn mud(config: &SeasonalConfig) -> Self {
        Self {
            target: Terrain::Mud,
            levels: config.mud_levels,
            max_rise_m: Some(config.mud_max_rise_m),
            protected: vec![Terrain::Water, Terrain::OutOfBounds],
        }
    }

    /// Winter: ice forms on land near water regardless of slope. Footpaths
    /// stay trodden clear.
    pub fn snow(config: &SeasonalConfig) -> Self {
        Self {
            target: Terrain::Ice,
            levels: config.snow_levels,
            max_rise_m: None,
            protected: vec![Terrain::Water, Terrain::OutOfBounds, Terrain::Footpath],
        }
    }

    #[inline]
    fn is_protected(&self, terrain: Terrain) -> bool {
        self.protected.contains(&terrain)
    }

    #[inline]
    fn within_rise(&self, base: f64, elevation: f64) -> bool {
        self.max_rise_m
            .is_none_or(|max| (elevation - base).abs() < max)
    }
}

/// Every non-water cell with at least one water cell among its eight
/// neighbors, in row-major order.
pub fn water_adjacent_cells(map: &TerrainMap) -> Vec<Cell> {
    let mut nb = Neighbors::new(map.bounds());
    map.bounds()
        .iter()
        .filter(|&c| {
            map.terrain(c).is_some_and(|t| !t.is_water())
                && !nb
                    .all(c, |n| map.terrain(n).is_some_and(Terrain::is_water))
                    .is_empty()
        })
        .collect()
}

/// Run one bounded fill from `seeds`, returning the reclassified cells in
/// the order they changed.
///
/// Unprotected seeds are reclassified first; every seed, protected or not,
/// starts the frontier. Then, for `rule.levels`
/// levels, every frontier cell admits each unvisited, unprotected
/// 4-neighbor within the elevation limit of that frontier cell. Admitted
/// cells are reclassified at once and form the next frontier. No cell is
/// visited twice, and nothing farther than `rule.levels` steps from a seed
/// is touched even if the frontier is not exhausted.
pub fn spread(map: &mut TerrainMap, seeds: &[Cell], rule: &FillRule) -> Vec<Cell> {
    let mut visited: HashSet<Cell> = HashSet::with_capacity(seeds.len() * 4);
    let mut frontier: Vec<Cell> = Vec::with_capacity(seeds.len());
    let mut changed = Vec::new();

    for &seed in seeds {
        let Some(terrain) = map.terrain(seed) else {
            continue;
        };
        if !visited.insert(seed) {
            continue;
        }
        if !rule.is_protected(terrain) && map.reclassify(seed, rule.target) != Some(rule.target) {
            changed.push(seed);
        }
        // Protected seeds keep their category but still spread.
        frontier.push(seed);
    }

    let mut nb = Neighbors::new(map.bounds());
    let mut next: Vec<Cell> = Vec::new();

    for level in 0..rule.levels {
        if frontier.is_empty() {
            break;
        }
        next.clear();
        for &c in &frontier {
            let Some(base) = map.elevation(c) else {
                continue;
            };
            let admitted: Vec<Cell> = nb
                .cardinal(c, |n| {
                    !visited.contains(&n)
                        && map.terrain(n).is_some_and(|t| !rule.is_protected(t))
                        && map.elevation(n).is_some_and(|h| rule.within_rise(base, h))
                })
                .to_vec();
            for n in admitted {
                visited.insert(n);
                if map.reclassify(n, rule.target) != Some(rule.target) {
                    changed.push(n);
                }
                next.push(n);
            }
        }
        debug!(
            "{} fill level {}: {} cells admitted",
            rule.target,
            level + 1,
            next.len()
        );
        std::mem::swap(&mut frontier, &mut next);
    }

    changed
}

/// Spring mud fill.
pub fn spread_mud(map: &mut TerrainMap, seeds: &[Cell], config: &SeasonalConfig) -> Vec<Cell> {
    spread(map, seeds, &FillRule::mud(config))
}

/// Winter ice fill.
pub fn spread_snow(map: &mut TerrainMap, seeds: &[Cell], config: &SeasonalConfig) -> Vec<Cell> {
    spread(map, seeds, &FillRule::snow(config))
}

/// Apply the seasonal transformation for `season`, if it has one. Returns
/// the reclassified cells.
pub fn apply_season(map: &mut TerrainMap, season: Season, config: &SeasonalConfig) -> Vec<Cell> {
    let rule = match season {
        Season::Spring => FillRule::mud(config),
        Season::Winter => FillRule::snow(config),
        Season::Summer | Season::Fall => return Vec::new(),
    };
    let seeds = water_adjacent_cells(map);
    let changed = spread(map, &seeds, &rule);
    info!(
        "{season}: {} water-adjacent seeds, {} cells turned to {}",
        seeds.len(),
        changed.len(),
        rule.target
    );
    changed
}
