//! Reading the terrain image, the elevation file and the waypoint list.

use std::fs;
use std::path::Path;

use image::RgbImage;
use log::{debug, warn};
use orienteer_core::{Cell, CellScale, Raster, Rgb, Terrain, TerrainMap};

use crate::error::LoadError;

pub fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}

/// Classify every pixel of `image` through the terrain palette.
pub fn classify(image: &RgbImage) -> Raster<Terrain> {
    let (w, h) = image.dimensions();
    let raster = Raster::from_fn(w as i32, h as i32, |c| {
        let [r, g, b] = image.get_pixel(c.x as u32, c.y as u32).0;
        Terrain::from_rgb(Rgb(r, g, b))
    });
    let unmapped = raster.iter().filter(|(_, t)| **t == Terrain::Unmapped).count();
    if unmapped > 0 {
        warn!("{unmapped} pixels have no palette color and are treated as impassable");
    }
    raster
}

/// Decode the terrain PNG. The decoded image is kept for rendering.
pub fn load_terrain(path: &Path) -> Result<(RgbImage, Raster<Terrain>), LoadError> {
    let image = image::open(path)?.to_rgb8();
    let terrain = classify(&image);
    debug!("terrain image {}: {}x{}", path.display(), terrain.width(), terrain.height());
    Ok((image, terrain))
}

/// Parse whitespace-separated elevations, one raster row per line.
///
/// Rows may be longer than `width`; the extra columns are ignored. Blank
/// lines are skipped. Lines after the first `height` rows are ignored.
pub fn parse_elevation(text: &str, width: i32, height: i32) -> Result<Raster<f64>, LoadError> {
    let (w, h) = (width.max(0) as usize, height.max(0) as usize);
    let mut values = Vec::with_capacity(w * h);
    let mut rows = 0;
    let mut surplus = false;

    for (i, line) in text.lines().enumerate() {
        if rows == h {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() < w {
            return Err(LoadError::ShortRow {
                line: i + 1,
                found: tokens.len(),
                width: w,
            });
        }
        surplus |= tokens.len() > w;
        for token in &tokens[..w] {
            let value = token.parse::<f64>().map_err(|_| LoadError::BadElevation {
                line: i + 1,
                token: (*token).to_owned(),
            })?;
            values.push(value);
        }
        rows += 1;
    }

    if rows < h {
        return Err(LoadError::TooFewRows { found: rows, height: h });
    }
    if surplus {
        warn!("elevation rows are wider than the {width}-pixel map; extra columns ignored");
    }
    Raster::from_vec(width, height, values).ok_or(LoadError::TooFewRows { found: rows, height: h })
}

/// Parse a stream of integer coordinates, taken pairwise as `x y`.
pub fn parse_waypoints(text: &str) -> Result<Vec<Cell>, LoadError> {
    let numbers = text
        .split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|_| LoadError::BadWaypoint {
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<i32>, _>>()?;
    if numbers.len() % 2 != 0 {
        return Err(LoadError::UnpairedWaypoint);
    }
    Ok(numbers.chunks_exact(2).map(|p| Cell::new(p[0], p[1])).collect())
}

/// Load the terrain image and its elevation file into a [`TerrainMap`].
pub fn load_map(
    terrain_path: &Path,
    elevation_path: &Path,
    scale: CellScale,
) -> Result<(RgbImage, TerrainMap), LoadError> {
    let (image, terrain) = load_terrain(terrain_path)?;
    let text = read_text(elevation_path)?;
    let elevation = parse_elevation(&text, terrain.width(), terrain.height())?;
    let map = TerrainMap::new(elevation, terrain, scale)?;
    Ok((image, map))
}

pub fn load_waypoints(path: &Path) -> Result<Vec<Cell>, LoadError> {
    parse_waypoints(&read_text(path)?)
}
