//! Drawing a finished plan over the terrain image.

use std::path::Path;

use image::{Rgb as Pixel, RgbImage};
use orienteer_core::{Cell, Rgb, TerrainMap};
use orienteer_paths::Plan;

use crate::error::LoadError;

pub const HIGHLIGHT: Rgb = Rgb(75, 0, 130);
pub const ROUTE: Rgb = Rgb(255, 0, 0);

fn paint(image: &mut RgbImage, c: Cell, color: Rgb) {
    if c.x < 0 || c.y < 0 {
        return;
    }
    let (x, y) = (c.x as u32, c.y as u32);
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, Pixel([color.0, color.1, color.2]));
    }
}

/// Copy `base` and draw, in order, the reclassified cells in their new
/// category color, the waypoint highlights and the route.
pub fn render(base: &RgbImage, map: &TerrainMap, plan: &Plan) -> RgbImage {
    let mut image = base.clone();
    for &c in &plan.reclassified {
        if let Some(color) = map.terrain(c).and_then(|t| t.rgb()) {
            paint(&mut image, c, color);
        }
    }
    for &c in &plan.highlights {
        paint(&mut image, c, HIGHLIGHT);
    }
    for &c in &plan.route.cells {
        paint(&mut image, c, ROUTE);
    }
    image
}

pub fn save(image: &RgbImage, path: &Path) -> Result<(), LoadError> {
    image.save(path).map_err(|source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    })
}
