//! Terrain categories and the fixed map color palette.

use std::fmt;

/// An 8-bit RGB color as it appears in the terrain image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

/// Classification of one raster cell.
///
/// Every cell carries exactly one category at any time. Only the seasonal
/// transformer changes categories after loading, and only to [`Mud`] or
/// [`Ice`].
///
/// [`Mud`]: Terrain::Mud
/// [`Ice`]: Terrain::Ice
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Terrain {
    OpenLand,
    RoughMeadow,
    EasyMovementForest,
    SlowRunForest,
    WalkForest,
    PavedRoad,
    Footpath,
    Water,
    /// Out-of-bounds area and lake-edge marker. Never reclassified.
    OutOfBounds,
    /// Frozen ground near water (winter).
    Ice,
    /// Soaked ground near water (spring).
    Mud,
    /// A pixel color outside the palette.
    Unmapped,
}

impl Terrain {
    /// Every palette category, in declaration order. `Unmapped` has no color
    /// and is not listed.
    pub const PALETTE: [Terrain; 11] = [
        Terrain::OpenLand,
        Terrain::RoughMeadow,
        Terrain::EasyMovementForest,
        Terrain::SlowRunForest,
        Terrain::WalkForest,
        Terrain::PavedRoad,
        Terrain::Footpath,
        Terrain::Water,
        Terrain::OutOfBounds,
        Terrain::Ice,
        Terrain::Mud,
    ];

    /// The map color of this category, or `None` for [`Terrain::Unmapped`].
    pub const fn rgb(self) -> Option<Rgb> {
        Some(match self {
            Terrain::OpenLand => Rgb(248, 148, 18),
            Terrain::RoughMeadow => Rgb(255, 192, 0),
            Terrain::EasyMovementForest => Rgb(255, 255, 255),
            Terrain::SlowRunForest => Rgb(2, 208, 60),
            Terrain::WalkForest => Rgb(2, 136, 40),
            Terrain::PavedRoad => Rgb(71, 51, 3),
            Terrain::Footpath => Rgb(0, 0, 0),
            Terrain::Water => Rgb(0, 0, 255),
            Terrain::OutOfBounds => Rgb(205, 0, 101),
            Terrain::Ice => Rgb(135, 206, 250),
            Terrain::Mud => Rgb(139, 69, 19),
            Terrain::Unmapped => return None,
        })
    }

    /// Classify a pixel color. Colors outside the palette map to
    /// [`Terrain::Unmapped`].
    pub fn from_rgb(color: Rgb) -> Terrain {
        Self::PALETTE
            .into_iter()
            .find(|t| t.rgb() == Some(color))
            .unwrap_or(Terrain::Unmapped)
    }

    #[inline]
    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::Water)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terrain::OpenLand => "open land",
            Terrain::RoughMeadow => "rough meadow",
            Terrain::EasyMovementForest => "easy movement forest",
            Terrain::SlowRunForest => "slow run forest",
            Terrain::WalkForest => "walk forest",
            Terrain::PavedRoad => "paved road",
            Terrain::Footpath => "footpath",
            Terrain::Water => "water",
            Terrain::OutOfBounds => "out of bounds",
            Terrain::Ice => "ice",
            Terrain::Mud => "mud",
            Terrain::Unmapped => "unmapped",
        };
        f.write_str(name)
    }
}
