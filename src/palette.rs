//! Gradient catalog and color interpolation.
//!
//! A generation picks one named gradient from [`CATALOG`] and expands its
//! anchor colors into `step + 2` evenly spaced colors. The first and last
//! expanded colors are reserved for the two equilibrium markers; the inner
//! colors become the particle color list.
//!
//! # Example
//!
//! ```ignore
//! use chaotic_attraction::palette;
//!
//! let gradient = &palette::CATALOG[0];
//! let colors = palette::expand(gradient.anchors, 5);
//! assert_eq!(colors.len(), 5);
//! ```

use glam::Vec3;

/// A named gradient: an ordered list of anchor colors.
#[derive(Debug, Clone, Copy)]
pub struct GradientDef {
    /// Display name of the gradient.
    pub name: &'static str,
    /// Anchor colors, in order. Always at least two.
    pub anchors: &'static [Vec3],
}

/// Convert a 0xRRGGBB integer to an RGB color with 0-1 channels.
const fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// The fixed gradient catalog.
///
/// Seed derivation indexes into this table modulo its length, so the order
/// of entries is part of the seed-to-visual mapping and must stay stable.
pub const CATALOG: &[GradientDef] = &[
    GradientDef {
        name: "Omolon",
        anchors: &[rgb(0x091e3a), rgb(0x2f80ed), rgb(0x2d9ee0)],
    },
    GradientDef {
        name: "Sublime Vivid",
        anchors: &[rgb(0xfc466b), rgb(0x3f5efb)],
    },
    GradientDef {
        name: "Argon",
        anchors: &[rgb(0x03001e), rgb(0x7303c0), rgb(0xec38bc), rgb(0xfdeff9)],
    },
    GradientDef {
        name: "Lawrencium",
        anchors: &[rgb(0x0f0c29), rgb(0x302b63), rgb(0x24243e)],
    },
    GradientDef {
        name: "Velvet Sun",
        anchors: &[rgb(0xe1eec3), rgb(0xf05053)],
    },
    GradientDef {
        name: "King Yna",
        anchors: &[rgb(0x1a2a6c), rgb(0xb21f1f), rgb(0xfdbb2d)],
    },
    GradientDef {
        name: "Summer",
        anchors: &[rgb(0x22c1c3), rgb(0xfdbb2d)],
    },
    GradientDef {
        name: "Orange Fun",
        anchors: &[rgb(0xfc4a1a), rgb(0xf7b733)],
    },
    GradientDef {
        name: "Purple Bliss",
        anchors: &[rgb(0x360033), rgb(0x0b8793)],
    },
    GradientDef {
        name: "Timber",
        anchors: &[rgb(0xfc00ff), rgb(0x00dbde)],
    },
    GradientDef {
        name: "Flare",
        anchors: &[rgb(0xf12711), rgb(0xf5af19)],
    },
    GradientDef {
        name: "Celestial",
        anchors: &[rgb(0xc33764), rgb(0x1d2671)],
    },
    GradientDef {
        name: "Wiretap",
        anchors: &[rgb(0x8a2387), rgb(0xe94057), rgb(0xf27121)],
    },
    GradientDef {
        name: "Azur Lane",
        anchors: &[rgb(0x7f7fd5), rgb(0x86a8e7), rgb(0x91eae4)],
    },
    GradientDef {
        name: "Quepal",
        anchors: &[rgb(0x11998e), rgb(0x38ef7d)],
    },
    GradientDef {
        name: "Sin City Red",
        anchors: &[rgb(0xed213a), rgb(0x93291e)],
    },
];

/// Expand a list of anchor colors into `count` evenly spaced colors.
///
/// The expanded list starts at the first anchor and ends at the last, with
/// linear interpolation along the anchor polyline in between. `count` must
/// be at least 2 and `anchors` must hold at least 2 colors.
pub fn expand(anchors: &[Vec3], count: usize) -> Vec<Vec3> {
    assert!(anchors.len() >= 2, "gradient needs at least two anchors");
    assert!(count >= 2, "expansion needs at least two colors");

    let segments = (anchors.len() - 1) as f32;
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32 * segments;
            let seg = (t.floor() as usize).min(anchors.len() - 2);
            let frac = t - seg as f32;
            anchors[seg].lerp(anchors[seg + 1], frac)
        })
        .collect()
}
