//! Stroke widths for printed perimeters
//!
//! Each entry gives the cumulative wall thickness, in millimeters, needed for
//! 1, 2, 3 and 4 perimeters with a given nozzle and layer height. Values follow
//! the slicer's thin wall calculation. Supporting a new printer setup only
//! needs a new entry.

use crate::error::{Error, Result};

/// Tolerance used when comparing nozzle diameters and layer heights
const KEY_EPSILON: f64 = 1e-6;

/// Stroke widths for one nozzle diameter and layer height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterEntry {
    pub nozzle_diameter: f64,
    pub layer_height: f64,
    pub widths: [f64; 4],
}

pub const PERIMETERS: &[PerimeterEntry] = &[
    PerimeterEntry {
        nozzle_diameter: 0.4,
        layer_height: 0.3,
        widths: [0.45, 1.14, 1.57, 2.01],
    },
    PerimeterEntry {
        nozzle_diameter: 0.6,
        layer_height: 0.3,
        widths: [0.65, 1.24, 1.82, 2.41],
    },
];

/// Widths of the three generated variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantWidths {
    pub one: f64,
    pub two: f64,
    pub max: f64,
}

impl VariantWidths {
    /// `(name, width)` pairs in generation order
    pub fn named(&self) -> [(&'static str, f64); 3] {
        [("1p", self.one), ("2p", self.two), ("3p", self.max)]
    }
}

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < KEY_EPSILON
}

/// Nozzle diameters present in the table, without duplicates
pub fn nozzle_diameters() -> Vec<f64> {
    let mut nozzles: Vec<f64> = Vec::new();
    for entry in PERIMETERS {
        if !nozzles.iter().any(|n| same(*n, entry.nozzle_diameter)) {
            nozzles.push(entry.nozzle_diameter);
        }
    }
    nozzles
}

/// Look up the four perimeter widths for a printer setup
pub fn lookup(nozzle_diameter: f64, layer_height: f64) -> Result<[f64; 4]> {
    PERIMETERS
        .iter()
        .find(|e| same(e.nozzle_diameter, nozzle_diameter) && same(e.layer_height, layer_height))
        .map(|e| e.widths)
        .ok_or_else(|| {
            Error::Configuration(format!(
                "no perimeter widths for nozzle diameter {} and layer height {}",
                nozzle_diameter, layer_height
            ))
        })
}

/// Pick the variant widths: 1 and 2 perimeters, plus `max_perimeters` for
/// the thickest variant.
pub fn variant_widths(
    nozzle_diameter: f64,
    layer_height: f64,
    max_perimeters: usize,
) -> Result<VariantWidths> {
    let widths = lookup(nozzle_diameter, layer_height)?;
    let max = max_perimeters
        .checked_sub(1)
        .and_then(|i| widths.get(i))
        .copied()
        .ok_or_else(|| {
            Error::Configuration(format!(
                "max perimeters must be between 1 and {}, got {}",
                widths.len(),
                max_perimeters
            ))
        })?;

    Ok(VariantWidths {
        one: widths[0],
        two: widths[1],
        max,
    })
}

/// Format a width the way it is written into the style attribute
pub fn format_width(mm: f64) -> String {
    format!("{}", mm)
}
