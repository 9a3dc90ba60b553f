//! Stroked variants of the source path
//!
//! The source SVG is written three times with increasing stroke widths. Each
//! copy is then turned into an outline by the vector editor. The stroked
//! version is kept next to it as `{name}.path.svg` for debugging.

use crate::error::{Error, Result};
use crate::perimeters::{format_width, variant_widths};
use crate::svg::SvgDocument;
use crate::tools::{VectorEditor, stroke_to_path};
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters of a variant generation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantOptions {
    /// How many times the path is simplified before outlining
    pub simplify: usize,
    pub nozzle_diameter: f64,
    pub layer_height: f64,
    /// Perimeters at the thickest (base) variant
    pub max_perimeters: usize,
}

impl Default for VariantOptions {
    fn default() -> Self {
        Self {
            simplify: 0,
            nozzle_diameter: 0.6,
            layer_height: 0.3,
            max_perimeters: 3,
        }
    }
}

/// Files written for one variant
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: &'static str,
    pub stroke_width: f64,
    /// Outline produced by the vector editor
    pub outline: PathBuf,
    /// Stroked path before conversion
    pub stroked: PathBuf,
}

/// Generate the `1p`, `2p` and `3p` outlines from `source` into `output_dir`.
///
/// Unsupported printer settings are rejected before anything is read or
/// written. Files from earlier variants stay in place if a later one fails.
pub fn generate(
    editor: &impl VectorEditor,
    source: &Path,
    output_dir: &Path,
    options: &VariantOptions,
) -> Result<Vec<Variant>> {
    let widths = variant_widths(
        options.nozzle_diameter,
        options.layer_height,
        options.max_perimeters,
    )?;

    let mut variants = Vec::with_capacity(3);
    for (name, width) in widths.named() {
        // Reload every time so patches never accumulate
        let mut doc = SvgDocument::load(source)?;
        doc.patch(&format!("path_{}", name), &format_width(width))
            .map_err(|e| Error::malformed(source, e))?;

        let outline = output_dir.join(format!("{}.svg", name));
        let stroked = output_dir.join(format!("{}.path.svg", name));
        doc.save(&outline)?;
        fs::copy(&outline, &stroked).map_err(|e| Error::io(&stroked, e))?;
        tracing::debug!(name, width, file = %outline.display(), "wrote stroked variant");

        stroke_to_path(editor, &outline, options.simplify)?;

        variants.push(Variant {
            name,
            stroke_width: width,
            outline,
            stroked,
        });
    }

    Ok(variants)
}
