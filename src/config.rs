//! Run configuration

use crate::variants::VariantOptions;
use std::path::PathBuf;

/// Everything a run needs, resolved from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Source SVG holding one closed path
    pub input: PathBuf,
    pub variants: VariantOptions,
    /// Close the bottom of the cookiecutter
    pub bottom: bool,
    /// FreeCAD macro extruding the outlines
    pub macro_path: PathBuf,
    /// Explicit Inkscape executable, `$PATH` lookup otherwise
    pub inkscape: Option<PathBuf>,
    /// Explicit FreeCAD executable, `$PATH` lookup otherwise
    pub freecad: Option<PathBuf>,
    /// Where the scratch directory is created, the system temp dir otherwise
    pub scratch_root: Option<PathBuf>,
}

impl RunConfig {
    /// The macro is not shipped with the crate, so it has no default.
    pub fn new(input: impl Into<PathBuf>, macro_path: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            variants: VariantOptions::default(),
            bottom: false,
            macro_path: macro_path.into(),
            inkscape: None,
            freecad: None,
            scratch_root: None,
        }
    }

    pub fn with_variants(mut self, variants: VariantOptions) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_bottom(mut self, bottom: bool) -> Self {
        self.bottom = bottom;
        self
    }

    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }
}
