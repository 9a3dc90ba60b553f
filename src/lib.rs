//! # cookiecutter
//!
//! Generates a 3D-printable cookiecutter from a single closed SVG path.
//!
//! ## How it works
//!
//! - **Variants**: the path is written three times with stroke widths matching
//!   1, 2 and N printed perimeters for the chosen nozzle and layer height
//! - **Outlines**: Inkscape turns each stroke into a closed outline
//! - **Model**: a FreeCAD macro extrudes the outlines into a tapered shell
//!
//! ## Example
//!
//! ```rust,ignore
//! use cookiecutter::{FreeCad, Inkscape, Interrupt, RunConfig, run};
//!
//! let config = RunConfig::new("heart.svg", "cookiecutter.FCMacro").with_bottom(true);
//! let inkscape = Inkscape::locate()?;
//! let freecad = FreeCad::locate()?;
//! run(&config, &inkscape, &freecad, &Interrupt::default())?;
//! ```

pub mod config;
pub mod error;
pub mod perimeters;
pub mod run;
pub mod svg;
pub mod tools;
pub mod variants;

// Re-export commonly used items
pub use config::RunConfig;
pub use error::{DocumentError, Error, Result};
pub use run::{Interrupt, run};
pub use svg::{StyleMap, SvgDocument};
pub use tools::{CadTool, FreeCad, Inkscape, VectorEditor, Verb};
pub use variants::{Variant, VariantOptions, generate};
