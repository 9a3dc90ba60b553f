//! External tool drivers
//!
//! Inkscape turns stroked paths into outlines and FreeCAD extrudes the
//! outlines into the cookiecutter. Both are reached through a small trait so
//! the rest of the crate can run against fakes.

pub mod freecad;
pub mod inkscape;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

pub use freecad::{CAD_CONFIG_ENV, CadConfig, FreeCad, build_model};
pub use inkscape::{Inkscape, Verb, stroke_to_path, stroke_to_path_actions};

/// A vector editor able to run batch actions on a file
pub trait VectorEditor {
    /// Run `actions` in order on `svg_file` and wait for completion.
    fn run_batch(&self, svg_file: &Path, actions: &[Verb]) -> Result<()>;
}

/// A CAD tool able to run a macro script
pub trait CadTool {
    /// Run the macro with extra environment variables and wait for completion.
    fn run_macro(&self, macro_path: &Path, env: &[(&str, String)]) -> Result<()>;
}

/// Find an executable in the directories listed in `$PATH`
pub fn find_executable(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::ToolNotFound(name.to_string()))
}

/// Resolve a tool from an explicit override or from `$PATH`
pub fn resolve_executable(name: &str, explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::ToolNotFound(path.display().to_string())),
        None => find_executable(name),
    }
}

/// Run a command to completion and turn a non-zero exit into an error
fn run_checked(tool: &'static str, command: &mut Command) -> Result<()> {
    tracing::debug!(?command, "running {}", tool);
    let status = command
        .status()
        .map_err(|e| Error::io(command.get_program(), e))?;
    check_status(tool, status)
}

fn check_status(tool: &'static str, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::ExternalToolFailure { tool, status })
    }
}
