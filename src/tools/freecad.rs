//! FreeCAD macro driver

use super::{CadTool, find_executable, resolve_executable, run_checked};
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable the macro reads its configuration from
pub const CAD_CONFIG_ENV: &str = "COOKIECUTTER_CONFIG";

/// Configuration handed to the cookiecutter macro
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CadConfig {
    /// Directory holding `1p.svg`, `2p.svg` and `3p.svg`
    pub workdir: String,
    /// Whether to close the bottom of the shape
    pub bottom: bool,
}

impl CadConfig {
    pub fn new(workdir: &Path, bottom: bool) -> Self {
        Self {
            workdir: workdir.display().to_string(),
            bottom,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The FreeCAD executable
#[derive(Debug, Clone)]
pub struct FreeCad {
    executable: PathBuf,
}

impl FreeCad {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Locate `freecad` in `$PATH`
    pub fn locate() -> Result<Self> {
        find_executable("freecad").map(Self::new)
    }

    /// Use `explicit` when given, otherwise search `$PATH`
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        resolve_executable("freecad", explicit).map(Self::new)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, macro_path: &Path, env: &[(&str, String)]) -> Command {
        let mut command = Command::new(&self.executable);
        command.arg(macro_path);
        for (key, value) in env {
            command.env(key, value);
        }
        command
    }
}

impl CadTool for FreeCad {
    fn run_macro(&self, macro_path: &Path, env: &[(&str, String)]) -> Result<()> {
        run_checked("freecad", &mut self.command(macro_path, env))
    }
}

/// Run the cookiecutter macro on the outlines in `workdir`
pub fn build_model(
    cad: &impl CadTool,
    macro_path: &Path,
    workdir: &Path,
    add_bottom: bool,
) -> Result<()> {
    if !macro_path.is_file() {
        return Err(Error::Precondition(format!(
            "macro {} does not exist",
            macro_path.display()
        )));
    }

    let config = CadConfig::new(workdir, add_bottom).to_json()?;
    tracing::info!(macro_path = %macro_path.display(), %config, "building model");
    cad.run_macro(macro_path, &[(CAD_CONFIG_ENV, config)])
}
