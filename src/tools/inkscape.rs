//! Inkscape batch driver

use super::{VectorEditor, find_executable, resolve_executable, run_checked};
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

/// An action Inkscape can run in batch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    EditSelectAll,
    SelectionSimplify,
    StrokeToPath,
    FileSave,
}

impl Verb {
    pub fn name(&self) -> &'static str {
        match self {
            Verb::EditSelectAll => "EditSelectAll",
            Verb::SelectionSimplify => "SelectionSimplify",
            Verb::StrokeToPath => "StrokeToPath",
            Verb::FileSave => "FileSave",
        }
    }
}

/// Join verbs into the `;` separated list Inkscape expects
pub fn join_verbs(verbs: &[Verb]) -> String {
    verbs.iter().map(Verb::name).collect::<Vec<_>>().join(";")
}

/// The Inkscape executable
#[derive(Debug, Clone)]
pub struct Inkscape {
    executable: PathBuf,
}

impl Inkscape {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Locate `inkscape` in `$PATH`
    pub fn locate() -> Result<Self> {
        find_executable("inkscape").map(Self::new)
    }

    /// Use `explicit` when given, otherwise search `$PATH`
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        resolve_executable("inkscape", explicit).map(Self::new)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, svg_file: &Path, verbs: &[Verb]) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg("--batch-process")
            .arg("--verb")
            .arg(join_verbs(verbs))
            .arg(svg_file);
        command
    }
}

impl VectorEditor for Inkscape {
    fn run_batch(&self, svg_file: &Path, actions: &[Verb]) -> Result<()> {
        run_checked("inkscape", &mut self.command(svg_file, actions))
    }
}

/// Actions turning a stroke into an outline, simplifying `simplify` times first
pub fn stroke_to_path_actions(simplify: usize) -> Vec<Verb> {
    let mut actions = Vec::with_capacity(simplify + 3);
    actions.push(Verb::EditSelectAll);
    actions.extend(std::iter::repeat_n(Verb::SelectionSimplify, simplify));
    actions.push(Verb::StrokeToPath);
    actions.push(Verb::FileSave);
    actions
}

/// Convert the stroked path in `svg_file` into an outline, in place
pub fn stroke_to_path(editor: &impl VectorEditor, svg_file: &Path, simplify: usize) -> Result<()> {
    tracing::info!(file = %svg_file.display(), simplify, "converting stroke to outline");
    editor.run_batch(svg_file, &stroke_to_path_actions(simplify))
}
