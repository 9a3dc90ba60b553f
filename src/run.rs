//! End-to-end cookiecutter generation
//!
//! Creates a scratch directory, writes the three outlines into it and hands
//! them to the CAD macro. The directory is removed when the run ends, whether
//! it succeeded, failed or was interrupted.

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::tools::{CadTool, VectorEditor, build_model};
use crate::variants::generate;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Suffix of the scratch directory name
pub const WORKDIR_SUFFIX: &str = "cookiecutter";

/// Set when the user presses Ctrl-C
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Install a Ctrl-C handler raising this flag instead of killing the
    /// process, so scratch files are still cleaned up.
    pub fn install() -> std::result::Result<Self, ctrlc::Error> {
        let interrupt = Interrupt::default();
        let flag = Arc::clone(&interrupt.flag);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.is_set() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Generate the cookiecutter described by `config`
pub fn run(
    config: &RunConfig,
    editor: &impl VectorEditor,
    cad: &impl CadTool,
    interrupt: &Interrupt,
) -> Result<()> {
    if !config.input.exists() {
        return Err(Error::InputNotFound(config.input.clone()));
    }

    let root = config
        .scratch_root
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let workdir = tempfile::Builder::new()
        .suffix(WORKDIR_SUFFIX)
        .tempdir_in(&root)
        .map_err(|e| Error::io(root, e))?;
    tracing::info!("Using {} as the output directory", workdir.path().display());

    // Dropping `workdir` removes the directory on every return path
    run_in(config, editor, cad, interrupt, workdir.path())
}

/// Run every step inside an existing working directory
pub fn run_in(
    config: &RunConfig,
    editor: &impl VectorEditor,
    cad: &impl CadTool,
    interrupt: &Interrupt,
    workdir: &Path,
) -> Result<()> {
    interrupt.check()?;
    let variants = generate(editor, &config.input, workdir, &config.variants)?;
    for variant in &variants {
        tracing::info!(
            "{}: stroke width {} mm -> {}",
            variant.name,
            variant.stroke_width,
            variant.outline.display()
        );
    }

    interrupt.check()?;
    build_model(cad, &config.macro_path, workdir, config.bottom)
}
