use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use cookiecutter::perimeters::nozzle_diameters;
use cookiecutter::{FreeCad, Inkscape, Interrupt, RunConfig, VariantOptions, run};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "cookiecutter", version)]
#[command(about = "Generates a simple 3D cookiecutter shape in FreeCAD from a SVG path")]
struct Cli {
    /// SVG file to use as a base. Must contain 1 closed & correctly sized path
    svg_path_file: PathBuf,

    /// How many times the path must be simplified before processing
    #[arg(short, long, default_value_t = 0, value_name = "TIMES")]
    simplify: usize,

    /// Printer nozzle diameter
    #[arg(short, long, default_value_t = 0.6, value_parser = parse_nozzle_diameter)]
    nozzle_diameter: f64,

    /// Target 3D printer layer height
    #[arg(short, long, default_value_t = 0.3)]
    layer_height: f64,

    /// Number of 3D printed perimeters at the widest (base) part
    #[arg(short, long, default_value_t = 3, value_name = "N")]
    max_perimeters: usize,

    /// Whether to add a bottom to the cookiecutter
    #[arg(short, long)]
    bottom: bool,

    /// FreeCAD macro building the model
    #[arg(long = "macro", value_name = "FILE", env = "COOKIECUTTER_MACRO")]
    macro_path: PathBuf,

    /// Inkscape executable (searched in $PATH by default)
    #[arg(long, value_name = "PATH")]
    inkscape: Option<PathBuf>,

    /// FreeCAD executable (searched in $PATH by default)
    #[arg(long, value_name = "PATH")]
    freecad: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            input: self.svg_path_file.clone(),
            variants: VariantOptions {
                simplify: self.simplify,
                nozzle_diameter: self.nozzle_diameter,
                layer_height: self.layer_height,
                max_perimeters: self.max_perimeters,
            },
            bottom: self.bottom,
            macro_path: self.macro_path.clone(),
            inkscape: self.inkscape.clone(),
            freecad: self.freecad.clone(),
            scratch_root: None,
        }
    }

    /// Reject a missing input file the way clap rejects a bad argument
    fn check_input(&self) -> Result<(), clap::Error> {
        if self.svg_path_file.exists() {
            return Ok(());
        }
        Err(Cli::command().error(
            ErrorKind::ValueValidation,
            format!("{} does not exist !", self.svg_path_file.display()),
        ))
    }
}

fn parse_nozzle_diameter(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    let supported = nozzle_diameters();
    if supported.iter().any(|n| (n - value).abs() < 1e-6) {
        Ok(value)
    } else {
        let choices: Vec<String> = supported.iter().map(|n| n.to_string()).collect();
        Err(format!("supported values: {}", choices.join(", ")))
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(config: &RunConfig) -> cookiecutter::Result<()> {
    // Resolve both tools before doing any work
    let inkscape = Inkscape::resolve(config.inkscape.as_deref())?;
    let freecad = FreeCad::resolve(config.freecad.as_deref())?;
    tracing::debug!(
        inkscape = %inkscape.executable().display(),
        freecad = %freecad.executable().display(),
        "external tools"
    );

    let interrupt = match Interrupt::install() {
        Ok(interrupt) => interrupt,
        Err(e) => {
            tracing::warn!("Could not install Ctrl-C handler: {}", e);
            Interrupt::default()
        }
    };

    run(config, &inkscape, &freecad, &interrupt)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.check_input() {
        e.exit();
    }

    match execute(&cli.run_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
