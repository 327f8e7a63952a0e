//! # Cabinet Calc CLI
//!
//! Command-line interface for sizing a run of cabinets. Prints the job
//! specification (or the cut list as JSON) for the given wall dimensions.
//!
//! Set `RUST_LOG=cabinet_core=debug` to see how the cabinet width was fitted.

mod cli;

use std::fs;
use std::process::ExitCode;

use cabinet_core::job::REPORT_WIDTH;
use cabinet_core::{CabError, Job, MaterialCatalog, Run, RunInput};
use clap::Parser;
use cli::Cli;
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error("Cannot read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid run JSON in '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Missing required value: --{0}")]
    Missing(&'static str),

    #[error(transparent)]
    Cabinet(#[from] CabError),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Cabinet(e)) => {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.materials {
        print_materials();
        return Ok(());
    }

    let input = build_input(&cli)?;
    let run = Run::new(input)?;
    tracing::debug!(num_cabinets = run.num_cabinets(), "run configured");

    if cli.json {
        let cut_list = run.cut_list()?;
        let json = serde_json::to_string_pretty(&cut_list).map_err(|e| CabError::internal(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    let name = cli.name.clone().ok_or(CliError::Missing("name"))?;
    let mut job = Job::new(name, run);
    if let Some(desc) = &cli.desc {
        job = job.with_description(desc.clone());
    }
    for line in job.specification()? {
        for wrapped in wrap(&line, REPORT_WIDTH) {
            println!("{}", wrapped);
        }
    }
    Ok(())
}

/// Start from the --input file (or defaults) and apply any flags given.
fn build_input(cli: &Cli) -> Result<RunInput, CliError> {
    let mut input = match &cli.input {
        Some(path) => {
            let display = path.display().to_string();
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: display.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::Json {
                path: display,
                source,
            })?
        }
        None => {
            let fullwidth = cli.fullwidth.ok_or(CliError::Missing("fullwidth"))?;
            let height = cli.height.ok_or(CliError::Missing("height"))?;
            let depth = cli.depth.ok_or(CliError::Missing("depth"))?;
            RunInput::new(fullwidth, height, depth)
        }
    };

    if let Some(fullwidth) = cli.fullwidth {
        input.fullwidth = fullwidth;
    }
    if let Some(height) = cli.height {
        input.height = height;
    }
    if let Some(depth) = cli.depth {
        input.depth = depth;
    }
    if let Some(fillers) = cli.fillers {
        input.fillers = fillers;
    }
    if let Some(name) = &cli.prim_matl {
        input.primary_material = name.clone();
    }
    if cli.prim_thick.is_some() {
        input.primary_thickness = cli.prim_thick;
    }
    if let Some(name) = &cli.door_matl {
        input.door_material = name.clone();
    }
    if cli.door_thick.is_some() {
        input.door_thickness = cli.door_thick;
    }
    if cli.legs {
        input.has_legs = true;
    }
    if cli.btm_thicks.is_some() {
        input.bottom_panel_thicknesses = cli.btm_thicks.clone();
    }
    Ok(input)
}

fn print_materials() {
    for material in MaterialCatalog::standard().iter() {
        let legs = material
            .legs_bottom_thicknesses
            .iter()
            .map(|t| format!("{}\"", t))
            .collect::<Vec<_>>()
            .join(" + ");
        println!(
            "{:<22}{:<8}{}\"  (with legs: {})",
            material.name, material.abbrev, material.thickness, legs
        );
    }
}

/// Wrap report lines the way the shop printout expects: first-fit, breaking
/// at spaces and hyphens. Lines that already fit are returned untouched so
/// the parts list keeps its column spacing.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }
    let options = textwrap::Options::new(width).wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    textwrap::wrap(line, options)
        .into_iter()
        .map(|l| l.into_owned())
        .collect()
}
