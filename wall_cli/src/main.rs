//! # Wallflow CLI Application
//!
//! Terminal front end for wall_core. Builds a wall one layer at a time and
//! prints the overall R-value, U-value and heat flow after every change.
//!
//! ```text
//! wall_cli                          # interactive session, default boundary values
//! wall_cli interactive --t-outside -10 --area 320
//! wall_cli --materials my_table.toml materials
//! ```
//!
//! Set `RUST_LOG=wall_core=debug` to see accepted and rejected inputs.

mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use wall_core::{BoundaryConditions, MaterialTable, WallError, WallResult};

use crate::session::Session;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Wall(#[from] WallError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser)]
#[command(name = "wall_cli")]
#[command(about = "Wallflow CLI - Composite wall R-value and heat flow", long_about = None)]
struct Cli {
    /// Material table TOML file (defaults to the built-in table)
    #[arg(long, global = true)]
    materials: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the material table
    Materials,
    /// Build a wall interactively (default)
    Interactive(BoundaryArgs),
}

#[derive(Args, Clone)]
struct BoundaryArgs {
    /// Inside temperature (°F)
    #[arg(long, default_value_t = 70.0, allow_negative_numbers = true)]
    t_inside: f64,
    /// Outside temperature (°F)
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    t_outside: f64,
    /// Inside air film R-value
    #[arg(long, default_value_t = wall_core::heat_transfer::DEFAULT_FILM_INSIDE_R)]
    film_inside: f64,
    /// Outside air film R-value
    #[arg(long, default_value_t = wall_core::heat_transfer::DEFAULT_FILM_OUTSIDE_R)]
    film_outside: f64,
    /// Wall area (ft²)
    #[arg(long, default_value_t = 100.0)]
    area: f64,
    /// Print results and errors as JSON
    #[arg(long)]
    json: bool,
}

impl Default for BoundaryArgs {
    fn default() -> Self {
        let bounds = BoundaryConditions::default();
        BoundaryArgs {
            t_inside: bounds.t_inside_f,
            t_outside: bounds.t_outside_f,
            film_inside: bounds.film_inside_r,
            film_outside: bounds.film_outside_r,
            area: bounds.area_ft2,
            json: false,
        }
    }
}

impl BoundaryArgs {
    fn conditions(&self) -> WallResult<BoundaryConditions> {
        let bounds = BoundaryConditions {
            t_inside_f: self.t_inside,
            t_outside_f: self.t_outside,
            film_inside_r: self.film_inside,
            film_outside_r: self.film_outside,
            area_ft2: self.area,
        };
        bounds.validate()?;
        Ok(bounds)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let materials = match &cli.materials {
        Some(path) => Arc::new(MaterialTable::load(path)?),
        None => MaterialTable::builtin(),
    };
    tracing::debug!(materials = materials.len(), "material table ready");

    match cli.command.unwrap_or_else(|| Commands::Interactive(BoundaryArgs::default())) {
        Commands::Materials => {
            for (i, material) in materials.iter().enumerate() {
                println!("{:>3}. {}", i + 1, material.display_name());
            }
            Ok(())
        }
        Commands::Interactive(args) => {
            let bounds = args.conditions()?;
            let stdin = io::stdin();
            let mut session = Session::new(materials, bounds, args.json, stdin.lock(), io::stdout());
            session.run()?;
            Ok(())
        }
    }
}
