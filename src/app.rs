//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings and installs logging
//! - parses CLI arguments
//! - runs the requested calculation
//! - prints text or JSON

use clap::Parser;
use serde::Serialize;

use crate::cli::{Cli, Command, DoseArgs, PlaqueArgs, Tcid50Args};
use crate::config::{OutputFormat, Settings};
use crate::domain::{DilutionSeries, ReverseVolumeRequest, standard_dilutions};
use crate::error::AppError;
use crate::report::JsonReport;

pub mod pipeline;

/// Entry point for the `titer` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    crate::logging::init(&settings, cli.verbose);

    let output = if cli.json { OutputFormat::Json } else { settings.output };

    match cli.command {
        Command::Plaque(args) => handle_plaque(&args, output),
        Command::Dose(args) => handle_dose(&args, output),
        Command::Tcid50(args) => handle_tcid50(args, output),
        Command::Dilutions => handle_dilutions(output),
    }
}

fn handle_plaque(args: &PlaqueArgs, output: OutputFormat) -> Result<(), AppError> {
    let result = pipeline::calculate_forward_titer(args.count, args.resolved_dilution_factor(), args.volume)?;

    match output {
        OutputFormat::Json => print_json("plaque", &result)?,
        OutputFormat::Text => {
            print!("{}", crate::report::format_forward(&result));
            if args.methods {
                println!("\n{}", crate::report::plaque_methods_paragraph(&result));
            }
        }
    }
    Ok(())
}

fn handle_dose(args: &DoseArgs, output: OutputFormat) -> Result<(), AppError> {
    let request = ReverseVolumeRequest {
        stock_mantissa: args.stock_mantissa,
        stock_exponent: args.stock_exponent,
        target_mantissa: args.target_mantissa,
        target_exponent: args.target_exponent,
    };
    let result = pipeline::calculate_reverse_volume(&request)?;

    match output {
        OutputFormat::Json => print_json("dose", &result)?,
        OutputFormat::Text => {
            print!("{}", crate::report::format_reverse(&result));
            if args.methods {
                println!("\n{}", crate::report::dose_methods_paragraph(&result));
            }
        }
    }
    Ok(())
}

fn handle_tcid50(args: Tcid50Args, output: OutputFormat) -> Result<(), AppError> {
    let series = DilutionSeries::new(args.wells)?;
    let result = pipeline::calculate_tcid50(&series, args.method, args.volume)?;

    match output {
        OutputFormat::Json => print_json("tcid50", &result)?,
        OutputFormat::Text => {
            print!("{}", crate::report::format_tcid50(&result, &series));
            if args.methods {
                println!("\n{}", crate::report::tcid50_methods_paragraph(&result, &series));
            }
        }
    }
    Ok(())
}

fn handle_dilutions(output: OutputFormat) -> Result<(), AppError> {
    let steps = standard_dilutions();
    match output {
        OutputFormat::Json => print_json("dilutions", &steps)?,
        OutputFormat::Text => print!("{}", crate::report::format_dilutions(&steps)),
    }
    Ok(())
}

fn print_json<T: Serialize>(calculation: &'static str, result: &T) -> Result<(), AppError> {
    let json = JsonReport::new(calculation, result).to_json()?;
    println!("{json}");
    Ok(())
}
