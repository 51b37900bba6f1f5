//! Command-line parsing for the titer calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! engine: handlers in `app` receive already-typed numeric inputs.

use clap::{Args, Parser, Subcommand};

use crate::domain::{DilutionObservation, Tcid50Method};

/// Default plated / inoculated volume (µL).
pub const DEFAULT_VOLUME_UL: f64 = 100.0;

/// Default plating dilution exponent (10⁻⁶).
pub const DEFAULT_DILUTION_EXPONENT: i32 = -6;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "titer", version, about = "Viral titer calculator (plaque assay and TCID50)")]
pub struct Cli {
    /// Print results as JSON instead of text (overrides TITER_OUTPUT).
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging for the engine (intermediate values).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Titer (PFU/mL) from a plaque count.
    Plaque(PlaqueArgs),
    /// Volume of stock needed to deliver a target dose.
    Dose(DoseArgs),
    /// Endpoint-dilution titer (TCID50/mL) from positive/total well counts.
    Tcid50(Tcid50Args),
    /// List the standard 10⁻¹ … 10⁻⁹ plating dilutions.
    Dilutions,
}

#[derive(Debug, Args, Clone)]
pub struct PlaqueArgs {
    /// Plaques counted on the plate.
    #[arg(short, long)]
    pub count: u32,

    /// Plated dilution as a power of ten (`6` or `-6` for 10⁻⁶).
    #[arg(short, long, allow_negative_numbers = true, conflicts_with = "dilution_factor")]
    pub dilution: Option<i32>,

    /// Plated dilution as a fold factor (e.g. 1000000).
    #[arg(long)]
    pub dilution_factor: Option<f64>,

    /// Volume plated (µL).
    #[arg(long, default_value_t = DEFAULT_VOLUME_UL)]
    pub volume: f64,

    /// Also print a methods-section paragraph.
    #[arg(long)]
    pub methods: bool,
}

impl PlaqueArgs {
    /// Resolve `--dilution` / `--dilution-factor` to a fold factor.
    pub fn resolved_dilution_factor(&self) -> f64 {
        match (self.dilution_factor, self.dilution) {
            (Some(factor), _) => factor,
            (None, Some(exp)) => crate::domain::dilution_factor_for_exponent(exp),
            (None, None) => crate::domain::dilution_factor_for_exponent(DEFAULT_DILUTION_EXPONENT),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct DoseArgs {
    /// Stock concentration mantissa (0.1–9.99).
    #[arg(long)]
    pub stock_mantissa: f64,

    /// Stock concentration exponent (per mL).
    #[arg(long, allow_negative_numbers = true)]
    pub stock_exponent: i32,

    /// Target dose mantissa.
    #[arg(long)]
    pub target_mantissa: f64,

    /// Target dose exponent.
    #[arg(long, allow_negative_numbers = true)]
    pub target_exponent: i32,

    /// Also print a methods-section paragraph.
    #[arg(long)]
    pub methods: bool,
}

#[derive(Debug, Args, Clone)]
pub struct Tcid50Args {
    /// One tested dilution as `<exponent>:<positive>/<total>`, e.g. `-5:3/4`. Repeat per dilution.
    #[arg(short, long = "well", value_name = "EXP:POS/TOTAL", required = true, allow_hyphen_values = true, value_parser = parse_well)]
    pub wells: Vec<DilutionObservation>,

    /// Estimator.
    #[arg(short, long, value_enum, default_value_t = Tcid50Method::ReedMuench)]
    pub method: Tcid50Method,

    /// Inoculum volume per well (µL).
    #[arg(long, default_value_t = DEFAULT_VOLUME_UL)]
    pub volume: f64,

    /// Also print a methods-section paragraph.
    #[arg(long)]
    pub methods: bool,
}

/// Parse `-5:3/4` into an observation.
pub fn parse_well(raw: &str) -> Result<DilutionObservation, String> {
    let (exp, counts) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected EXP:POS/TOTAL, got '{raw}'"))?;
    let (pos, total) = counts
        .split_once('/')
        .ok_or_else(|| format!("expected EXP:POS/TOTAL, got '{raw}'"))?;

    let exp: i32 = exp
        .trim()
        .parse()
        .map_err(|e| format!("bad dilution exponent '{exp}': {e}"))?;
    let pos: u32 = pos
        .trim()
        .parse()
        .map_err(|e| format!("bad positive count '{pos}': {e}"))?;
    let total: u32 = total
        .trim()
        .parse()
        .map_err(|e| format!("bad total count '{total}': {e}"))?;

    // Accept `5:3/4` as shorthand for 10⁻⁵.
    DilutionObservation::new(-exp.saturating_abs(), pos, total).map_err(|e| e.to_string())
}
