//! Shared domain types.
//!
//! Everything here is a small value type: built per calculation, never shared
//! mutably, and serializable so the CLI can emit it as JSON.

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Result, TiterError};
use crate::math::{ScientificNotation, normalize};

/// Lower bound (inclusive) of a countable plate.
pub const COUNTABLE_MIN: u32 = 30;

/// Upper bound (inclusive) of a countable plate.
pub const COUNTABLE_MAX: u32 = 300;

/// Empirical TCID50 → PFU conversion (PFU ≈ 0.7 × TCID50).
///
/// A rule-of-thumb constant from Poisson statistics, not a measured value.
pub const PFU_PER_TCID50: f64 = 0.7;

/// Minimum number of tested dilutions for an endpoint estimate.
pub const MIN_SERIES_LEN: usize = 3;

/// One tested dilution in an endpoint (TCID50) assay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DilutionObservation {
    /// Power of ten of the dilution (`-6` means 10⁻⁶).
    pub dilution_exponent: i32,
    /// Wells scored positive (CPE / infected).
    pub positive_count: u32,
    /// Wells inoculated.
    pub total_count: u32,
}

impl DilutionObservation {
    pub fn new(dilution_exponent: i32, positive_count: u32, total_count: u32) -> Result<Self> {
        if dilution_exponent >= 0 {
            return Err(TiterError::invalid(format!(
                "dilution exponent must be negative (got {dilution_exponent})"
            )));
        }
        if total_count == 0 {
            return Err(TiterError::invalid(format!(
                "dilution 10^{dilution_exponent}: total wells must be > 0"
            )));
        }
        if positive_count > total_count {
            return Err(TiterError::invalid(format!(
                "dilution 10^{dilution_exponent}: {positive_count} positive wells exceeds {total_count} total"
            )));
        }
        Ok(Self {
            dilution_exponent,
            positive_count,
            total_count,
        })
    }

    /// Fraction of positive wells in `[0, 1]`.
    pub fn proportion(&self) -> f64 {
        f64::from(self.positive_count) / f64::from(self.total_count)
    }

    /// Percent of positive wells in `[0, 100]`.
    pub fn percent_positive(&self) -> f64 {
        100.0 * self.proportion()
    }

    pub fn is_all_negative(&self) -> bool {
        self.positive_count == 0
    }

    pub fn is_all_positive(&self) -> bool {
        self.positive_count == self.total_count
    }
}

/// The observations of one endpoint assay, one per tested dilution.
///
/// Entry order is irrelevant; exponents are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DilutionSeries {
    observations: Vec<DilutionObservation>,
}

impl DilutionSeries {
    pub fn new(observations: Vec<DilutionObservation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(TiterError::invalid("dilution series is empty"));
        }
        let mut seen = BTreeSet::new();
        for obs in &observations {
            if !seen.insert(obs.dilution_exponent) {
                return Err(TiterError::invalid(format!(
                    "dilution 10^{} appears more than once",
                    obs.dilution_exponent
                )));
            }
        }
        Ok(Self { observations })
    }

    /// Convenience constructor from `(exponent, positive, total)` rows.
    pub fn from_rows(rows: &[(i32, u32, u32)]) -> Result<Self> {
        let observations = rows
            .iter()
            .map(|&(exp, pos, total)| DilutionObservation::new(exp, pos, total))
            .collect::<Result<Vec<_>>>()?;
        Self::new(observations)
    }

    /// Observations in entry order.
    pub fn observations(&self) -> &[DilutionObservation] {
        &self.observations
    }

    /// Observations ordered from least dilute (exponent closest to zero) to most dilute.
    pub fn least_dilute_first(&self) -> Vec<DilutionObservation> {
        let mut sorted = self.observations.clone();
        sorted.sort_by(|a, b| b.dilution_exponent.cmp(&a.dilution_exponent));
        sorted
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// A concentration in units/mL plus its scientific-notation form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Titer {
    pub magnitude: f64,
    pub normalized: ScientificNotation,
}

impl Titer {
    pub fn from_magnitude(magnitude: f64) -> Self {
        Self {
            magnitude,
            normalized: normalize(magnitude),
        }
    }

    /// `true` when the titer is the zero sentinel (undefined / nothing counted).
    pub fn is_undefined(&self) -> bool {
        self.normalized.is_zero()
    }
}

/// Plate countability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Countability {
    TooFew,
    Acceptable,
    TooMany,
}

impl Countability {
    /// The warning attached to a result for this classification, if any.
    pub fn warning(self) -> Option<Warning> {
        match self {
            Countability::TooFew => Some(Warning::TooFew),
            Countability::Acceptable => None,
            Countability::TooMany => Some(Warning::TooMany),
        }
    }
}

/// Non-fatal annotations on an otherwise valid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// Fewer than 30 plaques counted.
    TooFew,
    /// More than 300 plaques counted.
    TooMany,
    /// The series never drops from ≥50% to <50% positive.
    NoTransition,
    /// Percent positive rises somewhere along the dilution axis.
    NonMonotonic,
    /// Tested exponents are not consecutive integers.
    IrregularSpacing,
    /// Required inoculum exceeds 1000 µL.
    LargeVolume,
    /// Required inoculum is below 1 µL.
    SmallVolume,
}

impl Warning {
    pub fn description(self) -> &'static str {
        match self {
            Warning::TooFew => "count is below 30; results may lack statistical reliability",
            Warning::TooMany => "count is above 300; plate may be too confluent to count accurately",
            Warning::NoTransition => "no clear 50% transition between tested dilutions; estimate is low-confidence",
            Warning::NonMonotonic => "percent positive does not decrease monotonically with dilution",
            Warning::IrregularSpacing => "dilutions are not consecutive 10-fold steps; interpolation assumes a unit log step",
            Warning::LargeVolume => "volume exceeds 1000 µL; consider diluting the stock",
            Warning::SmallVolume => "volume is below 1 µL; pipetting accuracy is poor at this scale",
        }
    }
}

pub type Warnings = BTreeSet<Warning>;

/// Endpoint-dilution estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Tcid50Method {
    #[value(name = "reed-muench")]
    ReedMuench,
    #[value(name = "spearman-karber")]
    SpearmanKarber,
}

impl Tcid50Method {
    pub fn display_name(self) -> &'static str {
        match self {
            Tcid50Method::ReedMuench => "Reed-Muench",
            Tcid50Method::SpearmanKarber => "Spearman-Karber",
        }
    }
}

/// Inputs of a plaque assay plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssayParameters {
    pub count: u32,
    /// Fold dilution of the plated inoculum (`1e6` for 10⁻⁶).
    pub dilution_factor: f64,
    pub volume_ul: f64,
}

/// Output of the forward (plaque count → titer) path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardTiterResult {
    pub params: AssayParameters,
    pub titer: Titer,
    pub countability: Countability,
    pub warnings: Warnings,
}

/// A stock concentration and target dose, each given as mantissa × 10^exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReverseVolumeRequest {
    pub stock_mantissa: f64,
    pub stock_exponent: i32,
    pub target_mantissa: f64,
    pub target_exponent: i32,
}

impl ReverseVolumeRequest {
    /// Stock concentration in units/mL.
    pub fn stock_concentration(&self) -> f64 {
        self.stock_mantissa * 10f64.powi(self.stock_exponent)
    }

    /// Target dose in units.
    pub fn target_quantity(&self) -> f64 {
        self.target_mantissa * 10f64.powi(self.target_exponent)
    }
}

/// Output of the reverse (target dose → volume) path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReverseVolumeResult {
    pub volume_ul: f64,
    pub stock_concentration: f64,
    pub target_quantity: f64,
    pub warnings: Warnings,
    /// Fold dilution that would bring the volume back to ~100 µL (set with `LargeVolume`).
    pub suggested_dilution_factor: Option<f64>,
}

/// Output of the endpoint-dilution path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tcid50Result {
    pub method: Tcid50Method,
    /// Interpolated log10 endpoint dilution (e.g. `-4.75`).
    pub log10_endpoint: f64,
    /// `10^|log10_endpoint|`.
    pub dilution_factor: f64,
    pub volume_ul: f64,
    /// TCID50 per mL.
    pub titer: Titer,
    /// Estimated PFU per mL (`PFU_PER_TCID50 × titer`).
    pub pfu_equivalent: Titer,
    pub warnings: Warnings,
}

/// A rung of the usual 10-fold plating ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DilutionStep {
    pub exponent: i32,
    pub factor: f64,
    pub label: String,
}

/// Fold dilution for a power-of-ten dilution (`-6` → `1e6`).
pub fn dilution_factor_for_exponent(exponent: i32) -> f64 {
    10f64.powi(exponent.saturating_abs())
}

/// Standard 10⁻¹ … 10⁻⁹ plating dilutions.
pub fn standard_dilutions() -> Vec<DilutionStep> {
    (1..=9)
        .map(|k| {
            let exponent = -k;
            DilutionStep {
                exponent,
                factor: dilution_factor_for_exponent(exponent),
                label: format!("10^{exponent}"),
            }
        })
        .collect()
}
