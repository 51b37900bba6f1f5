//! Spearman-Karber 50% endpoint.
//!
//! ```text
//! log = x0 - d × (Σ p_i - 0.5)
//! ```
//!
//! `x0` is the least dilute exponent and `d = 1`. Unevenly spaced series are not
//! rejected here; the estimator flags them with `IrregularSpacing`.

use serde::Serialize;
use tracing::debug;

use crate::domain::DilutionSeries;
use crate::error::{Result, TiterError};

/// Log10 step between consecutive tested dilutions.
pub const LOG_STEP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpearmanKarberEndpoint {
    pub first_exponent: i32,
    pub sum_proportions: f64,
    pub log10_endpoint: f64,
}

pub fn spearman_karber(series: &DilutionSeries) -> Result<SpearmanKarberEndpoint> {
    let sorted = series.least_dilute_first();
    let Some(first) = sorted.first() else {
        return Err(TiterError::invalid("dilution series is empty"));
    };

    let sum_proportions: f64 = sorted.iter().map(|o| o.proportion()).sum();
    let log10_endpoint = f64::from(first.dilution_exponent) - LOG_STEP * (sum_proportions - 0.5);

    debug!(
        first_exponent = first.dilution_exponent,
        sum_proportions,
        log10_endpoint,
        "spearman-karber endpoint"
    );

    Ok(SpearmanKarberEndpoint {
        first_exponent: first.dilution_exponent,
        sum_proportions,
        log10_endpoint,
    })
}
