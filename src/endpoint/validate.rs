//! Dilution series validation.
//!
//! Hard failures:
//! - every dilution negative → `DegenerateSeries(AllNegative)`
//! - every dilution fully positive → `DegenerateSeries(AllPositive)`
//!
//! Everything else passes, with shape diagnostics the estimator turns into warnings.

use serde::Serialize;

use crate::domain::DilutionSeries;
use crate::error::{DegenerateReason, Result, TiterError};

/// Shape of a series that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesAssessment {
    /// Some adjacent pair (least → most dilute) goes from ≥50% to <50% positive.
    pub has_clear_transition: bool,
    /// Percent positive never increases with dilution.
    pub monotonic: bool,
    /// Sorted exponents step by exactly one.
    pub consecutive: bool,
}

pub fn validate_series(series: &DilutionSeries) -> Result<SeriesAssessment> {
    let obs = series.observations();
    if obs.iter().all(|o| o.is_all_negative()) {
        return Err(TiterError::DegenerateSeries(DegenerateReason::AllNegative));
    }
    if obs.iter().all(|o| o.is_all_positive()) {
        return Err(TiterError::DegenerateSeries(DegenerateReason::AllPositive));
    }

    let sorted = series.least_dilute_first();
    let mut assessment = SeriesAssessment {
        has_clear_transition: false,
        monotonic: true,
        consecutive: true,
    };
    for pair in sorted.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (pa, pb) = (a.percent_positive(), b.percent_positive());
        if pa >= 50.0 && pb < 50.0 {
            assessment.has_clear_transition = true;
        }
        if pb > pa {
            assessment.monotonic = false;
        }
        if a.dilution_exponent - b.dilution_exponent != 1 {
            assessment.consecutive = false;
        }
    }
    Ok(assessment)
}
