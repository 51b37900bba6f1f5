//! Reed-Muench 50% endpoint.
//!
//! Walking from the least to the most dilute well set, the endpoint sits between
//! the last dilution at or above 50% positive (`above`) and the first one below
//! it (`below`):
//!
//! ```text
//! pd  = (p_above - 50) / (p_above - p_below)
//! log = exponent_above + pd
//! ```
//!
//! On a non-monotone curve the first such crossing is used.

use serde::Serialize;
use tracing::debug;

use crate::domain::{DilutionObservation, DilutionSeries};
use crate::error::{DegenerateReason, Result, TiterError};

/// The interpolation points and result of a Reed-Muench fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReedMuenchEndpoint {
    pub above: DilutionObservation,
    pub below: DilutionObservation,
    pub proportionate_distance: f64,
    pub log10_endpoint: f64,
}

pub fn reed_muench(series: &DilutionSeries) -> Result<ReedMuenchEndpoint> {
    let sorted = series.least_dilute_first();

    if !sorted.iter().any(|o| o.percent_positive() >= 50.0) {
        return Err(TiterError::NoEndpointFound(
            "no dilution reached 50% positive".to_string(),
        ));
    }
    if !sorted.iter().any(|o| o.percent_positive() < 50.0) {
        return Err(TiterError::NoEndpointFound(
            "no dilution fell below 50% positive".to_string(),
        ));
    }

    let Some((above, below)) = sorted
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .find(|(a, b)| a.percent_positive() >= 50.0 && b.percent_positive() < 50.0)
    else {
        return Err(TiterError::NoEndpointFound(
            "percent positive never crosses 50% between adjacent dilutions".to_string(),
        ));
    };

    let p_above = above.percent_positive();
    let p_below = below.percent_positive();
    let spread = p_above - p_below;
    if spread == 0.0 {
        return Err(TiterError::DegenerateSeries(DegenerateReason::ZeroDifferentiation));
    }

    let proportionate_distance = (p_above - 50.0) / spread;
    let log10_endpoint = f64::from(above.dilution_exponent) + proportionate_distance;

    debug!(
        above = above.dilution_exponent,
        p_above,
        below = below.dilution_exponent,
        p_below,
        proportionate_distance,
        log10_endpoint,
        "reed-muench endpoint"
    );

    Ok(ReedMuenchEndpoint {
        above,
        below,
        proportionate_distance,
        log10_endpoint,
    })
}
