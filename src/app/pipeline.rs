//! The three calculation entry points.
//!
//! Each is a pure function of its inputs: it returns a complete result or a
//! single error, holds no state between calls, and is safe to call from any
//! thread. The CLI and any other front-end go through these.

use tracing::{info, instrument};

use crate::domain::{
    AssayParameters, DilutionSeries, ForwardTiterResult, MIN_SERIES_LEN, ReverseVolumeRequest, ReverseVolumeResult,
    Tcid50Method, Tcid50Result,
};
use crate::error::{Result, TiterError};

/// Plaque count → PFU/mL with countability classification.
#[instrument(level = "debug")]
pub fn calculate_forward_titer(count: u32, dilution_factor: f64, volume_ul: f64) -> Result<ForwardTiterResult> {
    let result = crate::plaque::forward_titer(AssayParameters {
        count,
        dilution_factor,
        volume_ul,
    })?;
    info!(titer = result.titer.magnitude, countability = ?result.countability, "plaque titer");
    Ok(result)
}

/// Stock concentration + target dose → inoculum volume (µL) with advisories.
#[instrument(level = "debug")]
pub fn calculate_reverse_volume(request: &ReverseVolumeRequest) -> Result<ReverseVolumeResult> {
    let result = crate::plaque::reverse_volume(request)?;
    info!(volume_ul = result.volume_ul, "dose volume");
    Ok(result)
}

/// Dilution series → TCID50/mL (and PFU-equivalent) by the chosen method.
#[instrument(level = "debug", skip(series), fields(dilutions = series.len()))]
pub fn calculate_tcid50(series: &DilutionSeries, method: Tcid50Method, volume_ul: f64) -> Result<Tcid50Result> {
    if series.len() < MIN_SERIES_LEN {
        return Err(TiterError::invalid(format!(
            "at least {MIN_SERIES_LEN} dilutions are required (got {})",
            series.len()
        )));
    }
    let result = crate::endpoint::estimate(series, method, volume_ul)?;
    info!(
        method = method.display_name(),
        titer = result.titer.magnitude,
        pfu_equivalent = result.pfu_equivalent.magnitude,
        "tcid50 titer"
    );
    Ok(result)
}
