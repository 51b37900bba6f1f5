//! Forward titer: plaque count → units/mL.
//!
//! ```text
//! titer = count × dilution_factor / (volume_µL / 1000)
//! ```

use tracing::debug;

use crate::domain::{AssayParameters, ForwardTiterResult, Titer, Warnings};
use crate::error::{Result, TiterError};
use crate::plaque::countability::classify_count;

/// Concentration (units/mL) from a count, fold dilution and plated volume.
pub fn compute_titer(count: f64, dilution_factor: f64, volume_ul: f64) -> Result<f64> {
    if !(count.is_finite() && count >= 0.0) {
        return Err(TiterError::invalid(format!("count must be a non-negative number (got {count})")));
    }
    if !(dilution_factor.is_finite() && dilution_factor >= 1.0) {
        return Err(TiterError::invalid(format!(
            "dilution factor must be >= 1 (got {dilution_factor})"
        )));
    }
    let volume_ml = volume_ml(volume_ul)?;
    ensure_finite(count * dilution_factor / volume_ml, "titer")
}

/// Reject results that overflowed f64.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(TiterError::invalid(format!("{what} is outside the representable range")));
    }
    Ok(value)
}

/// Convert a plated volume to mL, rejecting non-positive volumes.
pub(crate) fn volume_ml(volume_ul: f64) -> Result<f64> {
    if !(volume_ul.is_finite() && volume_ul > 0.0) {
        return Err(TiterError::invalid(format!("volume must be > 0 µL (got {volume_ul})")));
    }
    Ok(volume_ul / 1000.0)
}

/// Full forward path: titer, normalized form and countability.
pub fn forward_titer(params: AssayParameters) -> Result<ForwardTiterResult> {
    let magnitude = compute_titer(f64::from(params.count), params.dilution_factor, params.volume_ul)?;
    let countability = classify_count(params.count);

    let mut warnings = Warnings::new();
    if let Some(w) = countability.warning() {
        warnings.insert(w);
    }

    debug!(
        count = params.count,
        dilution_factor = params.dilution_factor,
        volume_ul = params.volume_ul,
        titer = magnitude,
        ?countability,
        "forward titer computed"
    );

    Ok(ForwardTiterResult {
        params,
        titer: Titer::from_magnitude(magnitude),
        countability,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Countability, Warning};

    #[test]
    fn worked_example() {
        let titer = compute_titer(50.0, 1e6, 100.0).unwrap();
        assert!((titer - 5e8).abs() < 1e-3);
    }

    #[test]
    fn rejects_bad_volume_and_dilution() {
        assert!(matches!(compute_titer(50.0, 1e6, 0.0), Err(TiterError::InvalidInput(_))));
        assert!(matches!(compute_titer(50.0, 1e6, -5.0), Err(TiterError::InvalidInput(_))));
        assert!(matches!(compute_titer(50.0, 0.5, 100.0), Err(TiterError::InvalidInput(_))));
        assert!(matches!(compute_titer(-1.0, 10.0, 100.0), Err(TiterError::InvalidInput(_))));
        assert!(compute_titer(50.0, f64::NAN, 100.0).is_err());
    }

    #[test]
    fn overflowing_titer_is_rejected() {
        let err = compute_titer(50.0, 1e307, 1.0).unwrap_err();
        assert!(matches!(err, TiterError::InvalidInput(_)));
    }

    #[test]
    fn zero_count_gives_undefined_titer() {
        let res = forward_titer(AssayParameters {
            count: 0,
            dilution_factor: 1e3,
            volume_ul: 100.0,
        })
        .unwrap();
        assert_eq!(res.titer.magnitude, 0.0);
        assert!(res.titer.is_undefined());
        assert_eq!(res.countability, Countability::TooFew);
    }

    #[test]
    fn large_counts_are_flagged_not_rejected() {
        let res = forward_titer(AssayParameters {
            count: 5_000,
            dilution_factor: 10.0,
            volume_ul: 100.0,
        })
        .unwrap();
        assert!((res.titer.magnitude - 5e5).abs() < 1e-6);
        assert!(res.warnings.contains(&Warning::TooMany));
    }
}
