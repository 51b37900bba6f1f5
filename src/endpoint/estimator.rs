//! TCID50 estimation: validate → endpoint → titer.
//!
//! Both methods yield a log10 endpoint dilution. It is turned into a titer with
//! the same volume handling as the plaque path:
//!
//! ```text
//! titer = 10^|log| / (volume_µL / 1000)
//! ```

use tracing::{debug, warn};

use crate::domain::{DilutionSeries, PFU_PER_TCID50, Tcid50Method, Tcid50Result, Titer, Warning, Warnings};
use crate::endpoint::reed_muench::reed_muench;
use crate::endpoint::spearman_karber::spearman_karber;
use crate::endpoint::validate::validate_series;
use crate::error::Result;
use crate::plaque::forward::{ensure_finite, volume_ml};

/// Estimate the TCID50/mL of a series with the chosen method.
pub fn estimate(series: &DilutionSeries, method: Tcid50Method, volume_ul: f64) -> Result<Tcid50Result> {
    let volume_ml = volume_ml(volume_ul)?;
    let assessment = validate_series(series)?;

    let mut warnings = Warnings::new();
    if !assessment.has_clear_transition {
        warnings.insert(Warning::NoTransition);
    }
    if !assessment.monotonic {
        warnings.insert(Warning::NonMonotonic);
    }
    if !assessment.consecutive {
        warnings.insert(Warning::IrregularSpacing);
    }
    for w in &warnings {
        warn!(method = method.display_name(), warning = ?w, "{}", w.description());
    }

    let log10_endpoint = match method {
        Tcid50Method::ReedMuench => reed_muench(series)?.log10_endpoint,
        Tcid50Method::SpearmanKarber => spearman_karber(series)?.log10_endpoint,
    };

    let dilution_factor = ensure_finite(10f64.powf(log10_endpoint.abs()), "endpoint dilution factor")?;
    let titer = ensure_finite(dilution_factor / volume_ml, "TCID50 titer")?;
    let pfu_equivalent = titer * PFU_PER_TCID50;

    debug!(
        method = method.display_name(),
        log10_endpoint,
        dilution_factor,
        titer,
        pfu_equivalent,
        "tcid50 estimated"
    );

    Ok(Tcid50Result {
        method,
        log10_endpoint,
        dilution_factor,
        volume_ul,
        titer: Titer::from_magnitude(titer),
        pfu_equivalent: Titer::from_magnitude(pfu_equivalent),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DegenerateReason, TiterError};

    fn worked_series() -> DilutionSeries {
        DilutionSeries::from_rows(&[(-3, 4, 4), (-4, 4, 4), (-5, 3, 5), (-6, 1, 5), (-7, 0, 4)]).unwrap()
    }

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        ((a - b) / b).abs() < tol
    }

    #[test]
    fn reed_muench_worked_example() {
        let res = estimate(&worked_series(), Tcid50Method::ReedMuench, 100.0).unwrap();
        assert!((res.log10_endpoint - (-4.75)).abs() < 1e-12);
        assert!(rel_close(res.dilution_factor, 56_234.13, 1e-6));
        assert!(rel_close(res.titer.magnitude, 5.623_413e5, 1e-6));
        assert_eq!(res.titer.normalized.exponent, 5);
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn spearman_karber_worked_example() {
        let res = estimate(&worked_series(), Tcid50Method::SpearmanKarber, 100.0).unwrap();
        assert!((res.log10_endpoint - (-5.3)).abs() < 1e-12);
        assert!(rel_close(res.titer.magnitude, 1.995_262e6, 1e-6));
        assert_eq!(res.titer.normalized.exponent, 6);
    }

    #[test]
    fn pfu_equivalent_is_seven_tenths() {
        for method in [Tcid50Method::ReedMuench, Tcid50Method::SpearmanKarber] {
            let res = estimate(&worked_series(), method, 50.0).unwrap();
            assert_eq!(res.pfu_equivalent.magnitude, res.titer.magnitude * 0.7);
        }
    }

    #[test]
    fn degenerate_series_fail_before_estimation() {
        let neg = DilutionSeries::from_rows(&[(-3, 0, 4), (-4, 0, 4), (-5, 0, 4)]).unwrap();
        let err = estimate(&neg, Tcid50Method::SpearmanKarber, 100.0).unwrap_err();
        assert_eq!(err, TiterError::DegenerateSeries(DegenerateReason::AllNegative));
    }

    #[test]
    fn no_transition_is_flagged_for_spearman_karber() {
        let s = DilutionSeries::from_rows(&[(-3, 4, 4), (-4, 3, 4), (-5, 2, 4)]).unwrap();
        let res = estimate(&s, Tcid50Method::SpearmanKarber, 100.0).unwrap();
        assert!(res.warnings.contains(&Warning::NoTransition));

        let err = estimate(&s, Tcid50Method::ReedMuench, 100.0).unwrap_err();
        assert!(matches!(err, TiterError::NoEndpointFound(_)));
    }

    #[test]
    fn gaps_are_flagged_not_rejected() {
        let s = DilutionSeries::from_rows(&[(-2, 4, 4), (-4, 2, 4), (-7, 0, 4)]).unwrap();
        let res = estimate(&s, Tcid50Method::SpearmanKarber, 100.0).unwrap();
        assert!(res.warnings.contains(&Warning::IrregularSpacing));
    }

    #[test]
    fn overflowing_endpoint_is_rejected() {
        let s = DilutionSeries::from_rows(&[(-400, 4, 4), (-401, 2, 4), (-402, 0, 4)]).unwrap();
        for method in [Tcid50Method::ReedMuench, Tcid50Method::SpearmanKarber] {
            let err = estimate(&s, method, 100.0).unwrap_err();
            assert!(matches!(err, TiterError::InvalidInput(_)));
        }
    }

    #[test]
    fn tiny_volume_overflow_is_rejected() {
        let s = DilutionSeries::from_rows(&[(-300, 4, 4), (-301, 2, 4), (-302, 0, 4)]).unwrap();
        let err = estimate(&s, Tcid50Method::ReedMuench, 1e-10).unwrap_err();
        assert!(matches!(err, TiterError::InvalidInput(_)));
    }

    #[test]
    fn rejects_non_positive_volume() {
        let err = estimate(&worked_series(), Tcid50Method::ReedMuench, 0.0).unwrap_err();
        assert!(matches!(err, TiterError::InvalidInput(_)));
    }
}
