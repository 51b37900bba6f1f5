//! End-to-end checks of the public entry points against hand-worked assays.

use pretty_assertions::assert_eq;
use titer_calc::domain::{Countability, DilutionSeries, ReverseVolumeRequest, Tcid50Method, Warning};
use titer_calc::{DegenerateReason, TiterError, calculate_forward_titer, calculate_reverse_volume, calculate_tcid50};

fn rel_err(a: f64, b: f64) -> f64 {
    ((a - b) / b).abs()
}

/// 100%, 100%, 60%, 20%, 0% positive, entered out of order.
fn worked_series() -> DilutionSeries {
    DilutionSeries::from_rows(&[(-6, 1, 5), (-3, 4, 4), (-7, 0, 4), (-5, 3, 5), (-4, 4, 4)]).unwrap()
}

#[test]
fn plaque_titer_and_dose_are_inverses() {
    let forward = calculate_forward_titer(50, 1e6, 100.0).unwrap();
    assert!(rel_err(forward.titer.magnitude, 5e8) < 1e-12);
    assert_eq!(forward.titer.normalized.exponent, 8);
    assert_eq!(forward.countability, Countability::Acceptable);

    let dose = calculate_reverse_volume(&ReverseVolumeRequest {
        stock_mantissa: forward.titer.normalized.mantissa,
        stock_exponent: forward.titer.normalized.exponent,
        target_mantissa: 5.0,
        target_exponent: 5,
    })
    .unwrap();
    assert!((dose.volume_ul - 1.0).abs() < 1e-9);
    assert!(dose.warnings.is_empty());
}

#[test]
fn reed_muench_and_spearman_karber_differ_as_expected() {
    let series = worked_series();

    let rm = calculate_tcid50(&series, Tcid50Method::ReedMuench, 100.0).unwrap();
    assert!((rm.log10_endpoint + 4.75).abs() < 1e-12);
    assert!(rel_err(rm.titer.magnitude, 10f64.powf(4.75) / 0.1) < 1e-12);
    assert!(rel_err(rm.titer.magnitude, 5.62e5) < 1e-3);

    let sk = calculate_tcid50(&series, Tcid50Method::SpearmanKarber, 100.0).unwrap();
    assert!((sk.log10_endpoint + 5.3).abs() < 1e-12);
    assert!(rel_err(sk.titer.magnitude, 1.995e6) < 1e-3);

    for res in [&rm, &sk] {
        assert_eq!(res.pfu_equivalent.magnitude, res.titer.magnitude * 0.7);
        assert!(res.warnings.is_empty());
    }
}

#[test]
fn degenerate_series_are_rejected() {
    let negative = DilutionSeries::from_rows(&[(-2, 0, 4), (-3, 0, 4), (-4, 0, 4)]).unwrap();
    let positive = DilutionSeries::from_rows(&[(-2, 4, 4), (-3, 4, 4), (-4, 4, 4)]).unwrap();

    for method in [Tcid50Method::ReedMuench, Tcid50Method::SpearmanKarber] {
        assert_eq!(
            calculate_tcid50(&negative, method, 100.0).unwrap_err(),
            TiterError::DegenerateSeries(DegenerateReason::AllNegative)
        );
        assert_eq!(
            calculate_tcid50(&positive, method, 100.0).unwrap_err(),
            TiterError::DegenerateSeries(DegenerateReason::AllPositive)
        );
    }
}

#[test]
fn non_monotone_series_is_estimated_and_flagged() {
    let series = DilutionSeries::from_rows(&[(-3, 4, 4), (-4, 1, 4), (-5, 3, 4), (-6, 0, 4)]).unwrap();
    let res = calculate_tcid50(&series, Tcid50Method::ReedMuench, 100.0).unwrap();
    assert!(res.warnings.contains(&Warning::NonMonotonic));
    // First crossing: 100% at 10^-3, 25% at 10^-4 → pd = 50/75.
    assert!((res.log10_endpoint - (-3.0 + 50.0 / 75.0)).abs() < 1e-12);
}

#[test]
fn invalid_inputs_are_rejected_up_front() {
    assert!(matches!(calculate_forward_titer(50, 1e6, 0.0), Err(TiterError::InvalidInput(_))));
    assert!(matches!(calculate_forward_titer(50, 0.0, 100.0), Err(TiterError::InvalidInput(_))));
    assert!(matches!(
        calculate_tcid50(&worked_series(), Tcid50Method::SpearmanKarber, -1.0),
        Err(TiterError::InvalidInput(_))
    ));
}

#[test]
fn overflowing_results_are_rejected_not_zeroed() {
    assert!(matches!(calculate_forward_titer(50, 1e307, 1.0), Err(TiterError::InvalidInput(_))));

    let deep = DilutionSeries::from_rows(&[(-400, 4, 4), (-401, 2, 4), (-402, 0, 4)]).unwrap();
    assert!(matches!(
        calculate_tcid50(&deep, Tcid50Method::ReedMuench, 100.0),
        Err(TiterError::InvalidInput(_))
    ));
}
