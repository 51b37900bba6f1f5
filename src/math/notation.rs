//! Scientific-notation normalization.
//!
//! Every displayed concentration goes through [`normalize`]:
//!
//! ```text
//! exponent = floor(log10(m))
//! mantissa = m / 10^exponent        1 <= mantissa < 10
//! ```
//!
//! Non-positive (or non-finite) magnitudes map to the zero sentinel `(0, 0)`.
//! That value means "undefined titer" and is not a valid notation.

use serde::Serialize;

/// Below this exponent `10^exponent` underflows, so scaling goes through `1e300` first.
const SUBNORMAL_SPLIT: i32 = -300;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScientificNotation {
    pub mantissa: f64,
    pub exponent: i32,
}

impl ScientificNotation {
    pub const ZERO: ScientificNotation = ScientificNotation {
        mantissa: 0.0,
        exponent: 0,
    };

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// Recompose `mantissa × 10^exponent`.
    pub fn value(&self) -> f64 {
        if self.exponent < SUBNORMAL_SPLIT {
            return self.mantissa * 10f64.powi(self.exponent - SUBNORMAL_SPLIT) * 1e-300;
        }
        self.mantissa * 10f64.powi(self.exponent)
    }
}

/// Split a magnitude into mantissa and power of ten.
pub fn normalize(magnitude: f64) -> ScientificNotation {
    if !(magnitude.is_finite() && magnitude > 0.0) {
        return ScientificNotation::ZERO;
    }

    let mut exponent = magnitude.log10().floor() as i32;
    let mut mantissa = if exponent < SUBNORMAL_SPLIT {
        (magnitude * 1e300) / 10f64.powi(exponent - SUBNORMAL_SPLIT)
    } else {
        magnitude / 10f64.powi(exponent)
    };

    // log10 can land a hair on either side of an integer at exact powers of ten.
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    } else if mantissa < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }

    ScientificNotation { mantissa, exponent }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(m: f64) {
        let n = normalize(m);
        assert!(n.mantissa >= 1.0 && n.mantissa < 10.0, "{m}: mantissa {}", n.mantissa);
        let rel = ((n.value() - m) / m).abs();
        assert!(rel < 1e-9, "{m}: relative error {rel}");
    }

    #[test]
    fn normalizes_typical_titers() {
        let n = normalize(5.0e8);
        assert_eq!(n.exponent, 8);
        assert!((n.mantissa - 5.0).abs() < 1e-12);

        let n = normalize(562_341.3);
        assert_eq!(n.exponent, 5);
        assert!((n.mantissa - 5.623413).abs() < 1e-9);
    }

    #[test]
    fn round_trips_across_magnitudes() {
        for m in [
            1.0, 9.999_999, 10.0, 1e3, 1e-3, 0.7, 123.456, 1e15, 3.3e-7, 7.0e12, 1e300, 2.5e-300, 1e-305, 1e-310, 5e-324,
        ] {
            assert_round_trip(m);
        }
        for k in -12..=12 {
            assert_round_trip(10f64.powi(k));
        }
    }

    #[test]
    fn subnormal_magnitudes_keep_mantissa_in_range() {
        let n = normalize(1e-310);
        assert!(n.mantissa.is_finite() && n.mantissa >= 1.0 && n.mantissa < 10.0);
        assert!(n.exponent == -310 || n.exponent == -311);

        let n = normalize(f64::from_bits(1));
        assert_eq!(n.exponent, -324);
        assert!((n.mantissa - 4.940_656).abs() < 1e-6);
    }

    #[test]
    fn non_positive_is_zero_sentinel() {
        assert_eq!(normalize(0.0), ScientificNotation::ZERO);
        assert_eq!(normalize(-4.0), ScientificNotation::ZERO);
        assert!(normalize(f64::NAN).is_zero());
        assert!(normalize(f64::INFINITY).is_zero());
    }
}
