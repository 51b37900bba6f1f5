//! Reverse dosing: how much stock delivers a target dose.
//!
//! ```text
//! volume_µL = 1000 × target / stock_per_mL
//! ```
//!
//! Advisories are layered on top of the volume and never change it.

use tracing::{debug, warn};

use crate::domain::{ReverseVolumeRequest, ReverseVolumeResult, Warning, Warnings};
use crate::error::{Result, TiterError};
use crate::plaque::forward::ensure_finite;

/// Above this the inoculum is impractical without diluting the stock.
pub const LARGE_VOLUME_UL: f64 = 1000.0;

/// Below this pipetting error dominates.
pub const SMALL_VOLUME_UL: f64 = 1.0;

/// Volume the dilution hint aims for.
const HINT_TARGET_VOLUME_UL: f64 = 100.0;

/// Accepted range for the stock mantissa.
const STOCK_MANTISSA_RANGE: std::ops::RangeInclusive<f64> = 0.1..=9.99;

/// Volume (µL) of stock that contains `target_quantity` units.
pub fn compute_volume(target_quantity: f64, stock_per_ml: f64) -> Result<f64> {
    if !(stock_per_ml.is_finite() && stock_per_ml > 0.0) {
        return Err(TiterError::invalid(format!(
            "stock concentration must be > 0 per mL (got {stock_per_ml})"
        )));
    }
    if !(target_quantity.is_finite() && target_quantity > 0.0) {
        return Err(TiterError::invalid(format!(
            "target quantity must be > 0 (got {target_quantity})"
        )));
    }
    ensure_finite(1000.0 * target_quantity / stock_per_ml, "volume")
}

/// Advisory for a computed volume, plus the suggested dilution factor for large volumes.
pub fn volume_advisory(volume_ul: f64) -> (Option<Warning>, Option<f64>) {
    if volume_ul > LARGE_VOLUME_UL {
        (Some(Warning::LargeVolume), Some(volume_ul / HINT_TARGET_VOLUME_UL))
    } else if volume_ul < SMALL_VOLUME_UL {
        (Some(Warning::SmallVolume), None)
    } else {
        (None, None)
    }
}

/// Full reverse path from scientific-notation inputs.
pub fn reverse_volume(request: &ReverseVolumeRequest) -> Result<ReverseVolumeResult> {
    if !STOCK_MANTISSA_RANGE.contains(&request.stock_mantissa) {
        return Err(TiterError::invalid(format!(
            "stock mantissa must be within 0.1..=9.99 (got {})",
            request.stock_mantissa
        )));
    }

    let stock_concentration = request.stock_concentration();
    let target_quantity = request.target_quantity();
    let volume_ul = compute_volume(target_quantity, stock_concentration)?;

    let (advisory, suggested_dilution_factor) = volume_advisory(volume_ul);
    let mut warnings = Warnings::new();
    if let Some(w) = advisory {
        warn!(volume_ul, advisory = ?w, "{}", w.description());
        warnings.insert(w);
    }

    debug!(stock_concentration, target_quantity, volume_ul, "reverse volume computed");

    Ok(ReverseVolumeResult {
        volume_ul,
        stock_concentration,
        target_quantity,
        warnings,
        suggested_dilution_factor,
    })
}
