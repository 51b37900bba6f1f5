//! Formatted terminal output.
//!
//! We keep formatting code in one place so the engine stays free of display
//! concerns and output changes are localized.

use crate::domain::{
    Countability, DilutionSeries, DilutionStep, ForwardTiterResult, ReverseVolumeResult, Tcid50Result, Titer, Warnings,
};

pub const PFU_UNIT: &str = "PFU/mL";
pub const TCID50_UNIT: &str = "TCID50/mL";

/// `5.00 × 10^8 PFU/mL`, or `0 PFU/mL` for the zero sentinel.
pub fn format_titer(titer: &Titer, unit: &str) -> String {
    if titer.is_undefined() {
        return format!("0 {unit}");
    }
    format!("{:.2} × 10^{} {unit}", titer.normalized.mantissa, titer.normalized.exponent)
}

/// Countability line shown under a plaque result.
pub fn countability_message(count: u32, countability: Countability) -> String {
    match countability {
        Countability::TooFew => {
            format!("Plaque count ({count}) is below 30 - results may lack statistical reliability")
        }
        Countability::TooMany => format!(
            "Plaque count ({count}) is above 300 - plate may be too confluent for accurate counting (TOO MANY TO COUNT)"
        ),
        Countability::Acceptable => "Plaque count is within optimal range (30-300)".to_string(),
    }
}

pub fn format_forward(result: &ForwardTiterResult) -> String {
    let mut out = String::new();
    out.push_str("=== Plaque assay ===\n");
    out.push_str(&format!(
        "Input: {} plaques | dilution 1:{:.0} | {:.1} µL plated\n",
        result.params.count, result.params.dilution_factor, result.params.volume_ul
    ));
    out.push_str(&format!("Countability: {}\n", countability_message(result.params.count, result.countability)));
    out.push_str(&format!("Titer: {}\n", format_titer(&result.titer, PFU_UNIT)));
    out
}

pub fn format_reverse(result: &ReverseVolumeResult) -> String {
    let mut out = String::new();
    out.push_str("=== Dose volume ===\n");
    out.push_str(&format!(
        "Stock: {:.2e} /mL | target dose: {:.2e}\n",
        result.stock_concentration, result.target_quantity
    ));
    out.push_str(&format!("Volume: {} µL\n", format_volume(result.volume_ul)));
    if let Some(factor) = result.suggested_dilution_factor {
        out.push_str(&format!(
            "Hint: dilute the stock 1:{factor:.0} to deliver the dose in ~100 µL\n"
        ));
    }
    out.push_str(&format_warnings(&result.warnings));
    out
}

pub fn format_tcid50(result: &Tcid50Result, series: &DilutionSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== TCID50 ({}) ===\n", result.method.display_name()));
    out.push_str(&format_series_table(series));
    out.push('\n');
    out.push_str(&format!(
        "Endpoint: log10 = {:.3} | dilution factor = {:.4e}\n",
        result.log10_endpoint, result.dilution_factor
    ));
    out.push_str(&format!("Titer: {}\n", format_titer(&result.titer, TCID50_UNIT)));
    out.push_str(&format!("PFU-equivalent: {} (0.7 × TCID50)\n", format_titer(&result.pfu_equivalent, PFU_UNIT)));
    out.push_str(&format_warnings(&result.warnings));
    out
}

pub fn format_dilutions(steps: &[DilutionStep]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>14}\n", "dilution", "fold"));
    out.push_str(&format!("{:-<8} {:->14}\n", "", ""));
    for step in steps {
        out.push_str(&format!("{:<8} {:>14.0}\n", step.label, step.factor));
    }
    out
}

fn format_series_table(series: &DilutionSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>8} {:>8} {:>9}\n", "dilution", "positive", "total", "%"));
    out.push_str(&format!("{:-<10} {:->8} {:->8} {:->9}\n", "", "", "", ""));
    for obs in series.least_dilute_first() {
        out.push_str(&format!(
            "{:<10} {:>8} {:>8} {:>9.1}\n",
            format!("10^{}", obs.dilution_exponent),
            obs.positive_count,
            obs.total_count,
            obs.percent_positive()
        ));
    }
    out
}

fn format_warnings(warnings: &Warnings) -> String {
    warnings
        .iter()
        .map(|w| format!("Warning: {}\n", w.description()))
        .collect()
}

fn format_volume(volume_ul: f64) -> String {
    if volume_ul >= 0.01 {
        format!("{volume_ul:.2}")
    } else {
        format!("{volume_ul:.2e}")
    }
}

/// Methods-section sentence for a plaque assay.
pub fn plaque_methods_paragraph(result: &ForwardTiterResult) -> String {
    let exponent = if result.params.dilution_factor > 1.0 {
        result.params.dilution_factor.log10().round() as i32
    } else {
        0
    };
    format!(
        "Viral titers were determined by plaque assay. Serial dilutions of virus stocks were prepared and \
         {:.0} µL of the 10^-{exponent} dilution was plated onto confluent cell monolayers. Plates were \
         incubated until plaques were visible, fixed, and stained. Plaques were manually counted ({} plaques) \
         and titers were calculated as {:.2e} PFU/mL.",
        result.params.volume_ul, result.params.count, result.titer.magnitude
    )
}

/// Methods-section sentence for an endpoint-dilution assay.
pub fn tcid50_methods_paragraph(result: &Tcid50Result, series: &DilutionSeries) -> String {
    let sorted = series.least_dilute_first();
    let first = sorted.first().map(|o| o.dilution_exponent).unwrap_or_default();
    let last = sorted.last().map(|o| o.dilution_exponent).unwrap_or_default();
    let wells = sorted.first().map(|o| o.total_count).unwrap_or_default();
    format!(
        "Infectious titers were determined by endpoint dilution. Ten-fold serial dilutions (10^{first} to \
         10^{last}) were inoculated at {:.0} µL per well ({wells} wells per dilution) and scored for cytopathic \
         effect. The 50% tissue culture infectious dose was calculated by the {} method as {:.2e} TCID50/mL \
         (approximately {:.2e} PFU/mL, assuming 0.7 PFU per TCID50).",
        result.volume_ul,
        result.method.display_name(),
        result.titer.magnitude,
        result.pfu_equivalent.magnitude
    )
}

/// Methods-section sentence for a dosing calculation.
pub fn dose_methods_paragraph(result: &ReverseVolumeResult) -> String {
    format!(
        "Inocula were prepared from a virus stock titered at {:.2e} per mL; {} µL of stock was used to \
         deliver a dose of {:.2e} infectious units.",
        result.stock_concentration,
        format_volume(result.volume_ul),
        result.target_quantity
    )
}
