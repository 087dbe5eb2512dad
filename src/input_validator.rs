//! Boundary validation for inbound metric records.
//!
//! Range rules mirror the request schema: percentage fields within [0, 100],
//! quantity fields non-negative. The scoring core itself does not re-check
//! these; malformed records are rejected before they reach it.

use crate::company_metrics::CompanyMetrics;
use crate::errors::{CarbonError, CarbonResult};

/// Validate a metrics record supplied by an external caller.
pub fn validate_metrics(metrics: &CompanyMetrics) -> CarbonResult<()> {
    check_percentage("renewable_energy_pct", metrics.renewable_energy_pct)?;
    check_percentage("waste_recycled_pct", metrics.waste_recycled_pct)?;

    check_non_negative("energy_consumption", metrics.energy_consumption)?;
    check_non_negative("emissions_co2", metrics.emissions_co2)?;
    check_non_negative("water_usage", metrics.water_usage)?;
    check_non_negative("employee_count", metrics.employee_count)?;
    check_non_negative("production_volume", metrics.production_volume)?;

    Ok(())
}

fn check_percentage(field: &str, value: Option<f64>) -> CarbonResult<()> {
    if let Some(v) = value {
        if !v.is_finite() || !(0.0..=100.0).contains(&v) {
            return Err(CarbonError::validation(
                field,
                format!("{v} is outside the valid percentage range [0, 100]"),
            ));
        }
    }
    Ok(())
}

fn check_non_negative(field: &str, value: Option<f64>) -> CarbonResult<()> {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            return Err(CarbonError::validation(
                field,
                format!("{v} must be a finite non-negative number"),
            ));
        }
    }
    Ok(())
}
