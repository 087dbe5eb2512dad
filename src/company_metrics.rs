//! Inbound company metrics record.
//!
//! All seven canonical fields are optional; callers may also supply known
//! alternate key names (see `feature_align`), which land in `extra` and are
//! resolved during alignment. Unrecognized keys are silently ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sparse self-reported sustainability metrics for one company.
///
/// Immutable once handed to the scoring core; constructed fresh per request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyMetrics {
    /// Energy consumption (kWh)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_consumption: Option<f64>,
    /// Renewable energy percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewable_energy_pct: Option<f64>,
    /// Waste recycled percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waste_recycled_pct: Option<f64>,
    /// CO2 emissions (tons)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissions_co2: Option<f64>,
    /// Water usage (liters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_usage: Option<f64>,
    /// Number of employees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<f64>,
    /// Production volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_volume: Option<f64>,

    /// Any other keys supplied by the caller. Alias resolution reads numeric
    /// values out of here; everything else is ignored.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CompanyMetrics {
    /// Look up a canonical field by name.
    pub fn canonical(&self, name: &str) -> Option<f64> {
        match name {
            "energy_consumption" => self.energy_consumption,
            "renewable_energy_pct" => self.renewable_energy_pct,
            "waste_recycled_pct" => self.waste_recycled_pct,
            "emissions_co2" => self.emissions_co2,
            "water_usage" => self.water_usage,
            "employee_count" => self.employee_count,
            "production_volume" => self.production_volume,
            _ => None,
        }
    }

    /// Look up any key: canonical fields first, then numeric extras.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.canonical(name)
            .or_else(|| self.extra.get(name).and_then(serde_json::Value::as_f64))
    }
}
