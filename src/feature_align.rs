//! Feature alignment: sparse metrics record -> ordered feature vector.
//!
//! The output vector always matches the schema length. A schema entry is
//! resolved by direct key match first, then through the alias table, and
//! contributes 0.0 when neither succeeds. Extra unrecognized keys in the
//! input never cause a failure.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::company_metrics::CompanyMetrics;

/// Ordered list of feature names a trained model expects, fixed at training
/// time and loaded alongside the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Canonical feature name -> acceptable alternate key names.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, Vec<String>>,
}

lazy_static! {
    static ref BUILTIN_ALIASES: AliasTable = {
        let mut table = AliasTable::default();
        table.insert("energy_consumption", &["energy_usage", "power_consumption"]);
        table.insert("renewable_energy_pct", &["renewable_pct", "clean_energy_pct"]);
        table.insert("waste_recycled_pct", &["recycling_pct", "waste_recycling"]);
        table.insert("emissions_co2", &["co2_emissions", "carbon_emissions"]);
        table.insert("water_usage", &["water_consumption"]);
        table.insert("employee_count", &["employees", "workforce"]);
        table.insert("production_volume", &["output", "production"]);
        table
    };
}

impl AliasTable {
    /// The built-in table covering the seven canonical metrics.
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN_ALIASES
    }

    pub fn insert(&mut self, canonical: &str, alternates: &[&str]) {
        self.aliases.insert(
            canonical.to_string(),
            alternates.iter().map(|a| (*a).to_string()).collect(),
        );
    }

    /// Alternate key names registered for a canonical feature name.
    pub fn alternates(&self, canonical: &str) -> &[String] {
        self.aliases.get(canonical).map_or(&[], Vec::as_slice)
    }
}

/// Map a metrics record onto the schema's feature order.
///
/// Guarantee: output length equals `schema.len()` for every input; unresolved
/// entries are exactly 0.0.
pub fn align(metrics: &CompanyMetrics, schema: &FeatureSchema, aliases: &AliasTable) -> Vec<f64> {
    schema
        .names()
        .iter()
        .map(|name| {
            metrics
                .lookup(name)
                .or_else(|| {
                    aliases
                        .alternates(name)
                        .iter()
                        .find_map(|alt| metrics.lookup(alt))
                })
                .unwrap_or(0.0)
        })
        .collect()
}
