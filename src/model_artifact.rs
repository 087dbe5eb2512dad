//! Model artifact loading.
//!
//! The trainer leaves four JSON files in the artifact directory: the model,
//! the fitted scaler, the ordered feature-name list, and a metadata record.
//! Loading happens once at startup and returns an explicit two-variant
//! outcome; a missing or malformed artifact is never fatal, the service
//! degrades to rule-based fallback scoring instead.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{CarbonError, CarbonResult};
use crate::feature_align::{AliasTable, FeatureSchema};
use crate::scoring_model::{FeatureScaler, ScoringModel};

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";
pub const METADATA_FILE: &str = "metadata.json";

/// Training metadata recorded next to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model kind identifier, e.g. "xgboost" or "random_forest". Stamped on
    /// responses as `model_version`.
    pub model_kind: String,
    pub n_features: usize,
    #[serde(default)]
    pub test_mae: Option<f64>,
    #[serde(default)]
    pub test_r2: Option<f64>,
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
}

/// A fully loaded, immutable model artifact. Owned by the service facade for
/// the lifetime of the process; shared read-only across requests.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub model: ScoringModel,
    pub scaler: FeatureScaler,
    pub schema: FeatureSchema,
    pub aliases: AliasTable,
    pub metadata: ModelMetadata,
}

impl ModelArtifact {
    /// Prediction confidence for this artifact: a static function of the
    /// held-out R² recorded at training time, identical for every request.
    pub fn confidence(&self) -> f64 {
        (self.metadata.test_r2.unwrap_or(0.8) + 0.1).min(0.95)
    }
}

/// Explicit load result consumed by the facade to pick its serving mode.
#[derive(Debug)]
pub enum ModelLoadOutcome {
    Loaded(ModelArtifact),
    Unloaded { reason: String },
}

/// Attempt to load the artifact set from `dir`. Failures are folded into
/// `Unloaded` with the cause preserved for the health endpoint.
pub fn load_artifact(dir: &Path) -> ModelLoadOutcome {
    match try_load(dir) {
        Ok(artifact) => {
            info!(
                model_kind = %artifact.metadata.model_kind,
                n_features = artifact.schema.len(),
                "scoring model loaded"
            );
            ModelLoadOutcome::Loaded(artifact)
        }
        Err(e) => {
            warn!(dir = %dir.display(), reason = %e, "model artifact unavailable");
            ModelLoadOutcome::Unloaded {
                reason: e.to_string(),
            }
        }
    }
}

fn try_load(dir: &Path) -> CarbonResult<ModelArtifact> {
    let model: ScoringModel = read_json(&dir.join(MODEL_FILE))?;
    let scaler: FeatureScaler = read_json(&dir.join(SCALER_FILE))?;
    let schema: FeatureSchema = read_json(&dir.join(FEATURE_NAMES_FILE))?;
    let metadata: ModelMetadata = read_json(&dir.join(METADATA_FILE))?;

    // The three shape-bearing artifacts must agree before any request runs.
    if scaler.len() != schema.len() {
        return Err(CarbonError::artifact(
            "load",
            format!(
                "scaler covers {} features but schema lists {}",
                scaler.len(),
                schema.len()
            ),
        ));
    }
    if model.n_features() != schema.len() {
        return Err(CarbonError::artifact(
            "load",
            format!(
                "model expects {} features but schema lists {}",
                model.n_features(),
                schema.len()
            ),
        ));
    }
    if metadata.n_features != schema.len() {
        return Err(CarbonError::artifact(
            "load",
            format!(
                "metadata records {} features but schema lists {}",
                metadata.n_features,
                schema.len()
            ),
        ));
    }

    debug!(dir = %dir.display(), "model artifact files parsed");

    Ok(ModelArtifact {
        model,
        scaler,
        schema,
        aliases: AliasTable::builtin().clone(),
        metadata,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CarbonResult<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CarbonError::artifact("read", format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| CarbonError::artifact("parse", format!("{}: {e}", path.display())))
}
