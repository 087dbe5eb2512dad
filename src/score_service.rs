//! Service facade: the single entry point the web layer and CLI call.
//!
//! The serving mode is decided once at construction from the artifact load
//! outcome and never re-evaluated; there is no runtime transition between
//! model and fallback scoring. The loaded artifact is shared read-only, so
//! concurrent requests need no synchronization.

use std::path::Path;
use std::sync::Arc;

use crate::company_metrics::CompanyMetrics;
use crate::errors::CarbonResult;
use crate::fallback_scorer::{self, FALLBACK_MODEL_VERSION};
use crate::model_artifact::{self, ModelArtifact, ModelLoadOutcome, ModelMetadata};
use crate::model_scorer;
use crate::score_result::ScoredPrediction;

/// Serving mode, fixed for the lifetime of the service.
pub enum ScoringMode {
    Model(Arc<ModelArtifact>),
    Fallback { reason: String },
}

pub struct CarbonScoreService {
    mode: ScoringMode,
}

impl CarbonScoreService {
    /// Build the service by attempting an artifact load from `dir`. Load
    /// failure is recovered here, degrading to fallback mode.
    pub fn from_artifact_dir(dir: &Path) -> Self {
        match model_artifact::load_artifact(dir) {
            ModelLoadOutcome::Loaded(artifact) => Self {
                mode: ScoringMode::Model(Arc::new(artifact)),
            },
            ModelLoadOutcome::Unloaded { reason } => Self {
                mode: ScoringMode::Fallback { reason },
            },
        }
    }

    /// Build the service around an already-loaded artifact.
    pub fn with_artifact(artifact: ModelArtifact) -> Self {
        Self {
            mode: ScoringMode::Model(Arc::new(artifact)),
        }
    }

    /// Build a fallback-only service.
    pub fn fallback_only(reason: impl Into<String>) -> Self {
        Self {
            mode: ScoringMode::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn model_loaded(&self) -> bool {
        matches!(self.mode, ScoringMode::Model(_))
    }

    /// Metadata model kind when a model is loaded.
    pub fn model_kind(&self) -> Option<&str> {
        match &self.mode {
            ScoringMode::Model(artifact) => Some(&artifact.metadata.model_kind),
            ScoringMode::Fallback { .. } => None,
        }
    }

    /// Why the service is running without a model, when it is.
    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.mode {
            ScoringMode::Model(_) => None,
            ScoringMode::Fallback { reason } => Some(reason),
        }
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        match &self.mode {
            ScoringMode::Model(artifact) => Some(&artifact.metadata),
            ScoringMode::Fallback { .. } => None,
        }
    }

    /// The version string stamped on every response from this service.
    pub fn model_version(&self) -> String {
        match &self.mode {
            ScoringMode::Model(artifact) => artifact.metadata.model_kind.clone(),
            ScoringMode::Fallback { .. } => FALLBACK_MODEL_VERSION.to_string(),
        }
    }

    /// Score one metrics record through whichever path this service runs.
    pub fn predict(&self, metrics: &CompanyMetrics) -> CarbonResult<ScoredPrediction> {
        let result = match &self.mode {
            ScoringMode::Model(artifact) => model_scorer::predict(metrics, artifact)?,
            ScoringMode::Fallback { .. } => fallback_scorer::fallback_score(metrics),
        };

        Ok(ScoredPrediction {
            result,
            model_version: self.model_version(),
        })
    }

    /// Score each record independently, best-effort: a failing record yields
    /// an inline error and never aborts the rest. Output order mirrors input
    /// order for every batch length.
    pub fn predict_batch(
        &self,
        batch: &[CompanyMetrics],
    ) -> Vec<CarbonResult<ScoredPrediction>> {
        batch.iter().map(|metrics| self.predict(metrics)).collect()
    }

    /// Model-info report served by the HTTP layer and the CLI.
    pub fn model_info(&self) -> serde_json::Value {
        match self.metadata() {
            Some(meta) => serde_json::json!({
                "model_type": meta.model_kind,
                "n_features": meta.n_features,
                "test_mae": meta.test_mae,
                "test_r2": meta.test_r2,
                "feature_names": meta.feature_names,
            }),
            None => serde_json::json!({
                "model_type": "fallback",
                "message": "Using rule-based fallback scoring",
                "reason": self.fallback_reason(),
            }),
        }
    }
}
