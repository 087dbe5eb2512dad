//! Trained-model prediction path: align, scale, infer, clip, band, explain.

use crate::company_metrics::CompanyMetrics;
use crate::errors::{CarbonError, CarbonResult};
use crate::explainer;
use crate::feature_align::align;
use crate::model_artifact::ModelArtifact;
use crate::score_result::{ScoreCategory, ScoreResult};

/// Score a metrics record against a loaded artifact.
///
/// Scaling and inference failures (length mismatch, non-finite values)
/// surface to the caller as prediction errors; they are never silently
/// recovered.
pub fn predict(metrics: &CompanyMetrics, artifact: &ModelArtifact) -> CarbonResult<ScoreResult> {
    let vector = align(metrics, &artifact.schema, &artifact.aliases);
    let scaled = artifact.scaler.transform(&vector)?;
    let raw = artifact.model.predict(&scaled)?;

    if !raw.is_finite() {
        return Err(CarbonError::prediction(
            "infer",
            "model produced a non-finite score",
        ));
    }

    let score = raw.clamp(0.0, 100.0);

    Ok(ScoreResult {
        score,
        category: ScoreCategory::from_score(score),
        explanation: explainer::generate(artifact, &vector, score),
        confidence: artifact.confidence(),
    })
}
