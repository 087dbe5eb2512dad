//! Output contract of the scoring core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-band category over the 0-100 score range. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreCategory {
    /// Threshold table, evaluated top-down, first match wins.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreCategory::Excellent
        } else if score >= 65.0 {
            ScoreCategory::Good
        } else if score >= 50.0 {
            ScoreCategory::Fair
        } else {
            ScoreCategory::Poor
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::Good => "Good",
            ScoreCategory::Fair => "Fair",
            ScoreCategory::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// One feature's contribution line in a model-driven explanation: the name,
/// its trained importance weight, and the value used at inference time
/// (post-alignment, pre-scaling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    pub importance: f64,
    pub value: f64,
}

/// Presentational decomposition of the final score. The components are
/// derived directly from the score, always sum to at most 100, and are
/// monotonic in it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub environmental_impact: f64,
    pub sustainability_practices: f64,
    pub regulatory_compliance: f64,
}

impl ScoreBreakdown {
    pub fn from_score(score: f64) -> Self {
        Self {
            environmental_impact: (score * 0.4).min(40.0),
            sustainability_practices: (score * 0.35).min(35.0),
            regulatory_compliance: (score * 0.25).min(25.0),
        }
    }
}

/// Method-tagged explanation attached to every score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Explanation {
    /// Produced by the model scorer: top contributing features plus
    /// band-conditioned recommendations.
    ModelDriven {
        top_features: Vec<FeatureContribution>,
        recommendations: Vec<String>,
        score_breakdown: ScoreBreakdown,
    },
    /// Produced by the deterministic fallback scorer.
    RuleBasedFallback { recommendations: Vec<String> },
}

/// Result of one prediction call. Constructed once, immutable, returned to
/// the caller; the core never persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Carbon score, invariant 0 <= score <= 100.
    pub score: f64,
    pub category: ScoreCategory,
    pub explanation: Explanation,
    /// In [0, 1]; static per artifact on the model path, constant 0.7 on the
    /// fallback path.
    pub confidence: f64,
}

/// Wire form of a score: the result plus the model version that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPrediction {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub model_version: String,
}
