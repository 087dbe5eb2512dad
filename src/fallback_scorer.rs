//! Deterministic rule-based scoring, used when no trained model is loaded.
//!
//! Pure function of the input record: identical metrics always produce an
//! identical result. The point values are frozen; compatibility tests
//! reproduce the formula exactly.

use crate::company_metrics::CompanyMetrics;
use crate::score_result::{Explanation, ScoreCategory, ScoreResult};

/// Fixed confidence reported by the rule-based path.
pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// `model_version` stamped on responses served without a trained model.
pub const FALLBACK_MODEL_VERSION: &str = "rule_based_fallback";

/// Notice returned instead of model-driven recommendations.
pub const FALLBACK_NOTICE: &str = "ML service unavailable - using deterministic scoring";

/// Score a company without a trained model.
///
/// Base 50, renewable bonus up to +25, recycling bonus up to +20, emissions
/// penalty up to -30 (normalized against a 10000-ton typical range), flat +15
/// efficiency bonus when energy use is reported and renewables exceed 50%.
pub fn fallback_score(metrics: &CompanyMetrics) -> ScoreResult {
    let renewable_pct = metrics.renewable_energy_pct.unwrap_or(0.0);
    let recycling_pct = metrics.waste_recycled_pct.unwrap_or(0.0);
    let emissions = metrics.emissions_co2.unwrap_or(0.0);
    let energy = metrics.energy_consumption.unwrap_or(0.0);

    let mut score = 50.0;

    // Renewable energy contribution (0-25 points)
    score += (renewable_pct / 100.0) * 25.0;

    // Waste recycling contribution (0-20 points)
    score += (recycling_pct / 100.0) * 20.0;

    // Emissions penalty (0 to -30 points)
    if emissions > 0.0 {
        let normalized_emissions = (emissions / 10_000.0).min(1.0);
        score -= normalized_emissions * 30.0;
    }

    // Energy efficiency bonus (0-15 points)
    if energy > 0.0 && renewable_pct > 50.0 {
        score += 15.0;
    }

    let score = score.clamp(0.0, 100.0);

    ScoreResult {
        score,
        category: ScoreCategory::from_score(score),
        explanation: Explanation::RuleBasedFallback {
            recommendations: vec![FALLBACK_NOTICE.to_string()],
        },
        confidence: FALLBACK_CONFIDENCE,
    }
}
