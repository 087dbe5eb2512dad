//! Human-readable explanation of a model-driven score.

use std::cmp::Ordering;

use crate::model_artifact::ModelArtifact;
use crate::score_result::{Explanation, FeatureContribution, ScoreBreakdown};

/// How many top contributing features to report.
pub const TOP_FEATURE_COUNT: usize = 5;

/// Build the explanation for a model-driven prediction.
///
/// Features are ranked by trained importance (uniform 1/n when the model
/// carries none), descending, ties broken by schema order; `vector` holds the
/// values actually used at inference time, post-alignment and pre-scaling.
pub fn generate(artifact: &ModelArtifact, vector: &[f64], score: f64) -> Explanation {
    let n = artifact.schema.len();

    let importances: Vec<f64> = match artifact.model.importances() {
        Some(trained) => trained.to_vec(),
        None if n == 0 => Vec::new(),
        None => vec![1.0 / n as f64; n],
    };

    let mut ranked: Vec<usize> = (0..n).collect();
    // Stable sort keeps schema order among equal importances.
    ranked.sort_by(|&a, &b| {
        importances
            .get(b)
            .partial_cmp(&importances.get(a))
            .unwrap_or(Ordering::Equal)
    });

    let top_features = ranked
        .into_iter()
        .take(TOP_FEATURE_COUNT)
        .map(|i| FeatureContribution {
            name: artifact
                .schema
                .names()
                .get(i)
                .cloned()
                .unwrap_or_default(),
            importance: importances.get(i).copied().unwrap_or(0.0),
            value: vector.get(i).copied().unwrap_or(0.0),
        })
        .collect();

    Explanation::ModelDriven {
        top_features,
        recommendations: recommendations_for(score),
        score_breakdown: ScoreBreakdown::from_score(score),
    }
}

/// Actionable recommendations, chosen by score band.
pub fn recommendations_for(score: f64) -> Vec<String> {
    let messages: &[&str] = if score < 50.0 {
        &[
            "Critical: Immediate action required to reduce carbon footprint",
            "Consider switching to renewable energy sources",
            "Implement comprehensive waste recycling program",
        ]
    } else if score < 70.0 {
        &[
            "Increase renewable energy usage to above 50%",
            "Improve waste management and recycling rates",
        ]
    } else {
        &[
            "Maintain current excellent environmental practices",
            "Consider carbon offset programs to achieve net-zero",
        ]
    };

    messages.iter().map(|m| (*m).to_string()).collect()
}
