//! Serialized regression models and the fitted feature scaler.
//!
//! The trainer exports models as JSON: either a decision-tree ensemble
//! (gradient boosted or averaged, carrying per-feature importances) or a
//! plain linear model. The capability split matters downstream: only
//! ensemble models expose importances, and the explainer pattern-matches on
//! that instead of probing at runtime.

use serde::{Deserialize, Serialize};

use crate::errors::{CarbonError, CarbonResult};

/// Standardization transform fitted at training time.
///
/// `transform` applies (x - mean) / scale per feature. Scale entries of 0
/// (constant features at fit time) divide by 1 instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler {
    /// A no-op scaler over `n` features. Test scaffolding and hand-built
    /// artifacts use this.
    pub fn identity(n: usize) -> Self {
        Self {
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn transform(&self, vector: &[f64]) -> CarbonResult<Vec<f64>> {
        if self.mean.len() != self.scale.len() {
            return Err(CarbonError::prediction(
                "scale",
                format!(
                    "scaler mean/scale lengths disagree ({} vs {})",
                    self.mean.len(),
                    self.scale.len()
                ),
            ));
        }
        if vector.len() != self.mean.len() {
            return Err(CarbonError::prediction(
                "scale",
                format!(
                    "feature vector length {} does not match scaler length {}",
                    vector.len(),
                    self.mean.len()
                ),
            ));
        }

        let mut scaled = Vec::with_capacity(vector.len());
        for (i, &value) in vector.iter().enumerate() {
            if !value.is_finite() {
                return Err(CarbonError::prediction(
                    "scale",
                    format!("non-finite value at feature index {i}"),
                ));
            }
            let divisor = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            scaled.push((value - self.mean[i]) / divisor);
        }
        Ok(scaled)
    }
}

/// One node of a serialized decision tree. Split nodes route `<= threshold`
/// left, `> threshold` right; indices point into the tree's node array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single regression tree, evaluated from node 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn predict(&self, vector: &[f64]) -> CarbonResult<f64> {
        let mut index = 0usize;
        // A well-formed tree reaches a leaf within nodes.len() hops.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = vector.get(*feature).copied().ok_or_else(|| {
                        CarbonError::prediction(
                            "infer",
                            format!(
                                "split references feature {feature} outside vector of length {}",
                                vector.len()
                            ),
                        )
                    })?;
                    index = if value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(CarbonError::prediction(
                        "infer",
                        format!("tree node index {index} out of bounds"),
                    ))
                }
            }
        }
        Err(CarbonError::prediction(
            "infer",
            "tree traversal did not reach a leaf (cyclic node references)",
        ))
    }
}

/// Decision-tree ensemble with frozen per-feature importances.
///
/// Boosted ensembles sum tree outputs onto `base_score`; averaged ensembles
/// (random forests) take the mean of tree outputs plus `base_score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<DecisionTree>,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub average: bool,
    pub feature_importances: Vec<f64>,
}

impl TreeEnsemble {
    pub fn predict(&self, vector: &[f64]) -> CarbonResult<f64> {
        if self.trees.is_empty() {
            return Err(CarbonError::prediction("infer", "ensemble contains no trees"));
        }
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(vector)?;
        }
        let aggregate = if self.average {
            sum / self.trees.len() as f64
        } else {
            sum
        };
        Ok(self.base_score + aggregate)
    }
}

/// Plain linear regression: dot(weights, x) + intercept. No importances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub fn predict(&self, vector: &[f64]) -> CarbonResult<f64> {
        if vector.len() != self.weights.len() {
            return Err(CarbonError::prediction(
                "infer",
                format!(
                    "feature vector length {} does not match weight count {}",
                    vector.len(),
                    self.weights.len()
                ),
            ));
        }
        let dot: f64 = vector
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum();
        Ok(dot + self.intercept)
    }
}

/// The loaded regression model, split by explanation capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringModel {
    /// Tree ensemble carrying trained feature importances.
    GradientBoosted(TreeEnsemble),
    /// Linear model; the explainer substitutes a uniform distribution.
    Linear(LinearModel),
}

impl ScoringModel {
    /// Single-row regression inference producing one scalar.
    pub fn predict(&self, vector: &[f64]) -> CarbonResult<f64> {
        match self {
            ScoringModel::GradientBoosted(ensemble) => ensemble.predict(vector),
            ScoringModel::Linear(linear) => linear.predict(vector),
        }
    }

    /// Trained per-feature importances, when the model kind carries them.
    pub fn importances(&self) -> Option<&[f64]> {
        match self {
            ScoringModel::GradientBoosted(ensemble) => Some(&ensemble.feature_importances),
            ScoringModel::Linear(_) => None,
        }
    }

    /// Number of input features the model was trained on.
    pub fn n_features(&self) -> usize {
        match self {
            ScoringModel::GradientBoosted(ensemble) => ensemble.feature_importances.len(),
            ScoringModel::Linear(linear) => linear.weights.len(),
        }
    }
}
