//! Serialized classifier artifact and its loader.
//!
//! The artifact is a JSON document holding the expected feature columns and
//! one estimator.  It is read once at start-up and never mutated afterwards.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::data::model::FeatureTable;

use super::predict::{Classifier, PredictError};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("reading model artifact {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing model artifact")]
    Json(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Artifact layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    /// Input columns the estimator was fitted on, in order.
    pub feature_names: Vec<String>,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression {
        intercept: f64,
        coefficients: Vec<f64>,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    DecisionTree {
        nodes: Vec<TreeNode>,
    },
    RandomForest {
        trees: Vec<Vec<TreeNode>>,
    },
}

fn default_threshold() -> f64 {
    0.5
}

/// Flat tree node; index 0 is the root.  Rows go `left` when
/// `value <= threshold`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::DecisionTree { .. } => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ModelArtifact {
    /// Read and check an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let artifact = Self::from_json(&text)?;
        log::info!(
            "Loaded model '{}' ({}, {} features) from {}",
            artifact.name,
            artifact.estimator.kind(),
            artifact.feature_names.len(),
            path.display()
        );
        Ok(artifact)
    }

    pub fn from_json(text: &str) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_str(text)?;
        artifact.check()?;
        Ok(artifact)
    }

    /// Structural checks so that inference can never index out of bounds
    /// or loop.
    fn check(&self) -> Result<(), ArtifactError> {
        let n_features = self.feature_names.len();
        if n_features == 0 {
            return Err(ArtifactError::Invalid("no feature names".into()));
        }
        match &self.estimator {
            Estimator::LogisticRegression {
                coefficients,
                threshold,
                ..
            } => {
                if coefficients.len() != n_features {
                    return Err(ArtifactError::Invalid(format!(
                        "{} coefficients for {n_features} features",
                        coefficients.len()
                    )));
                }
                if !(0.0..=1.0).contains(threshold) {
                    return Err(ArtifactError::Invalid(format!(
                        "threshold {threshold} outside [0, 1]"
                    )));
                }
            }
            Estimator::DecisionTree { nodes } => check_tree(nodes, n_features, 0)?,
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ArtifactError::Invalid("forest has no trees".into()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    check_tree(tree, n_features, i)?;
                }
            }
        }
        Ok(())
    }
}

fn check_tree(nodes: &[TreeNode], n_features: usize, tree: usize) -> Result<(), ArtifactError> {
    if nodes.is_empty() {
        return Err(ArtifactError::Invalid(format!("tree {tree} has no nodes")));
    }
    for (i, node) in nodes.iter().enumerate() {
        if let TreeNode::Split {
            feature,
            left,
            right,
            ..
        } = node
        {
            if *feature >= n_features {
                return Err(ArtifactError::Invalid(format!(
                    "tree {tree} node {i}: feature index {feature} out of range"
                )));
            }
            for child in [*left, *right] {
                if child <= i || child >= nodes.len() {
                    return Err(ArtifactError::Invalid(format!(
                        "tree {tree} node {i}: child index {child} out of range"
                    )));
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Walk a checked tree from the root to a leaf.
fn tree_label(nodes: &[TreeNode], row: &[f64]) -> i64 {
    let mut idx = 0;
    loop {
        match &nodes[idx] {
            TreeNode::Leaf { class } => return *class,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if row[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
            }
        }
    }
}

/// Majority vote; ties go to the smallest label.
fn majority(votes: impl Iterator<Item = i64>) -> i64 {
    let mut counts: std::collections::BTreeMap<i64, usize> = std::collections::BTreeMap::new();
    for v in votes {
        *counts.entry(v).or_default() += 1;
    }
    let mut best = (0, 0);
    for (label, count) in counts {
        if count > best.1 {
            best = (label, count);
        }
    }
    best.0
}

impl Classifier for ModelArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, table: &FeatureTable) -> Result<Vec<i64>, PredictError> {
        let columns = table.columns();
        if self.feature_names.len() != columns.len()
            || self.feature_names.iter().zip(columns).any(|(a, b)| a != b)
        {
            return Err(PredictError::FeatureMismatch {
                expected: self.feature_names.clone(),
                found: columns.iter().map(|c| c.to_string()).collect(),
            });
        }

        let labels = table
            .rows
            .iter()
            .map(|row| match &self.estimator {
                Estimator::LogisticRegression {
                    intercept,
                    coefficients,
                    threshold,
                } => {
                    let z = intercept
                        + coefficients
                            .iter()
                            .zip(row.iter())
                            .map(|(w, x)| w * x)
                            .sum::<f64>();
                    i64::from(sigmoid(z) >= *threshold)
                }
                Estimator::DecisionTree { nodes } => tree_label(nodes, row),
                Estimator::RandomForest { trees } => {
                    majority(trees.iter().map(|tree| tree_label(tree, row)))
                }
            })
            .collect();
        Ok(labels)
    }
}
