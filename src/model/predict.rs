use std::fmt;

use thiserror::Error;

use crate::data::model::{FeatureRecord, FeatureTable};

// ---------------------------------------------------------------------------
// Classifier seam
// ---------------------------------------------------------------------------

/// Anything that turns a feature table into one label per row, in row order.
/// Loaded once and shared read-only, hence `Send + Sync`.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, table: &FeatureTable) -> Result<Vec<i64>, PredictError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("model expects columns [{}], got [{}]", .expected.join(", "), .found.join(", "))]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("no rows to predict")]
    EmptyInput,

    #[error("model returned {labels} labels for {rows} rows")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("row {row}: model returned label {label}, expected 0 or 1")]
    UnknownLabel { row: usize, label: i64 },
}

// ---------------------------------------------------------------------------
// SalaryClass – display mapping of a label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SalaryClass {
    /// Label 0.
    AtMost50K,
    /// Label 1.
    Above50K,
}

impl SalaryClass {
    pub const ALL: [SalaryClass; 2] = [SalaryClass::AtMost50K, SalaryClass::Above50K];

    pub fn label(self) -> i64 {
        match self {
            SalaryClass::AtMost50K => 0,
            SalaryClass::Above50K => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SalaryClass::AtMost50K => "≤50K",
            SalaryClass::Above50K => ">50K",
        }
    }

    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(SalaryClass::AtMost50K),
            1 => Some(SalaryClass::Above50K),
            _ => None,
        }
    }
}

impl fmt::Display for SalaryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Run the model and map every label to its class, keeping row order.
pub fn predict_classes(
    model: &dyn Classifier,
    table: &FeatureTable,
) -> Result<Vec<SalaryClass>, PredictError> {
    if table.is_empty() {
        return Err(PredictError::EmptyInput);
    }

    let labels = model.predict(table)?;
    if labels.len() != table.len() {
        return Err(PredictError::LengthMismatch {
            rows: table.len(),
            labels: labels.len(),
        });
    }

    labels
        .into_iter()
        .enumerate()
        .map(|(row, label)| {
            SalaryClass::from_label(label).ok_or(PredictError::UnknownLabel { row, label })
        })
        .collect()
}

/// Predict the class of a single record from the side panel.
pub fn predict_record(
    model: &dyn Classifier,
    record: &FeatureRecord,
) -> Result<SalaryClass, PredictError> {
    let classes = predict_classes(model, &record.to_table())?;
    log::debug!("Single prediction for {:?}: {:?}", record.values(), classes);
    classes.into_iter().next().ok_or(PredictError::EmptyInput)
}

/// Number of rows per class, in [`SalaryClass::ALL`] order.
pub fn class_counts(classes: &[SalaryClass]) -> [(SalaryClass, usize); 2] {
    SalaryClass::ALL.map(|c| (c, classes.iter().filter(|&&x| x == c).count()))
}
