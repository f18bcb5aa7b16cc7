use thiserror::Error;

use super::model::{Feature, FeatureTable, UploadedTable, required_columns_list};

// ---------------------------------------------------------------------------
// Column check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one required column is absent from the upload headers.
    #[error("Uploaded CSV must include these columns: {} (missing: {})", required_columns_list(), .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A required cell is empty, not a number, NaN or infinite.
    #[error("row {row}, column '{column}': '{value}' is not a finite number")]
    NotNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Check that every required column is present.  Extra columns are fine.
pub fn validate_columns(table: &UploadedTable) -> Result<(), ValidationError> {
    let missing: Vec<String> = Feature::ALL
        .iter()
        .filter(|f| table.column_index(f.column()).is_none())
        .map(|f| f.column().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingColumns { missing })
    }
}

/// Check the columns, then pick the five feature columns out of an upload,
/// in model order.  This is the single entry point for batch input.
pub fn select_features(table: &UploadedTable) -> Result<FeatureTable, ValidationError> {
    validate_columns(table)?;

    let indices: Vec<(Feature, usize)> = Feature::ALL
        .iter()
        .filter_map(|&f| table.column_index(f.column()).map(|i| (f, i)))
        .collect();

    let mut rows = Vec::with_capacity(table.len());
    for (row_no, record) in table.rows.iter().enumerate() {
        let mut values = [0.0; 5];
        for &(feature, col_idx) in &indices {
            let raw = record.get(col_idx).map(String::as_str).unwrap_or("");
            // `parse` accepts "NaN" and "inf"; the model must never see them.
            values[feature.index()] = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::NotNumeric {
                    row: row_no,
                    column: feature.column(),
                    value: raw.to_string(),
                })?;
        }
        rows.push(values);
    }

    Ok(FeatureTable { rows })
}
