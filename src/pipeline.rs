use std::path::Path;

use thiserror::Error;

use crate::data::export::annotate;
use crate::data::loader;
use crate::data::model::UploadedTable;
use crate::data::validate::{ValidationError, select_features};
use crate::model::predict::{Classifier, SalaryClass, predict_classes};

// ---------------------------------------------------------------------------
// Batch request: upload → validate → predict → annotate
// ---------------------------------------------------------------------------

/// A completed batch prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// The upload as read, before annotation.
    pub uploaded: UploadedTable,
    /// The upload with its `Prediction` column.
    pub annotated: UploadedTable,
    pub classes: Vec<SalaryClass>,
}

/// Everything that can stop one batch request.  None of these are fatal.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Validation(ValidationError),

    #[error("Error reading file: {0:#}")]
    Failed(anyhow::Error),
}

/// Run a batch prediction on an already parsed upload.
pub fn run_batch(model: &dyn Classifier, table: UploadedTable) -> Result<BatchOutcome, BatchError> {
    let features = select_features(&table).map_err(|e| match e {
        ValidationError::MissingColumns { .. } => BatchError::Validation(e),
        ValidationError::NotNumeric { .. } => BatchError::Failed(e.into()),
    })?;
    let classes = predict_classes(model, &features).map_err(|e| BatchError::Failed(e.into()))?;
    log::info!(
        "Batch prediction with '{}' over {} rows",
        model.name(),
        classes.len()
    );

    let annotated = annotate(&table, &classes);
    Ok(BatchOutcome {
        uploaded: table,
        annotated,
        classes,
    })
}

/// Read an uploaded file and run the batch prediction on it.
pub fn run_batch_file(model: &dyn Classifier, path: &Path) -> Result<BatchOutcome, BatchError> {
    let table = loader::load_file(path).map_err(BatchError::Failed)?;
    log::info!(
        "Uploaded {} with {} rows and columns {:?}",
        path.display(),
        table.len(),
        table.headers
    );
    run_batch(model, table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::export::{PREDICTION_COLUMN, to_csv_bytes};
    use crate::data::loader::read_csv;
    use crate::model::predict::tests::FixedClassifier;

    const FULL: &str = "age,education,occupation,hours-per-week,experience,name\n\
                        30,12,4,40,5,Ann\n\
                        55,16,2,50,30,Bob\n\
                        41,10,7,38,12,Cy\n";

    #[test]
    fn extra_column_is_kept_and_prediction_appended() {
        let table = read_csv(FULL.as_bytes()).unwrap();
        let outcome = run_batch(&FixedClassifier::by_age(), table).unwrap();

        assert_eq!(
            outcome.classes,
            vec![SalaryClass::AtMost50K, SalaryClass::Above50K, SalaryClass::Above50K]
        );
        assert_eq!(outcome.annotated.headers.last().unwrap(), PREDICTION_COLUMN);
        assert_eq!(outcome.annotated.rows[1][5], "Bob");
        assert_eq!(outcome.annotated.rows[1][6], ">50K");
    }

    #[test]
    fn download_has_one_extra_column_and_same_rows() {
        let table = read_csv(FULL.as_bytes()).unwrap();
        let outcome = run_batch(&FixedClassifier::by_age(), table).unwrap();

        let bytes = to_csv_bytes(&outcome.annotated).unwrap();
        let back = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(back.len(), outcome.uploaded.len());
        assert_eq!(back.column_count(), outcome.uploaded.column_count() + 1);
        let idx = back.column_index(PREDICTION_COLUMN).unwrap();
        for (row, class) in back.rows.iter().zip(&outcome.classes) {
            assert_eq!(row[idx], class.as_str());
        }
    }

    #[test]
    fn missing_columns_skip_prediction() {
        let table = read_csv("age,education,occupation\n30,12,4\n".as_bytes()).unwrap();
        let err = run_batch(&FixedClassifier { rule: |_| panic!("model must not run") }, table)
            .unwrap_err();
        let BatchError::Validation(ValidationError::MissingColumns { missing }) = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(missing, &vec!["hours-per-week".to_string(), "experience".to_string()]);
        let msg = err.to_string();
        assert!(msg.contains("age, education, occupation, hours-per-week, experience"), "{msg}");
    }

    #[test]
    fn non_numeric_cell_reports_read_error() {
        let table = read_csv(
            "age,education,occupation,hours-per-week,experience\n30,twelve,4,40,5\n".as_bytes(),
        )
        .unwrap();
        let err = run_batch(&FixedClassifier::by_age(), table).unwrap_err();
        assert!(matches!(err, BatchError::Failed(_)));
        assert_eq!(
            err.to_string(),
            "Error reading file: row 0, column 'education': 'twelve' is not a finite number"
        );
    }

    #[test]
    fn nan_and_infinite_cells_are_not_predicted() {
        for token in ["NaN", "inf"] {
            let text = format!(
                "age,education,occupation,hours-per-week,experience\n{token},12,4,40,5\n"
            );
            let table = read_csv(text.as_bytes()).unwrap();
            let err = run_batch(&FixedClassifier { rule: |_| panic!("model must not run") }, table)
                .unwrap_err();
            assert!(matches!(err, BatchError::Failed(_)), "{token}");
            assert_eq!(
                err.to_string(),
                format!("Error reading file: row 0, column 'age': '{token}' is not a finite number")
            );
        }
    }

    #[test]
    fn unknown_label_reports_read_error() {
        let table = read_csv(FULL.as_bytes()).unwrap();
        let err = run_batch(&FixedClassifier { rule: |_| -1 }, table).unwrap_err();
        assert!(err.to_string().contains("label -1"), "{err}");
    }

    #[test]
    fn run_batch_file_reads_upload() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();
        let outcome = run_batch_file(&FixedClassifier::by_age(), file.path()).unwrap();
        assert_eq!(outcome.classes.len(), 3);
    }

    #[test]
    fn malformed_file_reports_read_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"age,education\n1,2,3\n").unwrap();
        let err = run_batch_file(&FixedClassifier::by_age(), file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Error reading file: CSV row 0"), "{err}");
    }
}
