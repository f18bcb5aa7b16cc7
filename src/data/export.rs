use std::path::Path;

use anyhow::{Context, Result};

use super::model::UploadedTable;
use crate::model::predict::SalaryClass;

/// Name of the column holding the display string of each prediction.
pub const PREDICTION_COLUMN: &str = "Prediction";

/// Copy of `table` with the predicted class of each row in a `Prediction`
/// column.  An existing `Prediction` column is overwritten in place;
/// otherwise the column is appended.
pub fn annotate(table: &UploadedTable, classes: &[SalaryClass]) -> UploadedTable {
    debug_assert_eq!(table.len(), classes.len());
    let mut out = table.clone();

    match out.column_index(PREDICTION_COLUMN) {
        Some(idx) => {
            for (row, class) in out.rows.iter_mut().zip(classes) {
                row[idx] = class.to_string();
            }
        }
        None => {
            out.headers.push(PREDICTION_COLUMN.to_string());
            for (row, class) in out.rows.iter_mut().zip(classes) {
                row.push(class.to_string());
            }
        }
    }
    out
}

/// Encode a table as UTF-8 CSV with a header row and no index column.
pub fn to_csv_bytes(table: &UploadedTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.headers)
        .context("writing CSV header")?;
    for (row_no, row) in table.rows.iter().enumerate() {
        writer
            .write_record(row)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV buffer")?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing CSV buffer")
}

/// Write the encoded CSV to `path`.
pub fn save_csv(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    fn sample() -> UploadedTable {
        read_csv("age,name\n30,Ann\n50,Bob\n".as_bytes()).unwrap()
    }

    #[test]
    fn annotate_appends_prediction_column() {
        let out = annotate(&sample(), &[SalaryClass::AtMost50K, SalaryClass::Above50K]);
        assert_eq!(out.headers, vec!["age", "name", "Prediction"]);
        assert_eq!(out.rows[0], vec!["30", "Ann", "≤50K"]);
        assert_eq!(out.rows[1], vec!["50", "Bob", ">50K"]);
    }

    #[test]
    fn annotate_overwrites_existing_prediction_column() {
        let table = read_csv("Prediction,age\nold,30\n".as_bytes()).unwrap();
        let out = annotate(&table, &[SalaryClass::Above50K]);
        assert_eq!(out.headers, vec!["Prediction", "age"]);
        assert_eq!(out.rows[0], vec![">50K", "30"]);
    }

    #[test]
    fn csv_bytes_round_trip_through_reader() {
        let out = annotate(&sample(), &[SalaryClass::Above50K, SalaryClass::AtMost50K]);
        let bytes = to_csv_bytes(&out).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("age,name,Prediction\n"));

        let back = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.column_count(), 3);
        assert_eq!(back.rows[1][2], "≤50K");
    }

    #[test]
    fn save_csv_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predicted_classes.csv");
        save_csv(&path, b"a\n1\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n1\n");
    }
}
