use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::UploadedTable;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an uploaded batch file.  Only CSV is accepted.
pub fn load_file(path: &Path) -> Result<UploadedTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: one header row, then one record per employee.
/// Every record must have as many fields as the header.
pub fn read_csv<R: Read>(source: R) -> Result<UploadedTable> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        bail!("No columns to parse from file");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(UploadedTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_headers_and_rows_verbatim() {
        let text = "age,education,name\n30,12,Ann\n45,9,\"Smith, Bob\"\n";
        let table = read_csv(text.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["age", "education", "name"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["45", "9", "Smith, Bob"]);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let table = read_csv("age,education\n".as_bytes()).unwrap();
        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_file_is_an_error() {
        let err = read_csv("".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("No columns"));
    }

    #[test]
    fn ragged_row_is_an_error() {
        let err = read_csv("a,b\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn load_file_rejects_other_extensions() {
        let err = load_file(Path::new("people.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn load_file_reads_csv_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "age,experience").unwrap();
        writeln!(file, "30,5").unwrap();
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.rows, vec![vec!["30".to_string(), "5".to_string()]]);
    }
}
