//! Tabular input
//!
//! Rows come from a delimited file with the header
//! `index,reason,result,reasonIndex,resultIndex`. Extra columns are ignored.
//! The whole file is read before any graph work starts; any unreadable or
//! malformed record aborts the load.

use crate::errors::{GraphError, Result};
use crate::types::Row;
use std::io::Read;
use std::path::Path;

/// Read rows from CSV content.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    read_rows_with_delimiter(reader, b',')
}

/// Read rows from delimited content (e.g. `b'\t'` for TSV).
pub fn read_rows_with_delimiter<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in rdr.deserialize::<Row>().enumerate() {
        let row = record.map_err(|e| GraphError::load(format!("record {}: {e}", idx + 1)))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Load rows from a file. `.tsv` files are read tab-delimited.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| GraphError::load(format!("cannot open {}: {e}", path.display())))?;
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };
    let rows = read_rows_with_delimiter(file, delimiter).map_err(|e| match e {
        GraphError::Load { message } => GraphError::load(format!("{}: {message}", path.display())),
        other => other,
    })?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "rows loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
index,reason,result,reasonIndex,resultIndex
1,停電,ポンプ停止,0,1
2,ポンプ停止,断水,0,1
";

    #[test]
    fn test_read_rows() {
        let rows = read_rows(CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Row::new("1", "停電", "ポンプ停止", "0", "1"));
        assert_eq!(rows[1].result, "断水");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "index,reason,result,reasonIndex,resultIndex,note\n1,a,b,0,1,x\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_header_only() {
        let csv = "index,reason,result,reasonIndex,resultIndex\n";
        assert!(read_rows(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_column() {
        let csv = "index,reason,reasonIndex,resultIndex\n1,a,0,1\n";
        let err = read_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Load { .. }));
    }

    #[test]
    fn test_load_tsv() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(CSV.replace(',', "\t").as_bytes()).unwrap();
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = load_rows("/nonexistent/data.csv").unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }
}
