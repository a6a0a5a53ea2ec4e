// Loader for the MCC reference table (CSV under a fixed data directory)

use std::path::{Component, Path};

use serde::Deserialize;

use crate::error::{MccError, MccResult};
use crate::types::{MccCode, MccRecord, MccTable};

/// A CSV row as it appears on disk, before code normalization.
///
/// The flag columns are 0/1 integers in the reference file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    mcc_code: String,
    description: String,
    bill: u8,
    merchant: u8,
}

/// Caller-supplied file names must stay inside the data directory.
fn is_safe_file_name(file_name: &str) -> bool {
    let path = Path::new(file_name);
    !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Load the MCC reference table from `file_name` under `data_dir`.
///
/// The `mcc_code` column is coerced to an integer and rendered as a
/// zero-padded four-character string; a row whose code does not parse as an
/// integer in `0..=9999` fails the entire load. Record order follows file
/// order.
pub fn load_table(data_dir: &Path, file_name: &str) -> MccResult<MccTable> {
    if !is_safe_file_name(file_name) {
        return Err(MccError::FileNotFound {
            file_name: file_name.to_string(),
            data_dir: data_dir.to_path_buf(),
        });
    }

    let path = data_dir.join(file_name);
    if !path.exists() {
        return Err(MccError::FileNotFound {
            file_name: file_name.to_string(),
            data_dir: data_dir.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(&path)
        .map_err(|e| MccError::MalformedData(format!("failed to read {}: {}", file_name, e)))?;

    let headers = reader
        .headers()
        .map_err(|e| MccError::MalformedData(format!("failed to read {}: {}", file_name, e)))?;
    for column in ["mcc_code", "description", "bill", "merchant"] {
        if !headers.iter().any(|h| h == column) {
            return Err(MccError::MalformedData(format!(
                "{}: missing required column {:?}",
                file_name, column
            )));
        }
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
        // CSV row numbers are 1-based and exclude the header.
        let row_number = index + 1;
        let raw = row.map_err(|e| {
            MccError::MalformedData(format!("{} row {}: {}", file_name, row_number, e))
        })?;
        let mcc_code = MccCode::parse(&raw.mcc_code).map_err(|_| {
            MccError::MalformedData(format!(
                "{} row {}: mcc_code {:?} is not an integer in 0..=9999",
                file_name, row_number, raw.mcc_code
            ))
        })?;
        records.push(MccRecord {
            mcc_code,
            description: raw.description,
            bill: raw.bill == 1,
            merchant: raw.merchant == 1,
        });
    }

    tracing::debug!("Loaded {} MCC records from {}", records.len(), file_name);
    Ok(MccTable::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn load_pads_codes_and_preserves_order() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "mcc.csv",
            "mcc_code,description,bill,merchant\n\
             5,Telegraph Services,1,0\n\
             1771,Air Conditioning Contractors,0,1\n\
             742,Veterinary Services,0,1\n",
        );

        let table = load_table(dir.path(), "mcc.csv").unwrap();
        let codes: Vec<&str> = table.records().iter().map(|r| r.mcc_code.as_str()).collect();
        assert_eq!(codes, vec!["0005", "1771", "0742"]);
        assert!(table.records().iter().all(|r| r.mcc_code.as_str().len() == 4));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_table(dir.path(), "absent.csv").unwrap_err();
        assert!(matches!(err, MccError::FileNotFound { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn load_rejects_paths_escaping_data_dir() {
        let dir = TempDir::new().unwrap();
        let err = load_table(dir.path(), "../mcc.csv").unwrap_err();
        assert!(matches!(err, MccError::FileNotFound { .. }));
        let err = load_table(dir.path(), "/etc/passwd").unwrap_err();
        assert!(matches!(err, MccError::FileNotFound { .. }));
    }

    #[test]
    fn load_fails_on_non_numeric_code() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "mcc.csv",
            "mcc_code,description,bill,merchant\n\
             4900,Utilities,1,1\n\
             XX99,Broken row,0,0\n",
        );

        let err = load_table(dir.path(), "mcc.csv").unwrap_err();
        assert!(matches!(err, MccError::MalformedData(_)));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn load_fails_on_out_of_range_code() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "mcc.csv",
            "mcc_code,description,bill,merchant\n\
             12345,Out of range,0,1\n",
        );

        let err = load_table(dir.path(), "mcc.csv").unwrap_err();
        assert!(matches!(err, MccError::MalformedData(_)));
    }

    #[test]
    fn load_fails_on_missing_column() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "mcc.csv",
            "mcc_code,description,bill\n\
             4900,Utilities,1\n",
        );

        let err = load_table(dir.path(), "mcc.csv").unwrap_err();
        assert!(matches!(err, MccError::MalformedData(_)));
    }

    #[test]
    fn load_handles_quoted_descriptions() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "mcc.csv",
            "mcc_code,description,bill,merchant\n\
             5812,\"Eating Places, Restaurants\",0,1\n",
        );

        let table = load_table(dir.path(), "mcc.csv").unwrap();
        assert_eq!(table.records()[0].description, "Eating Places, Restaurants");
    }

    #[test]
    fn load_twice_yields_identical_tables() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "mcc.csv",
            "mcc_code,description,bill,merchant\n\
             4814,Telecommunication Services,1,0\n\
             5411,Grocery Stores,0,1\n",
        );

        let first = load_table(dir.path(), "mcc.csv").unwrap();
        let second = load_table(dir.path(), "mcc.csv").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn load_empty_table_is_valid() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "mcc.csv", "mcc_code,description,bill,merchant\n");

        let table = load_table(dir.path(), "mcc.csv").unwrap();
        assert!(table.is_empty());
    }
}
