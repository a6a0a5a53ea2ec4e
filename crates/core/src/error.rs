//! Error types for MCC table loading and lookup.

use std::path::PathBuf;

use crate::types::MccCode;

/// Result type for MCC lookup operations.
pub type MccResult<T> = Result<T, MccError>;

/// Errors that can occur while loading or querying the MCC reference table.
#[derive(Debug, thiserror::Error)]
pub enum MccError {
    /// Referenced file does not exist under the data directory.
    #[error("file {file_name} not found in {}", .data_dir.display())]
    FileNotFound {
        file_name: String,
        data_dir: PathBuf,
    },

    /// A row or column of the reference file cannot be interpreted.
    #[error("malformed MCC data: {0}")]
    MalformedData(String),

    /// The queried code has no matching record in the table.
    #[error("MCC code {0} not found in lookup table")]
    CodeNotFound(MccCode),

    /// The queried code cannot be coerced to a four-digit code.
    #[error("invalid MCC code {0:?}: expected an integer in 0..=9999")]
    InvalidCode(String),
}
