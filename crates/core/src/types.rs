use serde::{Deserialize, Serialize};

use crate::error::MccError;

/// A merchant category code in canonical form: four numeric characters,
/// zero-padded.
///
/// Leading zeros are significant ("0005" and "5005" are different codes), so
/// codes are kept as strings and only constructed through [`MccCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MccCode(String);

impl MccCode {
    /// Coerce raw input into canonical form.
    ///
    /// The input must parse as an integer in `0..=9999`; it is rendered
    /// zero-padded to four characters (`"5"` becomes `"0005"`).
    pub fn parse(raw: &str) -> Result<Self, MccError> {
        let value: u16 = raw
            .trim()
            .parse()
            .map_err(|_| MccError::InvalidCode(raw.to_string()))?;
        if value > 9999 {
            return Err(MccError::InvalidCode(raw.to_string()));
        }
        Ok(Self(format!("{:04}", value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MccCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the MCC reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MccRecord {
    pub mcc_code: MccCode,
    pub description: String,
    pub bill: bool,
    pub merchant: bool,
}

/// Which reference-table flag a report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Bill,
    Merchant,
}

impl Flag {
    /// Human-readable label used in report headers.
    pub fn label(&self) -> &'static str {
        match self {
            Flag::Bill => "Bill Related",
            Flag::Merchant => "Merchant Related",
        }
    }

    pub fn is_set(&self, record: &MccRecord) -> bool {
        match self {
            Flag::Bill => record.bill,
            Flag::Merchant => record.merchant,
        }
    }
}

/// Ordered MCC reference table, loaded fresh from disk for every operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MccTable {
    records: Vec<MccRecord>,
}

impl MccTable {
    pub fn new(records: Vec<MccRecord>) -> Self {
        Self { records }
    }

    /// Records in file order.
    pub fn records(&self) -> &[MccRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record matching `code`, if any. Duplicate codes beyond the
    /// first are ignored.
    pub fn find(&self, code: &MccCode) -> Option<&MccRecord> {
        self.records.iter().find(|r| &r.mcc_code == code)
    }
}
