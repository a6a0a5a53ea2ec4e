// Flag reports and single-code classification over a loaded MCC table

use crate::error::{MccError, MccResult};
use crate::types::{Flag, MccCode, MccTable};

/// Build the human-readable report of all records with `flag` set.
///
/// The header states the match count; the body lists one
/// `"<code> : <description>"` line per matching record, in table order.
/// Zero matches produce the header alone.
pub fn flag_report(table: &MccTable, flag: Flag) -> String {
    let lines: Vec<String> = table
        .records()
        .iter()
        .filter(|record| flag.is_set(record))
        .map(|record| format!("{} : {}", record.mcc_code, record.description))
        .collect();

    let mut report = format!(
        "Current {} MCC Code has {} codes. The full list are :",
        flag.label(),
        lines.len()
    );
    for line in &lines {
        report.push('\n');
        report.push_str(line);
    }
    report
}

/// Classify a single code as bill- and/or merchant-related.
///
/// The query is coerced through the same normalization as the table codes,
/// so `"5"` matches a stored `"0005"`. The first matching record decides.
pub fn classify(table: &MccTable, code: &str) -> MccResult<String> {
    let code = MccCode::parse(code)?;
    let record = table
        .find(&code)
        .ok_or_else(|| MccError::CodeNotFound(code.clone()))?;

    let text = match (record.bill, record.merchant) {
        (true, true) => format!("{} is categorized as Bill and Merchant", code),
        (true, false) => format!("{} is categorized as Bill", code),
        (false, true) => format!("{} is categorized as Merchant", code),
        (false, false) => format!("{} is not categorized as Bill or Merchant", code),
    };
    Ok(text)
}
