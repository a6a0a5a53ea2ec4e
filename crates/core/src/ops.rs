// Operation entry points: each performs its own isolated load-and-compute

use std::path::Path;

use crate::error::MccResult;
use crate::loader::load_table;
use crate::report::{classify, flag_report};
use crate::types::Flag;

/// List all bill-related MCC codes from `file_name` under `data_dir`.
pub fn get_bill_codes(data_dir: &Path, file_name: &str) -> MccResult<String> {
    let table = load_table(data_dir, file_name)?;
    Ok(flag_report(&table, Flag::Bill))
}

/// List all merchant-related MCC codes from `file_name` under `data_dir`.
pub fn get_merchant_codes(data_dir: &Path, file_name: &str) -> MccResult<String> {
    let table = load_table(data_dir, file_name)?;
    Ok(flag_report(&table, Flag::Merchant))
}

/// Report whether `code` is bill- and/or merchant-related.
pub fn get_code_info(data_dir: &Path, file_name: &str, code: &str) -> MccResult<String> {
    let table = load_table(data_dir, file_name)?;
    classify(&table, code)
}
