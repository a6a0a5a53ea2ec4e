// MCC lookup tools exposed to agent clients

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::protocol::{CallToolResult, ToolDescriptor};
use crate::tools::{object_schema, string_schema, Tool};

const FILE_NAME_DESCRIPTION: &str = "Name of the CSV file containing MCC data (e.g. \"mcc.csv\")";

#[derive(Debug, Deserialize)]
struct FileArgs {
    file_name: String,
}

#[derive(Debug, Deserialize)]
struct CodeInfoArgs {
    file_name: String,
    mcc: String,
}

/// Tool listing all bill-related MCC codes.
pub struct GetBillCodesTool {
    data_dir: PathBuf,
}

impl GetBillCodesTool {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[async_trait::async_trait]
impl Tool for GetBillCodesTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_bill_mcc".to_string(),
            description: "Get all MCC codes related to bills".to_string(),
            input_schema: object_schema(
                serde_json::json!({
                    "file_name": string_schema(FILE_NAME_DESCRIPTION)
                }),
                &["file_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: FileArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_bill_mcc")?;

        match mccmap_core::ops::get_bill_codes(&self.data_dir, &args.file_name) {
            Ok(report) => Ok(CallToolResult::text(report)),
            Err(e) => Ok(CallToolResult::error(e.to_string())),
        }
    }
}

/// Tool listing all merchant-related MCC codes.
pub struct GetMerchantCodesTool {
    data_dir: PathBuf,
}

impl GetMerchantCodesTool {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[async_trait::async_trait]
impl Tool for GetMerchantCodesTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_merchant_mcc".to_string(),
            description: "Get all MCC codes related to merchants".to_string(),
            input_schema: object_schema(
                serde_json::json!({
                    "file_name": string_schema(FILE_NAME_DESCRIPTION)
                }),
                &["file_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: FileArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_merchant_mcc")?;

        match mccmap_core::ops::get_merchant_codes(&self.data_dir, &args.file_name) {
            Ok(report) => Ok(CallToolResult::text(report)),
            Err(e) => Ok(CallToolResult::error(e.to_string())),
        }
    }
}

/// Tool classifying a single MCC code as bill- and/or merchant-related.
pub struct GetCodeInfoTool {
    data_dir: PathBuf,
}

impl GetCodeInfoTool {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[async_trait::async_trait]
impl Tool for GetCodeInfoTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_mcc_info".to_string(),
            description: "Get information about a specific MCC code".to_string(),
            input_schema: object_schema(
                serde_json::json!({
                    "file_name": string_schema(FILE_NAME_DESCRIPTION),
                    "mcc": string_schema("MCC code to search for (e.g. \"1771\")")
                }),
                &["file_name", "mcc"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CodeInfoArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_mcc_info")?;

        match mccmap_core::ops::get_code_info(&self.data_dir, &args.file_name, &args.mcc) {
            Ok(info) => Ok(CallToolResult::text(info)),
            Err(e) => Ok(CallToolResult::error(e.to_string())),
        }
    }
}
