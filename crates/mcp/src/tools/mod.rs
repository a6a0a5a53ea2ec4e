pub mod mcc;
mod registry;

pub use mcc::{GetBillCodesTool, GetCodeInfoTool, GetMerchantCodesTool};
pub use registry::{object_schema, string_schema, Tool, ToolRegistry};
