// Core types and lookup logic for the mccmap MCC reference service

pub mod error;
pub mod loader;
pub mod ops;
pub mod report;
pub mod types;

pub use error::{MccError, MccResult};
pub use types::*;
