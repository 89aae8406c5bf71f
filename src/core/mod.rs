// Public modules
pub mod batch;
pub mod catalog;
pub mod defaults;
pub mod document;
pub mod error;
pub mod estimate;
pub mod paths;
pub mod takeoff;
pub mod workbook;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
