//! Data module - CSV loading and the record model

mod loader;
mod record;

pub use loader::{extract_records, load_dataframe, load_records, LoadError, EXPECTED_COLUMNS};
pub use record::{StudentRecord, ValidationError};
