use thiserror::Error;

/// Schema and value problems found while reading a launch-records file.
#[derive(Error, Debug, PartialEq)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{column}' (found: {available})")]
    MissingColumn { column: String, available: String },
    #[error("row {row}, column '{column}': '{value}' is not a finite number")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: class must be 0 or 1, got '{value}'")]
    InvalidClass { row: usize, value: String },
    #[error("dataset contains no launch records")]
    EmptyDataset,
}
