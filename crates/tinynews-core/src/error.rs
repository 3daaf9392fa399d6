//! Per-record normalization failures.

use thiserror::Error;

/// Reasons a raw record is skipped during a load.
///
/// None of these abort a load. The repository logs each one and reports it
/// in [`LoadReport`](crate::repository::LoadReport).
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record is not a key/value mapping.
    #[error("record is not an object (found {found})")]
    NotAnObject { found: &'static str },

    /// The record has no usable id and cannot be addressed.
    #[error("record has no id")]
    MissingId,

    /// A field is present but has the wrong shape.
    #[error("field '{field}' has an unexpected shape: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Another record with the same id ranked ahead of this one.
    #[error("duplicate id '{id}'")]
    DuplicateId { id: String },
}
