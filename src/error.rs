// In: src/error.rs

//! This module defines the single, unified error type for the entire floe library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloeError {
    // =========================================================================
    // === Contract Violations (the caller broke the transform contract)
    // =========================================================================
    /// A kernel was invoked on a logical type it does not support, or on a
    /// timestamp whose offset string is not a fixed `±HH:MM` offset. The
    /// message names the offending type so the partition-spec definition can
    /// be corrected.
    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    /// A transform parameter was out of range (`n < 1` for bucket, `w < 1`
    /// for truncate). The message names the parameter.
    #[error("Invalid transform parameter: {0}")]
    InvalidArgument(String),

    /// Checked arithmetic exceeded the range of the result type, e.g. a
    /// month offset computed from a date beyond the calendar range, or a
    /// floor-aligned integer that no longer fits its width. Surfaced, never
    /// silently wrapped.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Internal logic error (this is a bug): {0}")]
    Internal(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library, e.g. while rebuilding a
    /// decimal output with its precision and scale.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
