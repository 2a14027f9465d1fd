// In: src/bridge/stateless_api.rs

//! The six column-level partition-transform entry points.
//!
//! Each function is a pure mapping from one Arrow array (plus parameters) to
//! one freshly allocated output array: parameters are validated before any
//! work happens, the logical type is resolved into `FloeDataType` exactly
//! once, and the dispatch below hands the per-element loop to `arrow_impl`.
//! A call either returns a fully populated column or fails with no output
//! observable — there are no partial results and nothing is retried.

use std::sync::Arc;

use arrow::array::{make_array, Array, ArrayRef};

use crate::bridge::arrow_impl;
use crate::error::FloeError;
use crate::kernels::{bucket as bucket_kernel, temporal};
use crate::types::FloeDataType;

/// Resolves a timestamp column's optional offset string into its microsecond
/// displacement; a missing offset means the instant is already local (UTC).
fn resolve_offset(offset: Option<&Arc<str>>) -> Result<i64, FloeError> {
    offset
        .map(|tz| temporal::parse_utc_offset(tz))
        .transpose()
        .map(|parsed| parsed.unwrap_or(0))
}

/// Local whole-day counts for the three calendar transforms. `op` names the
/// entry point in the rejection message.
fn local_day_counts(
    array: &dyn Array,
    dtype: &FloeDataType,
    op: &str,
) -> Result<(Vec<i64>, Option<arrow::buffer::NullBuffer>), FloeError> {
    match dtype {
        FloeDataType::Date32 => arrow_impl::date_day_counts(array),
        FloeDataType::Timestamp { unit, offset } => {
            let offset_micros = resolve_offset(offset.as_ref())?;
            let (micros, validity) = arrow_impl::timestamp_micros(array, *unit, offset_micros)?;
            let days = micros.into_iter().map(temporal::day_of_micros).collect();
            Ok((days, validity))
        }
        other => Err(FloeError::UnsupportedType(format!(
            "{} expects a date or timestamp column, got {}",
            op, other
        ))),
    }
}

/// Buckets each instant into its calendar day. Accepts `Date32` (identity on
/// the day count) and any timestamp; the result type is `Date32`.
pub fn days(array: &dyn Array) -> Result<ArrayRef, FloeError> {
    let dtype = FloeDataType::from_arrow_type(array.data_type())?;
    log_metric!("event" = "days", "dtype" = &dtype, "rows" = &array.len());
    if let FloeDataType::Date32 = dtype {
        // Already a day count; hand back a fresh owned handle.
        return Ok(make_array(array.to_data()));
    }
    let (day_counts, validity) = local_day_counts(array, &dtype, "days")?;
    arrow_impl::date32_output(day_counts, validity)
}

/// Buckets each instant into its months-since-epoch number (`Int32`), using
/// true variable-length calendar month boundaries.
pub fn months(array: &dyn Array) -> Result<ArrayRef, FloeError> {
    let dtype = FloeDataType::from_arrow_type(array.data_type())?;
    log_metric!("event" = "months", "dtype" = &dtype, "rows" = &array.len());
    let (day_counts, validity) = local_day_counts(array, &dtype, "months")?;
    let mut values = Vec::with_capacity(day_counts.len());
    for day in day_counts {
        values.push(temporal::month_of_day(day)?);
    }
    arrow_impl::int32_output(values, validity)
}

/// Buckets each instant into its years-since-epoch number (`Int32`).
pub fn years(array: &dyn Array) -> Result<ArrayRef, FloeError> {
    let dtype = FloeDataType::from_arrow_type(array.data_type())?;
    log_metric!("event" = "years", "dtype" = &dtype, "rows" = &array.len());
    let (day_counts, validity) = local_day_counts(array, &dtype, "years")?;
    let mut values = Vec::with_capacity(day_counts.len());
    for day in day_counts {
        values.push(temporal::year_of_day(day)?);
    }
    arrow_impl::int32_output(values, validity)
}

/// Buckets each instant into its hours-since-epoch number (`Int32`).
/// Timestamp columns only: a plain date has no hour to bucket.
pub fn hours(array: &dyn Array) -> Result<ArrayRef, FloeError> {
    let dtype = FloeDataType::from_arrow_type(array.data_type())?;
    log_metric!("event" = "hours", "dtype" = &dtype, "rows" = &array.len());
    match &dtype {
        FloeDataType::Timestamp { unit, offset } => {
            let offset_micros = resolve_offset(offset.as_ref())?;
            let (micros, validity) = arrow_impl::timestamp_micros(array, *unit, offset_micros)?;
            let mut values = Vec::with_capacity(micros.len());
            for instant in micros {
                values.push(temporal::hour_of_micros(instant)?);
            }
            arrow_impl::int32_output(values, validity)
        }
        other => Err(FloeError::UnsupportedType(format!(
            "hours expects a timestamp column, got {}",
            other
        ))),
    }
}

/// Maps every non-null value to a hash bucket in `[0, n)` (`Int32`), using
/// the canonical per-type encodings of the table-format specification.
pub fn bucket(array: &dyn Array, n: u32) -> Result<ArrayRef, FloeError> {
    if n < 1 {
        return Err(FloeError::InvalidArgument(format!(
            "bucket count n must be >= 1, got {}",
            n
        )));
    }
    let dtype = FloeDataType::from_arrow_type(array.data_type())?;
    log_metric!("event" = "bucket", "dtype" = &dtype, "n" = &n, "rows" = &array.len());
    let (hashes, validity) = arrow_impl::hash_column(array, &dtype)?;
    let values = hashes
        .into_iter()
        .map(|hash| bucket_kernel::bucket_index(hash, n))
        .collect();
    arrow_impl::int32_output(values, validity)
}

/// Floor-aligns every non-null value to the width `w` (a raw magnitude for
/// integers and decimals, a codepoint count for strings, a byte count for
/// binary). The output has the same logical type as the input.
pub fn truncate(array: &dyn Array, w: i64) -> Result<ArrayRef, FloeError> {
    if w < 1 {
        return Err(FloeError::InvalidArgument(format!(
            "truncate width w must be >= 1, got {}",
            w
        )));
    }
    let dtype = FloeDataType::from_arrow_type(array.data_type())?;
    log_metric!("event" = "truncate", "dtype" = &dtype, "w" = &w, "rows" = &array.len());
    arrow_impl::truncate_column(array, &dtype, w)
}
