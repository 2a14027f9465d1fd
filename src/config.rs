// In: src/config.rs

//! Serializable partition-transform descriptors.
//!
//! A partition spec lives longer than any process: table metadata records
//! which transform (and which parameters) routes rows into partitions, and
//! every later writer and reader must re-create the exact same mapping. This
//! module defines the descriptor that gets persisted — created once at the
//! application boundary (e.g. from a table's JSON metadata) and passed down
//! read-only — plus the dispatch from a descriptor to the kernel it names.

use serde::{Deserialize, Serialize};

use arrow::array::{Array, ArrayRef};

use crate::bridge;
use crate::error::FloeError;
use crate::types::FloeDataType;

//==================================================================================
// I. The Transform Descriptor
//==================================================================================

/// One partition transform as persisted in partition-spec metadata.
///
/// The tag/field names are part of the on-disk contract; they serialize as
/// e.g. `{"transform": "bucket", "n": 16}`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "transform", rename_all = "snake_case")]
pub enum PartitionTransform {
    /// Calendar day bucketing; result type `Date32`.
    Days,

    /// Months-since-epoch bucketing; result type `Int32`.
    Months,

    /// Years-since-epoch bucketing; result type `Int32`.
    Years,

    /// Hours-since-epoch bucketing (timestamps only); result type `Int32`.
    Hours,

    /// Hash bucketing into `n` buckets; result type `Int32`.
    Bucket { n: u32 },

    /// Floor truncation by width `w`; result type equals the input type.
    Truncate { w: i64 },
}

impl PartitionTransform {
    /// Applies this transform to a column, dispatching to the matching
    /// bridge entry point.
    pub fn apply(&self, array: &dyn Array) -> Result<ArrayRef, FloeError> {
        match self {
            Self::Days => bridge::days(array),
            Self::Months => bridge::months(array),
            Self::Years => bridge::years(array),
            Self::Hours => bridge::hours(array),
            Self::Bucket { n } => bridge::bucket(array, *n),
            Self::Truncate { w } => bridge::truncate(array, *w),
        }
    }

    /// The fixed output type of this transform for a given input type,
    /// without materializing a column. Planning layers use this to type a
    /// partition spec before any data exists.
    ///
    /// Rejects exactly the input types `apply` would reject.
    pub fn result_type(&self, input: &FloeDataType) -> Result<FloeDataType, FloeError> {
        match self {
            Self::Days if input.is_temporal() => Ok(FloeDataType::Date32),
            Self::Months | Self::Years if input.is_temporal() => Ok(FloeDataType::Int32),
            Self::Hours if matches!(input, FloeDataType::Timestamp { .. }) => {
                Ok(FloeDataType::Int32)
            }
            Self::Bucket { .. } => Ok(FloeDataType::Int32),
            Self::Truncate { .. }
                if input.is_integer()
                    || matches!(
                        input,
                        FloeDataType::Decimal128 { .. }
                            | FloeDataType::Utf8
                            | FloeDataType::Binary
                    ) =>
            {
                Ok(input.clone())
            }
            other => Err(FloeError::UnsupportedType(format!(
                "transform {:?} does not support column type {}",
                other, input
            ))),
        }
    }
}

//==================================================================================
// II. Unit Tests
//==================================================================================
