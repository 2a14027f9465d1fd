// In: src/bridge/arrow_impl.rs

//! DATA MARSHALLING
//!
//! Everything that touches Arrow's physical layer lives here: downcasting a
//! `&dyn Array` to its concrete type, running the per-element kernel loop
//! with a placeholder under null slots, and assembling the single fresh
//! output array that carries the input's validity bitmap unchanged.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BinaryArray, BinaryBuilder, Date32Array, Decimal128Array, PrimitiveArray,
    StringArray, StringBuilder,
};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{
    ArrowPrimitiveType, Date32Type, Decimal128Type, Int16Type, Int32Type, Int64Type, Int8Type,
    Time64MicrosecondType, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};

use crate::error::FloeError;
use crate::kernels::{bucket, temporal, truncate};
use crate::null_handling::bitmap;
use crate::types::FloeDataType;

//==================================================================================
// 1. Downcast Helper
//==================================================================================

/// Downcasts a dynamically typed array to its concrete representation.
///
/// The bridge only calls this after matching on the array's own type tag, so
/// a failure means the array lies about its type — a container bug, not a
/// caller error.
fn downcast<T: 'static>(array: &dyn Array) -> Result<&T, FloeError> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        FloeError::Internal(format!(
            "array does not match its reported data type {:?}",
            array.data_type()
        ))
    })
}

//==================================================================================
// 2. Temporal Marshalling
//==================================================================================

/// Widens a `Date32` column's day counts to `i64`.
///
/// Null slots hold a `0` placeholder; the validity bitmap is returned
/// alongside so output assembly can mask them back out.
pub(crate) fn date_day_counts(
    array: &dyn Array,
) -> Result<(Vec<i64>, Option<NullBuffer>), FloeError> {
    let typed = downcast::<Date32Array>(array)?;
    let mut days = Vec::with_capacity(typed.len());
    for i in 0..typed.len() {
        days.push(if typed.is_null(i) {
            0
        } else {
            i64::from(typed.value(i))
        });
    }
    Ok((days, bitmap::validity_of(array)))
}

/// Normalizes a timestamp column to microsecond instants, shifted by
/// `offset_micros` (pass `0` to stay on the UTC instant).
///
/// Null slots hold a `0` placeholder.
pub(crate) fn timestamp_micros(
    array: &dyn Array,
    unit: TimeUnit,
    offset_micros: i64,
) -> Result<(Vec<i64>, Option<NullBuffer>), FloeError> {
    macro_rules! normalize {
        ($T:ty) => {{
            let typed = downcast::<PrimitiveArray<$T>>(array)?;
            let mut micros = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                if typed.is_null(i) {
                    micros.push(0);
                } else {
                    let utc = temporal::instant_micros(typed.value(i), unit)?;
                    micros.push(temporal::to_local(utc, offset_micros)?);
                }
            }
            micros
        }};
    }

    let micros = match unit {
        TimeUnit::Second => normalize!(TimestampSecondType),
        TimeUnit::Millisecond => normalize!(TimestampMillisecondType),
        TimeUnit::Microsecond => normalize!(TimestampMicrosecondType),
        TimeUnit::Nanosecond => normalize!(TimestampNanosecondType),
    };
    Ok((micros, bitmap::validity_of(array)))
}

//==================================================================================
// 3. Hash Marshalling
//==================================================================================

/// Hashes every non-null element of a column through its canonical byte
/// encoding. Null slots hold a `0` placeholder hash.
///
/// This match is deliberately exhaustive over `FloeDataType`: a new logical
/// type fails to compile here until its canonical encoding is decided.
pub(crate) fn hash_column(
    array: &dyn Array,
    dtype: &FloeDataType,
) -> Result<(Vec<i32>, Option<NullBuffer>), FloeError> {
    macro_rules! hash_widening_int {
        ($T:ty) => {{
            let typed = downcast::<PrimitiveArray<$T>>(array)?;
            let mut hashes = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                hashes.push(if typed.is_null(i) {
                    0
                } else {
                    bucket::hash_long(typed.value(i) as i64)
                });
            }
            hashes
        }};
    }

    let hashes = match dtype {
        // Narrow integers widen to i64 so the same logical value hashes
        // identically at every width; 64-bit values hash their own bytes.
        FloeDataType::Int8 => hash_widening_int!(Int8Type),
        FloeDataType::Int16 => hash_widening_int!(Int16Type),
        FloeDataType::Int32 => hash_widening_int!(Int32Type),
        FloeDataType::Int64 => hash_widening_int!(Int64Type),
        FloeDataType::UInt8 => hash_widening_int!(UInt8Type),
        FloeDataType::UInt16 => hash_widening_int!(UInt16Type),
        FloeDataType::UInt32 => hash_widening_int!(UInt32Type),
        FloeDataType::UInt64 => {
            let typed = downcast::<PrimitiveArray<UInt64Type>>(array)?;
            let mut hashes = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                hashes.push(if typed.is_null(i) {
                    0
                } else {
                    bucket::hash_bytes(&typed.value(i).to_le_bytes())
                });
            }
            hashes
        }
        FloeDataType::Decimal128 { .. } => {
            let typed = downcast::<Decimal128Array>(array)?;
            let mut hashes = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                hashes.push(if typed.is_null(i) {
                    0
                } else {
                    bucket::hash_decimal_unscaled(typed.value(i))
                });
            }
            hashes
        }
        FloeDataType::Date32 => hash_widening_int!(Date32Type),
        FloeDataType::Time64Micros => hash_widening_int!(Time64MicrosecondType),
        FloeDataType::Timestamp { unit, .. } => {
            // Same instant, same hash: the stored offset is ignored and the
            // instant is normalized to UTC microseconds.
            let (micros, _) = timestamp_micros(array, *unit, 0)?;
            micros.into_iter().map(bucket::hash_long).collect()
        }
        FloeDataType::Utf8 => {
            let typed = downcast::<StringArray>(array)?;
            let mut hashes = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                hashes.push(if typed.is_null(i) {
                    0
                } else {
                    bucket::hash_bytes(typed.value(i).as_bytes())
                });
            }
            hashes
        }
        FloeDataType::Binary => {
            let typed = downcast::<BinaryArray>(array)?;
            let mut hashes = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                hashes.push(if typed.is_null(i) {
                    0
                } else {
                    bucket::hash_bytes(typed.value(i))
                });
            }
            hashes
        }
    };
    Ok((hashes, bitmap::validity_of(array)))
}

//==================================================================================
// 4. Truncate Marshalling
//==================================================================================

/// Applies the truncate kernel element-wise, rebuilding a column of the SAME
/// logical type as the input. Exhaustive over `FloeDataType`.
pub(crate) fn truncate_column(
    array: &dyn Array,
    dtype: &FloeDataType,
    width: i64,
) -> Result<ArrayRef, FloeError> {
    macro_rules! truncate_primitive {
        ($T:ty) => {{
            let typed = downcast::<PrimitiveArray<$T>>(array)?;
            let mut values = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                values.push(if typed.is_null(i) {
                    <$T>::default_value()
                } else {
                    truncate::truncate_int(typed.value(i), width)?
                });
            }
            let out = bitmap::rebuild_primitive::<$T>(values, bitmap::validity_of(array))?;
            Ok(Arc::new(out) as ArrayRef)
        }};
    }

    match dtype {
        FloeDataType::Int8 => truncate_primitive!(Int8Type),
        FloeDataType::Int16 => truncate_primitive!(Int16Type),
        FloeDataType::Int32 => truncate_primitive!(Int32Type),
        FloeDataType::Int64 => truncate_primitive!(Int64Type),
        FloeDataType::UInt8 => truncate_primitive!(UInt8Type),
        FloeDataType::UInt16 => truncate_primitive!(UInt16Type),
        FloeDataType::UInt32 => truncate_primitive!(UInt32Type),
        FloeDataType::UInt64 => truncate_primitive!(UInt64Type),
        FloeDataType::Decimal128 { precision, scale } => {
            let typed = downcast::<Decimal128Array>(array)?;
            let mut values = Vec::with_capacity(typed.len());
            for i in 0..typed.len() {
                values.push(if typed.is_null(i) {
                    0
                } else {
                    truncate::truncate_unscaled(typed.value(i), width)?
                });
            }
            let out =
                bitmap::rebuild_primitive::<Decimal128Type>(values, bitmap::validity_of(array))?
                    .with_precision_and_scale(*precision, *scale)?;
            Ok(Arc::new(out) as ArrayRef)
        }
        FloeDataType::Utf8 => {
            let typed = downcast::<StringArray>(array)?;
            let width = usize::try_from(width).unwrap_or(usize::MAX);
            let mut builder = StringBuilder::new();
            for i in 0..typed.len() {
                if typed.is_null(i) {
                    builder.append_null();
                } else {
                    builder.append_value(truncate::truncate_utf8(typed.value(i), width));
                }
            }
            Ok(Arc::new(builder.finish()) as ArrayRef)
        }
        FloeDataType::Binary => {
            let typed = downcast::<BinaryArray>(array)?;
            let width = usize::try_from(width).unwrap_or(usize::MAX);
            let mut builder = BinaryBuilder::new();
            for i in 0..typed.len() {
                if typed.is_null(i) {
                    builder.append_null();
                } else {
                    builder.append_value(truncate::truncate_binary(typed.value(i), width));
                }
            }
            Ok(Arc::new(builder.finish()) as ArrayRef)
        }
        FloeDataType::Date32 | FloeDataType::Time64Micros | FloeDataType::Timestamp { .. } => {
            Err(FloeError::UnsupportedType(format!(
                "truncate does not support temporal column type {}",
                dtype
            )))
        }
    }
}

//==================================================================================
// 5. Output Assembly
//==================================================================================

/// Narrows day counts back to the `Date32` result type; a count outside
/// `i32` is a contract violation, not a wrap.
pub(crate) fn date32_output(
    day_counts: Vec<i64>,
    validity: Option<NullBuffer>,
) -> Result<ArrayRef, FloeError> {
    let mut values = Vec::with_capacity(day_counts.len());
    for day in day_counts {
        values.push(i32::try_from(day).map_err(|_| {
            FloeError::Overflow(format!("day count {} does not fit in a date32 column", day))
        })?);
    }
    let out = bitmap::rebuild_primitive::<Date32Type>(values, validity)?;
    Ok(Arc::new(out) as ArrayRef)
}

/// Assembles the `Int32` result column shared by months/years/hours/bucket.
pub(crate) fn int32_output(
    values: Vec<i32>,
    validity: Option<NullBuffer>,
) -> Result<ArrayRef, FloeError> {
    let out = bitmap::rebuild_primitive::<Int32Type>(values, validity)?;
    Ok(Arc::new(out) as ArrayRef)
}
