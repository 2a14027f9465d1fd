//! This module defines the canonical, type-safe representation of the logical
//! types the partition transforms operate on.
//!
//! The enum is the single source of truth for what floe supports: the bridge
//! converts an Arrow `DataType` into a `FloeDataType` exactly once per call
//! and every kernel dispatch afterwards is an exhaustive `match`, eliminating
//! an entire class of runtime type errors.

use std::fmt;
use std::sync::Arc;

use arrow::datatypes::{DataType as ArrowDataType, TimeUnit};

use crate::error::FloeError;

/// The canonical, internal representation of a logical type in the floe
/// partition kernels.
///
/// Unlike a bare type tag, the temporal and decimal variants carry the
/// metadata the kernels dispatch on: a timestamp's time unit and optional
/// fixed UTC offset, and a decimal's precision and scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FloeDataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// Fixed-point decimal: an unscaled 128-bit integer plus a scale.
    Decimal128 { precision: u8, scale: i8 },
    /// Days since 1970-01-01, signed.
    Date32,
    /// Microseconds since midnight, signed.
    Time64Micros,
    /// An instant in `unit` ticks since the epoch. `offset` is a fixed UTC
    /// offset string such as `"-08:00"`; `None` means naive/UTC.
    Timestamp {
        unit: TimeUnit,
        offset: Option<Arc<str>>,
    },
    Utf8,
    Binary,
}

impl FloeDataType {
    /// Converts an Arrow `DataType` into a `FloeDataType`.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, FloeError> {
        match arrow_type {
            ArrowDataType::Int8 => Ok(Self::Int8),
            ArrowDataType::Int16 => Ok(Self::Int16),
            ArrowDataType::Int32 => Ok(Self::Int32),
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::UInt8 => Ok(Self::UInt8),
            ArrowDataType::UInt16 => Ok(Self::UInt16),
            ArrowDataType::UInt32 => Ok(Self::UInt32),
            ArrowDataType::UInt64 => Ok(Self::UInt64),
            ArrowDataType::Decimal128(precision, scale) => Ok(Self::Decimal128 {
                precision: *precision,
                scale: *scale,
            }),
            ArrowDataType::Date32 => Ok(Self::Date32),
            ArrowDataType::Time64(TimeUnit::Microsecond) => Ok(Self::Time64Micros),
            ArrowDataType::Timestamp(unit, offset) => Ok(Self::Timestamp {
                unit: *unit,
                offset: offset.clone(),
            }),
            ArrowDataType::Utf8 => Ok(Self::Utf8),
            ArrowDataType::Binary => Ok(Self::Binary),
            dt => Err(FloeError::UnsupportedType(format!(
                "Cannot convert Arrow type {:?} to FloeDataType",
                dt
            ))),
        }
    }

    /// Converts a `FloeDataType` back into an Arrow `DataType`.
    pub fn to_arrow_type(&self) -> ArrowDataType {
        match self {
            Self::Int8 => ArrowDataType::Int8,
            Self::Int16 => ArrowDataType::Int16,
            Self::Int32 => ArrowDataType::Int32,
            Self::Int64 => ArrowDataType::Int64,
            Self::UInt8 => ArrowDataType::UInt8,
            Self::UInt16 => ArrowDataType::UInt16,
            Self::UInt32 => ArrowDataType::UInt32,
            Self::UInt64 => ArrowDataType::UInt64,
            Self::Decimal128 { precision, scale } => {
                ArrowDataType::Decimal128(*precision, *scale)
            }
            Self::Date32 => ArrowDataType::Date32,
            Self::Time64Micros => ArrowDataType::Time64(TimeUnit::Microsecond),
            Self::Timestamp { unit, offset } => {
                ArrowDataType::Timestamp(*unit, offset.clone())
            }
            Self::Utf8 => ArrowDataType::Utf8,
            Self::Binary => ArrowDataType::Binary,
        }
    }

    /// Returns `true` if the type is an integer of any width or signedness.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Returns `true` if the type carries a calendar instant the temporal
    /// bucketing kernels accept (`days`/`months`/`years`).
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date32 | Self::Timestamp { .. })
    }
}

/// Provides the canonical string representation for a `FloeDataType`.
impl fmt::Display for FloeDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the public contract: they
        // are what error messages name when a dispatch is rejected.
        match self {
            Self::Decimal128 { precision, scale } => {
                write!(f, "Decimal128({}, {})", precision, scale)
            }
            Self::Timestamp { unit, offset } => match offset {
                Some(offset) => write!(f, "Timestamp({:?}, {})", unit, offset),
                None => write!(f, "Timestamp({:?})", unit),
            },
            other => write!(f, "{:?}", other),
        }
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
