// --- IN: src/null_handling/bitmap.rs ---

//! This module contains pure, stateless helpers for carrying an input array's
//! validity bitmap over to a kernel's output, built on the official Arrow
//! `NullBuffer` type.
//!
//! The kernels compute exactly one output slot per input slot (writing a
//! placeholder under null slots), so reassembly is a zero-copy pairing of the
//! freshly computed value buffer with a clone of the input validity.

use arrow::array::{Array, PrimitiveArray};
use arrow::buffer::NullBuffer;
use arrow::datatypes::ArrowPrimitiveType;

use crate::error::FloeError;

/// Clones the validity bitmap of any Arrow array.
///
/// `Array::nulls` already accounts for slicing offsets, so the returned
/// buffer is positionally aligned with logical indices `0..len`.
pub fn validity_of(array: &dyn Array) -> Option<NullBuffer> {
    array.nulls().cloned()
}

/// Pairs a dense vector of computed values with the input's validity to form
/// the output `PrimitiveArray`.
///
/// # Errors
/// Returns `FloeError::Internal` if the value count diverges from the
/// validity length — a kernel bug, since every kernel writes one slot per
/// input slot.
pub fn rebuild_primitive<T: ArrowPrimitiveType>(
    values: Vec<T::Native>,
    validity: Option<NullBuffer>,
) -> Result<PrimitiveArray<T>, FloeError> {
    if let Some(nb) = &validity {
        if nb.len() != values.len() {
            return Err(FloeError::Internal(format!(
                "Validity length ({}) does not match computed value count ({})",
                nb.len(),
                values.len()
            )));
        }
    }
    Ok(PrimitiveArray::<T>::new(values.into(), validity))
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use arrow::datatypes::Int32Type;

    #[test]
    fn test_validity_of_with_nulls() {
        let source = Int32Array::from(vec![Some(10), None, Some(30)]);
        let validity = validity_of(&source).unwrap();
        assert!(validity.is_valid(0));
        assert!(!validity.is_valid(1));
        assert!(validity.is_valid(2));
    }

    #[test]
    fn test_validity_of_dense_array_is_none() {
        let source = Int32Array::from(vec![10, 20, 30]);
        assert!(validity_of(&source).is_none());
    }

    #[test]
    fn test_validity_of_sliced_array_is_realigned() {
        let source = Int32Array::from(vec![Some(1), None, Some(3), None]);
        let sliced = source.slice(1, 3);
        let validity = validity_of(&sliced).unwrap();
        assert!(!validity.is_valid(0));
        assert!(validity.is_valid(1));
        assert!(!validity.is_valid(2));
    }

    #[test]
    fn test_rebuild_primitive_preserves_null_positions() {
        let source = Int32Array::from(vec![Some(10), None, Some(30)]);
        // The kernel writes a placeholder (0 here) under the null slot.
        let rebuilt =
            rebuild_primitive::<Int32Type>(vec![100, 0, 300], validity_of(&source)).unwrap();
        let expected = Int32Array::from(vec![Some(100), None, Some(300)]);
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_rebuild_primitive_length_mismatch_is_a_bug() {
        let source = Int32Array::from(vec![Some(10), None]);
        let result = rebuild_primitive::<Int32Type>(vec![1], validity_of(&source));
        assert!(matches!(result, Err(FloeError::Internal(_))));
    }
}
