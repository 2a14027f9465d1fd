//! Validity (null bitmap) plumbing shared by every kernel.
//!
//! The partition transforms never turn a value into a null or a null into a
//! value: the output validity is always a positional copy of the input
//! validity. This module centralizes that contract.

pub mod bitmap;
