// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing API of the floe library. It provides a
// stable, column-level interface that completely encapsulates the pure,
// Arrow-agnostic scalar kernels. It is the authoritative boundary between the
// outside world (Arrow arrays) and the internal transform logic.
//
// Data Flow (any transform):
//
//   1. [Stateless API (days / months / years / hours / bucket / truncate)]
//         |
//         `-> a. Validates transform parameters (`n >= 1`, `w >= 1`)
//         |
//         `-> b. Converts the Arrow type tag into a `FloeDataType` and
//         |      dispatches exhaustively on it
//         |
//         `-> c. Calls `arrow_impl` to run the per-element loop
//
//   2. [Marshalling (arrow_impl)] -> Downcasts the array, feeds each non-null
//         element through the matching `kernels::*` scalar function, and
//         assembles one fresh output array carrying the input's validity.
//
//   3. [Pure Kernels (kernels::temporal / bucket / truncate)] -> Scalar maths
//         only; no Arrow, no state, no I/O.
//
// ====================================================================================
pub(crate) mod arrow_impl;
pub mod stateless_api;

// --- Column-Level Stateless API ---
pub use stateless_api::{bucket, days, hours, months, truncate, years};
