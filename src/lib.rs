//! This file is the root of the `floe_partition` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`bridge`, `kernels`,
//!     etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the public surface: the six partition-transform entry
//!     points, the transform descriptor, the logical-type enum and the error
//!     type. Everything else is an implementation detail.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod types;

mod null_handling;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{bucket, days, hours, months, truncate, years};
pub use config::PartitionTransform;
pub use error::FloeError;
pub use types::FloeDataType;
