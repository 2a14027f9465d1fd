//! This module defines the core, strongly-typed data representations used
//! throughout the floe partition kernels.
//!
//! It currently includes the canonical `FloeDataType` enum, the closed set of
//! logical types the transforms dispatch over. Every kernel entry point
//! matches on it exhaustively, so adding a type is a compile-time
//! exhaustiveness failure rather than a runtime surprise.

pub mod floe_data_type;

// Re-export the main type(s) for easier access.
pub use floe_data_type::FloeDataType;
