//! Umbrella crate for the `hexpixel` workspace.
//!
//! This crate re-exports the image primitives and the staggered-row
//! resampler so applications depend on a single crate.

pub use hx_core::*;
pub use hx_hex::*;
