//! # Linear algebra primitives
//!
//! A sparse matrix in compressed row storage, together with the traits its elements need and the
//! errors its operations report.

pub mod error;
pub mod matrix;
pub mod traits;

/// Number of machine epsilons (relative to the larger magnitude) two floats may differ by while
/// still being considered equal.
pub const TOLERANCE_FACTOR: u32 = 7;
