//! # Storing of sparse matrices in memory
//!
//! This module provides the data structures used to represent sparse matrices in memory, and the
//! number type traits they rely on.

pub mod linear_algebra;
pub mod number_types;
