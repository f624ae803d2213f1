//! # Number types
//!
//! The matrix is generic over its element type. Floating point elements are compared with a
//! tolerance, while exact types like integers and the rationals of `relp-num` are compared exactly.
//! Tests can thereby check the algorithms with exact arithmetic, while the same code is used
//! without adaptation with floating point numbers.
pub mod tolerance;
