//! # Integration tests
//!
//! Integration tests completely external from the crate. All code written in this module could be
//! written by an external user of the crate.
//!
//! The sparse matrix is checked against plain dense grids on randomly generated inputs.
mod properties;
