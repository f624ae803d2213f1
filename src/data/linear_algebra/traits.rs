//! # Traits for elements in sparse datastructures
//!
//! A sparse data structure only stores values that differ from the additive identity. Anything
//! that is not stored is, implicitly, that zero value. The element type therefore needs to know
//! its own zero, and it needs to be comparable against it so that no explicit zeros end up in
//! storage.
use std::fmt::{Debug, Display};

use num_traits::Zero;

/// Element of a `CrsMatrix`.
///
/// This is the minimal set of traits needed to store values, to return the implicit zero for
/// entries that are not stored, and to derive a few practical traits for the matrix type. The
/// arithmetic operations are required separately, only by the operations that use them.
///
/// Automatically implemented for all types satisfying the trait's bounds.
pub trait Element: Zero + Clone + PartialEq + Display + Debug {}
impl<T: Zero + Clone + PartialEq + Display + Debug> Element for T {}

/// Whether a value is worth storing in a sparse structure.
///
/// Automatically implemented for all types satisfying the trait's bounds.
pub trait NotZero: Zero {
    /// Whether this value is different from the additive identity.
    fn is_not_zero(&self) -> bool {
        !self.is_zero()
    }
}
impl<T: Zero> NotZero for T {}
