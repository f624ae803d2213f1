//! # Approximate equality of matrix elements
//!
//! Floating point results of a sparse product depend on summation order and accumulate rounding
//! errors, so stored values are compared with a relative tolerance. Exact number types (integers,
//! rationals) compare exactly.
use relp_num::{Rational32, Rational64, Rational8, RationalBig};

use crate::data::linear_algebra::TOLERANCE_FACTOR;

/// Equality that may accept small deviations.
pub trait Tolerance {
    /// Whether `self` and `other` should be considered equal.
    fn tolerant_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_tolerance_float {
    ($t:ident) => {
        /// Relatively close within `TOLERANCE_FACTOR` machine epsilons, or closer than the smallest
        /// positive normal value.
        impl Tolerance for $t {
            fn tolerant_eq(&self, other: &Self) -> bool {
                let difference = (self - other).abs();
                let scale = self.abs().max(other.abs());

                difference <= $t::EPSILON * scale * TOLERANCE_FACTOR as $t
                    || difference < $t::MIN_POSITIVE
            }
        }
    }
}
impl_tolerance_float!(f32);
impl_tolerance_float!(f64);

macro_rules! impl_tolerance_exact {
    ($($t:ty),*) => {
        $(
            impl Tolerance for $t {
                fn tolerant_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    }
}
impl_tolerance_exact!(i8, i16, i32, i64, i128, isize);
impl_tolerance_exact!(u8, u16, u32, u64, u128, usize);
impl_tolerance_exact!(Rational8, Rational32, Rational64, RationalBig);
