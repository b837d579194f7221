//! Element and scalar capability traits.
//!
//! Storage only needs [`Element`]: a copyable value with a distinguished
//! default ("zero") used for sparse elision. Arithmetic kernels need
//! [`Scalar`], which adds the full operation table. Each primitive family
//! is implemented once through a macro instead of one hand-written
//! arithmetic table per type.
//!
//! Overflow follows each accumulator type's native semantics: integer
//! operations wrap, float operations saturate toward infinity. Operations
//! a type cannot support semantically (bitwise on floats, negation on
//! unsigned integers) return [`ArithmeticError::Unsupported`].
//!
//! # Examples
//!
//! ```
//! use tensr_core::scalar::Scalar;
//!
//! assert_eq!(Scalar::add(250u8, 10u8), 4); // wraps
//! assert_eq!(3i32.shl(2).unwrap(), 12);
//! assert!(2.5f64.bit_and(1.0).is_err());
//! assert!(7u32.neg().is_err());
//! ```

use std::fmt::Debug;

use num_traits::{One, Zero};

use crate::error::ArithmeticError;

/// A value that can be stored in a tensor.
///
/// `Default::default()` is the implicit value of unstored coordinates in
/// sparse and compressed storage; writing it removes the entry.
pub trait Element: Copy + PartialEq + Default + Debug + 'static {}

impl<T: Copy + PartialEq + Default + Debug + 'static> Element for T {}

/// The arithmetic capability table for a tensor element type.
///
/// Total operations (`add`, `sub`, `mul`, `div`, `rem`) follow the type's
/// native semantics. Capability operations return `Result` and fail with
/// [`ArithmeticError::Unsupported`] for types that lack the operation.
pub trait Scalar: Element + PartialOrd + Zero + One {
    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;
    fn rem(self, rhs: Self) -> Self;

    /// Unary negation. Unsupported for unsigned integers.
    fn neg(self) -> Result<Self, ArithmeticError>;

    /// Bitwise and. Unsupported for floats.
    fn bit_and(self, rhs: Self) -> Result<Self, ArithmeticError>;

    /// Bitwise or. Unsupported for floats.
    fn bit_or(self, rhs: Self) -> Result<Self, ArithmeticError>;

    /// Bitwise xor. Unsupported for floats.
    fn bit_xor(self, rhs: Self) -> Result<Self, ArithmeticError>;

    /// Left shift. Unsupported for floats.
    fn shl(self, bits: u32) -> Result<Self, ArithmeticError>;

    /// Right shift. Unsupported for floats.
    fn shr(self, bits: u32) -> Result<Self, ArithmeticError>;
}

fn unsupported<T>(operation: &'static str) -> Result<T, ArithmeticError> {
    Err(ArithmeticError::Unsupported {
        operation,
        type_name: std::any::type_name::<T>(),
    })
}

macro_rules! impl_integer_common {
    () => {
        fn add(self, rhs: Self) -> Self {
            self.wrapping_add(rhs)
        }
        fn sub(self, rhs: Self) -> Self {
            self.wrapping_sub(rhs)
        }
        fn mul(self, rhs: Self) -> Self {
            self.wrapping_mul(rhs)
        }
        fn div(self, rhs: Self) -> Self {
            self.wrapping_div(rhs)
        }
        fn rem(self, rhs: Self) -> Self {
            self.wrapping_rem(rhs)
        }
        fn bit_and(self, rhs: Self) -> Result<Self, ArithmeticError> {
            Ok(self & rhs)
        }
        fn bit_or(self, rhs: Self) -> Result<Self, ArithmeticError> {
            Ok(self | rhs)
        }
        fn bit_xor(self, rhs: Self) -> Result<Self, ArithmeticError> {
            Ok(self ^ rhs)
        }
        fn shl(self, bits: u32) -> Result<Self, ArithmeticError> {
            Ok(self.wrapping_shl(bits))
        }
        fn shr(self, bits: u32) -> Result<Self, ArithmeticError> {
            Ok(self.wrapping_shr(bits))
        }
    };
}

macro_rules! impl_signed_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            impl_integer_common!();

            fn neg(self) -> Result<Self, ArithmeticError> {
                Ok(self.wrapping_neg())
            }
        }
    )*};
}

macro_rules! impl_unsigned_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            impl_integer_common!();

            fn neg(self) -> Result<Self, ArithmeticError> {
                unsupported("neg")
            }
        }
    )*};
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            fn add(self, rhs: Self) -> Self {
                self + rhs
            }
            fn sub(self, rhs: Self) -> Self {
                self - rhs
            }
            fn mul(self, rhs: Self) -> Self {
                self * rhs
            }
            fn div(self, rhs: Self) -> Self {
                self / rhs
            }
            fn rem(self, rhs: Self) -> Self {
                self % rhs
            }
            fn neg(self) -> Result<Self, ArithmeticError> {
                Ok(-self)
            }
            fn bit_and(self, _rhs: Self) -> Result<Self, ArithmeticError> {
                unsupported("bit_and")
            }
            fn bit_or(self, _rhs: Self) -> Result<Self, ArithmeticError> {
                unsupported("bit_or")
            }
            fn bit_xor(self, _rhs: Self) -> Result<Self, ArithmeticError> {
                unsupported("bit_xor")
            }
            fn shl(self, _bits: u32) -> Result<Self, ArithmeticError> {
                unsupported("shl")
            }
            fn shr(self, _bits: u32) -> Result<Self, ArithmeticError> {
                unsupported("shr")
            }
        }
    )*};
}

impl_signed_scalar!(i8, i16, i32, i64, i128, isize);
impl_unsigned_scalar!(u8, u16, u32, u64, u128, usize);
impl_float_scalar!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_wrapping() {
        assert_eq!(Scalar::add(i8::MAX, 1i8), i8::MIN);
        assert_eq!(Scalar::sub(0u16, 1u16), u16::MAX);
        assert_eq!(Scalar::mul(200u8, 2u8), 144);
    }

    #[test]
    fn test_float_native_semantics() {
        assert_eq!(Scalar::add(1.5f64, 2.5f64), 4.0);
        assert_eq!(Scalar::div(1.0f64, 0.0f64), f64::INFINITY);
        assert_eq!(Scalar::mul(f32::MAX, 2.0f32), f32::INFINITY);
    }

    #[test]
    fn test_unsigned_neg_unsupported() {
        let err = 3u32.neg().unwrap_err();
        assert!(matches!(
            err,
            ArithmeticError::Unsupported {
                operation: "neg",
                ..
            }
        ));
        assert_eq!((-5i32).neg().unwrap(), 5);
    }

    #[test]
    fn test_float_bitwise_unsupported() {
        assert!(1.0f32.bit_and(2.0).is_err());
        assert!(1.0f64.shl(1).is_err());
        assert_eq!(0b1100u8.bit_and(0b1010).unwrap(), 0b1000);
        assert_eq!(0b1100u8.bit_xor(0b1010).unwrap(), 0b0110);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(1i32.shl(4).unwrap(), 16);
        assert_eq!(16u64.shr(3).unwrap(), 2);
    }
}
