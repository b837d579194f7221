//! Elementwise binary and unary operations over any storage kind.
//!
//! Each operation validates operand compatibility eagerly, allocates a
//! result of the **left** operand's storage kind, then applies a scalar
//! kernel coordinate-by-coordinate. Operands may use different storage
//! strategies or stride directions; pairing is by coordinate, not by
//! buffer position.
//!
//! Capability failures (bitwise on floats, negation on unsigned types)
//! surface the kernel's [`ArithmeticError`] before any element of the
//! result is observable.
//!
//! # Examples
//!
//! ```
//! use tensr_core::{elementwise, DenseTensor, Tensor};
//!
//! let a = DenseTensor::from_flat(vec![1, 2, 3, 4], &[2, 2], false).unwrap();
//! let b = DenseTensor::from_flat(vec![10, 20, 30, 40], &[2, 2], false).unwrap();
//!
//! let sum = elementwise::add(&a, &b).unwrap();
//! assert_eq!(sum.get(&[1, 1]).unwrap(), 44);
//!
//! let mask = elementwise::lt(&a, &b).unwrap();
//! assert!(mask.get(&[0, 0]).unwrap());
//! ```

use crate::error::{ArithmeticError, ShapeError, TensorError};
use crate::layout::{decompose_index, strides_for, Dims};
use crate::scalar::{Element, Scalar};
use crate::tensor::{Tensor, TensorMut};

fn validate_pair<T: Element, U: Element>(
    left: &impl Tensor<T>,
    right: &impl Tensor<U>,
) -> Result<(), ShapeError> {
    let (l, r) = (left.layout(), right.layout());
    if l.rank() != r.rank() {
        return Err(ShapeError::RankMismatch {
            expected: l.rank(),
            got: r.rank(),
        });
    }
    for (axis, (&a, &b)) in l.dims().iter().zip(r.dims().iter()).enumerate() {
        if a != b {
            return Err(ShapeError::DimensionMismatch {
                axis,
                expected: a,
                got: b,
            });
        }
    }
    Ok(())
}

/// Applies a fallible kernel pairwise over two tensors, producing the left
/// operand's storage kind.
pub fn zip_with<T, U, V, L, R>(
    left: &L,
    right: &R,
    mut kernel: impl FnMut(T, U) -> Result<V, ArithmeticError>,
) -> Result<L::Owned<V>, TensorError>
where
    T: Element,
    U: Element,
    V: Element,
    L: Tensor<T>,
    R: Tensor<U>,
{
    validate_pair(left, right)?;

    let layout = left.layout();
    let walk = strides_for(layout.dims(), layout.is_reversed());
    let mut result = left.empty_like::<V>(layout.dims());
    let mut coords: Dims = Dims::from_elem(0, layout.rank());
    for i in 0..layout.len() {
        decompose_index(&walk, layout.is_reversed(), i, &mut coords, 0);
        let value = kernel(left.get(&coords)?, right.get(&coords)?)?;
        result.set(&coords, value)?;
    }
    Ok(result)
}

/// Applies a fallible kernel pairwise, writing into a caller-supplied
/// result whose dimensions must match the operands.
pub fn zip_into<T, V, L, R, O>(
    left: &L,
    right: &R,
    result: &mut O,
    mut kernel: impl FnMut(T, T) -> Result<V, ArithmeticError>,
) -> Result<(), TensorError>
where
    T: Element,
    V: Element,
    L: Tensor<T>,
    R: Tensor<T>,
    O: TensorMut<V>,
{
    validate_pair(left, right)?;
    validate_pair(left, result)?;

    let layout = left.layout();
    let walk = strides_for(layout.dims(), layout.is_reversed());
    let mut coords: Dims = Dims::from_elem(0, layout.rank());
    for i in 0..layout.len() {
        decompose_index(&walk, layout.is_reversed(), i, &mut coords, 0);
        let value = kernel(left.get(&coords)?, right.get(&coords)?)?;
        result.set(&coords, value)?;
    }
    Ok(())
}

/// Applies a fallible kernel to every element.
pub fn map<T, V, S>(
    tensor: &S,
    mut kernel: impl FnMut(T) -> Result<V, ArithmeticError>,
) -> Result<S::Owned<V>, TensorError>
where
    T: Element,
    V: Element,
    S: Tensor<T>,
{
    let layout = tensor.layout();
    let walk = strides_for(layout.dims(), layout.is_reversed());
    let mut result = tensor.empty_like::<V>(layout.dims());
    let mut coords: Dims = Dims::from_elem(0, layout.rank());
    for i in 0..layout.len() {
        decompose_index(&walk, layout.is_reversed(), i, &mut coords, 0);
        result.set(&coords, kernel(tensor.get(&coords)?)?)?;
    }
    Ok(result)
}

macro_rules! binary_op {
    ($(#[$doc:meta])* $name:ident, $scalar_name:ident, $into_name:ident, |$a:ident, $b:ident| $body:expr) => {
        $(#[$doc])*
        pub fn $name<T: Scalar, L: Tensor<T>>(
            left: &L,
            right: &impl Tensor<T>,
        ) -> Result<L::Owned<T>, TensorError> {
            zip_with(left, right, |$a: T, $b: T| $body)
        }

        /// Tensor-scalar form of the operation.
        pub fn $scalar_name<T: Scalar, L: Tensor<T>>(
            left: &L,
            scalar: T,
        ) -> Result<L::Owned<T>, TensorError> {
            map(left, |$a: T| {
                let $b = scalar;
                $body
            })
        }

        /// Writes the result into a caller-supplied tensor.
        pub fn $into_name<T: Scalar>(
            left: &impl Tensor<T>,
            right: &impl Tensor<T>,
            result: &mut impl TensorMut<T>,
        ) -> Result<(), TensorError> {
            zip_into(left, right, result, |$a: T, $b: T| $body)
        }
    };
}

binary_op!(
    /// Elementwise addition; integers wrap.
    add, add_scalar, add_into, |a, b| Ok(Scalar::add(a, b))
);
binary_op!(
    /// Elementwise subtraction; integers wrap.
    sub, sub_scalar, sub_into, |a, b| Ok(Scalar::sub(a, b))
);
binary_op!(
    /// Elementwise multiplication; integers wrap.
    mul, mul_scalar, mul_into, |a, b| Ok(Scalar::mul(a, b))
);
binary_op!(
    /// Elementwise division; native semantics per element type.
    div, div_scalar, div_into, |a, b| Ok(Scalar::div(a, b))
);
binary_op!(
    /// Elementwise remainder.
    rem, rem_scalar, rem_into, |a, b| Ok(Scalar::rem(a, b))
);
binary_op!(
    /// Elementwise bitwise and; unsupported for floats.
    bit_and, bit_and_scalar, bit_and_into, |a, b| a.bit_and(b)
);
binary_op!(
    /// Elementwise bitwise or; unsupported for floats.
    bit_or, bit_or_scalar, bit_or_into, |a, b| a.bit_or(b)
);
binary_op!(
    /// Elementwise bitwise xor; unsupported for floats.
    bit_xor, bit_xor_scalar, bit_xor_into, |a, b| a.bit_xor(b)
);

/// Shifts every element left by `bits`; unsupported for floats.
pub fn shl<T: Scalar, S: Tensor<T>>(tensor: &S, bits: u32) -> Result<S::Owned<T>, TensorError> {
    map(tensor, |a: T| a.shl(bits))
}

/// Shifts every element right by `bits`; unsupported for floats.
pub fn shr<T: Scalar, S: Tensor<T>>(tensor: &S, bits: u32) -> Result<S::Owned<T>, TensorError> {
    map(tensor, |a: T| a.shr(bits))
}

/// Identity copy of the operand (the `+tensor` operator).
pub fn unary_plus<T: Scalar, S: Tensor<T>>(tensor: &S) -> Result<S::Owned<T>, TensorError> {
    map(tensor, |a: T| Ok(a))
}

/// Elementwise negation; unsupported for unsigned integer types.
pub fn unary_minus<T: Scalar, S: Tensor<T>>(tensor: &S) -> Result<S::Owned<T>, TensorError> {
    map(tensor, |a: T| a.neg())
}

/// Adds one to every element.
pub fn increment<T: Scalar, S: Tensor<T>>(tensor: &S) -> Result<S::Owned<T>, TensorError> {
    map(tensor, |a: T| Ok(Scalar::add(a, T::one())))
}

/// Subtracts one from every element.
pub fn decrement<T: Scalar, S: Tensor<T>>(tensor: &S) -> Result<S::Owned<T>, TensorError> {
    map(tensor, |a: T| Ok(Scalar::sub(a, T::one())))
}

macro_rules! comparison_op {
    ($(#[$doc:meta])* $name:ident, |$a:ident, $b:ident| $body:expr) => {
        $(#[$doc])*
        pub fn $name<T: Scalar, L: Tensor<T>>(
            left: &L,
            right: &impl Tensor<T>,
        ) -> Result<L::Owned<bool>, TensorError> {
            zip_with(left, right, |$a: T, $b: T| Ok($body))
        }
    };
}

comparison_op!(
    /// Elementwise equality mask.
    eq, |a, b| a == b
);
comparison_op!(
    /// Elementwise inequality mask.
    ne, |a, b| a != b
);
comparison_op!(
    /// Elementwise `left < right` mask.
    lt, |a, b| a < b
);
comparison_op!(
    /// Elementwise `left <= right` mask.
    le, |a, b| a <= b
);
comparison_op!(
    /// Elementwise `left > right` mask.
    gt, |a, b| a > b
);
comparison_op!(
    /// Elementwise `left >= right` mask.
    ge, |a, b| a >= b
);
