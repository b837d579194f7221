//! Tensor contraction over arbitrary axis pairs.
//!
//! `contract` multiplies and sums paired axes of two operands. The result
//! dimensions are the left operand's non-summed axes followed by the
//! right's, so matrix multiplication is `contract(a, b, &[1], &[0])` and
//! an empty axis list gives the outer product.
//!
//! The kernel never materializes intermediate tensors: it re-projects
//! each logical result position and each summing position onto the
//! operands' stride spaces, so dense, sparse, and compressed operands in
//! either stride direction all run through the same loop.
//!
//! # Examples
//!
//! ```
//! use tensr_core::{contract, DenseTensor, Tensor};
//!
//! let a = DenseTensor::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let b = DenseTensor::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
//! let c = contract::matrix_multiply(&a, &b).unwrap();
//! assert_eq!(c.buffer(), &[19, 22, 43, 50]);
//! ```

use crate::error::{ContractError, ShapeError, TensorError};
use crate::layout::{decompose_index, split_strides, strides_for, transform_index, Dims};
use crate::scalar::Scalar;
use crate::tensor::{Tensor, TensorMut};

/// Checks axis pairing and computes the result dimensions: left
/// non-summed axes in order, then right non-summed axes.
pub fn contract_dims<T: Scalar>(
    left: &impl Tensor<T>,
    right: &impl Tensor<T>,
    left_axes: &[usize],
    right_axes: &[usize],
) -> Result<Dims, ContractError> {
    if left_axes.len() != right_axes.len() {
        return Err(ContractError::AxisCountMismatch {
            left: left_axes.len(),
            right: right_axes.len(),
        });
    }

    for (entry, (&left_axis, &right_axis)) in
        left_axes.iter().zip(right_axes.iter()).enumerate()
    {
        if left_axis >= left.rank() {
            return Err(ContractError::AxisOutOfRange {
                side: "left",
                entry,
                axis: left_axis,
                rank: left.rank(),
            });
        }
        if right_axis >= right.rank() {
            return Err(ContractError::AxisOutOfRange {
                side: "right",
                entry,
                axis: right_axis,
                rank: right.rank(),
            });
        }
        // each axis may be summed at most once; a repeat would also break
        // the result-rank arithmetic below
        if left_axes[..entry].contains(&left_axis) {
            return Err(ContractError::DuplicateAxis {
                side: "left",
                entry,
                axis: left_axis,
            });
        }
        if right_axes[..entry].contains(&right_axis) {
            return Err(ContractError::DuplicateAxis {
                side: "right",
                entry,
                axis: right_axis,
            });
        }
        if left.dims()[left_axis] != right.dims()[right_axis] {
            return Err(ContractError::AxisLengthMismatch {
                pair: entry,
                left: left.dims()[left_axis],
                right: right.dims()[right_axis],
            });
        }
    }

    let mut result_dims: Dims =
        Dims::with_capacity(left.rank() + right.rank() - 2 * left_axes.len());
    for (axis, &dim) in left.dims().iter().enumerate() {
        if !left_axes.contains(&axis) {
            result_dims.push(dim);
        }
    }
    for (axis, &dim) in right.dims().iter().enumerate() {
        if !right_axes.contains(&axis) {
            result_dims.push(dim);
        }
    }
    Ok(result_dims)
}

fn kernel<T, L, R, O>(
    left: &L,
    right: &R,
    left_axes: &[usize],
    right_axes: &[usize],
    result: &mut O,
) -> Result<(), TensorError>
where
    T: Scalar,
    L: Tensor<T>,
    R: Tensor<T>,
    O: TensorMut<T>,
{
    let result_rank = result.rank();

    let summing_dims: Dims = left_axes.iter().map(|&axis| left.dims()[axis]).collect();
    let summing_strides = strides_for(&summing_dims, false);
    let summing_length: usize = summing_dims.iter().product();

    // four projection tables: the result walk splits into each operand's
    // non-summed strides, the summing walk into each operand's summed
    // strides. Left non-summed axes lead the result, so the right table
    // starts after them.
    let mut left_non_summing: Dims = Dims::from_elem(0, result_rank);
    let mut left_summing: Dims = Dims::from_elem(0, left_axes.len());
    split_strides(
        left.layout().strides(),
        left_axes,
        &mut left_non_summing,
        0,
        &mut left_summing,
        0,
    );

    let mut right_non_summing: Dims = Dims::from_elem(0, result_rank);
    let mut right_summing: Dims = Dims::from_elem(0, right_axes.len());
    split_strides(
        right.layout().strides(),
        right_axes,
        &mut right_non_summing,
        left.rank() - left_axes.len(),
        &mut right_summing,
        0,
    );

    let left_offset = left.layout().offset();
    let right_offset = right.layout().offset();

    let walk = strides_for(result.dims(), result.layout().is_reversed());
    let walk_reversed = result.layout().is_reversed();
    let mut result_coords: Dims = Dims::from_elem(0, result_rank);

    for result_index in 0..result.len() {
        decompose_index(&walk, walk_reversed, result_index, &mut result_coords, 0);

        let left_base: usize = result_coords
            .iter()
            .zip(left_non_summing.iter())
            .map(|(&coord, &stride)| coord * stride)
            .sum();
        let right_base: usize = result_coords
            .iter()
            .zip(right_non_summing.iter())
            .map(|(&coord, &stride)| coord * stride)
            .sum();

        let mut sum = T::zero();
        for summing_index in 0..summing_length {
            let left_position =
                left_base + transform_index(summing_index, &summing_strides, false, &left_summing);
            let right_position = right_base
                + transform_index(summing_index, &summing_strides, false, &right_summing);

            sum = Scalar::add(
                sum,
                Scalar::mul(
                    left.get_linear(left_offset + left_position),
                    right.get_linear(right_offset + right_position),
                ),
            );
        }

        result.set(&result_coords, sum)?;
    }

    Ok(())
}

/// Contracts the paired axes, allocating a fresh result of the left
/// operand's storage kind.
///
/// # Errors
///
/// [`ContractError`] variants for axis problems; [`ShapeError::ZeroRank`]
/// when every axis of both operands is summed away.
pub fn contract<T, L, R>(
    left: &L,
    right: &R,
    left_axes: &[usize],
    right_axes: &[usize],
) -> Result<L::Owned<T>, TensorError>
where
    T: Scalar,
    L: Tensor<T>,
    R: Tensor<T>,
{
    let result_dims = contract_dims(left, right, left_axes, right_axes)?;
    if result_dims.is_empty() {
        return Err(ShapeError::ZeroRank.into());
    }

    let mut result = left.empty_like::<T>(&result_dims);
    kernel(left, right, left_axes, right_axes, &mut result)?;
    Ok(result)
}

/// Contracts into a caller-supplied result tensor, which must already
/// have the expected dimensions.
pub fn contract_into<T, L, R, O>(
    left: &L,
    right: &R,
    left_axes: &[usize],
    right_axes: &[usize],
    result: &mut O,
) -> Result<(), TensorError>
where
    T: Scalar,
    L: Tensor<T>,
    R: Tensor<T>,
    O: TensorMut<T>,
{
    let expected = contract_dims(left, right, left_axes, right_axes)?;
    if result.rank() != expected.len() {
        return Err(ContractError::ResultRankMismatch {
            expected: expected.len(),
            got: result.rank(),
        }
        .into());
    }
    for (axis, (&want, &got)) in expected.iter().zip(result.dims().iter()).enumerate() {
        if want != got {
            return Err(ContractError::ResultShapeMismatch {
                axis,
                expected: want,
                got,
            }
            .into());
        }
    }

    kernel(left, right, left_axes, right_axes, result)
}

/// Rank-2 by rank-2 product: contracts the left columns with the right
/// rows.
pub fn matrix_multiply<T, L, R>(left: &L, right: &R) -> Result<L::Owned<T>, TensorError>
where
    T: Scalar,
    L: Tensor<T>,
    R: Tensor<T>,
{
    if left.rank() != 2 || right.rank() != 2 {
        return Err(ShapeError::RankMismatch {
            expected: 2,
            got: if left.rank() != 2 {
                left.rank()
            } else {
                right.rank()
            },
        }
        .into());
    }
    contract(left, right, &[1], &[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseTensor;

    #[test]
    fn test_matrix_multiply() {
        let a = DenseTensor::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = DenseTensor::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
        let c = matrix_multiply(&a, &b).unwrap();
        assert_eq!(c.dims(), &[2, 2]);
        assert_eq!(c.buffer(), &[19, 22, 43, 50]);
    }

    #[test]
    fn test_matrix_multiply_rectangular() {
        let a = DenseTensor::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let b =
            DenseTensor::from_rows(vec![vec![7, 8], vec![9, 10], vec![11, 12]]).unwrap();
        let c = matrix_multiply(&a, &b).unwrap();
        assert_eq!(c.dims(), &[2, 2]);
        assert_eq!(c.buffer(), &[58, 64, 139, 154]);
    }

    #[test]
    fn test_contract_multiple_axes() {
        // sum over axes (0, 1) of a [3, 2, 2] against (1, 2) of a [4, 3, 2]
        let left = DenseTensor::from_flat((0..12).collect::<Vec<i64>>(), &[3, 2, 2], false)
            .unwrap();
        let right =
            DenseTensor::from_flat((0..24).collect::<Vec<i64>>(), &[4, 3, 2], false).unwrap();

        let result = contract(&left, &right, &[0, 1], &[1, 2]).unwrap();
        assert_eq!(result.dims(), &[2, 4]);

        // brute-force the same sums
        let mut expected = DenseTensor::<i64>::zeros(&[2, 4]).unwrap();
        for i in 0..2 {
            for j in 0..4 {
                let mut sum = 0;
                for a in 0..3 {
                    for b in 0..2 {
                        sum += left.get(&[a, b, i]).unwrap() * right.get(&[j, a, b]).unwrap();
                    }
                }
                expected.set(&[i, j], sum).unwrap();
            }
        }
        assert_eq!(result, expected);
    }

    #[test]
    fn test_outer_product() {
        let a = DenseTensor::from_flat(vec![1, 2, 3], &[3], false).unwrap();
        let b = DenseTensor::from_flat(vec![4, 5], &[2], false).unwrap();
        let outer = contract(&a, &b, &[], &[]).unwrap();
        assert_eq!(outer.dims(), &[3, 2]);
        assert_eq!(outer.buffer(), &[4, 5, 8, 10, 12, 15]);
    }

    #[test]
    fn test_mixed_stride_directions() {
        let a = DenseTensor::from_flat(vec![1, 2, 3, 4], &[2, 2], false).unwrap();
        let b = DenseTensor::from_flat(vec![5, 6, 7, 8], &[2, 2], true).unwrap();
        let c = matrix_multiply(&a, &b).unwrap();
        assert_eq!(c.get(&[0, 0]).unwrap(), 19);
        assert_eq!(c.get(&[1, 1]).unwrap(), 50);
    }

    #[test]
    fn test_view_operand() {
        let big =
            DenseTensor::from_flat((0..20i32).collect::<Vec<_>>(), &[4, 5], false).unwrap();
        let sub = big.slice(&[(1, 2), (1, 2)]).unwrap();
        // sub is [[6, 7], [11, 12]]
        let eye = DenseTensor::<i32>::identity(2).unwrap();
        let product = matrix_multiply(&sub, &eye).unwrap();
        assert_eq!(product.buffer(), &[6, 7, 11, 12]);
    }

    #[test]
    fn test_validation() {
        let a = DenseTensor::<i32>::zeros(&[2, 3]).unwrap();
        let b = DenseTensor::<i32>::zeros(&[2, 3]).unwrap();

        assert!(matches!(
            contract(&a, &b, &[0], &[0, 1]).unwrap_err(),
            TensorError::Contract(ContractError::AxisCountMismatch { .. })
        ));
        assert!(matches!(
            contract(&a, &b, &[5], &[0]).unwrap_err(),
            TensorError::Contract(ContractError::AxisOutOfRange { .. })
        ));
        assert!(matches!(
            contract(&a, &b, &[1], &[0]).unwrap_err(),
            TensorError::Contract(ContractError::AxisLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_axes_rejected() {
        let a = DenseTensor::<i32>::zeros(&[2, 2]).unwrap();
        let b = DenseTensor::<i32>::zeros(&[2, 2]).unwrap();

        assert!(matches!(
            contract(&a, &b, &[0, 0], &[0, 1]).unwrap_err(),
            TensorError::Contract(ContractError::DuplicateAxis {
                side: "left",
                entry: 1,
                axis: 0,
            })
        ));
        // three entries on rank-2 operands must error, not underflow the
        // result rank
        assert!(matches!(
            contract(&a, &b, &[0, 0, 1], &[0, 1, 0]).unwrap_err(),
            TensorError::Contract(ContractError::DuplicateAxis { .. })
        ));
        assert!(matches!(
            contract(&a, &b, &[0, 1], &[1, 1]).unwrap_err(),
            TensorError::Contract(ContractError::DuplicateAxis {
                side: "right",
                ..
            })
        ));
    }

    #[test]
    fn test_full_contraction_rejected() {
        let a = DenseTensor::from_flat(vec![1, 2, 3], &[3], false).unwrap();
        let b = DenseTensor::from_flat(vec![4, 5, 6], &[3], false).unwrap();
        assert!(matches!(
            contract(&a, &b, &[0], &[0]).unwrap_err(),
            TensorError::Shape(ShapeError::ZeroRank)
        ));
    }

    #[test]
    fn test_contract_into_checks_result_shape() {
        let a = DenseTensor::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = DenseTensor::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();

        let mut wrong = DenseTensor::<i32>::zeros(&[2, 3]).unwrap();
        assert!(matches!(
            contract_into(&a, &b, &[1], &[0], &mut wrong).unwrap_err(),
            TensorError::Contract(ContractError::ResultShapeMismatch { .. })
        ));

        let mut result = DenseTensor::<i32>::zeros(&[2, 2]).unwrap();
        contract_into(&a, &b, &[1], &[0], &mut result).unwrap();
        assert_eq!(result.buffer(), &[19, 22, 43, 50]);
    }
}
