//! Diagonal and triangle extraction.
//!
//! All operations here treat the first two axes as the matrix plane and
//! carry any remaining axes along as a projection. For a rank-2 tensor
//! that projection is a single scalar per matrix cell; for higher ranks
//! each cell is a sub-tensor over axes `2..`.
//!
//! # Examples
//!
//! ```
//! use tensr_core::{structural, DenseTensor, Tensor};
//!
//! let m = DenseTensor::from_rows(vec![
//!     vec![1, 2, 4],
//!     vec![8, 3, 9],
//!     vec![0, 7, 5],
//! ]).unwrap();
//!
//! let main = structural::get_diagonal(&m, 0).unwrap();
//! assert_eq!(main.buffer(), &[1, 3, 5]);
//!
//! let above = structural::get_diagonal(&m, 1).unwrap();
//! assert_eq!(above.buffer(), &[2, 9]);
//! ```

use crate::error::{ShapeError, TensorError};
use crate::layout::{decompose_index, strides_for, Dims};
use crate::scalar::Element;
use crate::tensor::{Tensor, TensorMut};

fn require_rank<T: Element>(tensor: &impl Tensor<T>, required: usize) -> Result<(), ShapeError> {
    if tensor.rank() < required {
        return Err(ShapeError::RankTooSmall {
            required,
            actual: tensor.rank(),
        });
    }
    Ok(())
}

/// Extracts the diagonal of the first two axes at the given offset.
///
/// A positive offset selects a diagonal above the main one (shifted
/// along axis 1), a negative offset one below it (shifted along axis 0).
/// The diagonal length is the smaller of the two offset-adjusted axis
/// lengths. Result dimensions are `[diagonal_length, dims[2..]]`.
///
/// # Errors
///
/// [`ShapeError::RankTooSmall`] below rank 2;
/// [`ShapeError::DiagonalOutOfRange`] when the offset leaves no elements.
pub fn get_diagonal<T, S>(tensor: &S, offset: isize) -> Result<S::Owned<T>, TensorError>
where
    T: Element,
    S: Tensor<T>,
{
    require_rank(tensor, 2)?;

    let dims = tensor.dims();
    let axis_len0 = dims[0] as isize;
    let axis_len1 = dims[1] as isize;

    let offset_len0 = if offset < 0 { axis_len0 + offset } else { axis_len0 };
    let offset_len1 = if offset > 0 { axis_len1 - offset } else { axis_len1 };
    let diagonal_length = offset_len0.min(offset_len1);
    if diagonal_length <= 0 {
        return Err(ShapeError::DiagonalOutOfRange { offset }.into());
    }
    let diagonal_length = diagonal_length as usize;

    let mut result_dims: Dims = Dims::with_capacity(dims.len() - 1);
    result_dims.push(diagonal_length);
    result_dims.extend_from_slice(&dims[2..]);

    let mut result = tensor.empty_like::<T>(&result_dims);
    let projection_size = result.len() / diagonal_length;

    // projections walk in row-major order on both sides
    let source_projection = strides_for(dims, false);
    let result_projection = strides_for(&result_dims, false);

    let mut source_coords: Dims = Dims::from_elem(0, dims.len());
    let mut result_coords: Dims = Dims::from_elem(0, result_dims.len());

    for diag_index in 0..diagonal_length {
        source_coords[0] = if offset < 0 {
            diag_index + offset.unsigned_abs()
        } else {
            diag_index
        };
        source_coords[1] = if offset > 0 {
            diag_index + offset as usize
        } else {
            diag_index
        };
        result_coords[0] = diag_index;

        for projection_index in 0..projection_size {
            decompose_index(&source_projection, false, projection_index, &mut source_coords, 2);
            decompose_index(&result_projection, false, projection_index, &mut result_coords, 1);
            result.set(&result_coords, tensor.get(&source_coords)?)?;
        }
    }

    Ok(result)
}

/// Builds a square-plane tensor whose diagonal at `offset` holds the
/// given values, every other element defaulted.
///
/// The diagonal's axis 0 runs along the constructed diagonal; its
/// remaining axes become axes `2..` of the result. Both plane axes get
/// length `diagonal.dims()[0] + offset.abs()`.
pub fn create_from_diagonal<T, S>(diagonal: &S, offset: isize) -> Result<S::Owned<T>, TensorError>
where
    T: Element,
    S: Tensor<T>,
{
    require_rank(diagonal, 1)?;

    let diag_dims = diagonal.dims();
    let diagonal_length = diag_dims[0];
    let axis_length = diagonal_length + offset.unsigned_abs();

    let mut result_dims: Dims = Dims::with_capacity(diag_dims.len() + 1);
    result_dims.push(axis_length);
    result_dims.push(axis_length);
    result_dims.extend_from_slice(&diag_dims[1..]);

    let mut result = diagonal.empty_like::<T>(&result_dims);
    let projection_size = diagonal.len() / diagonal_length.max(1);

    let diag_projection = strides_for(diag_dims, false);

    let mut diag_coords: Dims = Dims::from_elem(0, diag_dims.len());
    let mut result_coords: Dims = Dims::from_elem(0, result_dims.len());

    for diag_index in 0..diagonal_length {
        result_coords[0] = if offset < 0 {
            diag_index + offset.unsigned_abs()
        } else {
            diag_index
        };
        result_coords[1] = if offset > 0 {
            diag_index + offset as usize
        } else {
            diag_index
        };
        diag_coords[0] = diag_index;

        for projection_index in 0..projection_size {
            decompose_index(&diag_projection, false, projection_index, &mut diag_coords, 1);
            result_coords[2..].copy_from_slice(&diag_coords[1..]);
            result.set(&result_coords, diagonal.get(&diag_coords)?)?;
        }
    }

    Ok(result)
}

fn get_triangle_impl<T, S>(
    tensor: &S,
    offset: isize,
    upper: bool,
) -> Result<S::Owned<T>, TensorError>
where
    T: Element,
    S: Tensor<T>,
{
    require_rank(tensor, 2)?;

    let dims = tensor.dims();
    let axis_len0 = dims[0] as isize;
    let axis_len1 = dims[1] as isize;
    let diagonal_length = axis_len0.max(axis_len1);

    let mut result = tensor.clone_empty();
    let projection_size = tensor.len() / (dims[0] * dims[1]);
    let projection_strides = strides_for(dims, false);

    let mut coords: Dims = Dims::from_elem(0, dims.len());

    for diag_index in 0..diagonal_length {
        let mut tri_index0 = if offset > 0 { diag_index - offset } else { diag_index };
        let mut tri_index1 = if offset > 0 { diag_index } else { diag_index + offset };

        // the lower triangle walks axis 0 down from the diagonal, the
        // upper triangle walks axis 1 right from it
        if tri_index0 < 0 {
            if upper {
                continue;
            }
            tri_index0 = 0;
        }
        if tri_index1 < 0 {
            if upper {
                tri_index1 = 0;
            } else {
                continue;
            }
        }

        while tri_index0 < axis_len0 && tri_index1 < axis_len1 {
            coords[0] = tri_index0 as usize;
            coords[1] = tri_index1 as usize;

            for projection_index in 0..projection_size {
                decompose_index(&projection_strides, false, projection_index, &mut coords, 2);
                result.set(&coords, tensor.get(&coords)?)?;
            }

            if upper {
                tri_index1 += 1;
            } else {
                tri_index0 += 1;
            }
        }
    }

    Ok(result)
}

/// Keeps the elements on and below the diagonal at `offset`, defaulting
/// the rest.
pub fn get_triangle<T, S>(tensor: &S, offset: isize) -> Result<S::Owned<T>, TensorError>
where
    T: Element,
    S: Tensor<T>,
{
    get_triangle_impl(tensor, offset, false)
}

/// Keeps the elements on and above the diagonal at `offset`, defaulting
/// the rest.
pub fn get_upper_triangle<T, S>(tensor: &S, offset: isize) -> Result<S::Owned<T>, TensorError>
where
    T: Element,
    S: Tensor<T>,
{
    get_triangle_impl(tensor, offset, true)
}
