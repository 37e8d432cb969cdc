use crate::error::TensorError;
use std::cmp::max;

/// Calculates the contiguous (row-major) strides for a given shape.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, TensorError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = shape_a.get(rank_a.wrapping_sub(1 + i)).copied().unwrap_or(1);
        let dim_b = shape_b.get(rank_b.wrapping_sub(1 + i)).copied().unwrap_or(1);

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(TensorError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

/// Maps a linear index in a broadcast output shape back to the linear index in
/// one of the (smaller or size-1) input shapes.
pub fn broadcast_source_index(index: usize, out_shape: &[usize], in_shape: &[usize]) -> usize {
    let out_rank = out_shape.len();
    let in_rank = in_shape.len();
    let in_strides = calculate_strides(in_shape);
    let mut remaining = index;
    let mut source = 0;
    for d in (0..out_rank).rev() {
        let coord = remaining % out_shape[d];
        remaining /= out_shape[d];
        if d + in_rank >= out_rank {
            let in_d = d + in_rank - out_rank;
            if in_shape[in_d] != 1 {
                source += coord * in_strides[in_d];
            }
        }
    }
    source
}

/// Converts a possibly negative dimension index into a positive one for a tensor of `rank`.
pub fn normalize_dim(dim: isize, rank: usize) -> Result<usize, TensorError> {
    let resolved = if dim < 0 { dim + rank as isize } else { dim };
    if resolved < 0 || resolved as usize >= rank {
        return Err(TensorError::DimensionMismatch {
            expected: rank,
            actual: dim.unsigned_abs(),
        });
    }
    Ok(resolved as usize)
}
