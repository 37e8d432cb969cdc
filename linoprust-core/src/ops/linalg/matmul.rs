use crate::buffer::CpuBuffer;
use crate::error::TensorError;
use crate::ops::traits::LinopNumeric;
use crate::ops::{check_same_placement, cpu_buffer_for};
use crate::tensor::utils::{broadcast_shapes, broadcast_source_index};
use crate::tensor::Tensor;
use log::trace;

/// Performs the matrix product `a @ b`.
///
/// Semantics:
/// * 1-D operands are promoted: `a` gets a leading unit dim, `b` a trailing one.
///   The promoted dims are removed from the result.
/// * The last two dims are multiplied (`[.., M, K] @ [.., K, N] -> [.., M, N]`).
/// * Leading (batch) dims are broadcast.
///
/// The inner product is always accumulated from `k = 0` upwards, so multiplying by a
/// matrix gives, column for column, exactly the result of multiplying by each column.
///
/// # Errors
/// * `IncompatibleShapes` for 0-D inputs, inner-dimension or batch mismatches.
/// * `DeviceMismatch` / `DataTypeMismatch` if the operands differ in placement.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, TensorError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    let incompatible = || TensorError::IncompatibleShapes {
        shape1: a_shape.clone(),
        shape2: b_shape.clone(),
    };

    if a_shape.is_empty() || b_shape.is_empty() {
        return Err(incompatible());
    }
    check_same_placement(a, b, "matmul")?;

    // --- Promote vectors ---
    let a_is_vec = a_shape.len() == 1;
    let b_is_vec = b_shape.len() == 1;
    let a_mat = if a_is_vec { vec![1, a_shape[0]] } else { a_shape.clone() };
    let b_mat = if b_is_vec { vec![b_shape[0], 1] } else { b_shape.clone() };

    let (m, k) = (a_mat[a_mat.len() - 2], a_mat[a_mat.len() - 1]);
    let (k_b, n) = (b_mat[b_mat.len() - 2], b_mat[b_mat.len() - 1]);
    if k != k_b {
        return Err(incompatible());
    }

    let batch_a = &a_mat[..a_mat.len() - 2];
    let batch_b = &b_mat[..b_mat.len() - 2];
    let batch = broadcast_shapes(batch_a, batch_b).map_err(|_| incompatible())?;

    let a_buffer = cpu_buffer_for(a, "matmul")?;
    let b_buffer = cpu_buffer_for(b, "matmul")?;
    let dims = MatmulDims { batch: &batch, batch_a, batch_b, m, k, n };
    let out_buffer = match (&a_buffer, &b_buffer) {
        (CpuBuffer::F32(a_data), CpuBuffer::F32(b_data)) => batched_matmul_kernel(a_data.as_slice(), b_data.as_slice(), &dims),
        (CpuBuffer::F64(a_data), CpuBuffer::F64(b_data)) => batched_matmul_kernel(a_data.as_slice(), b_data.as_slice(), &dims),
        _ => {
            return Err(TensorError::InternalError(
                "matmul buffers disagree with their declared dtype".to_string(),
            ))
        }
    };

    trace!("matmul {:?} @ {:?} over batch {:?}", a_shape, b_shape, batch);

    let mut out_shape = batch.clone();
    if !a_is_vec {
        out_shape.push(m);
    }
    if !b_is_vec {
        out_shape.push(n);
    }

    Tensor::from_cpu_buffer(out_buffer, out_shape, a.requires_grad() || b.requires_grad())
}

struct MatmulDims<'a> {
    batch: &'a [usize],
    batch_a: &'a [usize],
    batch_b: &'a [usize],
    m: usize,
    k: usize,
    n: usize,
}

fn batched_matmul_kernel<T: LinopNumeric>(a: &[T], b: &[T], dims: &MatmulDims<'_>) -> CpuBuffer {
    let MatmulDims { batch, batch_a, batch_b, m, k, n } = *dims;
    let n_batches: usize = batch.iter().product();
    let mut out = vec![T::zero(); n_batches * m * n];

    for bi in 0..n_batches {
        let a_off = broadcast_source_index(bi, batch, batch_a) * m * k;
        let b_off = broadcast_source_index(bi, batch, batch_b) * k * n;
        let o_off = bi * m * n;
        for i in 0..m {
            for j in 0..n {
                let mut sum = T::zero();
                for l in 0..k {
                    sum += a[a_off + i * k + l] * b[b_off + l * n + j];
                }
                out[o_off + i * n + j] = sum;
            }
        }
    }
    T::into_buffer(out)
}

impl Tensor {
    /// Matrix product, see [`matmul_op`].
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        matmul_op(self, other)
    }
}
