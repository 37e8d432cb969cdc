use crate::buffer::CpuBuffer;
use crate::error::TensorError;
use crate::ops::cpu_buffer_for;
use crate::ops::traits::LinopNumeric;
use crate::tensor::utils::{calculate_strides, normalize_dim};
use crate::tensor::Tensor;

/// Swaps two dimensions of a tensor, returning a new contiguous tensor.
///
/// # Arguments
/// * `tensor`: The input tensor.
/// * `dim1`, `dim2`: The dimensions to swap (negative values count from the end).
pub fn transpose_op(tensor: &Tensor, dim1: isize, dim2: isize) -> Result<Tensor, TensorError> {
    let shape = tensor.shape();
    let rank = shape.len();
    let dim1 = normalize_dim(dim1, rank)?;
    let dim2 = normalize_dim(dim2, rank)?;
    if dim1 == dim2 {
        return Ok(tensor.clone());
    }

    let mut new_shape = shape.clone();
    new_shape.swap(dim1, dim2);

    let out_buffer = match cpu_buffer_for(tensor, "transpose")? {
        CpuBuffer::F32(data) => transpose_kernel(data.as_slice(), &shape, dim1, dim2),
        CpuBuffer::F64(data) => transpose_kernel(data.as_slice(), &shape, dim1, dim2),
    };
    Tensor::from_cpu_buffer(out_buffer, new_shape, tensor.requires_grad())
}

fn transpose_kernel<T: LinopNumeric>(data: &[T], shape: &[usize], dim1: usize, dim2: usize) -> CpuBuffer {
    let mut out_shape = shape.to_vec();
    out_shape.swap(dim1, dim2);
    let mut source_strides = calculate_strides(shape);
    source_strides.swap(dim1, dim2);

    let mut out = Vec::with_capacity(data.len());
    for index in 0..data.len() {
        let mut remaining = index;
        let mut source = 0;
        for d in (0..out_shape.len()).rev() {
            source += (remaining % out_shape[d]) * source_strides[d];
            remaining /= out_shape[d];
        }
        out.push(data[source]);
    }
    T::into_buffer(out)
}

impl Tensor {
    /// Swaps two dimensions, see [`transpose_op`].
    pub fn transpose(&self, dim1: isize, dim2: isize) -> Result<Tensor, TensorError> {
        transpose_op(self, dim1, dim2)
    }
}
