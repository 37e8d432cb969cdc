use crate::buffer::CpuBuffer;
use crate::error::TensorError;
use crate::ops::cpu_buffer_for;
use crate::ops::traits::LinopNumeric;
use crate::tensor::utils::normalize_dim;
use crate::tensor::Tensor;

/// Picks `index` along `dim` and drops that dimension (`x[..., index, ...]`).
pub fn select_op(tensor: &Tensor, dim: isize, index: usize) -> Result<Tensor, TensorError> {
    let shape = tensor.shape();
    let dim = normalize_dim(dim, shape.len())?;
    if index >= shape[dim] {
        return Err(TensorError::IndexOutOfBounds { index, dim, size: shape[dim] });
    }

    let outer: usize = shape[..dim].iter().product();
    let inner: usize = shape[dim + 1..].iter().product();
    let size = shape[dim];
    let out_buffer = match cpu_buffer_for(tensor, "select")? {
        CpuBuffer::F32(data) => select_kernel(data.as_slice(), outer, size, inner, index),
        CpuBuffer::F64(data) => select_kernel(data.as_slice(), outer, size, inner, index),
    };

    let mut new_shape = shape;
    new_shape.remove(dim);
    Tensor::from_cpu_buffer(out_buffer, new_shape, tensor.requires_grad())
}

fn select_kernel<T: LinopNumeric>(data: &[T], outer: usize, size: usize, inner: usize, index: usize) -> CpuBuffer {
    let mut out = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        let start = (o * size + index) * inner;
        out.extend_from_slice(&data[start..start + inner]);
    }
    T::into_buffer(out)
}

impl Tensor {
    /// See [`select_op`].
    pub fn select(&self, dim: isize, index: usize) -> Result<Tensor, TensorError> {
        select_op(self, dim, index)
    }
}
