use crate::buffer::CpuBuffer;
use crate::error::TensorError;
use crate::ops::traits::LinopNumeric;
use crate::ops::{check_same_placement, cpu_buffer_for};
use crate::tensor::utils::normalize_dim;
use crate::tensor::Tensor;

/// Stacks tensors of identical shape along a new dimension `dim` (in `-(rank+1)..=rank`).
///
/// # Errors
/// * `EmptyTensorList` if `tensors` is empty.
/// * `ShapeMismatch` if the shapes differ.
/// * `DataTypeMismatch` / `DeviceMismatch` if placements differ.
pub fn stack_op(tensors: &[Tensor], dim: isize) -> Result<Tensor, TensorError> {
    let first = tensors.first().ok_or(TensorError::EmptyTensorList)?;
    let shape = first.shape();
    let dim = normalize_dim(dim, shape.len() + 1)?;

    for other in &tensors[1..] {
        check_same_placement(first, other, "stack")?;
        let other_shape = other.shape();
        if other_shape != shape {
            return Err(TensorError::ShapeMismatch {
                expected: shape.clone(),
                actual: other_shape,
                operation: "stack".to_string(),
            });
        }
    }

    let buffers = tensors
        .iter()
        .map(|t| cpu_buffer_for(t, "stack"))
        .collect::<Result<Vec<_>, _>>()?;
    let outer: usize = shape[..dim].iter().product();
    let inner: usize = shape[dim..].iter().product();

    let out_buffer = match &buffers[0] {
        CpuBuffer::F32(_) => {
            let slices = buffers
                .iter()
                .map(|b| match b {
                    CpuBuffer::F32(data) => Ok(data.as_slice()),
                    other => Err(mixed_buffer(other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            stack_kernel(&slices, outer, inner)
        }
        CpuBuffer::F64(_) => {
            let slices = buffers
                .iter()
                .map(|b| match b {
                    CpuBuffer::F64(data) => Ok(data.as_slice()),
                    other => Err(mixed_buffer(other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            stack_kernel(&slices, outer, inner)
        }
    };

    let mut new_shape = shape;
    new_shape.insert(dim, tensors.len());
    let requires_grad = tensors.iter().any(|t| t.requires_grad());
    Tensor::from_cpu_buffer(out_buffer, new_shape, requires_grad)
}

fn mixed_buffer(buffer: &CpuBuffer) -> TensorError {
    TensorError::InternalError(format!(
        "stack received a {:?} buffer after dtype validation",
        buffer.dtype()
    ))
}

fn stack_kernel<T: LinopNumeric>(slices: &[&[T]], outer: usize, inner: usize) -> CpuBuffer {
    let mut out = Vec::with_capacity(outer * inner * slices.len());
    for o in 0..outer {
        for slice in slices {
            out.extend_from_slice(&slice[o * inner..(o + 1) * inner]);
        }
    }
    T::into_buffer(out)
}

#[cfg(test)]
mod tests {
    use super::stack_op;
    use crate::error::TensorError;
    use crate::tensor::Tensor;

    #[test]
    fn test_stack_last_dim() {
        let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
        let b = Tensor::new(vec![4.0, 5.0, 6.0], vec![3]).unwrap();
        let s = stack_op(&[a, b], -1).unwrap();
        assert_eq!(s.shape(), vec![3, 2]);
        assert_eq!(s.get_f32_data().unwrap(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_stack_first_dim() {
        let a = Tensor::new_f64(vec![1.0, 2.0], vec![1, 2]).unwrap();
        let b = Tensor::new_f64(vec![3.0, 4.0], vec![1, 2]).unwrap();
        let s = stack_op(&[a, b], 0).unwrap();
        assert_eq!(s.shape(), vec![2, 1, 2]);
        assert_eq!(s.get_f64_data().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_stack_errors() {
        assert_eq!(stack_op(&[], 0).unwrap_err(), TensorError::EmptyTensorList);
        let a = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let b = Tensor::new(vec![1.0], vec![1]).unwrap();
        assert!(matches!(stack_op(&[a.clone(), b], 0), Err(TensorError::ShapeMismatch { .. })));
        let c = Tensor::new_f64(vec![1.0, 2.0], vec![2]).unwrap();
        assert!(matches!(stack_op(&[a, c], 0), Err(TensorError::DataTypeMismatch { .. })));
    }
}
