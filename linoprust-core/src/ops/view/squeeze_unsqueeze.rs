use crate::error::TensorError;
use crate::tensor::utils::normalize_dim;
use crate::tensor::Tensor;

/// Inserts a dimension of size 1 at `dim` (in `-(rank+1)..=rank`). Shares the buffer.
pub fn unsqueeze_op(tensor: &Tensor, dim: isize) -> Result<Tensor, TensorError> {
    let guard = tensor.read_data();
    let dim = normalize_dim(dim, guard.shape.len() + 1)?;
    let mut new_shape = guard.shape.clone();
    new_shape.insert(dim, 1);
    Ok(Tensor::from_tensor_data(guard.reshaped(new_shape)?))
}

/// Removes the dimension `dim`, which must have size 1. Shares the buffer.
pub fn squeeze_op(tensor: &Tensor, dim: isize) -> Result<Tensor, TensorError> {
    let guard = tensor.read_data();
    let dim = normalize_dim(dim, guard.shape.len())?;
    if guard.shape[dim] != 1 {
        let mut expected = guard.shape.clone();
        expected[dim] = 1;
        return Err(TensorError::ShapeMismatch {
            expected,
            actual: guard.shape.clone(),
            operation: "squeeze".to_string(),
        });
    }
    let mut new_shape = guard.shape.clone();
    new_shape.remove(dim);
    Ok(Tensor::from_tensor_data(guard.reshaped(new_shape)?))
}

impl Tensor {
    pub fn unsqueeze(&self, dim: isize) -> Result<Tensor, TensorError> {
        unsqueeze_op(self, dim)
    }

    pub fn squeeze(&self, dim: isize) -> Result<Tensor, TensorError> {
        squeeze_op(self, dim)
    }
}
