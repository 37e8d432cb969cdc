use crate::error::TensorError;
use crate::ops::check_same_placement;
use crate::tensor::Tensor;
use approx::AbsDiffEq;

/// Default relative tolerance for [`allclose`].
pub const DEFAULT_RTOL: f64 = 1e-5;
/// Default absolute tolerance for [`allclose`].
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Element-wise `|a - b| <= atol + rtol * |b|` over two tensors of identical shape.
///
/// # Errors
/// `ShapeMismatch` when the shapes differ, placement errors when dtype or device differ.
pub fn allclose(a: &Tensor, b: &Tensor, rtol: f64, atol: f64) -> Result<bool, TensorError> {
    check_same_placement(a, b, "allclose")?;
    let a_shape = a.shape();
    let b_shape = b.shape();
    if a_shape != b_shape {
        return Err(TensorError::ShapeMismatch {
            expected: a_shape,
            actual: b_shape,
            operation: "allclose".to_string(),
        });
    }
    let a_data = a.to_f64_vec()?;
    let b_data = b.to_f64_vec()?;
    Ok(a_data
        .iter()
        .zip(b_data.iter())
        .all(|(x, y)| x.abs_diff_eq(y, atol + rtol * y.abs())))
}

impl Tensor {
    /// [`allclose`] with the default tolerances.
    pub fn allclose(&self, other: &Tensor) -> Result<bool, TensorError> {
        allclose(self, other, DEFAULT_RTOL, DEFAULT_ATOL)
    }
}
