//! The trivial operator backed by a dense matrix.

use crate::error::LinOpError;
use crate::operator::{LinearOperator, Operator, OperatorMeta};
use crate::primitive::Capabilities;
use linoprust_core::Tensor;

/// Wraps a dense `[batch..., nrows, ncols]` tensor. All four primitives are native.
pub struct MatrixLinearOperator {
    mat: Tensor,
}

impl MatrixLinearOperator {
    /// # Errors
    /// `LinOpError::Construction` if `mat` has fewer than 2 dims, or if `is_hermitian`
    /// is set on a non-square matrix. Symmetry of the values is not checked.
    pub fn wrap(mat: &Tensor, is_hermitian: bool) -> Result<LinearOperator, LinOpError> {
        let meta = OperatorMeta::of_tensor(mat).hermitian(is_hermitian);
        LinearOperator::new(MatrixLinearOperator { mat: mat.clone() }, meta)
    }

    pub fn mat(&self) -> &Tensor {
        &self.mat
    }

    fn adjoint_mat(&self) -> Result<Tensor, LinOpError> {
        Ok(self.mat.transpose(-2, -1)?)
    }
}

/// `mat @ x` for a batched vector `x`.
fn apply_to_vector(mat: &Tensor, x: &Tensor) -> Result<Tensor, LinOpError> {
    Ok(mat.matmul(&x.unsqueeze(-1)?)?.squeeze(-1)?)
}

impl Operator for MatrixLinearOperator {
    fn name(&self) -> String {
        "MatrixLinearOperator".to_string()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        apply_to_vector(&self.mat, x)
    }

    fn rmv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        apply_to_vector(&self.adjoint_mat()?, x)
    }

    fn mm_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        Ok(self.mat.matmul(x)?)
    }

    fn rmm_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        Ok(self.adjoint_mat()?.matmul(x)?)
    }

    fn named_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        Ok(vec![(format!("{}mat", prefix), self.mat.clone())])
    }
}
