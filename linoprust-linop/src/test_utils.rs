//! Dense-backed operators with restricted capabilities, shared by the unit tests.

use crate::error::LinOpError;
use crate::operator::{LinearOperator, Operator, OperatorMeta};
use crate::primitive::{Capabilities, Primitive};
use linoprust_core::Tensor;

fn apply(mat: &Tensor, x: &Tensor) -> Result<Tensor, LinOpError> {
    Ok(mat.matmul(&x.unsqueeze(-1)?)?.squeeze(-1)?)
}

fn mat_params(mat: &Tensor, prefix: &str) -> Vec<(String, Tensor)> {
    vec![(format!("{}mat", prefix), mat.clone())]
}

/// Implements nothing; construction must fail.
pub struct LinOp0;

impl Operator for LinOp0 {
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }
}

impl LinOp0 {
    pub fn build(mat: &Tensor) -> Result<LinearOperator, LinOpError> {
        LinearOperator::new(LinOp0, OperatorMeta::of_tensor(mat))
    }
}

/// Implements `mv` only.
pub struct LinOp1 {
    pub mat: Tensor,
}

impl Operator for LinOp1 {
    fn capabilities(&self) -> Capabilities {
        Capabilities::from_primitives(&[Primitive::Mv])
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        apply(&self.mat, x)
    }

    fn named_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        Ok(mat_params(&self.mat, prefix))
    }
}

impl LinOp1 {
    pub fn build(mat: &Tensor) -> Result<LinearOperator, LinOpError> {
        Self::build_hermitian(mat, false)
    }

    pub fn build_hermitian(mat: &Tensor, is_hermitian: bool) -> Result<LinearOperator, LinOpError> {
        let meta = OperatorMeta::of_tensor(mat).hermitian(is_hermitian);
        LinearOperator::new(LinOp1 { mat: mat.clone() }, meta)
    }
}

/// Implements `mv` and `rmv`.
pub struct LinOp2 {
    pub mat: Tensor,
}

impl Operator for LinOp2 {
    fn capabilities(&self) -> Capabilities {
        Capabilities::from_primitives(&[Primitive::Mv, Primitive::Rmv])
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        apply(&self.mat, x)
    }

    fn rmv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        apply(&self.mat.transpose(-2, -1)?, x)
    }

    fn named_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        Ok(mat_params(&self.mat, prefix))
    }
}

impl LinOp2 {
    pub fn build(mat: &Tensor) -> Result<LinearOperator, LinOpError> {
        LinearOperator::new(LinOp2 { mat: mat.clone() }, OperatorMeta::of_tensor(mat))
    }
}

/// Implements `mv` but never declares its parameters.
pub struct Opaque {
    pub mat: Tensor,
}

impl Operator for Opaque {
    fn capabilities(&self) -> Capabilities {
        Capabilities::from_primitives(&[Primitive::Mv])
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        apply(&self.mat, x)
    }
}

impl Opaque {
    pub fn build(mat: &Tensor) -> Result<LinearOperator, LinOpError> {
        LinearOperator::new(Opaque { mat: mat.clone() }, OperatorMeta::of_tensor(mat))
    }
}

/// Declares `rmv` without overriding its hook.
pub struct Overclaiming {
    pub mat: Tensor,
}

impl Operator for Overclaiming {
    fn capabilities(&self) -> Capabilities {
        Capabilities::from_primitives(&[Primitive::Mv, Primitive::Rmv])
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        apply(&self.mat, x)
    }
}

impl Overclaiming {
    pub fn build(mat: &Tensor) -> Result<LinearOperator, LinOpError> {
        LinearOperator::new(Overclaiming { mat: mat.clone() }, OperatorMeta::of_tensor(mat))
    }
}

/// Asserts equal shapes and values within the default `allclose` tolerances.
pub fn assert_close(actual: &Tensor, expected: &Tensor) {
    assert_eq!(actual.shape(), expected.shape(), "shape differs");
    assert!(
        actual.allclose(expected).unwrap(),
        "{:?} != {:?}",
        actual,
        expected
    );
}
