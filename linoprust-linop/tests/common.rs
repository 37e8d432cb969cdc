use linoprust_linop::linoprust_core::Tensor;
use linoprust_linop::{Capabilities, LinOpError, LinearOperator, Operator, OperatorMeta, Primitive};

// Dense-backed operators exposing a chosen subset of primitives.

#[allow(dead_code)]
pub(crate) struct BaseLinOp {
    pub mat: Tensor,
    pub implemented: Capabilities,
}

impl BaseLinOp {
    fn apply(mat: &Tensor, x: &Tensor) -> Result<Tensor, LinOpError> {
        Ok(mat.matmul(&x.unsqueeze(-1)?)?.squeeze(-1)?)
    }
}

impl Operator for BaseLinOp {
    fn name(&self) -> String {
        match self.implemented.len() {
            0 => "LinOp0",
            1 => "LinOp1",
            _ => "LinOp2",
        }
        .to_string()
    }

    fn capabilities(&self) -> Capabilities {
        self.implemented
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        Self::apply(&self.mat, x)
    }

    fn rmv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        Self::apply(&self.mat.transpose(-2, -1)?, x)
    }

    fn named_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        Ok(vec![(format!("{}mat", prefix), self.mat.clone())])
    }
}

fn build(mat: &Tensor, is_hermitian: bool, implemented: &[Primitive]) -> Result<LinearOperator, LinOpError> {
    let meta = OperatorMeta::of_tensor(mat).hermitian(is_hermitian);
    let op = BaseLinOp {
        mat: mat.clone(),
        implemented: Capabilities::from_primitives(implemented),
    };
    LinearOperator::new(op, meta)
}

/// Implements nothing.
#[allow(dead_code)]
pub(crate) fn linop0(mat: &Tensor) -> Result<LinearOperator, LinOpError> {
    build(mat, false, &[])
}

/// Implements `mv` only.
#[allow(dead_code)]
pub(crate) fn linop1(mat: &Tensor, is_hermitian: bool) -> Result<LinearOperator, LinOpError> {
    build(mat, is_hermitian, &[Primitive::Mv])
}

/// Implements `mv` and `rmv`.
#[allow(dead_code)]
pub(crate) fn linop2(mat: &Tensor, is_hermitian: bool) -> Result<LinearOperator, LinOpError> {
    build(mat, is_hermitian, &[Primitive::Mv, Primitive::Rmv])
}

#[allow(dead_code)]
pub(crate) fn assert_str_contains(s: &str, parts: &[&str]) {
    for part in parts {
        assert!(s.contains(part), "{:?} not found in {:?}", part, s);
    }
}

#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
