use crate::contract;
use crate::error::LinOpError;
use crate::operator::{LinearOperator, Operator};
use crate::primitive::{Capabilities, Primitive};
use linoprust_core::Tensor;

const NAME: &str = "MatmulLinearOperator";

/// Lazy product `A @ B`.
///
/// `mv` is `A.mv(B.mv(x))` and `rmv` is `B.rmv(A.rmv(x))`; the matrix primitives
/// compose the same way. The batch shape is the broadcast of both batch shapes.
pub struct MatmulLinearOperator {
    a: LinearOperator,
    b: LinearOperator,
}

impl MatmulLinearOperator {
    /// # Errors
    /// `LinOpError::Construction` if `a.ncols() != b.nrows()`, if dtypes or devices
    /// differ, or if the batch shapes do not broadcast.
    pub fn compose(a: &LinearOperator, b: &LinearOperator) -> Result<LinearOperator, LinOpError> {
        let meta = contract::check_composable(NAME, a, b)?;
        Ok(LinearOperator::assemble(
            Box::new(MatmulLinearOperator {
                a: a.clone(),
                b: b.clone(),
            }),
            meta,
        ))
    }

    pub fn lhs(&self) -> &LinearOperator {
        &self.a
    }

    pub fn rhs(&self) -> &LinearOperator {
        &self.b
    }

    /// The constituent that cannot serve `primitive`, if any.
    fn lacking(&self, primitive: Primitive) -> Option<&LinearOperator> {
        [&self.a, &self.b]
            .into_iter()
            .find(|op| !op.available_primitives().contains(primitive))
    }
}

impl Operator for MatmulLinearOperator {
    fn name(&self) -> String {
        NAME.to_string()
    }

    // Forward primitives are always declared; a constituent lacking them fails at call time.
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::from_primitives(&[Primitive::Mv, Primitive::Mm]);
        for adjoint in [Primitive::Rmv, Primitive::Rmm] {
            if self.lacking(adjoint).is_none() {
                caps = caps.with(adjoint);
            }
        }
        caps
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.a.mv(&self.b.mv(x)?)
    }

    fn rmv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.b.rmv(&self.a.rmv(x)?)
    }

    fn mm_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.a.mm(&self.b.mm(x)?)
    }

    fn rmm_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.b.rmm(&self.a.rmm(x)?)
    }

    fn named_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        let mut params = self.a.named_params(&format!("{}A.", prefix))?;
        params.extend(self.b.named_params(&format!("{}B.", prefix))?);
        Ok(params)
    }

    fn constituents(&self) -> Vec<&LinearOperator> {
        vec![&self.a, &self.b]
    }

    fn capability_hint(&self, primitive: Primitive) -> String {
        match self.lacking(primitive) {
            Some(op) => format!(
                "requires {} on both constituents, {} lacks it: {}",
                primitive,
                op.name(),
                op.operator().capability_hint(primitive)
            ),
            None => format!("requires {} on both constituents", primitive),
        }
    }
}
